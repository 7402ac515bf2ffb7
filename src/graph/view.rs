//! Diagram assembly with filtering and focus capabilities.

use crate::config::{DiagramConfig, EdgeStyleConfig};
use crate::context::ModelingContext;
use crate::graph::edge::{build_edges, DiagramEdge};
use crate::graph::layout::GridLayout;
use crate::graph::node::DiagramNode;
use crate::infer::{detect_relationships, join_tables, Relationship};
use crate::schema::TableData;
use ahash::{AHashMap, AHashSet};
use glob::Pattern;

/// A laid-out entity-relationship diagram
#[derive(Debug, Clone)]
pub struct Diagram {
    /// Nodes in listing order; grid placement follows this order
    pub nodes: Vec<DiagramNode>,
    pub edges: Vec<DiagramEdge>,
    /// Relationships behind `edges`, index-aligned
    pub relationships: Vec<Relationship>,
    /// Tables classified as many-to-many bridges
    pub join_tables: Vec<String>,
    layout: GridLayout,
    style: EdgeStyleConfig,
}

impl Diagram {
    /// Build nodes, infer relationships, build edges and place everything
    pub fn build(
        tables: &[TableData],
        context: Option<&ModelingContext>,
        config: &DiagramConfig,
    ) -> Self {
        let node_ids: AHashSet<&str> = tables.iter().map(|t| t.name.as_str()).collect();

        let relationships: Vec<Relationship> = detect_relationships(tables)
            .into_iter()
            .filter(|r| {
                let known = node_ids.contains(r.target_table.as_str());
                if !known {
                    log::debug!("dropping {}: target is not in the diagram", r);
                }
                known
            })
            .collect();

        let nodes = tables
            .iter()
            .map(|t| {
                let mut node = DiagramNode::from_table(t, context);
                node.mark_foreign_keys(&relationships);
                node
            })
            .collect();

        let mut diagram = Self {
            nodes,
            edges: build_edges(&relationships, &config.edges),
            relationships,
            join_tables: join_tables(tables).into_iter().map(String::from).collect(),
            layout: GridLayout::from_config(&config.layout),
            style: config.edges.clone(),
        };
        diagram.layout.apply(&mut diagram.nodes);
        diagram
    }

    /// Recompute every node position with a new grid
    pub fn relayout(&mut self, layout: GridLayout) {
        self.layout = layout;
        self.layout.apply(&mut self.nodes);
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Filter to include only tables matching the given patterns
    pub fn filter_tables(&mut self, patterns: &[Pattern]) {
        if patterns.is_empty() {
            return;
        }

        let matching: AHashSet<String> = self
            .nodes
            .iter()
            .filter(|n| patterns.iter().any(|p| p.matches(&n.id)))
            .map(|n| n.id.clone())
            .collect();

        self.apply_node_filter(&matching);
    }

    /// Exclude tables matching the given patterns
    pub fn exclude_tables(&mut self, patterns: &[Pattern]) {
        if patterns.is_empty() {
            return;
        }

        let remaining: AHashSet<String> = self
            .nodes
            .iter()
            .filter(|n| !patterns.iter().any(|p| p.matches(&n.id)))
            .map(|n| n.id.clone())
            .collect();

        self.apply_node_filter(&remaining);
    }

    /// Focus on a table and the tables directly connected to it.
    /// An unknown table empties the diagram.
    pub fn focus_table(&mut self, table: &str) {
        let mut keep = AHashSet::new();
        if self.get_node(table).is_some() {
            keep.insert(table.to_string());
            let (outgoing, incoming) = self.build_adjacency_maps();
            for neighbors in [outgoing.get(table), incoming.get(table)].into_iter().flatten() {
                keep.extend(neighbors.iter().cloned());
            }
        }
        self.apply_node_filter(&keep);
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn column_count(&self) -> usize {
        self.nodes.iter().map(|n| n.column_count()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get_node(&self, id: &str) -> Option<&DiagramNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    // Private helper methods

    fn apply_node_filter(&mut self, keep: &AHashSet<String>) {
        self.nodes.retain(|n| keep.contains(&n.id));
        self.relationships
            .retain(|r| keep.contains(&r.source_table) && keep.contains(&r.target_table));
        self.join_tables.retain(|t| keep.contains(t));
        // renumber edge ids and close gaps in the grid
        self.edges = build_edges(&self.relationships, &self.style);
        self.layout.apply(&mut self.nodes);
    }

    fn build_adjacency_maps(
        &self,
    ) -> (AHashMap<String, Vec<String>>, AHashMap<String, Vec<String>>) {
        let mut outgoing: AHashMap<String, Vec<String>> = AHashMap::new();
        let mut incoming: AHashMap<String, Vec<String>> = AHashMap::new();

        for rel in &self.relationships {
            outgoing
                .entry(rel.source_table.clone())
                .or_default()
                .push(rel.target_table.clone());
            incoming
                .entry(rel.target_table.clone())
                .or_default()
                .push(rel.source_table.clone());
        }

        (outgoing, incoming)
    }
}
