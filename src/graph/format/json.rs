//! JSON node/edge document for the graph renderer.

use crate::graph::edge::DiagramEdge;
use crate::graph::node::DiagramNode;
use crate::graph::view::Diagram;
use schemars::JsonSchema;
use serde::Serialize;

/// Renderer-ready diagram document
#[derive(Debug, Serialize, JsonSchema)]
pub struct DiagramJson {
    pub nodes: Vec<DiagramNode>,
    pub edges: Vec<DiagramEdge>,
    pub stats: DiagramStats,
}

/// Diagram statistics
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiagramStats {
    pub table_count: usize,
    pub column_count: usize,
    pub relationship_count: usize,
    pub join_tables: Vec<String>,
}

/// Generate JSON output from a diagram
pub fn to_json(diagram: &Diagram) -> String {
    let doc = build_diagram_json(diagram);
    serde_json::to_string_pretty(&doc).unwrap_or_else(|_| "{}".to_string())
}

/// Build the JSON structure
pub fn build_diagram_json(diagram: &Diagram) -> DiagramJson {
    DiagramJson {
        nodes: diagram.nodes.clone(),
        edges: diagram.edges.clone(),
        stats: DiagramStats {
            table_count: diagram.node_count(),
            column_count: diagram.column_count(),
            relationship_count: diagram.edge_count(),
            join_tables: diagram.join_tables.clone(),
        },
    }
}
