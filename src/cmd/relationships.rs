//! Relationships command: print inferred relationships without layout.

use super::load_table_file;
use crate::infer::{detect_relationships, join_tables, MatchRule, Relationship};
use crate::session::SessionStore;
use anyhow::Result;
use schemars::JsonSchema;
use serde::Serialize;
use std::path::PathBuf;

/// JSON output for the relationships command
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipsJsonOutput {
    pub relationships: Vec<Relationship>,
    pub join_tables: Vec<String>,
    pub stats: RelationshipStats,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipStats {
    pub table_count: usize,
    pub relationship_count: usize,
    pub explicit: usize,
    pub suffix: usize,
    pub shared: usize,
}

pub fn run(file: Option<PathBuf>, json: bool, session_dir: Option<PathBuf>) -> Result<()> {
    let tables = match file {
        Some(ref path) => load_table_file(path)?,
        None => SessionStore::open(session_dir)?.load_tables()?,
    };

    let relationships = detect_relationships(&tables);
    let joins: Vec<String> = join_tables(&tables).into_iter().map(String::from).collect();
    let count_rule = |rule: MatchRule| relationships.iter().filter(|r| r.rule == rule).count();

    let stats = RelationshipStats {
        table_count: tables.len(),
        relationship_count: relationships.len(),
        explicit: count_rule(MatchRule::Explicit),
        suffix: count_rule(MatchRule::Suffix),
        shared: count_rule(MatchRule::Shared),
    };

    if json {
        let output = RelationshipsJsonOutput {
            relationships,
            join_tables: joins,
            stats,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if relationships.is_empty() {
        println!("No relationships inferred from {} tables.", stats.table_count);
    } else {
        let width = relationships
            .iter()
            .map(|r| r.source_table.len() + r.source_column.len() + 1)
            .max()
            .unwrap_or(0);

        for rel in &relationships {
            let source = format!("{}.{}", rel.source_table, rel.source_column);
            println!(
                "{:<width$}  ->  {}.{}  [{}, {:?}]",
                source,
                rel.target_table,
                rel.target_column,
                rel.relation_type,
                rel.rule,
                width = width
            );
        }
    }

    if !joins.is_empty() {
        println!("\nJoin tables: {}", joins.join(", "));
    }

    eprintln!(
        "\n{} tables, {} relationships ({} explicit, {} by _id suffix, {} by shared name)",
        stats.table_count, stats.relationship_count, stats.explicit, stats.suffix, stats.shared
    );

    Ok(())
}
