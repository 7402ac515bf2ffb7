//! Mermaid `erDiagram` output.
//!
//! Entity and attribute names must be bare identifiers, so anything outside
//! `[A-Za-z0-9_]` becomes `_`. Types lose their length or precision suffix.

use crate::graph::node::{DiagramNode, NodeColumn};
use crate::graph::view::Diagram;
use std::fmt::Write;

/// Render the diagram as a Mermaid entity-relationship block
pub fn to_mermaid(diagram: &Diagram) -> String {
    let mut out = String::from("erDiagram\n");

    for node in &diagram.nodes {
        write_entity(&mut out, node);
    }

    if !diagram.relationships.is_empty() {
        out.push('\n');
    }
    for rel in &diagram.relationships {
        let _ = writeln!(
            out,
            "    {} {} {} : \"{}\"",
            identifier(&rel.source_table),
            rel.relation_type.as_mermaid(),
            identifier(&rel.target_table),
            rel.source_column.replace('"', "'")
        );
    }

    out
}

fn write_entity(out: &mut String, node: &DiagramNode) {
    let _ = writeln!(out, "    {} {{", identifier(&node.id));
    for col in &node.data.columns {
        let mut line = format!("        {} {}", attribute_type(&col.col_type), identifier(&col.name));
        if let Some(marker) = key_marker(col) {
            line.push(' ');
            line.push_str(marker);
        }
        let _ = writeln!(out, "{}", line);
    }
    out.push_str("    }\n");
}

fn key_marker(col: &NodeColumn) -> Option<&'static str> {
    match (col.key, col.foreign_key) {
        (true, _) => Some("PK"),
        (false, true) => Some("FK"),
        _ => None,
    }
}

/// Entity or attribute name
fn identifier(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Attribute type: `VARCHAR(255)` -> `VARCHAR`, blank -> `unknown`
fn attribute_type(raw: &str) -> String {
    let base = raw.split('(').next().unwrap_or(raw).trim();
    if base.is_empty() {
        return "unknown".to_string();
    }
    identifier(base)
}
