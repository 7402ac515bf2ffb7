//! Graphviz DOT output.
//!
//! Nodes are pinned to their grid positions (`pos="x,y!"`, in inches) so
//! `neato -n` or `fdp` reproduce the placement of the JSON output. Each node
//! is an HTML-like table with one port per column.

use crate::graph::node::{DiagramNode, NodeColumn};
use crate::graph::view::Diagram;
use crate::infer::Relationship;
use std::fmt::Write;

const POINTS_PER_INCH: f64 = 72.0;
const HEADER_COLOR: &str = "#4a5568";
const TYPE_COLOR: &str = "#666666";

/// Render the diagram as a `digraph` with one table-shaped node per table
pub fn to_dot(diagram: &Diagram) -> String {
    let mut out = String::from("digraph ERD {\n");
    out.push_str("  graph [pad=\"0.5\", layout=neato];\n");
    out.push_str("  node [shape=none, margin=0];\n");
    out.push_str("  edge [dir=forward];\n\n");

    for node in &diagram.nodes {
        // DOT's y axis points up
        let _ = writeln!(
            out,
            "  {} [pos=\"{:.2},{:.2}!\", label=<{}>];",
            quote_id(&node.id),
            node.position.x / POINTS_PER_INCH,
            -node.position.y / POINTS_PER_INCH,
            table_label(node)
        );
    }

    if !diagram.relationships.is_empty() {
        out.push('\n');
    }
    for rel in &diagram.relationships {
        let _ = writeln!(
            out,
            "  {}:{} -> {} [label=\"{}\", arrowhead={}];",
            quote_id(&rel.source_table),
            quote_id(&rel.source_column),
            edge_target(diagram, rel),
            escape_string(&rel.source_column),
            if rel.relation_type.is_symmetric() { "empty" } else { "normal" }
        );
    }

    out.push_str("}\n");
    out
}

/// `table:column` when the target node has that column, else just `table`
fn edge_target(diagram: &Diagram, rel: &Relationship) -> String {
    let has_port = diagram
        .get_node(&rel.target_table)
        .is_some_and(|n| n.data.columns.iter().any(|c| c.name == rel.target_column));
    if has_port {
        format!("{}:{}", quote_id(&rel.target_table), quote_id(&rel.target_column))
    } else {
        quote_id(&rel.target_table)
    }
}

fn table_label(node: &DiagramNode) -> String {
    let mut label = String::from(
        "<TABLE BORDER=\"0\" CELLBORDER=\"1\" CELLSPACING=\"0\" CELLPADDING=\"4\">",
    );
    let _ = write!(
        label,
        "<TR><TD BGCOLOR=\"{}\" COLSPAN=\"3\"><FONT COLOR=\"white\"><B>{}</B></FONT></TD></TR>",
        HEADER_COLOR,
        html_escape(&node.data.title)
    );
    for col in &node.data.columns {
        label.push_str(&column_row(col));
    }
    label.push_str("</TABLE>");
    label
}

fn column_row(col: &NodeColumn) -> String {
    let name = html_escape(&col.name);
    let marker = if col.key {
        "PK"
    } else if col.foreign_key {
        "FK"
    } else {
        ""
    };
    format!(
        "<TR><TD ALIGN=\"LEFT\" PORT=\"{name}\">{name}</TD>\
         <TD ALIGN=\"LEFT\"><FONT COLOR=\"{TYPE_COLOR}\">{}</FONT></TD>\
         <TD ALIGN=\"CENTER\">{marker}</TD></TR>",
        html_escape(&col.col_type)
    )
}

fn html_escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Words the DOT grammar reserves; matched case-insensitively
const DOT_KEYWORDS: [&str; 6] = ["node", "edge", "graph", "digraph", "subgraph", "strict"];

/// Bare identifier when possible, otherwise a quoted string.
///
/// Bare IDs may not start with a digit or collide with a keyword.
fn quote_id(s: &str) -> String {
    let bare = s
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && s.chars().all(|c| c.is_alphanumeric() || c == '_')
        && !DOT_KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(s));
    if bare {
        s.to_string()
    } else {
        format!("\"{}\"", escape_string(s))
    }
}

/// Escape the body of a double-quoted DOT string
fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
