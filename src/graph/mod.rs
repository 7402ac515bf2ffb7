//! ERD (Entity-Relationship Diagram) generation module.
//!
//! This module provides:
//! - Table node and relationship edge view models for the graph renderer
//! - Deterministic grid placement
//! - Filtering and focus over a built diagram
//! - Multiple output formats: JSON, Mermaid, DOT (Graphviz)

pub mod edge;
pub mod format;
pub mod layout;
pub mod node;
pub mod view;

pub use edge::{build_edges, marker_for, DiagramEdge, MarkerKind};
pub use format::{to_dot, to_json, to_mermaid, OutputFormat};
pub use layout::{GridLayout, Position};
pub use node::{DiagramNode, HandlePosition};
pub use view::Diagram;
