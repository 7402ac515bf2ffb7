//! Diagram renderers: the renderer JSON document, Mermaid and Graphviz.

mod dot;
pub(crate) mod json;
mod mermaid;

pub use dot::to_dot;
pub use json::to_json;
pub use mermaid::to_mermaid;
#[allow(unused_imports)]
pub use json::{DiagramJson, DiagramStats};

use crate::graph::view::Diagram;
use std::fmt;
use std::str::FromStr;

/// Diagram output target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Node/edge document for the graph renderer
    #[default]
    Json,
    /// Mermaid erDiagram
    Mermaid,
    /// Graphviz DOT with pinned grid positions
    Dot,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Json, OutputFormat::Mermaid, OutputFormat::Dot];

    /// Canonical name, as accepted by `--format`
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Mermaid => "mermaid",
            OutputFormat::Dot => "dot",
        }
    }

    /// Extension used when writing this format to a file
    pub fn extension(self) -> &'static str {
        self.extensions()[0]
    }

    /// Every file extension that selects this format
    fn extensions(self) -> &'static [&'static str] {
        match self {
            OutputFormat::Json => &["json"],
            OutputFormat::Mermaid => &["mmd", "mermaid"],
            OutputFormat::Dot => &["dot", "gv"],
        }
    }

    /// Format implied by an output file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.extensions().contains(&ext.as_str()))
    }

    /// Render a diagram in this format
    pub fn render(self, diagram: &Diagram) -> String {
        match self {
            OutputFormat::Json => to_json(diagram),
            OutputFormat::Mermaid => to_mermaid(diagram),
            OutputFormat::Dot => to_dot(diagram),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_ascii_lowercase();
        match wanted.as_str() {
            "reactflow" => return Ok(OutputFormat::Json),
            "graphviz" => return Ok(OutputFormat::Dot),
            _ => {}
        }
        Self::ALL
            .into_iter()
            .find(|f| f.name() == wanted || f.extensions().contains(&wanted.as_str()))
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|f| f.name()).collect();
                format!("Unknown format: {}. Valid options: {}", s, names.join(", "))
            })
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
