//! YAML configuration for diagram rendering.
//!
//! ```yaml
//! layout:
//!   columns: 3
//!   node_width: 300
//! edges:
//!   stroke: "#0ea5e9"
//! ```
//!
//! Every field is optional and falls back to the built-in defaults.

use crate::error::ModelError;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Grid placement settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Nodes per grid row
    pub columns: usize,
    pub node_width: f64,
    pub node_height: f64,
    pub margin_x: f64,
    pub margin_y: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            columns: 4,
            node_width: 280.0,
            node_height: 220.0,
            margin_x: 50.0,
            margin_y: 50.0,
        }
    }
}

/// Visual style shared by every relationship edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeStyleConfig {
    pub stroke: String,
    pub stroke_width: f64,
    pub label_fill: String,
    pub label_fill_opacity: f64,
    pub label_color: String,
    pub label_font_size: u32,
    pub label_font_weight: u32,
    /// Arrowhead width and height
    pub marker_size: u32,
}

impl Default for EdgeStyleConfig {
    fn default() -> Self {
        Self {
            stroke: "#6366f1".to_string(),
            stroke_width: 2.0,
            label_fill: "#f8fafc".to_string(),
            label_fill_opacity: 0.8,
            label_color: "#475569".to_string(),
            label_font_size: 11,
            label_font_weight: 500,
            marker_size: 15,
        }
    }
}

/// Complete diagram configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    pub layout: LayoutConfig,
    pub edges: EdgeStyleConfig,
}

impl DiagramConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to load config: {}", path.display()))?;
        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        let config: DiagramConfig = serde_yaml_ng::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the grid cannot honour
    pub fn validate(&self) -> Result<(), ModelError> {
        let layout = &self.layout;
        if layout.columns == 0 {
            return Err(ModelError::InvalidConfig(
                "layout.columns must be at least 1".to_string(),
            ));
        }
        for (name, value) in [
            ("layout.node_width", layout.node_width),
            ("layout.node_height", layout.node_height),
            ("layout.margin_x", layout.margin_x),
            ("layout.margin_y", layout.margin_y),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ModelError::InvalidConfig(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Override the column count from the command line
    pub fn with_columns(mut self, columns: Option<usize>) -> Result<Self, ModelError> {
        if let Some(n) = columns {
            self.layout.columns = n;
            self.validate()?;
        }
        Ok(self)
    }
}
