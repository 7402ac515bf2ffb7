//! Fixed-column grid placement.
//!
//! Node `i` goes to column `i % columns`, row `i / columns`. Edges play no
//! part in placement, so the same node count always yields the same grid.

use crate::config::LayoutConfig;
use crate::graph::node::DiagramNode;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Top-left corner of a node on the canvas
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Grid placement parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    columns: usize,
    node_width: f64,
    node_height: f64,
    margin_x: f64,
    margin_y: f64,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

impl GridLayout {
    /// Default node size and margins with the given column count.
    /// A column count of 0 is treated as 1.
    pub fn new(columns: usize) -> Self {
        Self {
            columns: columns.max(1),
            ..Self::default()
        }
    }

    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            columns: config.columns.max(1),
            node_width: config.node_width,
            node_height: config.node_height,
            margin_x: config.margin_x,
            margin_y: config.margin_y,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Grid cell `(column, row)` for the node at `index`
    pub fn cell(&self, index: usize) -> (usize, usize) {
        (index % self.columns, index / self.columns)
    }

    /// Canvas position for the node at `index`
    pub fn position(&self, index: usize) -> Position {
        let (col, row) = self.cell(index);
        Position {
            x: self.margin_x + col as f64 * (self.node_width + self.margin_x),
            y: self.margin_y + row as f64 * (self.node_height + self.margin_y),
        }
    }

    /// Place every node, overwriting previous positions
    pub fn apply(&self, nodes: &mut [DiagramNode]) {
        for (i, node) in nodes.iter_mut().enumerate() {
            let pos = self.position(i);
            node.position = pos;
            node.data.grid_position = Some(pos);
        }
    }

    /// Canvas size needed for `count` nodes, margins included
    pub fn extent(&self, count: usize) -> (f64, f64) {
        if count == 0 {
            return (0.0, 0.0);
        }
        let cols = count.min(self.columns);
        let rows = count.div_ceil(self.columns);
        (
            self.margin_x + cols as f64 * (self.node_width + self.margin_x),
            self.margin_y + rows as f64 * (self.node_height + self.margin_y),
        )
    }
}
