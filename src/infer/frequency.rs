//! Column-name frequency index.

use crate::schema::TableData;
use ahash::AHashMap;

/// Maps a column name to the number of columns carrying it across all tables
#[derive(Debug, Default, Clone)]
pub struct ColumnFrequency {
    counts: AHashMap<String, usize>,
}

impl ColumnFrequency {
    /// Build the index in a single pass over every column
    pub fn build(tables: &[TableData]) -> Self {
        let mut counts: AHashMap<String, usize> = AHashMap::new();
        for table in tables {
            for col in &table.columns {
                *counts.entry(col.name.clone()).or_insert(0) += 1;
            }
        }
        Self { counts }
    }

    /// Occurrence count for a column name (0 when never seen)
    pub fn get(&self, column: &str) -> usize {
        self.counts.get(column).copied().unwrap_or(0)
    }

    /// Column name appears more than once across the listing
    pub fn is_shared(&self, column: &str) -> bool {
        self.get(column) > 1
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Shared column names, sorted for stable output
    pub fn shared_columns(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .counts
            .iter()
            .filter(|(_, n)| **n > 1)
            .map(|(k, _)| k.as_str())
            .collect();
        names.sort_unstable();
        names
    }
}
