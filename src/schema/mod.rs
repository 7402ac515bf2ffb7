//! Table listing model for relationship inference.
//!
//! This module provides:
//! - Strict data models for tables, columns, and explicit column references
//! - Boundary parsing of loosely typed introspection JSON
//! - Name search over a table listing

mod parse;

pub use parse::*;

use serde::{Deserialize, Serialize};

/// Schema qualifier stripped before name matching
pub const DEFAULT_SCHEMA_PREFIX: &str = "public.";

/// Explicit reference metadata attached to a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRef {
    pub table: String,
    pub column: String,
}

/// A single column of an introspected table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub name: String,
    /// Database type as reported by introspection (free-form)
    #[serde(rename = "type", default)]
    pub col_type: String,
    #[serde(default)]
    pub is_primary_key: bool,
    #[serde(default)]
    pub is_foreign_key: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<ColumnRef>,
}

impl Column {
    /// Create a plain column with no key flags
    pub fn new(name: impl Into<String>, col_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            col_type: col_type.into(),
            is_primary_key: false,
            is_foreign_key: false,
            references: None,
        }
    }

    /// Mark this column as the primary key
    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    /// Attach an explicit reference and flag the column as a foreign key
    pub fn references(mut self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.is_foreign_key = true;
        self.references = Some(ColumnRef {
            table: table.into(),
            column: column.into(),
        });
        self
    }

    /// Reference metadata, honoured only when the column is flagged as a
    /// foreign key
    pub fn explicit_reference(&self) -> Option<&ColumnRef> {
        self.references.as_ref().filter(|_| self.is_foreign_key)
    }

    /// Whether this column identifies its own row (flagged PK or named `id`).
    /// Such columns are never treated as foreign keys.
    pub fn is_identity(&self) -> bool {
        self.is_primary_key || self.name == "id"
    }
}

/// Schema description of one table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableData {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl TableData {
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// Table name lowercased with the default schema qualifier removed
    pub fn match_name(&self) -> String {
        let lower = self.name.to_lowercase();
        match lower.strip_prefix(DEFAULT_SCHEMA_PREFIX) {
            Some(rest) => rest.to_string(),
            None => lower,
        }
    }

    /// Get a column by name
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Case-insensitive substring search over table names.
/// An empty term matches every table.
pub fn search_tables<'a>(tables: &'a [TableData], term: &str) -> Vec<&'a TableData> {
    let needle = term.trim().to_lowercase();
    tables
        .iter()
        .filter(|t| needle.is_empty() || t.name.to_lowercase().contains(&needle))
        .collect()
}
