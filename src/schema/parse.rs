//! Boundary parsing for introspection payloads.
//!
//! Table listings arrive as loosely typed JSON from a GraphQL-style endpoint.
//! Three shapes are accepted:
//!
//! ```text
//! [ { "name": "users", "columns": [...] }, ... ]
//! { "tables": [ ... ] }
//! { "data": { "listDataSourceTables": [ ... ] } }
//! ```
//!
//! Unknown keys such as `__typename` are ignored.

use super::TableData;
use crate::error::{ModelError, Result};
use ahash::AHashSet;
use serde_json::Value;

/// GraphQL field that carries the table listing
pub const LISTING_FIELD: &str = "listDataSourceTables";

/// Parse and validate a table listing from JSON text
pub fn parse_tables(json: &str) -> Result<Vec<TableData>> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| ModelError::InvalidTableData(e.to_string()))?;
    tables_from_value(value)
}

/// Parse and validate a table listing from an already decoded JSON value
pub fn tables_from_value(value: Value) -> Result<Vec<TableData>> {
    let listing = unwrap_envelope(value)?;
    let tables: Vec<TableData> = serde_json::from_value(listing)
        .map_err(|e| ModelError::InvalidTableData(e.to_string()))?;
    validate_tables(&tables)?;
    Ok(tables)
}

/// Check names are present and table names are unique
pub fn validate_tables(tables: &[TableData]) -> Result<()> {
    let mut seen = AHashSet::new();

    for (i, table) in tables.iter().enumerate() {
        if table.name.trim().is_empty() {
            return Err(ModelError::InvalidTableData(format!(
                "table at index {} has an empty name",
                i
            )));
        }
        if !seen.insert(table.name.as_str()) {
            return Err(ModelError::InvalidTableData(format!(
                "duplicate table name: {}",
                table.name
            )));
        }
        if let Some(pos) = table.columns.iter().position(|c| c.name.trim().is_empty()) {
            return Err(ModelError::InvalidTableData(format!(
                "column {} of table {} has an empty name",
                pos, table.name
            )));
        }
    }

    Ok(())
}

fn unwrap_envelope(value: Value) -> Result<Value> {
    match value {
        Value::Array(_) => Ok(value),
        Value::Object(mut map) => {
            if let Some(tables) = map.remove("tables") {
                return Ok(tables);
            }
            if let Some(Value::Object(mut data)) = map.remove("data") {
                if let Some(tables) = data.remove(LISTING_FIELD) {
                    return Ok(tables);
                }
            }
            Err(ModelError::InvalidTableData(format!(
                "expected a table array, a \"tables\" field, or data.{}",
                LISTING_FIELD
            )))
        }
        Value::Null => Err(ModelError::InvalidTableData(
            "table listing is null".to_string(),
        )),
        other => Err(ModelError::InvalidTableData(format!(
            "expected a table array, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
