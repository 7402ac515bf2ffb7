//! Modeling context: which tables to diagram and for which project.

use crate::error::{ModelError, Result};
use crate::schema::TableData;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Selection and project metadata carried into diagram generation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelingContext {
    #[serde(default)]
    pub selected_tables: Vec<String>,
    #[serde(default)]
    pub project_name: String,
    /// Opaque connection settings, passed through to node data
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub connection_details: Value,
}

impl ModelingContext {
    pub fn new(project_name: impl Into<String>, selected_tables: Vec<String>) -> Self {
        Self {
            selected_tables,
            project_name: project_name.into(),
            connection_details: Value::Null,
        }
    }

    /// Load a context from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read modeling context: {}", path.display()))?;
        let context: ModelingContext = serde_json::from_str(&content)
            .map_err(|e| ModelError::MissingModelingData(e.to_string()))?;
        context.validate()?;
        Ok(context)
    }

    /// A usable context names a project and selects at least one table.
    /// Connection details may be absent.
    pub fn validate(&self) -> Result<()> {
        if self.selected_tables.is_empty() {
            return Err(ModelError::MissingModelingData(
                "no tables selected".to_string(),
            ));
        }
        if self.project_name.trim().is_empty() {
            return Err(ModelError::MissingModelingData(
                "project name is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Keep the selected tables, preserving listing order
    pub fn select(&self, tables: &[TableData]) -> Result<Vec<TableData>> {
        let selected: Vec<TableData> = tables
            .iter()
            .filter(|t| self.selected_tables.iter().any(|s| s == &t.name))
            .cloned()
            .collect();

        if selected.is_empty() {
            return Err(ModelError::NoMatchingTables(self.selected_tables.clone()));
        }

        let missing: Vec<&str> = self
            .selected_tables
            .iter()
            .filter(|s| !tables.iter().any(|t| &t.name == *s))
            .map(|s| s.as_str())
            .collect();
        if !missing.is_empty() {
            log::warn!("selected tables not in listing: {}", missing.join(", "));
        }

        Ok(selected)
    }

    /// Add tables to the selection, skipping ones already selected
    pub fn extend_selection<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if !self.selected_tables.contains(&name) {
                self.selected_tables.push(name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing() -> Vec<TableData> {
        vec![
            TableData::new("customers", vec![]),
            TableData::new("orders", vec![]),
            TableData::new("products", vec![]),
        ]
    }

    #[test]
    fn test_select_preserves_listing_order() {
        let ctx = ModelingContext::new("shop", vec!["products".into(), "customers".into()]);
        let names: Vec<_> = ctx
            .select(&listing())
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["customers", "products"]);
    }

    #[test]
    fn test_select_no_match() {
        let ctx = ModelingContext::new("shop", vec!["invoices".into()]);
        let err = ctx.select(&listing()).unwrap_err();
        assert!(matches!(err, ModelError::NoMatchingTables(_)));
        assert!(err.to_string().contains("invoices"));
    }

    #[test]
    fn test_validate() {
        assert!(ModelingContext::new("shop", vec![]).validate().is_err());
        assert!(ModelingContext::new("  ", vec!["orders".into()])
            .validate()
            .is_err());
        assert!(ModelingContext::new("shop", vec!["orders".into()])
            .validate()
            .is_ok());
    }

    #[test]
    fn test_connection_details_optional() {
        let json = r#"{"selectedTables": ["orders"], "projectName": "shop"}"#;
        let ctx: ModelingContext = serde_json::from_str(json).unwrap();
        assert!(ctx.connection_details.is_null());
        assert!(ctx.validate().is_ok());
    }

    #[test]
    fn test_extend_selection_dedups() {
        let mut ctx = ModelingContext::new("shop", vec!["orders".into()]);
        ctx.extend_selection(["orders", "customers"]);
        assert_eq!(ctx.selected_tables, vec!["orders", "customers"]);
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{"selectedTables": ["orders"], "projectName": "shop",
                       "connectionDetails": {"host": "localhost"}}"#;
        let ctx: ModelingContext = serde_json::from_str(json).unwrap();
        assert_eq!(ctx.selected_tables, vec!["orders"]);
        assert_eq!(ctx.connection_details["host"], "localhost");
    }
}
