//! JSON Schemas for the machine-readable outputs, printed by `erd-infer schema`.

use schemars::{schema_for, Schema};
use std::collections::BTreeMap;

/// Output documents with a published schema, keyed by command name
const SCHEMAS: &[(&str, fn() -> Schema)] = &[
    ("diagram", diagram_schema),
    ("relationships", relationships_schema),
    ("session", session_schema),
];

fn diagram_schema() -> Schema {
    schema_for!(crate::graph::format::json::DiagramJson)
}

fn relationships_schema() -> Schema {
    schema_for!(crate::cmd::relationships::RelationshipsJsonOutput)
}

fn session_schema() -> Schema {
    schema_for!(crate::cmd::session::SessionJsonOutput)
}

/// Every schema, ordered by name so the combined output diffs cleanly
pub fn all_schemas() -> BTreeMap<&'static str, Schema> {
    SCHEMAS.iter().map(|(name, make)| (*name, make())).collect()
}

pub fn get_schema(command: &str) -> Option<Schema> {
    SCHEMAS
        .iter()
        .find(|(name, _)| *name == command)
        .map(|(_, make)| make())
}

pub fn schema_names() -> Vec<&'static str> {
    SCHEMAS.iter().map(|(name, _)| *name).collect()
}
