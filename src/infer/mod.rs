//! Relationship inference over a table listing.
//!
//! Introspection rarely reports foreign keys, so relationships are guessed
//! from column names. Matching runs in two passes over the listing:
//!
//! 1. Explicit `references` metadata, then `<table>_id` naming.
//! 2. Columns shared by several tables, resolved to an owner by name prefix.
//!
//! Columns that are primary keys or named `id` never produce an edge, and a
//! (source table, column, target table) triple is emitted at most once.

mod frequency;
mod matcher;

pub use frequency::ColumnFrequency;
pub use matcher::{guess_primary_table, is_join_table, match_suffix, FK_SUFFIX};

use crate::schema::TableData;
use ahash::AHashSet;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default referenced column for name-derived foreign keys
pub const DEFAULT_TARGET_COLUMN: &str = "id";

/// Relationship cardinality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum RelationType {
    OneToMany,
    #[default]
    ManyToOne, // child column points at parent
    OneToOne,
    ManyToMany,
}

impl RelationType {
    /// Open arrowheads mark symmetric relationships
    pub fn is_symmetric(self) -> bool {
        matches!(self, RelationType::OneToOne | RelationType::ManyToMany)
    }

    /// Mermaid ERD notation
    pub fn as_mermaid(self) -> &'static str {
        match self {
            RelationType::ManyToOne => "}o--||",
            RelationType::OneToOne => "||--||",
            RelationType::OneToMany => "||--o{",
            RelationType::ManyToMany => "}o--o{",
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationType::OneToMany => write!(f, "one-to-many"),
            RelationType::ManyToOne => write!(f, "many-to-one"),
            RelationType::OneToOne => write!(f, "one-to-one"),
            RelationType::ManyToMany => write!(f, "many-to-many"),
        }
    }
}

/// Which rule produced a relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MatchRule {
    /// Column carried `references` metadata
    Explicit,
    /// `<table>_id` naming convention
    Suffix,
    /// Column name shared across tables, owner guessed by prefix
    Shared,
}

/// An inferred directed reference from one table's column to another table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub source_table: String,
    pub source_column: String,
    pub target_table: String,
    pub target_column: String,
    pub relation_type: RelationType,
    pub rule: MatchRule,
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} -> {}.{} ({})",
            self.source_table,
            self.source_column,
            self.target_table,
            self.target_column,
            self.relation_type
        )
    }
}

/// Tables classified as many-to-many bridges, in listing order
pub fn join_tables(tables: &[TableData]) -> Vec<&str> {
    let freq = ColumnFrequency::build(tables);
    tables
        .iter()
        .filter(|t| is_join_table(t, &freq))
        .map(|t| t.name.as_str())
        .collect()
}

/// Infer every relationship in the listing
pub fn detect_relationships(tables: &[TableData]) -> Vec<Relationship> {
    let freq = ColumnFrequency::build(tables);
    let join_flags: Vec<bool> = tables.iter().map(|t| is_join_table(t, &freq)).collect();

    let mut emitter = Emitter::default();

    // Pass 1: explicit metadata and `_id` naming
    for (source, &is_join) in tables.iter().zip(&join_flags) {
        for column in source.columns.iter().filter(|c| !c.is_identity()) {
            let relation = relation_for(is_join, freq.is_shared(&column.name));

            if let Some(reference) = column.explicit_reference() {
                emitter.emit(
                    source,
                    &column.name,
                    &reference.table,
                    &reference.column,
                    relation,
                    MatchRule::Explicit,
                );
            } else if let Some(target) = match_suffix(column, tables) {
                emitter.emit(
                    source,
                    &column.name,
                    &target.name,
                    DEFAULT_TARGET_COLUMN,
                    relation,
                    MatchRule::Suffix,
                );
            }
        }
    }

    // Pass 2: shared column names
    for (source, &is_join) in tables.iter().zip(&join_flags) {
        for column in source.columns.iter().filter(|c| !c.is_identity()) {
            if !freq.is_shared(&column.name) {
                continue;
            }
            if let Some(target) = guess_primary_table(&column.name, &source.name, tables) {
                emitter.emit(
                    source,
                    &column.name,
                    &target.name,
                    &column.name,
                    relation_for(is_join, true),
                    MatchRule::Shared,
                );
            }
        }
    }

    emitter.relationships
}

fn relation_for(source_is_join: bool, column_shared: bool) -> RelationType {
    if source_is_join && column_shared {
        RelationType::ManyToMany
    } else {
        RelationType::ManyToOne
    }
}

/// Collects relationships, dropping repeats of the same source/column/target
#[derive(Default)]
struct Emitter<'a> {
    seen: AHashSet<(&'a str, &'a str, &'a str)>,
    relationships: Vec<Relationship>,
}

impl<'a> Emitter<'a> {
    fn emit(
        &mut self,
        source: &'a TableData,
        column: &'a str,
        target: &'a str,
        target_column: &str,
        relation_type: RelationType,
        rule: MatchRule,
    ) {
        if !self.seen.insert((source.name.as_str(), column, target)) {
            log::debug!(
                "skipping duplicate {}.{} -> {} ({:?})",
                source.name,
                column,
                target,
                rule
            );
            return;
        }

        let relationship = Relationship {
            source_table: source.name.clone(),
            source_column: column.to_string(),
            target_table: target.to_string(),
            target_column: target_column.to_string(),
            relation_type,
            rule,
        };
        log::debug!("inferred {} via {:?} rule", relationship, rule);
        self.relationships.push(relationship);
    }
}
