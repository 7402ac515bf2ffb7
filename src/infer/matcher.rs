//! Name-based matching rules: join-table classification and target lookup.
//!
//! These are guesses. Underscored tables that are not junctions get
//! misclassified, and pluralization is the naive `+ "s"`.

use super::ColumnFrequency;
use crate::schema::{Column, TableData};

/// Suffix that marks a conventionally named foreign key column
pub const FK_SUFFIX: &str = "_id";

/// Minimum shared columns for a table to count as a many-to-many bridge
pub const JOIN_TABLE_MIN_SHARED: usize = 2;

/// A table is a join table when its name contains `_` and at least two of
/// its columns appear in other tables too.
pub fn is_join_table(table: &TableData, freq: &ColumnFrequency) -> bool {
    if !table.name.contains('_') {
        return false;
    }
    let shared = table
        .columns
        .iter()
        .filter(|c| freq.is_shared(&c.name))
        .count();
    shared >= JOIN_TABLE_MIN_SHARED
}

/// Resolve a `<base>_id` column to the table named `<base>` or `<base>s`.
///
/// Comparison is case-insensitive; the first table in listing order wins.
pub fn match_suffix<'a>(column: &Column, tables: &'a [TableData]) -> Option<&'a TableData> {
    let base = column.name.strip_suffix(FK_SUFFIX)?.to_lowercase();
    if base.is_empty() {
        return None;
    }
    let plural = format!("{}s", base);

    tables.iter().find(|t| {
        let name = t.name.to_lowercase();
        name == base || name == plural
    })
}

/// Guess which table owns a shared column by prefix.
///
/// The prefix is everything before the first `_`, lowercased, and is matched
/// against table names with the `public.` qualifier removed. The first match
/// in listing order is the owner; when that is the source table itself there
/// is no guess.
pub fn guess_primary_table<'a>(
    column: &str,
    source: &str,
    tables: &'a [TableData],
) -> Option<&'a TableData> {
    let prefix = column.split('_').next().unwrap_or(column).to_lowercase();
    if prefix.is_empty() {
        return None;
    }

    tables
        .iter()
        .find(|t| t.match_name().starts_with(&prefix))
        .filter(|t| t.name != source)
}
