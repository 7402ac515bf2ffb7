//! Error kinds surfaced by the modeling pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Failures that stop diagram generation.
///
/// Every variant is user-facing: the CLI prints it and exits non-zero.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("no table data found at {0}; import a schema listing first")]
    MissingTableData(PathBuf),

    #[error("invalid table data: {0}")]
    InvalidTableData(String),

    #[error("missing modeling data: {0}")]
    MissingModelingData(String),

    #[error("no matching tables found for modeling; selection was: {}", .0.join(", "))]
    NoMatchingTables(Vec<String>),

    #[error("invalid diagram config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
