//! On-disk session store for table listings and modeling context.
//!
//! A session is a directory holding fixed keys, each a JSON file:
//! `table_data.json` and `modeling_data.json`.

use crate::context::ModelingContext;
use crate::error::ModelError;
use crate::schema::{validate_tables, TableData};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Key holding the serialized table listing
pub const TABLE_DATA_KEY: &str = "table_data.json";
/// Key holding the serialized modeling context
pub const MODELING_DATA_KEY: &str = "modeling_data.json";

/// Directory-backed session store
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Open the store in the default session directory
    pub fn new() -> Result<Self> {
        Self::with_dir(Self::default_dir()?)
    }

    /// Open the store in a custom directory
    pub fn with_dir(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir).context("Failed to create session directory")?;
        Ok(Self { dir })
    }

    /// Open the given directory, or the default one when none is given
    pub fn open(dir: Option<PathBuf>) -> Result<Self> {
        match dir {
            Some(dir) => Self::with_dir(dir),
            None => Self::new(),
        }
    }

    /// Get the default session directory
    pub fn default_dir() -> Result<PathBuf> {
        let cache_base = dirs::cache_dir()
            .or_else(|| dirs::home_dir().map(|h| h.join(".cache")))
            .context("Could not determine cache directory")?;

        Ok(cache_base.join("erd-infer").join("session"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    /// Store the table listing, replacing any previous one
    pub fn save_tables(&self, tables: &[TableData]) -> Result<()> {
        let json = serde_json::to_string_pretty(tables)?;
        let path = self.key_path(TABLE_DATA_KEY);
        fs::write(&path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("stored {} tables in {}", tables.len(), path.display());
        Ok(())
    }

    /// Load the stored table listing
    pub fn load_tables(&self) -> Result<Vec<TableData>> {
        let path = self.key_path(TABLE_DATA_KEY);
        if !path.exists() {
            return Err(ModelError::MissingTableData(path).into());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let tables: Vec<TableData> = serde_json::from_str(&content)
            .map_err(|e| ModelError::InvalidTableData(e.to_string()))?;
        validate_tables(&tables)?;
        Ok(tables)
    }

    /// Store the modeling context
    pub fn save_context(&self, context: &ModelingContext) -> Result<()> {
        let json = serde_json::to_string_pretty(context)?;
        let path = self.key_path(MODELING_DATA_KEY);
        fs::write(&path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Load the stored modeling context, if any
    pub fn load_context(&self) -> Result<Option<ModelingContext>> {
        let path = self.key_path(MODELING_DATA_KEY);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let context: ModelingContext = serde_json::from_str(&content)
            .map_err(|e| ModelError::MissingModelingData(e.to_string()))?;
        Ok(Some(context))
    }

    /// Load the stored modeling context, failing when it is absent or incomplete
    pub fn require_context(&self) -> Result<ModelingContext> {
        let context = self.load_context()?.ok_or_else(|| {
            ModelError::MissingModelingData(format!(
                "nothing stored in {}",
                self.key_path(MODELING_DATA_KEY).display()
            ))
        })?;
        context.validate()?;
        Ok(context)
    }

    /// Remove every stored key. Returns how many were removed.
    pub fn clear(&self) -> Result<usize> {
        let mut removed = 0;
        for key in [TABLE_DATA_KEY, MODELING_DATA_KEY] {
            let path = self.key_path(key);
            if path.exists() {
                fs::remove_file(&path)
                    .with_context(|| format!("Failed to remove {}", path.display()))?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}
