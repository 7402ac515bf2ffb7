//! Session command: manage the stored listing and modeling selection.

use super::{load_table_file, SessionAction};
use crate::context::ModelingContext;
use crate::error::ModelError;
use crate::schema::search_tables;
use crate::session::SessionStore;
use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

/// JSON output for `session show`
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionJsonOutput {
    pub session_dir: String,
    /// None when no listing has been imported
    pub table_count: Option<usize>,
    pub tables: Vec<String>,
    pub project_name: Option<String>,
    pub selected_tables: Vec<String>,
}

pub fn run(action: SessionAction, session_dir: Option<PathBuf>) -> Result<()> {
    let store = SessionStore::open(session_dir)?;

    match action {
        SessionAction::Import { file } => {
            let tables = load_table_file(&file)?;
            store.save_tables(&tables)?;
            eprintln!(
                "Stored {} tables in {}",
                tables.len(),
                store.dir().display()
            );
            Ok(())
        }
        SessionAction::Select {
            names,
            search,
            project,
            connection,
            reset,
        } => select(&store, names, search, project, connection, reset),
        SessionAction::Show { json } => show(&store, json),
        SessionAction::Clear => {
            let removed = store.clear()?;
            eprintln!("Cleared {} stored entries from {}", removed, store.dir().display());
            Ok(())
        }
    }
}

fn select(
    store: &SessionStore,
    names: Vec<String>,
    search: Option<String>,
    project: Option<String>,
    connection: Option<PathBuf>,
    reset: bool,
) -> Result<()> {
    let tables = store.load_tables()?;

    let mut context = match store.load_context()? {
        Some(ctx) if !reset => ctx,
        Some(ctx) => ModelingContext {
            selected_tables: Vec::new(),
            ..ctx
        },
        None => ModelingContext::default(),
    };

    for name in &names {
        if !tables.iter().any(|t| &t.name == name) {
            eprintln!("Warning: table '{}' is not in the stored listing", name);
        }
    }
    context.extend_selection(names);

    if let Some(ref term) = search {
        let hits = search_tables(&tables, term);
        eprintln!("Search '{}' matched {} tables", term, hits.len());
        context.extend_selection(hits.into_iter().map(|t| t.name.clone()));
    }

    if let Some(project) = project {
        context.project_name = project;
    }

    if let Some(path) = connection {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        context.connection_details = serde_json::from_str(&content)
            .with_context(|| format!("Invalid connection JSON: {}", path.display()))?;
    }

    if context.selected_tables.is_empty() {
        return Err(ModelError::MissingModelingData(
            "select at least one table to proceed".to_string(),
        )
        .into());
    }

    store.save_context(&context)?;
    eprintln!(
        "Selected {} tables for project '{}'",
        context.selected_tables.len(),
        context.project_name
    );
    if context.project_name.trim().is_empty() {
        eprintln!("Warning: no project name set; pass --project before running diagram");
    }
    Ok(())
}

fn show(store: &SessionStore, json: bool) -> Result<()> {
    let tables = match store.load_tables() {
        Ok(tables) => Some(tables),
        Err(e)
            if matches!(
                e.downcast_ref::<ModelError>(),
                Some(ModelError::MissingTableData(_))
            ) =>
        {
            None
        }
        Err(e) => return Err(e),
    };
    let context = store.load_context()?;

    let output = SessionJsonOutput {
        session_dir: store.dir().display().to_string(),
        table_count: tables.as_ref().map(|t| t.len()),
        tables: tables
            .iter()
            .flatten()
            .map(|t| t.name.clone())
            .collect(),
        project_name: context.as_ref().map(|c| c.project_name.clone()),
        selected_tables: context
            .map(|c| c.selected_tables)
            .unwrap_or_default(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Session: {}", output.session_dir);
    match output.table_count {
        Some(n) => println!("Tables:  {} ({})", n, output.tables.join(", ")),
        None => println!("Tables:  none imported"),
    }
    match output.project_name {
        Some(ref p) if !p.is_empty() => println!("Project: {}", p),
        _ => println!("Project: not set"),
    }
    if output.selected_tables.is_empty() {
        println!("Selected: none");
    } else {
        println!("Selected: {}", output.selected_tables.join(", "));
    }
    Ok(())
}
