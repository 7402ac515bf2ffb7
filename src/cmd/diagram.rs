//! Diagram command implementation.

use super::{load_table_file, parse_patterns};
use crate::config::DiagramConfig;
use crate::context::ModelingContext;
use crate::graph::{Diagram, OutputFormat};
use crate::schema::TableData;
use crate::session::SessionStore;
use anyhow::Result;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

/// Run the diagram command
#[allow(clippy::too_many_arguments)]
pub fn run(
    file: Option<PathBuf>,
    context: Option<PathBuf>,
    output: Option<PathBuf>,
    format: Option<String>,
    columns: Option<usize>,
    config: Option<PathBuf>,
    tables: Option<String>,
    exclude: Option<String>,
    focus: Option<String>,
    session_dir: Option<PathBuf>,
) -> Result<()> {
    let format = resolve_format(format.as_deref(), output.as_ref())?;

    let config = match config {
        Some(ref path) => DiagramConfig::load(path)?,
        None => DiagramConfig::default(),
    }
    .with_columns(columns)?;

    let include_patterns = parse_patterns(tables.as_deref())?;
    let exclude_patterns = parse_patterns(exclude.as_deref())?;

    let (listing, context) = load_inputs(file, context, session_dir)?;
    let selected = match context {
        Some(ref ctx) => ctx.select(&listing)?,
        None => listing,
    };

    let mut diagram = Diagram::build(&selected, context.as_ref(), &config);
    diagram.filter_tables(&include_patterns);
    diagram.exclude_tables(&exclude_patterns);
    if let Some(ref table) = focus {
        diagram.focus_table(table);
        if diagram.is_empty() {
            eprintln!("Table '{}' not found in the diagram.", table);
        }
    }

    let output_content = format.render(&diagram);

    if let Some(ref out_path) = output {
        let mut file = File::create(out_path)?;
        file.write_all(output_content.as_bytes())?;
        eprintln!("Diagram written to: {}", out_path.display());
    } else {
        println!("{}", output_content);
    }

    if output.is_some() || format != OutputFormat::Json {
        eprintln!(
            "\nDiagram: {} tables, {} columns, {} relationships ({} join tables)",
            diagram.node_count(),
            diagram.column_count(),
            diagram.edge_count(),
            diagram.join_tables.len()
        );
    }

    Ok(())
}

/// Explicit flag first, then output extension, then JSON
fn resolve_format(format: Option<&str>, output: Option<&PathBuf>) -> Result<OutputFormat> {
    if let Some(f) = format {
        return f.parse().map_err(|e: String| anyhow::anyhow!(e));
    }
    Ok(output
        .and_then(|p| p.extension())
        .and_then(|e| e.to_str())
        .and_then(OutputFormat::from_extension)
        .unwrap_or_default())
}

/// Table listing plus modeling context, from files or the session store.
///
/// A file listing is used whole unless a context file is given. The session
/// listing always goes through the stored context.
fn load_inputs(
    file: Option<PathBuf>,
    context: Option<PathBuf>,
    session_dir: Option<PathBuf>,
) -> Result<(Vec<TableData>, Option<ModelingContext>)> {
    let explicit_context = context
        .as_deref()
        .map(ModelingContext::load)
        .transpose()?;

    match file {
        Some(path) => Ok((load_table_file(&path)?, explicit_context)),
        None => {
            let store = SessionStore::open(session_dir)?;
            let listing = store.load_tables()?;
            let context = match explicit_context {
                Some(ctx) => ctx,
                None => store.require_context()?,
            };
            Ok((listing, Some(context)))
        }
    }
}
