mod diagram;
pub(crate) mod relationships;
pub(crate) mod session;

use crate::error::ModelError;
use crate::schema::{parse_tables, TableData};
use anyhow::{bail, Context};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use glob::Pattern;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "erd-infer")]
#[command(version)]
#[command(
    about = "Infer table relationships from a schema listing and lay them out as an ER diagram",
    long_about = None
)]
pub struct Cli {
    /// Verbose logging (repeat for more detail; RUST_LOG overrides)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a laid-out ER diagram from a table listing
    Diagram {
        /// Table listing JSON (default: the stored session listing)
        file: Option<PathBuf>,

        /// Modeling context JSON with selectedTables and projectName
        #[arg(short, long)]
        context: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: json, mermaid, dot (default: from extension, else json)
        #[arg(short, long)]
        format: Option<String>,

        /// Nodes per grid row (overrides the config file)
        #[arg(long)]
        columns: Option<usize>,

        /// YAML diagram config
        #[arg(long)]
        config: Option<PathBuf>,

        /// Only include tables matching these glob patterns (comma-separated)
        #[arg(short, long)]
        tables: Option<String>,

        /// Exclude tables matching these glob patterns (comma-separated)
        #[arg(short, long)]
        exclude: Option<String>,

        /// Show only this table and its direct relationships
        #[arg(long)]
        focus: Option<String>,

        /// Session directory (default: user cache dir)
        #[arg(long)]
        session_dir: Option<PathBuf>,
    },

    /// List inferred relationships and join tables
    Relationships {
        /// Table listing JSON (default: the stored session listing)
        file: Option<PathBuf>,

        /// Output results as JSON
        #[arg(long)]
        json: bool,

        /// Session directory (default: user cache dir)
        #[arg(long)]
        session_dir: Option<PathBuf>,
    },

    /// Manage the stored table listing and modeling context
    Session {
        /// Session directory (default: user cache dir)
        #[arg(long, global = true)]
        session_dir: Option<PathBuf>,

        #[command(subcommand)]
        action: SessionAction,
    },

    /// Print the JSON Schema for --json output
    Schema {
        /// Command name (diagram, relationships, session); all when omitted
        command: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum SessionAction {
    /// Store a table listing (bare array, {"tables": [...]} or GraphQL response)
    Import {
        /// Table listing JSON
        file: PathBuf,
    },

    /// Add tables to the modeling selection
    Select {
        /// Table names to select
        names: Vec<String>,

        /// Also select every table whose name contains this term
        #[arg(short, long)]
        search: Option<String>,

        /// Project name for the modeling context
        #[arg(short, long)]
        project: Option<String>,

        /// Connection details JSON file passed through to node data
        #[arg(long)]
        connection: Option<PathBuf>,

        /// Replace the current selection instead of extending it
        #[arg(long)]
        reset: bool,
    },

    /// Show the stored listing and selection
    Show {
        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove every stored key
    Clear,
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Diagram {
            file,
            context,
            output,
            format,
            columns,
            config,
            tables,
            exclude,
            focus,
            session_dir,
        } => diagram::run(
            file,
            context,
            output,
            format,
            columns,
            config,
            tables,
            exclude,
            focus,
            session_dir,
        ),
        Commands::Relationships {
            file,
            json,
            session_dir,
        } => relationships::run(file, json, session_dir),
        Commands::Session {
            session_dir,
            action,
        } => session::run(action, session_dir),
        Commands::Schema { command } => print_schema(command),
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "erd-infer", &mut io::stdout());
            Ok(())
        }
    }
}

/// Read and validate a table listing file
pub(crate) fn load_table_file(path: &Path) -> anyhow::Result<Vec<TableData>> {
    if !path.exists() {
        return Err(ModelError::MissingTableData(path.to_path_buf()).into());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let tables = parse_tables(&content)?;
    log::info!("loaded {} tables from {}", tables.len(), path.display());
    Ok(tables)
}

/// Split a comma-separated list of glob patterns
pub(crate) fn parse_patterns(list: Option<&str>) -> anyhow::Result<Vec<Pattern>> {
    let Some(list) = list else {
        return Ok(Vec::new());
    };
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| Pattern::new(s).with_context(|| format!("Invalid table pattern: {}", s)))
        .collect()
}

fn print_schema(command: Option<String>) -> anyhow::Result<()> {
    match command {
        Some(name) => match crate::json_schema::get_schema(&name) {
            Some(schema) => println!("{}", serde_json::to_string_pretty(&schema)?),
            None => bail!(
                "No schema for '{}'. Available: {}",
                name,
                crate::json_schema::schema_names().join(", ")
            ),
        },
        None => {
            let all = crate::json_schema::all_schemas();
            println!("{}", serde_json::to_string_pretty(&all)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_patterns() {
        assert!(parse_patterns(None).unwrap().is_empty());

        let patterns = parse_patterns(Some("order*, users ,")).unwrap();
        assert_eq!(patterns.len(), 2);
        assert!(patterns[0].matches("order_items"));
        assert!(patterns[1].matches("users"));

        assert!(parse_patterns(Some("[abc")).is_err());
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }
}
