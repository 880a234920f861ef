//! CLI command implementations

use crate::error::CliError;
use crate::output::{JsonFormatter, ReportFormatter, RunSummary, TextFormatter};
use anyhow::Result;
use clap::Subcommand;
use std::io;
use std::path::Path;

pub mod check;
pub mod dict_replace;
pub mod generate_config;
pub mod markers;
pub mod replace;
pub mod terms;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apply replacement tables to paired corpus files and realign them
    Replace(replace::ReplaceArgs),

    /// Apply a replacement table to a Toolbox dictionary
    DictReplace(dict_replace::DictReplaceArgs),

    /// Report structurally invalid records without writing output
    Check(check::CheckArgs),

    /// List the field markers used in files
    Markers(markers::MarkersArgs),

    /// Export dictionary entries with a given part of speech as CSV
    Terms(terms::TermsArgs),

    /// Generate a configuration file template
    GenerateConfig(generate_config::GenerateConfigArgs),
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Replace(args) => args.execute(),
            Commands::DictReplace(args) => args.execute(),
            Commands::Check(args) => args.execute(),
            Commands::Markers(args) => args.execute(),
            Commands::Terms(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}

/// Supported run report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One line per file and a summary
    Text,
    /// A single JSON document
    Json,
}

impl OutputFormat {
    /// Formatter writing to stdout
    pub fn formatter(self) -> Box<dyn ReportFormatter> {
        match self {
            OutputFormat::Text => Box::new(TextFormatter::stdout()),
            OutputFormat::Json => Box::new(JsonFormatter::new(io::stdout())),
        }
    }
}

/// File name for reports: the path as given on the command line
pub(crate) fn display_name(path: &Path) -> String {
    path.display().to_string()
}

/// Turn failed files into a non-zero exit
pub(crate) fn ensure_batch_succeeded(summary: &RunSummary) -> Result<()> {
    if summary.failed_files > 0 {
        return Err(CliError::BatchFailed {
            failed: summary.failed_files,
            total: summary.files,
        }
        .into());
    }
    Ok(())
}
