//! Check command implementation

use super::{display_name, OutputFormat};
use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{resolve_patterns, FileReader};
use crate::logging;
use crate::output::{FileReport, RunSummary};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use std::io;
use std::path::{Path, PathBuf};
use tbx_core::{list_markers, Tier};

/// Arguments for the check command
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Corpus files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Configuration file (record marker and morpheme tiers)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl CheckArgs {
    /// Execute the check command
    pub fn execute(&self) -> Result<()> {
        logging::init_stderr(self.verbose);

        let config = CliConfig::load(self.config.as_deref())?;
        let files = resolve_patterns(&self.input)?;

        let mut formatter = self.format.formatter();
        let mut summary = RunSummary::default();
        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(files.len() as u64);

        for path in &files {
            let name = display_name(path);
            let report = match check_file(&config, path) {
                Ok(report) => report,
                Err(e) => FileReport::failed(name.as_str(), &e),
            };
            summary.add(&report);
            formatter.file_report(&report)?;
            progress.file_completed(&name);
        }

        progress.finish();
        formatter.finish(&summary)?;

        if summary.failed_files > 0 {
            return Err(CliError::BatchFailed {
                failed: summary.failed_files,
                total: summary.files,
            }
            .into());
        }
        if summary.records_with_issues > 0 {
            return Err(CliError::ValidationFailed {
                records: summary.records_with_issues,
            }
            .into());
        }
        Ok(())
    }
}

/// Read, align and validate every record of a file, discarding the output
pub fn check_file(config: &CliConfig, path: &Path) -> Result<FileReport> {
    let markers = list_markers(FileReader::open(path)?)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let pipeline = config.corpus.pipeline(markers.contains(&Tier::Phonetic));

    let stats = pipeline
        .run(FileReader::open(path)?, &mut io::sink())
        .with_context(|| format!("Failed to check {}", path.display()))?;
    Ok(FileReport::from_run(display_name(path), stats))
}
