//! Dictionary replace command implementation

use super::{display_name, ensure_batch_succeeded, OutputFormat};
use crate::error::CliError;
use crate::input::{load_table, resolve_patterns, FileReader};
use crate::logging::{self, LOG_FILE};
use crate::output::{FileReport, RunSummary};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};
use tbx_core::{DictionaryPipeline, TableColumns, Tier};

/// Arguments for the dict-replace command
#[derive(Debug, Args)]
pub struct DictReplaceArgs {
    /// Dictionary files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Replacement table (xlsx, xls, ods, csv)
    #[arg(long, value_name = "FILE", required = true)]
    pub table: PathBuf,

    /// Directory for rewritten dictionaries and the run log
    #[arg(short, long, value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Field to edit
    #[arg(short, long, value_name = "TIER", default_value = "ps")]
    pub target_tier: Tier,

    /// Table column holding the headword
    #[arg(long, value_name = "NAME", default_value = "lx")]
    pub key_column: String,

    /// Table column holding the value to replace
    #[arg(long, value_name = "NAME", default_value = "Old pos")]
    pub old_column: String,

    /// Table column holding the replacement value
    #[arg(long, value_name = "NAME", default_value = "New pos")]
    pub new_column: String,

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

impl DictReplaceArgs {
    /// Execute the dict-replace command
    pub fn execute(&self) -> Result<()> {
        fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "Failed to create output directory: {}",
                self.output_dir.display()
            )
        })?;
        logging::init_file(&self.output_dir.join(LOG_FILE), self.verbose)?;
        log::info!("Starting dictionary replacement");

        let files = resolve_patterns(&self.input)?;
        let rules = load_table(&self.table, &self.columns())?;
        let pipeline = DictionaryPipeline::new(rules, self.target_tier.clone());

        let mut formatter = self.format.formatter();
        let mut summary = RunSummary::default();
        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(files.len() as u64);

        for path in &files {
            let name = display_name(path);
            let report = match self.process_file(&pipeline, path) {
                Ok(report) => report,
                Err(e) => {
                    log::error!("{}|{:#}", name, e);
                    FileReport::failed(name.as_str(), &e)
                }
            };
            summary.add(&report);
            formatter.file_report(&report)?;
            progress.file_completed(&name);
        }

        progress.finish();
        formatter.finish(&summary)?;
        ensure_batch_succeeded(&summary)
    }

    /// Column layout of the replacement table; headwords are not padded
    pub fn columns(&self) -> TableColumns {
        TableColumns {
            key: self.key_column.clone(),
            old: self.old_column.clone(),
            new: self.new_column.clone(),
            key_pad_width: None,
        }
    }

    fn process_file(&self, pipeline: &DictionaryPipeline, path: &Path) -> Result<FileReport> {
        let file_name = path
            .file_name()
            .ok_or_else(|| CliError::FileNotFound(path.display().to_string()))?;
        let output = self.output_dir.join(file_name);
        if let (Ok(out), Ok(input)) = (output.canonicalize(), path.canonicalize()) {
            if out == input {
                return Err(CliError::ConfigError(format!(
                    "output would overwrite input: {}",
                    path.display()
                ))
                .into());
            }
        }

        let mut writer = FileReader::create(&output)?;
        let result = pipeline
            .run(FileReader::open(path)?, &mut writer)
            .with_context(|| format!("Failed to process {}", path.display()));
        drop(writer);

        match result {
            Ok(stats) => Ok(FileReport::from_dictionary(display_name(path), stats)
                .with_output(display_name(&output))),
            Err(e) => {
                if let Err(remove) = fs::remove_file(&output) {
                    log::debug!("{}|{}", output.display(), remove);
                }
                Err(e)
            }
        }
    }
}
