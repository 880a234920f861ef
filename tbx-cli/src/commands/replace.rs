//! Replace command implementation

use super::{display_name, ensure_batch_succeeded, OutputFormat};
use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{discover_pairs, load_table, FilePair, FileReader};
use crate::logging::{self, LOG_FILE};
use crate::output::{FileReport, RunSummary};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};
use tbx_core::{list_markers, ReplacementEngine, Tier};

/// Arguments for the replace command
#[derive(Debug, Args)]
pub struct ReplaceArgs {
    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory of `<iso>-*.txt` corpus files
    #[arg(long, value_name = "DIR")]
    pub corpus_dir: Option<PathBuf>,

    /// Directory of `<iso>-*` replacement tables (xlsx, xls, ods, csv)
    #[arg(long, value_name = "DIR")]
    pub tables_dir: Option<PathBuf>,

    /// Directory for rewritten files and the run log
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Tier to edit, e.g. `ps` or `tx`
    #[arg(short, long, value_name = "TIER")]
    pub target_tier: Option<Tier>,

    /// Write records without realigning columns
    #[arg(long)]
    pub no_align: bool,

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

impl ReplaceArgs {
    /// Execute the replace command
    pub fn execute(&self) -> Result<()> {
        let config = self.resolve_config()?;
        let paths = &config.paths;

        fs::create_dir_all(&paths.output_dir).with_context(|| {
            format!(
                "Failed to create output directory: {}",
                paths.output_dir.display()
            )
        })?;
        ensure_distinct(&paths.corpus_dir, &paths.output_dir)?;
        logging::init_file(&paths.output_dir.join(LOG_FILE), self.verbose)?;

        log::info!("Starting corpus replacement");
        log::debug!("Configuration: {:?}", config);

        let pairing = discover_pairs(&paths.corpus_dir, &paths.tables_dir)?;
        let mut formatter = self.format.formatter();
        let mut summary = RunSummary {
            skipped_files: pairing.unpaired.len(),
            ..RunSummary::default()
        };

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(pairing.pairs.len() as u64);

        for pair in &pairing.pairs {
            let name = display_name(&pair.corpus);
            let report = match process_pair(&config, pair) {
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
        log::info!(
            "Finished: {} files, {} replacements",
            summary.files,
            summary.replacements
        );
        ensure_batch_succeeded(&summary)
    }

    /// Config file values with command-line overrides applied
    pub fn resolve_config(&self) -> Result<CliConfig> {
        let mut config = CliConfig::load(self.config.as_deref())?;

        if let Some(dir) = &self.corpus_dir {
            config.paths.corpus_dir = dir.clone();
        }
        if let Some(dir) = &self.tables_dir {
            config.paths.tables_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.paths.output_dir = dir.clone();
        }
        if let Some(tier) = &self.target_tier {
            config.replacement.target_tier = tier.clone();
        }
        if self.no_align {
            config.corpus.align = false;
        }

        Ok(config)
    }
}

/// Rewritten files must not replace the corpus they are read from
fn ensure_distinct(corpus_dir: &Path, output_dir: &Path) -> Result<()> {
    let same = match (corpus_dir.canonicalize(), output_dir.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    };
    if same {
        return Err(CliError::ConfigError(format!(
            "output directory is the corpus directory: {}",
            output_dir.display()
        ))
        .into());
    }
    Ok(())
}

/// Replace and realign one corpus file into the output directory
fn process_pair(config: &CliConfig, pair: &FilePair) -> Result<FileReport> {
    let rules = load_table(&pair.table, &config.replacement.columns())?;

    let markers = list_markers(FileReader::open(&pair.corpus)?)
        .with_context(|| format!("Failed to read file: {}", pair.corpus.display()))?;
    log::debug!(
        "{}|markers: {}",
        pair.corpus.display(),
        markers
            .iter()
            .map(Tier::marker)
            .collect::<Vec<_>>()
            .join(" ")
    );

    let engine = ReplacementEngine::new(rules, config.replacement.target_tier.clone())
        .with_key_tier(config.replacement.key_tier.clone());
    let pipeline = config
        .corpus
        .pipeline(markers.contains(&Tier::Phonetic))
        .with_engine(engine);

    let file_name = pair
        .corpus
        .file_name()
        .ok_or_else(|| CliError::FileNotFound(pair.corpus.display().to_string()))?;
    let output = config.paths.output_dir.join(file_name);

    let mut writer = FileReader::create(&output)?;
    let result = pipeline
        .run(FileReader::open(&pair.corpus)?, &mut writer)
        .with_context(|| format!("Failed to process {}", pair.corpus.display()));
    drop(writer);

    match result {
        Ok(stats) => Ok(FileReport::from_run(display_name(&pair.corpus), stats)
            .with_output(display_name(&output))),
        Err(e) => {
            // no half-written corpus files in the output directory
            if let Err(remove) = fs::remove_file(&output) {
                log::debug!("{}|{}", output.display(), remove);
            }
            Err(e)
        }
    }
}
