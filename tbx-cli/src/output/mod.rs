//! Run report formatting module

use anyhow::Result;
use serde::Serialize;
use tbx_core::{DictionaryStats, RecordIssue, RunStats};

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Outcome of processing one input file
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileReport {
    /// Input file
    pub file: String,
    /// Output file, if one was written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Records (or dictionary entries) seen
    pub records: usize,
    /// Replacements applied
    pub replacements: usize,
    /// Records that failed validation or replacement
    pub issues: Vec<RecordIssue>,
    /// Fatal error that stopped this file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    /// Report for a corpus file
    pub fn from_run(file: impl Into<String>, stats: RunStats) -> Self {
        Self {
            file: file.into(),
            records: stats.records,
            replacements: stats.replacements,
            issues: stats.issues,
            ..Self::default()
        }
    }

    /// Report for a dictionary file
    pub fn from_dictionary(file: impl Into<String>, stats: DictionaryStats) -> Self {
        Self {
            file: file.into(),
            records: stats.entries,
            replacements: stats.replacements,
            ..Self::default()
        }
    }

    /// Report for a file that could not be processed
    pub fn failed(file: impl Into<String>, error: &anyhow::Error) -> Self {
        Self {
            file: file.into(),
            error: Some(format!("{error:#}")),
            ..Self::default()
        }
    }

    /// Record where the output went
    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Whether the file failed as a whole
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Totals over every file of a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Files attempted
    pub files: usize,
    /// Files that failed as a whole
    pub failed_files: usize,
    /// Corpus files skipped for lack of a table
    pub skipped_files: usize,
    /// Records seen
    pub records: usize,
    /// Records with issues
    pub records_with_issues: usize,
    /// Replacements applied
    pub replacements: usize,
}

impl RunSummary {
    /// Add one file's report to the totals
    pub fn add(&mut self, report: &FileReport) {
        self.files += 1;
        if report.is_failed() {
            self.failed_files += 1;
        }
        self.records += report.records;
        self.records_with_issues += report.issues.len();
        self.replacements += report.replacements;
    }
}

/// Trait for run report formatters
pub trait ReportFormatter {
    /// Report a single processed file
    fn file_report(&mut self, report: &FileReport) -> Result<()>;

    /// Write the totals and flush
    fn finish(&mut self, summary: &RunSummary) -> Result<()>;
}
