//! Plain text report formatter

use super::{FileReport, ReportFormatter, RunSummary};
use anyhow::Result;
use std::io::{self, Write};

/// Plain text formatter - one line per file, then a summary block
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl TextFormatter<io::Stdout> {
    /// Create a formatter that writes to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ReportFormatter for TextFormatter<W> {
    fn file_report(&mut self, report: &FileReport) -> Result<()> {
        if let Some(error) = &report.error {
            writeln!(self.writer, "✗ {}: {}", report.file, error)?;
            return Ok(());
        }

        writeln!(
            self.writer,
            "✓ {}: {} records, {} replacements, {} issues",
            report.file,
            report.records,
            report.replacements,
            report.issues.len()
        )?;
        for issue in &report.issues {
            writeln!(self.writer, "  {}|{}", issue.reference, issue.message)?;
        }
        Ok(())
    }

    fn finish(&mut self, summary: &RunSummary) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Files: {} processed, {} failed, {} skipped",
            summary.files - summary.failed_files,
            summary.failed_files,
            summary.skipped_files
        )?;
        writeln!(
            self.writer,
            "Records: {} ({} with issues), replacements: {}",
            summary.records, summary.records_with_issues, summary.replacements
        )?;
        self.writer.flush()?;
        Ok(())
    }
}
