//! JSON report formatter

use super::{FileReport, ReportFormatter, RunSummary};
use anyhow::Result;
use serde::Serialize;
use std::io::Write;

/// JSON formatter - collects file reports and writes one document at the end
pub struct JsonFormatter<W: Write> {
    writer: W,
    files: Vec<FileReport>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    files: &'a [FileReport],
    summary: &'a RunSummary,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            files: Vec::new(),
        }
    }
}

impl<W: Write> ReportFormatter for JsonFormatter<W> {
    fn file_report(&mut self, report: &FileReport) -> Result<()> {
        self.files.push(report.clone());
        Ok(())
    }

    fn finish(&mut self, summary: &RunSummary) -> Result<()> {
        let report = JsonReport {
            files: &self.files,
            summary,
        };
        serde_json::to_writer_pretty(&mut self.writer, &report)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
