//! Markers command implementation

use crate::input::{resolve_patterns, FileReader};
use anyhow::{Context, Result};
use clap::Args;
use std::io::{self, Write};
use std::path::Path;
use tbx_core::{list_markers, Tier};

/// Arguments for the markers command
#[derive(Debug, Args)]
pub struct MarkersArgs {
    /// Files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,
}

impl MarkersArgs {
    /// Execute the markers command
    pub fn execute(&self) -> Result<()> {
        let files = resolve_patterns(&self.input)?;
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for path in &files {
            writeln!(out, "{}", marker_line(path)?)?;
        }
        out.flush()?;
        Ok(())
    }
}

/// `path: \marker \marker ...` in first-seen order
fn marker_line(path: &Path) -> Result<String> {
    let markers = list_markers(FileReader::open(path)?)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let joined = markers
        .iter()
        .map(Tier::marker)
        .collect::<Vec<_>>()
        .join(" ");
    Ok(format!("{}: {}", path.display(), joined))
}
