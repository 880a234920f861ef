//! File reading utilities

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Buffered file access with path context on every error
pub struct FileReader;

impl FileReader {
    /// Open a file for buffered line reading
    pub fn open(path: &Path) -> Result<BufReader<File>> {
        let file = File::open(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Ok(BufReader::new(file))
    }

    /// Create (or truncate) a file for buffered writing
    pub fn create(path: &Path) -> Result<BufWriter<File>> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create file: {}", path.display()))?;
        Ok(BufWriter::new(file))
    }
}
