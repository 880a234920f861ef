//! Terms command implementation

use crate::input::FileReader;
use anyhow::{Context, Result};
use clap::Args;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tbx_core::{extract_terms, Term};

/// Arguments for the terms command
#[derive(Debug, Args)]
pub struct TermsArgs {
    /// Toolbox dictionary file
    #[arg(short, long, value_name = "FILE", required = true)]
    pub input: PathBuf,

    /// Part of speech to export, e.g. `v`
    #[arg(short, long, value_name = "POS", required = true)]
    pub pos: String,

    /// Output CSV file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl TermsArgs {
    /// Execute the terms command
    pub fn execute(&self) -> Result<()> {
        let terms = terms_in(&self.input, &self.pos)?;

        match &self.output {
            Some(path) => write_terms(FileReader::create(path)?, &terms)
                .with_context(|| format!("Failed to write {}", path.display()))?,
            None => write_terms(io::stdout().lock(), &terms)?,
        }

        log::info!("exported {} terms", terms.len());
        Ok(())
    }
}

/// Write terms as CSV with a `word,pos,gloss` header
pub fn write_terms<W: Write>(writer: W, terms: &[Term]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    if terms.is_empty() {
        csv.write_record(["word", "pos", "gloss"])?;
    }
    for term in terms {
        csv.serialize(term)?;
    }
    csv.flush()?;
    Ok(())
}

/// Terms of a dictionary file
pub fn terms_in(path: &Path, pos: &str) -> Result<Vec<Term>> {
    extract_terms(FileReader::open(path)?, pos)
        .with_context(|| format!("Failed to read dictionary: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_write_terms() {
        let terms = vec![Term {
            word: "bam".to_string(),
            pos: "v".to_string(),
            gloss: "eat, drink".to_string(),
        }];
        let mut buf = Vec::new();
        write_terms(&mut buf, &terms).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "word,pos,gloss\nbam,v,\"eat, drink\"\n"
        );
    }

    #[test]
    fn test_empty_export_keeps_header() {
        let mut buf = Vec::new();
        write_terms(&mut buf, &[]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "word,pos,gloss\n");
    }

    #[test]
    fn test_terms_in_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("kuf.db");
        fs::write(&path, "\\lx bam\n\\ps v\n\\ge eat\n\n\\lx kaya\n\\ps n\n\\ge house\n").unwrap();

        let terms = terms_in(&path, "n").unwrap();
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].word, "kaya");
    }
}
