//! Corpus/table pairing by ISO-code file name prefix
//!
//! `kuf-01.txt` and `kuf-Replacements.xlsx` share the identifier `kuf`: the
//! file name up to its first `-`.

use super::table_reader::is_table;
use crate::error::CliError;
use anyhow::{Context, Result};
use glob::{glob, Pattern};
use std::path::{Path, PathBuf};

/// A corpus file and the replacement table it is processed with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePair {
    /// Shared language identifier
    pub iso: String,
    /// Corpus text file
    pub corpus: PathBuf,
    /// Replacement table
    pub table: PathBuf,
}

/// Result of matching a corpus directory against a table directory
#[derive(Debug, Default)]
pub struct Pairing {
    /// Corpus files with a table, in corpus file order
    pub pairs: Vec<FilePair>,
    /// Corpus files without a table
    pub unpaired: Vec<PathBuf>,
}

/// Identifier of a corpus or table file: its name up to the first `-`
pub fn iso_code(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let (iso, _) = name.split_once('-')?;
    (!iso.is_empty()).then(|| iso.to_string())
}

fn files_in(dir: &Path, file_glob: &str) -> Result<Vec<PathBuf>> {
    let pattern = format!(
        "{}/{}",
        Pattern::escape(&dir.to_string_lossy()),
        file_glob
    );
    let mut files = Vec::new();
    for entry in glob(&pattern).map_err(|_| CliError::InvalidPattern(pattern.clone()))? {
        let path = entry.with_context(|| format!("Error resolving pattern: {}", pattern))?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Pair every `*.txt` corpus file with the first table sharing its identifier.
pub fn discover_pairs(corpus_dir: &Path, tables_dir: &Path) -> Result<Pairing> {
    if !corpus_dir.is_dir() {
        return Err(CliError::FileNotFound(corpus_dir.display().to_string()).into());
    }
    if !tables_dir.is_dir() {
        return Err(CliError::FileNotFound(tables_dir.display().to_string()).into());
    }

    let corpora = files_in(corpus_dir, "*.txt")?;
    if corpora.is_empty() {
        return Err(CliError::FileNotFound(format!("{}/*.txt", corpus_dir.display())).into());
    }
    let tables: Vec<PathBuf> = files_in(tables_dir, "*")?
        .into_iter()
        .filter(|p| is_table(p))
        .collect();

    let mut pairing = Pairing::default();
    for corpus in corpora {
        let Some(iso) = iso_code(&corpus) else {
            log::warn!("{}: no '<iso>-' prefix, skipped", corpus.display());
            pairing.unpaired.push(corpus);
            continue;
        };

        let mut matching = tables
            .iter()
            .filter(|t| iso_code(t).as_deref() == Some(iso.as_str()));
        match matching.next() {
            Some(table) => {
                for extra in matching {
                    log::warn!("{}: ignoring extra table {}", iso, extra.display());
                }
                pairing.pairs.push(FilePair {
                    iso,
                    corpus,
                    table: table.clone(),
                });
            }
            None => {
                log::warn!("{}: no replacement table for '{}'", corpus.display(), iso);
                pairing.unpaired.push(corpus);
            }
        }
    }

    Ok(pairing)
}
