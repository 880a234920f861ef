//! Toolbox dictionary (MDF) files.
//!
//! Dictionaries are flat: one entry per `\lx` headword, no interlinear
//! alignment. Replacement edits a single field of an entry when it exactly
//! matches the rule's old value.

use crate::error::Result;
use crate::reader::RecordReader;
use crate::record::{RepeatStyle, TierRecord};
use crate::table::ReplacementTable;
use crate::tier::Tier;
use serde::Serialize;
use std::io::{BufRead, Write};

/// Header line Toolbox writes at the top of MDF dictionaries
pub const DEFAULT_HEADER: &str = "\\_sh v3.0  231  MDF 4.0";

/// Counters for one dictionary run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DictionaryStats {
    /// Entries written
    pub entries: usize,
    /// Fields replaced
    pub replacements: usize,
}

/// A dictionary entry exported by [`extract_terms`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Term {
    /// Headword
    pub word: String,
    /// Part of speech
    pub pos: String,
    /// Gloss
    pub gloss: String,
}

fn header_tier() -> Tier {
    Tier::Other("\\_sh".to_string())
}

fn entries<R: BufRead>(input: R) -> impl Iterator<Item = Result<TierRecord>> {
    RecordReader::from_reader(input, Tier::Lexeme).with_repeat_style(RepeatStyle::Lines)
}

/// Rewrites dictionary files, optionally replacing one field per entry.
#[derive(Debug, Clone)]
pub struct DictionaryPipeline {
    field_order: Vec<Tier>,
    target: Tier,
    rules: ReplacementTable,
}

impl Default for DictionaryPipeline {
    fn default() -> Self {
        Self {
            field_order: vec![
                Tier::Lexeme,
                Tier::Alternate,
                Tier::Homonym,
                Tier::Phonetic,
                Tier::PartOfSpeech,
                Tier::Gloss,
                Tier::Note,
                Tier::DateStamp,
            ],
            target: Tier::PartOfSpeech,
            rules: ReplacementTable::new(),
        }
    }
}

impl DictionaryPipeline {
    /// Replace `target` fields using `rules`, keyed by headword
    pub fn new(rules: ReplacementTable, target: Tier) -> Self {
        Self {
            rules,
            target,
            ..Self::default()
        }
    }

    /// Override the output order of known fields
    pub fn with_field_order(mut self, order: Vec<Tier>) -> Self {
        self.field_order = order;
        self
    }

    /// Replace the target field of one entry. Returns whether it changed.
    pub fn replace_entry(&self, entry: &mut TierRecord) -> bool {
        let Some(headword) = entry.get(&Tier::Lexeme) else {
            return false;
        };
        let Some(rule) = self.rules.get(headword) else {
            return false;
        };
        if entry.get(&self.target) != Some(rule.old.as_str()) {
            return false;
        }

        log::info!(
            "changed form '{}' tier {} '{}' to '{}'",
            headword,
            self.target,
            rule.old,
            rule.new
        );
        entry.set(self.target.clone(), rule.new.clone());
        true
    }

    /// Write one entry: known fields in order, then the rest, then a blank line.
    pub fn write_entry<W: Write>(&self, out: &mut W, entry: &TierRecord) -> std::io::Result<()> {
        for tier in &self.field_order {
            if let Some(content) = entry.get(tier) {
                writeln!(out, "{} {}", tier, content)?;
            }
        }
        for (tier, content) in entry.iter() {
            if !self.field_order.contains(tier) {
                writeln!(out, "{} {}", tier, content)?;
            }
        }
        writeln!(out)
    }

    /// Process a whole dictionary.
    ///
    /// Anything before the first `\lx` is dropped except its `\_sh` header,
    /// which is kept; without one the standard MDF header is written.
    pub fn run<R: BufRead, W: Write>(&self, input: R, output: &mut W) -> Result<DictionaryStats> {
        let mut stats = DictionaryStats::default();
        let mut header_written = false;

        for entry in entries(input) {
            let mut entry = entry?;
            if !entry.contains(&Tier::Lexeme) {
                if !header_written {
                    let header = entry
                        .get(&header_tier())
                        .map(|content| format!("\\_sh {content}"));
                    writeln!(output, "{}\n", header.as_deref().unwrap_or(DEFAULT_HEADER))?;
                    header_written = true;
                }
                continue;
            }
            if !header_written {
                writeln!(output, "{DEFAULT_HEADER}\n")?;
                header_written = true;
            }

            if self.replace_entry(&mut entry) {
                stats.replacements += 1;
            }
            self.write_entry(output, &entry)?;
            stats.entries += 1;
        }

        output.flush()?;
        Ok(stats)
    }
}

/// Every entry whose `\ps` equals `pos`, in file order.
pub fn extract_terms<R: BufRead>(input: R, pos: &str) -> Result<Vec<Term>> {
    let mut terms = Vec::new();
    for entry in entries(input) {
        let entry = entry?;
        let (Some(word), Some(entry_pos)) = (entry.get(&Tier::Lexeme), entry.get(&Tier::PartOfSpeech))
        else {
            continue;
        };
        if entry_pos == pos {
            terms.push(Term {
                word: word.to_string(),
                pos: entry_pos.to_string(),
                gloss: entry.get(&Tier::Gloss).unwrap_or_default().to_string(),
            });
        }
    }
    Ok(terms)
}
