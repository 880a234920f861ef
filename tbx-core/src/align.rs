//! Word/morpheme alignment.
//!
//! Interlinear tiers are aligned by position: the i-th whitespace token of
//! `\tx` is word i, and the i-th morpheme-word of every morpheme tier belongs
//! to it. That position is the key the replacement engine and the writer use
//! to address words and morpheme slots.

use crate::record::TierRecord;
use crate::tier::Tier;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Morpheme-words: runs of units joined by `=`/`-` boundary markers, or a
/// single non-whitespace run.
fn morpheme_word_regex() -> &'static Regex {
    static MORPHEME_WORD: OnceLock<Regex> = OnceLock::new();
    MORPHEME_WORD.get_or_init(|| {
        Regex::new(r"(?:\S+(?:\s+[=-]\s+|[=-]\s+))+(?:\S+(?:\s+[=-])*|\s+\S+)|\S+")
            .expect("morpheme-word pattern is valid")
    })
}

/// Morpheme slots of one word, per morpheme tier.
pub type MorphemeGroup = BTreeMap<Tier, Vec<String>>;

/// One transcription word with its morpheme breakdown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Word {
    /// Word text from the transcription tier; empty for surplus morpheme-words
    pub text: String,
    /// Slots per morpheme tier
    pub morphemes: MorphemeGroup,
}

impl Word {
    /// Create a word with no morpheme data
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            morphemes: MorphemeGroup::new(),
        }
    }

    /// Slots of the given tier, if the word carries it
    pub fn slots(&self, tier: &Tier) -> Option<&[String]> {
        self.morphemes.get(tier).map(Vec::as_slice)
    }
}

/// Positional word/morpheme table of one record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignedTable {
    /// Words in transcription order
    pub words: Vec<Word>,
}

impl AlignedTable {
    /// Number of words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether alignment produced no words
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Total slot count of a tier across all words
    pub fn slot_count(&self, tier: &Tier) -> usize {
        self.words
            .iter()
            .filter_map(|w| w.morphemes.get(tier))
            .map(Vec::len)
            .sum()
    }

    /// Every morpheme tier that occurs on at least one word
    pub fn tiers(&self) -> Vec<Tier> {
        let mut tiers: Vec<Tier> = self
            .words
            .iter()
            .flat_map(|w| w.morphemes.keys().cloned())
            .collect();
        tiers.sort();
        tiers.dedup();
        tiers
    }
}

/// Builds [`AlignedTable`]s from records.
#[derive(Debug, Clone)]
pub struct Aligner {
    morpheme_tiers: Vec<Tier>,
}

impl Default for Aligner {
    fn default() -> Self {
        Self::new(Self::default_morpheme_tiers())
    }
}

impl Aligner {
    /// Create an aligner over the given morpheme tiers
    pub fn new(morpheme_tiers: Vec<Tier>) -> Self {
        Self { morpheme_tiers }
    }

    /// `\mb`, `\ge`, `\ps`, `\lxid`
    pub fn default_morpheme_tiers() -> Vec<Tier> {
        vec![
            Tier::MorphemeBreak,
            Tier::Gloss,
            Tier::PartOfSpeech,
            Tier::LexemeId,
        ]
    }

    /// Add `\ph` to the morpheme tiers, as corpora that carry a phonetic tier need.
    pub fn with_phonetic(mut self) -> Self {
        if !self.morpheme_tiers.contains(&Tier::Phonetic) {
            self.morpheme_tiers.push(Tier::Phonetic);
        }
        self
    }

    /// The morpheme tiers this aligner extracts
    pub fn morpheme_tiers(&self) -> &[Tier] {
        &self.morpheme_tiers
    }

    /// Align a record. Always returns a fresh table.
    pub fn align(&self, record: &TierRecord) -> AlignedTable {
        let mut words: Vec<Word> = record
            .get(&Tier::Transcription)
            .map(|tx| tx.split_whitespace().map(Word::new).collect())
            .unwrap_or_default();

        for tier in &self.morpheme_tiers {
            let Some(data) = record.get(tier) else {
                continue;
            };

            for (i, slots) in split_morpheme_words(data).into_iter().enumerate() {
                match words.get_mut(i) {
                    Some(word) => {
                        word.morphemes.insert(tier.clone(), slots);
                    }
                    None => {
                        // more m-words than w-words: keep them under an empty word
                        let mut word = Word::default();
                        word.morphemes.insert(tier.clone(), slots);
                        words.push(word);
                    }
                }
            }
        }

        AlignedTable { words }
    }
}

/// Split a morpheme tier into per-word slot lists.
pub fn split_morpheme_words(data: &str) -> Vec<Vec<String>> {
    morpheme_word_regex()
        .find_iter(data)
        .map(|m| m.as_str().split_whitespace().map(str::to_string).collect())
        .collect()
}
