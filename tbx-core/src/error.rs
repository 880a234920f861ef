//! Core error types

use thiserror::Error;

/// Errors that abort processing of a whole input stream
#[derive(Error, Debug)]
pub enum CoreError {
    /// A line that cannot be attached to any field marker
    #[error("malformed line {line}: {reason}")]
    MalformedLine {
        /// 1-based line number in the input
        line: usize,
        /// Why the line was rejected
        reason: String,
    },

    /// Input or output failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid pipeline or table configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Structural problems found by the validator.
///
/// These are recoverable: the record is written through unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    /// The transcription tier produced no words
    #[error("no words")]
    NoWords,

    /// A required tier does not occur in the record
    #[error("morpheme tiers missing ({tier})")]
    MissingTier {
        /// Marker of the missing tier
        tier: String,
    },

    /// A required tier occurs but has no content
    #[error("morpheme tiers empty ({tier})")]
    EmptyTier {
        /// Marker of the empty tier
        tier: String,
    },

    /// A word does not carry every morpheme tier of the record
    #[error("word numbers don't match (word {word})")]
    WordCountMismatch {
        /// Position of the offending word
        word: usize,
    },

    /// Morpheme tiers disagree on the slot count of a word
    #[error("morpheme numbers don't match (word {word}, {tier}: {found}, expected {expected})")]
    MorphemeCountMismatch {
        /// Position of the offending word
        word: usize,
        /// Marker of the disagreeing tier
        tier: String,
        /// Slot count of that tier
        found: usize,
        /// Slot count of the morpheme-break tier
        expected: usize,
    },
}

/// Failures while applying replacement rules to one record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplacementError {
    /// A word lacks a tier the engine needs
    #[error("word {word} has no {tier} tier")]
    MissingTier {
        /// Position of the word
        word: usize,
        /// Marker of the missing tier
        tier: String,
    },

    /// The key tier has fewer slots than the tier being walked
    #[error("word {word} has no {tier} value at slot {slot}")]
    MissingSlot {
        /// Position of the word
        word: usize,
        /// Marker of the short tier
        tier: String,
        /// Slot index that was missing
        slot: usize,
    },

    /// A whole-tier edit split or merged transcription words
    #[error("transcription edit changes the word count from {expected} to {found}")]
    WordCountChanged {
        /// Words before the edit
        expected: usize,
        /// Words after the edit
        found: usize,
    },
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
