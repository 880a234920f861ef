//! Toolbox interlinear corpus processing
//!
//! This crate reads SIL Toolbox text files, aligns the interlinear tiers of
//! each record word by word, checks their structure, applies lexeme-id driven
//! replacements and writes the records back with columns realigned.
//!
//! # Architecture
//!
//! Each stage is a small, separately usable type:
//! - **Reading**: [`RecordReader`] splits a line stream into [`TierRecord`]s
//! - **Alignment**: [`Aligner`] builds an [`AlignedTable`] of words and morpheme slots
//! - **Validation**: [`Validator`] rejects records whose tiers do not line up
//! - **Replacement**: [`ReplacementEngine`] applies a [`ReplacementTable`]
//! - **Writing**: [`RecordWriter`] re-serializes in canonical tier order
//!
//! [`CorpusPipeline`] chains them for corpus files; [`DictionaryPipeline`]
//! handles MDF dictionaries, which have no interlinear tiers.
//!
//! # Example
//!
//! ```rust
//! use tbx_core::{CorpusPipeline, ReplacementEngine, ReplacementTable, Tier};
//!
//! let corpus = "\\ref 001\n\\tx kaya\n\\mb kaya\n\\ge house\n\\ps n\n\\lxid 0012\n";
//! let rules: ReplacementTable = vec![("0012", "n", "nloc")].into_iter().collect();
//!
//! let pipeline = CorpusPipeline::new()
//!     .with_engine(ReplacementEngine::new(rules, Tier::PartOfSpeech));
//!
//! let mut out = Vec::new();
//! let stats = pipeline.run(corpus.as_bytes(), &mut out).unwrap();
//!
//! assert_eq!(stats.replacements, 1);
//! assert!(String::from_utf8(out).unwrap().contains("\\ps nloc"));
//! ```

pub mod align;
pub mod dictionary;
pub mod error;
pub mod pipeline;
pub mod reader;
pub mod record;
pub mod replace;
pub mod table;
pub mod tier;
pub mod validate;
pub mod writer;

pub use align::{AlignedTable, Aligner, MorphemeGroup, Word};
pub use dictionary::{extract_terms, DictionaryPipeline, DictionaryStats, Term};
pub use error::{CoreError, ReplacementError, Result, StructuralError};
pub use pipeline::{CorpusPipeline, IssueKind, RecordIssue, RecordOutcome, RunStats};
pub use reader::{list_markers, read_records, RecordReader};
pub use record::{parse_marker_line, RepeatStyle, TierRecord};
pub use replace::{AppliedReplacement, ReplaceMode, ReplacementEngine};
pub use table::{ReplacementRule, ReplacementTable, TableColumns};
pub use tier::Tier;
pub use validate::Validator;
pub use writer::{realign, rejoin, RecordWriter};
