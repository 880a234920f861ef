//! Reader → aligner → validator → replacement → writer, per input stream.

use crate::align::{AlignedTable, Aligner};
use crate::error::{ReplacementError, Result, StructuralError};
use crate::reader::RecordReader;
use crate::record::TierRecord;
use crate::replace::ReplacementEngine;
use crate::tier::Tier;
use crate::validate::Validator;
use crate::writer::RecordWriter;
use serde::Serialize;
use std::io::{BufRead, Write};

/// What happened to a single record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Block without the record-start marker, written as read
    Passthrough,
    /// Failed validation, written unchanged
    Invalid(StructuralError),
    /// Replacement failed, written without edits
    Failed(ReplacementError),
    /// Aligned and written, with this many replacements applied
    Processed(usize),
}

/// Category of a reported record problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Structural validation failure
    Structural,
    /// Replacement failure
    Replacement,
}

/// A record that could not be processed normally
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordIssue {
    /// Reference id of the record
    pub reference: String,
    /// Failure category
    pub kind: IssueKind,
    /// Human-readable cause
    pub message: String,
}

/// Counters for one processed stream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Records carrying the record-start marker
    pub records: usize,
    /// Other blocks (file header, `\id`)
    pub passthrough: usize,
    /// Replacements applied
    pub replacements: usize,
    /// Records that failed validation or replacement
    pub issues: Vec<RecordIssue>,
}

impl RunStats {
    /// Records rejected by the validator
    pub fn invalid_records(&self) -> usize {
        self.count(IssueKind::Structural)
    }

    /// Records whose replacement failed
    pub fn failed_records(&self) -> usize {
        self.count(IssueKind::Replacement)
    }

    fn count(&self, kind: IssueKind) -> usize {
        self.issues.iter().filter(|i| i.kind == kind).count()
    }

    /// Fold another stream's counters into this one
    pub fn merge(&mut self, other: RunStats) {
        self.records += other.records;
        self.passthrough += other.passthrough;
        self.replacements += other.replacements;
        self.issues.extend(other.issues);
    }
}

/// Processes interlinear corpus streams record by record.
#[derive(Debug, Clone)]
pub struct CorpusPipeline {
    record_marker: Tier,
    aligner: Aligner,
    validator: Validator,
    engine: Option<ReplacementEngine>,
    writer: RecordWriter,
}

impl Default for CorpusPipeline {
    fn default() -> Self {
        Self {
            record_marker: Tier::Ref,
            aligner: Aligner::default(),
            validator: Validator::default(),
            engine: None,
            writer: RecordWriter::default(),
        }
    }
}

impl CorpusPipeline {
    /// Create a pipeline with default tiers and no replacement
    pub fn new() -> Self {
        Self::default()
    }

    /// Split records at a different marker
    pub fn with_record_marker(mut self, marker: Tier) -> Self {
        self.record_marker = marker;
        self
    }

    /// Use a custom aligner
    pub fn with_aligner(mut self, aligner: Aligner) -> Self {
        self.aligner = aligner;
        self
    }

    /// Use a custom validator
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    /// Apply replacements to every valid record
    pub fn with_engine(mut self, engine: ReplacementEngine) -> Self {
        self.engine = Some(engine);
        self
    }

    /// Enable or disable column realignment on output
    pub fn with_align(mut self, align: bool) -> Self {
        self.writer = RecordWriter::new(align);
        self
    }

    /// The aligner in use
    pub fn aligner(&self) -> &Aligner {
        &self.aligner
    }

    /// Process a whole stream.
    ///
    /// Per-record problems are logged and collected in the stats; malformed
    /// input and I/O failures abort the stream.
    pub fn run<R: BufRead, W: Write>(&self, input: R, output: &mut W) -> Result<RunStats> {
        let mut stats = RunStats::default();

        for record in RecordReader::from_reader(input, self.record_marker.clone()) {
            let record = record?;
            let reference = record.reference().to_string();

            match self.process_record(record, output)? {
                RecordOutcome::Passthrough => stats.passthrough += 1,
                RecordOutcome::Processed(n) => {
                    stats.records += 1;
                    stats.replacements += n;
                }
                RecordOutcome::Invalid(err) => {
                    stats.records += 1;
                    stats.issues.push(RecordIssue {
                        reference,
                        kind: IssueKind::Structural,
                        message: err.to_string(),
                    });
                }
                RecordOutcome::Failed(err) => {
                    stats.records += 1;
                    stats.issues.push(RecordIssue {
                        reference,
                        kind: IssueKind::Replacement,
                        message: err.to_string(),
                    });
                }
            }
        }

        output.flush()?;
        Ok(stats)
    }

    /// Align, validate, replace and write a single record.
    pub fn process_record<W: Write>(
        &self,
        mut record: TierRecord,
        output: &mut W,
    ) -> Result<RecordOutcome> {
        if !record.contains(&self.record_marker) {
            self.writer.write(output, &record, None)?;
            return Ok(RecordOutcome::Passthrough);
        }

        let mut table: AlignedTable = self.aligner.align(&record);
        if let Err(err) = self.validator.validate(&record, &table) {
            self.writer.write(output, &record, None)?;
            return Ok(RecordOutcome::Invalid(err));
        }

        let outcome = match &self.engine {
            Some(engine) => match engine.apply(&mut record, &mut table) {
                Ok(applied) => RecordOutcome::Processed(applied.len()),
                Err(err) => {
                    log::error!("{}|replacement failed: {}", record.reference(), err);
                    RecordOutcome::Failed(err)
                }
            },
            None => RecordOutcome::Processed(0),
        };

        self.writer.write(output, &record, Some(&table))?;
        Ok(outcome)
    }
}
