//! Structural consistency checks for aligned records.

use crate::align::AlignedTable;
use crate::error::StructuralError;
use crate::record::TierRecord;
use crate::tier::Tier;

/// Gate between alignment and replacement.
#[derive(Debug, Clone)]
pub struct Validator {
    required: Vec<Tier>,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            required: vec![
                Tier::Transcription,
                Tier::MorphemeBreak,
                Tier::Gloss,
                Tier::PartOfSpeech,
                Tier::LexemeId,
            ],
        }
    }
}

impl Validator {
    /// Create a validator requiring the given tiers
    pub fn new(required: Vec<Tier>) -> Self {
        Self { required }
    }

    /// Tiers that must be present and non-empty
    pub fn required(&self) -> &[Tier] {
        &self.required
    }

    /// Check a record and its table, logging the first problem found.
    pub fn validate(&self, record: &TierRecord, table: &AlignedTable) -> Result<(), StructuralError> {
        let result = self.check(record, table);
        if let Err(err) = &result {
            let reference = record.reference();
            match err {
                StructuralError::NoWords
                | StructuralError::MissingTier { .. }
                | StructuralError::EmptyTier { .. } => log::warn!("{reference}|{err}"),
                StructuralError::WordCountMismatch { .. }
                | StructuralError::MorphemeCountMismatch { .. } => log::error!("{reference}|{err}"),
            }
        }
        result
    }

    /// Boolean form of [`Validator::validate`]
    pub fn is_valid(&self, record: &TierRecord, table: &AlignedTable) -> bool {
        self.validate(record, table).is_ok()
    }

    fn check(&self, record: &TierRecord, table: &AlignedTable) -> Result<(), StructuralError> {
        if table.is_empty() {
            return Err(StructuralError::NoWords);
        }

        for tier in &self.required {
            match record.get(tier) {
                None => {
                    return Err(StructuralError::MissingTier {
                        tier: tier.to_string(),
                    })
                }
                Some(content) if content.trim().is_empty() => {
                    return Err(StructuralError::EmptyTier {
                        tier: tier.to_string(),
                    })
                }
                Some(_) => {}
            }
        }

        let tiers = table.tiers();
        for (i, word) in table.words.iter().enumerate() {
            if word.text.is_empty() || tiers.iter().any(|t| !word.morphemes.contains_key(t)) {
                return Err(StructuralError::WordCountMismatch { word: i });
            }

            let Some(reference) = word.slots(&Tier::MorphemeBreak) else {
                continue;
            };
            let expected = reference.len();
            for (tier, slots) in &word.morphemes {
                if slots.len() != expected {
                    return Err(StructuralError::MorphemeCountMismatch {
                        word: i,
                        tier: tier.to_string(),
                        found: slots.len(),
                        expected,
                    });
                }
            }
        }

        Ok(())
    }
}
