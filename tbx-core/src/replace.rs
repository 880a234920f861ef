//! Lexeme-id driven replacement on aligned records.

use crate::align::AlignedTable;
use crate::error::ReplacementError;
use crate::record::TierRecord;
use crate::table::{ReplacementRule, ReplacementTable};
use crate::tier::Tier;
use serde::Serialize;

/// A replacement that was applied to a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedReplacement {
    /// Lexeme id that matched, case-folded
    pub lexeme_id: String,
    /// Tier that was edited
    pub tier: Tier,
    /// Replaced value
    pub old: String,
    /// New value
    pub new: String,
    /// Reference id of the record
    pub reference: String,
}

/// How the target tier is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceMode {
    /// Substring replacement across the whole transcription tier
    WholeTier,
    /// Exact replacement of single morpheme slots
    PerMorpheme,
}

/// Applies a [`ReplacementTable`] to aligned records.
#[derive(Debug, Clone)]
pub struct ReplacementEngine {
    rules: ReplacementTable,
    key_tier: Tier,
    target: Tier,
}

/// An edit found during planning: word index, slot index, rule.
type Planned<'r> = (usize, usize, String, &'r ReplacementRule);

impl ReplacementEngine {
    /// Create an engine editing `target`, keyed by `\lxid`.
    pub fn new(rules: ReplacementTable, target: Tier) -> Self {
        Self {
            rules,
            key_tier: Tier::LexemeId,
            target,
        }
    }

    /// Use a different tier as the lookup key
    pub fn with_key_tier(mut self, key_tier: Tier) -> Self {
        self.key_tier = key_tier;
        self
    }

    /// Mode selected by the target tier
    pub fn mode(&self) -> ReplaceMode {
        if self.target == Tier::Transcription {
            ReplaceMode::WholeTier
        } else {
            ReplaceMode::PerMorpheme
        }
    }

    /// The tier being edited
    pub fn target(&self) -> &Tier {
        &self.target
    }

    /// The loaded rules
    pub fn rules(&self) -> &ReplacementTable {
        &self.rules
    }

    /// Apply all matching rules to one record.
    ///
    /// Edits are planned first and only applied when planning succeeds, so a
    /// failing record is left exactly as it was.
    pub fn apply(
        &self,
        record: &mut TierRecord,
        table: &mut AlignedTable,
    ) -> Result<Vec<AppliedReplacement>, ReplacementError> {
        let planned = match self.mode() {
            ReplaceMode::WholeTier => self.plan(table, &Tier::MorphemeBreak, |_, _| true)?,
            ReplaceMode::PerMorpheme => {
                self.plan(table, &self.target, |value, rule| value == rule.old)?
            }
        };

        let transcription = match self.mode() {
            ReplaceMode::WholeTier => self.rewrite_transcription(record, table, &planned)?,
            ReplaceMode::PerMorpheme => None,
        };

        let reference = record.reference().to_string();
        let mut applied = Vec::with_capacity(planned.len());
        for (word, slot, lexeme_id, rule) in planned {
            if self.mode() == ReplaceMode::PerMorpheme {
                if let Some(value) = table.words[word]
                    .morphemes
                    .get_mut(&self.target)
                    .and_then(|slots| slots.get_mut(slot))
                {
                    *value = rule.new.clone();
                }
            }

            log::info!(
                "changed form '{}' tier {} '{}' to '{}' in {}",
                lexeme_id,
                self.target,
                rule.old,
                rule.new,
                reference
            );
            applied.push(AppliedReplacement {
                lexeme_id,
                tier: self.target.clone(),
                old: rule.old.clone(),
                new: rule.new.clone(),
                reference: reference.clone(),
            });
        }

        if let Some((tx, words)) = transcription {
            record.set(Tier::Transcription, tx);
            // the writer rebuilds \tx from the words
            for (w, text) in table.words.iter_mut().zip(words) {
                w.text = text;
            }
        }

        Ok(applied)
    }

    /// The transcription after every planned rule, with its words.
    ///
    /// Fails when the edits change the word count, since the words would no
    /// longer line up with the morpheme tiers.
    fn rewrite_transcription(
        &self,
        record: &TierRecord,
        table: &AlignedTable,
        planned: &[Planned<'_>],
    ) -> Result<Option<(String, Vec<String>)>, ReplacementError> {
        let Some(tx) = record.get(&Tier::Transcription) else {
            return Ok(None);
        };
        if planned.is_empty() {
            return Ok(None);
        }

        let tx = planned
            .iter()
            .fold(tx.to_string(), |tx, (_, _, _, rule)| tx.replace(&rule.old, &rule.new));
        let words: Vec<String> = tx.split_whitespace().map(str::to_string).collect();
        if words.len() != table.len() {
            return Err(ReplacementError::WordCountChanged {
                expected: table.len(),
                found: words.len(),
            });
        }
        Ok(Some((tx, words)))
    }

    /// Walk the slots of `walk` in every word and collect rule hits that
    /// satisfy `accept(slot_value, rule)`.
    fn plan<F>(
        &self,
        table: &AlignedTable,
        walk: &Tier,
        accept: F,
    ) -> Result<Vec<Planned<'_>>, ReplacementError>
    where
        F: Fn(&str, &ReplacementRule) -> bool,
    {
        let mut planned = Vec::new();
        for (i, word) in table.words.iter().enumerate() {
            let slots = word.slots(walk).ok_or_else(|| ReplacementError::MissingTier {
                word: i,
                tier: walk.to_string(),
            })?;
            let keys = word
                .slots(&self.key_tier)
                .ok_or_else(|| ReplacementError::MissingTier {
                    word: i,
                    tier: self.key_tier.to_string(),
                })?;

            for (slot, value) in slots.iter().enumerate() {
                let key = keys
                    .get(slot)
                    .ok_or_else(|| ReplacementError::MissingSlot {
                        word: i,
                        tier: self.key_tier.to_string(),
                        slot,
                    })?
                    .to_lowercase();
                if let Some(rule) = self.rules.get(&key) {
                    if accept(value, rule) {
                        planned.push((i, slot, key, rule));
                    }
                }
            }
        }
        Ok(planned)
    }
}
