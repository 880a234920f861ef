//! Record serialization with column realignment.

use crate::align::AlignedTable;
use crate::record::TierRecord;
use crate::tier::Tier;
use std::collections::BTreeMap;
use std::io::{self, Write};

/// Serializes corpus records in canonical tier order.
#[derive(Debug, Clone)]
pub struct RecordWriter {
    align: bool,
}

impl Default for RecordWriter {
    fn default() -> Self {
        Self { align: true }
    }
}

impl RecordWriter {
    /// Create a writer; with `align` off records are written as stored.
    pub fn new(align: bool) -> Self {
        Self { align }
    }

    /// Whether interlinear tiers are rebuilt from the aligned table
    pub fn aligns(&self) -> bool {
        self.align
    }

    /// Write one record followed by a blank line.
    ///
    /// `table` must only be given for records that passed validation; its
    /// words then replace the interlinear tiers of the record.
    pub fn write<W: Write>(
        &self,
        out: &mut W,
        record: &TierRecord,
        table: Option<&AlignedTable>,
    ) -> io::Result<()> {
        match table {
            Some(table) if self.align => serialize(out, &realign(record, table)),
            Some(table) => serialize(out, &rejoin(record, table)),
            None => serialize(out, record),
        }
    }

    /// Render one record to a string
    pub fn render(&self, record: &TierRecord, table: Option<&AlignedTable>) -> String {
        let mut buf = Vec::new();
        // writing into a Vec cannot fail
        let _ = self.write(&mut buf, record, table);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// Rebuild `\tx` and every morpheme tier of the table with padded columns.
///
/// Each slot is as wide as its longest value across tiers, but never
/// narrower than the word itself, plus one separating space.
pub fn realign(record: &TierRecord, table: &AlignedTable) -> TierRecord {
    let mut tx = String::new();
    let mut tiers: BTreeMap<Tier, String> = table
        .tiers()
        .into_iter()
        .map(|t| (t, String::new()))
        .collect();

    for word in &table.words {
        tx.push_str(&word.text);
        let word_len = word.text.len();
        let slot_count = word.slots(&Tier::MorphemeBreak).map_or(0, <[String]>::len);

        let mut group_width = 0;
        for i in 0..slot_count {
            let width = word
                .morphemes
                .values()
                .filter_map(|slots| slots.get(i))
                .map(String::len)
                .fold(word_len, usize::max)
                + 1;
            group_width += width;

            for (tier, slots) in &word.morphemes {
                let value = slots.get(i).map_or("", String::as_str);
                let line = tiers.entry(tier.clone()).or_default();
                line.push_str(value);
                pad(line, width - value.len());
            }
        }

        if slot_count == 0 {
            group_width = word_len + 1;
        }
        pad(&mut tx, group_width - word_len);
    }

    let mut rebuilt = record.clone();
    rebuilt.set(Tier::Transcription, tx);
    for (tier, line) in tiers {
        rebuilt.set(tier, line);
    }
    rebuilt
}

/// Write edited morpheme slots back without padding.
///
/// Tiers whose slots still match their stored tokens keep their original
/// spacing; the others are joined with single spaces.
pub fn rejoin(record: &TierRecord, table: &AlignedTable) -> TierRecord {
    let mut rebuilt = record.clone();
    for tier in table.tiers() {
        let slots: Vec<&str> = table
            .words
            .iter()
            .filter_map(|word| word.slots(&tier))
            .flatten()
            .map(String::as_str)
            .collect();
        let stored = record.get(&tier).unwrap_or_default();
        if !stored.split_whitespace().eq(slots.iter().copied()) {
            rebuilt.set(tier, slots.join(" "));
        }
    }
    rebuilt
}

fn pad(line: &mut String, n: usize) {
    line.extend(std::iter::repeat(' ').take(n));
}

/// Known tiers in canonical order, then other markers in insertion order,
/// then `\id` after a blank line.
fn serialize<W: Write>(out: &mut W, record: &TierRecord) -> io::Result<()> {
    let order = Tier::corpus_order();

    for tier in order {
        if let Some(content) = record.get(tier) {
            writeln!(out, "{} {}", tier, content)?;
        }
    }
    for (tier, content) in record.iter() {
        if *tier != Tier::Id && !order.contains(tier) {
            writeln!(out, "{} {}", tier, content)?;
        }
    }
    if let Some(content) = record.get(&Tier::Id) {
        writeln!(out)?;
        writeln!(out, "{} {}", Tier::Id, content)?;
    }
    writeln!(out)
}
