//! Line-oriented record reader.
//!
//! Turns a sequence of lines into [`TierRecord`]s. A record begins at every
//! line carrying the record-start marker (`\ref` for corpora, `\lx` for
//! dictionaries); all other marker lines and continuation lines are merged
//! into the record in progress.

use crate::error::{CoreError, Result};
use crate::record::{parse_marker_line, RepeatStyle, TierRecord};
use crate::tier::Tier;
use std::io::{self, BufRead};

/// Lazy, single-pass iterator of records over an input line source.
pub struct RecordReader<I> {
    lines: I,
    record_marker: Tier,
    style: RepeatStyle,
    current: TierRecord,
    line_number: usize,
    finished: bool,
}

impl<R: BufRead> RecordReader<io::Lines<R>> {
    /// Read records from a buffered reader
    pub fn from_reader(reader: R, record_marker: Tier) -> Self {
        Self::new(reader.lines(), record_marker)
    }
}

impl<I> RecordReader<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    /// Create a reader over raw lines, splitting records at `record_marker`.
    pub fn new(lines: I, record_marker: Tier) -> Self {
        Self {
            lines,
            record_marker,
            style: RepeatStyle::default(),
            current: TierRecord::new(),
            line_number: 0,
            finished: false,
        }
    }

    /// Merge repeated markers with `style` instead of the corpus default
    pub fn with_repeat_style(mut self, style: RepeatStyle) -> Self {
        self.style = style;
        self.current = TierRecord::with_style(style);
        self
    }

    /// The marker that starts a new record
    pub fn record_marker(&self) -> &Tier {
        &self.record_marker
    }

    fn malformed(&self, reason: impl ToString) -> CoreError {
        CoreError::MalformedLine {
            line: self.line_number,
            reason: reason.to_string(),
        }
    }

    /// Consume one line. Returns a finished record when the line opens a new one.
    fn feed(&mut self, raw: &str) -> Result<Option<TierRecord>> {
        let mut line = raw.trim_end_matches(['\r', '\n']);
        if self.line_number == 1 {
            line = line.trim_start_matches('\u{feff}');
        }
        if line.trim().is_empty() {
            return Ok(None);
        }

        if line.starts_with('\\') {
            let (tier, content) =
                parse_marker_line(line).ok_or_else(|| self.malformed("no field marker after '\\'"))?;
            if tier == self.record_marker {
                let finished =
                    std::mem::replace(&mut self.current, TierRecord::with_style(self.style));
                self.current.add_tier(tier, content);
                return Ok((!finished.is_empty()).then_some(finished));
            }
            self.current.add_tier(tier, content);
            return Ok(None);
        }

        self.current
            .append_continuation(line)
            .map_err(|e| self.malformed(e))?;
        Ok(None)
    }
}

impl<I> Iterator for RecordReader<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = Result<TierRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        while let Some(line) = self.lines.next() {
            self.line_number += 1;
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e.into()));
                }
            };
            match self.feed(&line) {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => {}
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }

        self.finished = true;
        let last = std::mem::replace(&mut self.current, TierRecord::with_style(self.style));
        (!last.is_empty()).then_some(Ok(last))
    }
}

/// Parse every record of an in-memory text.
pub fn read_records(text: &str, record_marker: Tier) -> Result<Vec<TierRecord>> {
    RecordReader::new(text.lines().map(|l| Ok(l.to_string())), record_marker).collect()
}

/// Every field marker used in the input, in first-seen order.
///
/// Lines that are not marker lines are ignored, so this also works on
/// files the record reader would reject.
pub fn list_markers<R: BufRead>(input: R) -> Result<Vec<Tier>> {
    let mut markers: Vec<Tier> = Vec::new();
    for line in input.lines() {
        let line = line?;
        let line = line.trim_start_matches('\u{feff}');
        if let Some((tier, _)) = parse_marker_line(line) {
            if !markers.contains(&tier) {
                markers.push(tier);
            }
        }
    }
    Ok(markers)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\\_sh v3.0  400  Text\n\
                          \\id kuf-01\n\
                          \n\
                          \\ref kuf-01.001\n\
                          \\tx ka ya\n\
                          \\mb ka ya\n\
                          \\ft first\n\
                          line continued\n\
                          \n\
                          \\ref kuf-01.002\n\
                          \\tx ka\n";

    #[test]
    fn test_records_split_at_ref() {
        let records = read_records(SAMPLE, Tier::Ref).unwrap();
        assert_eq!(records.len(), 3);

        // header block comes first and has no \ref
        assert!(!records[0].contains(&Tier::Ref));
        assert_eq!(records[0].get(&Tier::Id), Some("kuf-01"));

        assert_eq!(records[1].reference(), "kuf-01.001");
        assert_eq!(
            records[1].get(&Tier::FreeTranslation),
            Some("first line continued")
        );
        assert_eq!(records[2].reference(), "kuf-01.002");
        assert_eq!(records[2].get(&Tier::Transcription), Some("ka"));
    }

    #[test]
    fn test_records_are_independent() {
        let records = read_records(SAMPLE, Tier::Ref).unwrap();
        assert!(records[2].get(&Tier::MorphemeBreak).is_none());
        assert!(records[2].get(&Tier::FreeTranslation).is_none());
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(read_records("", Tier::Ref).unwrap().is_empty());
        assert!(read_records("\n\n  \n", Tier::Ref).unwrap().is_empty());
    }

    #[test]
    fn test_continuation_before_marker_is_an_error() {
        let err = read_records("stray text\n\\ref 1\n", Tier::Ref).unwrap_err();
        match err {
            CoreError::MalformedLine { line, .. } => assert_eq!(line, 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bare_backslash_line_is_an_error() {
        let err = read_records("\\ref 1\n\\ oops\n", Tier::Ref).unwrap_err();
        assert!(matches!(err, CoreError::MalformedLine { line: 2, .. }));
    }

    #[test]
    fn test_reader_stops_after_error() {
        let text = "\\ref 1\n\\tx a\n\\ bad\n\\ref 2\n\\tx b\n";
        let mut reader = RecordReader::new(text.lines().map(|l| Ok(l.to_string())), Tier::Ref);
        assert!(reader.next().unwrap().is_err());
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_crlf_and_bom_are_stripped() {
        let text = "\u{feff}\\ref 1\r\n\\tx ka\r\n";
        let reader = RecordReader::from_reader(text.as_bytes(), Tier::Ref);
        let records: Vec<_> = reader.collect::<Result<_>>().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].reference(), "1");
        assert_eq!(records[0].get(&Tier::Transcription), Some("ka"));
    }

    #[test]
    fn test_prefix_of_record_marker_does_not_start_record() {
        let text = "\\ref 1\n\\refx extra\n\\ref 2\n";
        let records = read_records(text, Tier::Ref).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].get(&Tier::Other("\\refx".to_string())),
            Some("extra")
        );
    }

    #[test]
    fn test_dictionary_records_split_at_lx() {
        let text = "\\lx kha\n\\ps n\n\\ps adj\n\\lx ka\n\\ps v\n";
        let records: Vec<_> = RecordReader::new(text.lines().map(|l| Ok(l.to_string())), Tier::Lexeme)
            .with_repeat_style(RepeatStyle::Lines)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get(&Tier::PartOfSpeech), Some("n\n\\ps adj"));
        assert_eq!(records[1].get(&Tier::Lexeme), Some("ka"));
    }

    #[test]
    fn test_list_markers_in_first_seen_order() {
        let markers = list_markers(SAMPLE.as_bytes()).unwrap();
        assert_eq!(
            markers,
            vec![
                Tier::Other("\\_sh".to_string()),
                Tier::Id,
                Tier::Ref,
                Tier::Transcription,
                Tier::MorphemeBreak,
                Tier::FreeTranslation,
            ]
        );
        // stray text is not a marker and not an error here
        assert_eq!(list_markers("oops\n\\tx a\n".as_bytes()).unwrap(), vec![Tier::Transcription]);
    }
}
