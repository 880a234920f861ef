//! Ordered tier storage for a single Toolbox record.

use crate::tier::Tier;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Marker token, optional whitespace, rest of line.
fn marker_line_regex() -> &'static Regex {
    static MARKER_LINE: OnceLock<Regex> = OnceLock::new();
    MARKER_LINE.get_or_init(|| Regex::new(r"^(\\\w+)\s*(.*)$").expect("marker pattern is valid"))
}

/// Split a `\marker content` line into its tier and content.
///
/// Returns `None` when the line does not start with a well-formed marker.
pub fn parse_marker_line(line: &str) -> Option<(Tier, &str)> {
    let caps = marker_line_regex().captures(line)?;
    let marker = caps.get(1)?.as_str();
    let content = caps.get(2).map_or("", |m| m.as_str());
    Some((Tier::from_marker(marker), content))
}

/// Why a line could not be added to a record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    /// Line starts with a backslash but no marker name follows
    #[error("line does not start with a field marker")]
    NotAMarker,
    /// Continuation text arrived before any marker
    #[error("continuation line before any field marker")]
    NoPrecedingMarker,
}

/// How a repeated marker is merged into the existing entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RepeatStyle {
    /// Interlinear corpora: join with a space; `\nt` keeps its own lines
    #[default]
    Joined,
    /// Dictionaries: every repeat stays a separate `\marker value` line
    Lines,
}

/// One record: field markers mapped to their accumulated content.
///
/// Entries keep insertion order; continuation lines attach to the most
/// recently inserted marker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierRecord {
    tiers: Vec<(Tier, String)>,
    style: RepeatStyle,
}

impl TierRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty record merging repeats with `style`
    pub fn with_style(style: RepeatStyle) -> Self {
        Self {
            tiers: Vec::new(),
            style,
        }
    }

    /// Parse a marker line and merge it into the record.
    pub fn add_line(&mut self, line: &str) -> Result<(), LineError> {
        let (tier, content) = parse_marker_line(line).ok_or(LineError::NotAMarker)?;
        self.add_tier(tier, content);
        Ok(())
    }

    /// Insert a tier, or merge into an existing one.
    ///
    /// With [`RepeatStyle::Joined`] repeated markers are joined with a single
    /// space, except `\nt`, which keeps every note as its own `\nt` line.
    pub fn add_tier(&mut self, tier: Tier, content: &str) {
        let style = self.style;
        match self.tiers.iter_mut().find(|(t, _)| *t == tier) {
            Some((_, existing)) if style == RepeatStyle::Lines => {
                existing.push('\n');
                existing.push_str(tier.marker());
                existing.push(' ');
                existing.push_str(content);
            }
            Some((_, existing)) if tier == Tier::Note => {
                existing.push_str(" \n");
                existing.push_str(tier.marker());
                existing.push(' ');
                existing.push_str(content);
            }
            Some((_, existing)) => {
                existing.push(' ');
                existing.push_str(content);
            }
            None => self.tiers.push((tier, content.to_string())),
        }
    }

    /// Append a continuation line to the most recently inserted tier.
    pub fn append_continuation(&mut self, text: &str) -> Result<(), LineError> {
        let (_, existing) = self.tiers.last_mut().ok_or(LineError::NoPrecedingMarker)?;
        existing.push(' ');
        existing.push_str(text);
        Ok(())
    }

    /// Content of a tier, if present
    pub fn get(&self, tier: &Tier) -> Option<&str> {
        self.tiers
            .iter()
            .find(|(t, _)| t == tier)
            .map(|(_, content)| content.as_str())
    }

    /// Whether the tier occurs in the record
    pub fn contains(&self, tier: &Tier) -> bool {
        self.tiers.iter().any(|(t, _)| t == tier)
    }

    /// Overwrite a tier's content, inserting it at the end if absent.
    pub fn set(&mut self, tier: Tier, content: String) {
        match self.tiers.iter_mut().find(|(t, _)| *t == tier) {
            Some((_, existing)) => *existing = content,
            None => self.tiers.push((tier, content)),
        }
    }

    /// Reference id used to tag diagnostics (`\ref` content, or empty).
    pub fn reference(&self) -> &str {
        self.get(&Tier::Ref).unwrap_or("")
    }

    /// Iterate tiers in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&Tier, &str)> {
        self.tiers.iter().map(|(t, c)| (t, c.as_str()))
    }

    /// Number of distinct tiers
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Whether no tier has been added
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}
