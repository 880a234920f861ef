//! Toolbox field markers.
//!
//! Markers seen in corpus and dictionary files are mapped onto a fixed set of
//! known tiers. Anything else lands in [`Tier::Other`] and is carried through
//! to the output verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A field marker of a Toolbox record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Tier {
    /// `\ref` record reference
    Ref,
    /// `\sound` media timing
    Sound,
    /// `\ELANBegin`
    ElanBegin,
    /// `\ELANEnd`
    ElanEnd,
    /// `\ELANParticipant`
    ElanParticipant,
    /// `\tx` transcription
    Transcription,
    /// `\ph` phonetic form
    Phonetic,
    /// `\mb` morpheme break
    MorphemeBreak,
    /// `\ge` gloss
    Gloss,
    /// `\ps` part of speech
    PartOfSpeech,
    /// `\lxid` lexeme id
    LexemeId,
    /// `\ft` free translation
    FreeTranslation,
    /// `\nt` note
    Note,
    /// `\media`
    Media,
    /// `\ELANMediaURL`
    ElanMediaUrl,
    /// `\ELANMediaMIME`
    ElanMediaMime,
    /// `\id` text identifier
    Id,
    /// `\lx` dictionary headword
    Lexeme,
    /// `\a` alternate form
    Alternate,
    /// `\hm` homonym number
    Homonym,
    /// `\dt` date stamp
    DateStamp,
    /// Any marker without a dedicated variant, stored with its backslash
    Other(String),
}

/// Output order of corpus tiers. Unknown markers go between the media tiers
/// and `\id`.
static CORPUS_ORDER: [Tier; 16] = [
    Tier::Ref,
    Tier::Sound,
    Tier::ElanBegin,
    Tier::ElanEnd,
    Tier::ElanParticipant,
    Tier::Transcription,
    Tier::Phonetic,
    Tier::MorphemeBreak,
    Tier::Gloss,
    Tier::PartOfSpeech,
    Tier::LexemeId,
    Tier::FreeTranslation,
    Tier::Note,
    Tier::Media,
    Tier::ElanMediaUrl,
    Tier::ElanMediaMime,
];

impl Tier {
    /// Map a marker (including its leading backslash) to a tier.
    pub fn from_marker(marker: &str) -> Self {
        match marker {
            "\\ref" => Tier::Ref,
            "\\sound" => Tier::Sound,
            "\\ELANBegin" => Tier::ElanBegin,
            "\\ELANEnd" => Tier::ElanEnd,
            "\\ELANParticipant" => Tier::ElanParticipant,
            "\\tx" => Tier::Transcription,
            "\\ph" => Tier::Phonetic,
            "\\mb" => Tier::MorphemeBreak,
            "\\ge" => Tier::Gloss,
            "\\ps" => Tier::PartOfSpeech,
            "\\lxid" => Tier::LexemeId,
            "\\ft" => Tier::FreeTranslation,
            "\\nt" => Tier::Note,
            "\\media" => Tier::Media,
            "\\ELANMediaURL" => Tier::ElanMediaUrl,
            "\\ELANMediaMIME" => Tier::ElanMediaMime,
            "\\id" => Tier::Id,
            "\\lx" => Tier::Lexeme,
            "\\a" => Tier::Alternate,
            "\\hm" => Tier::Homonym,
            "\\dt" => Tier::DateStamp,
            other => Tier::Other(other.to_string()),
        }
    }

    /// The marker as written in Toolbox files, e.g. `\ps`.
    pub fn marker(&self) -> &str {
        match self {
            Tier::Ref => "\\ref",
            Tier::Sound => "\\sound",
            Tier::ElanBegin => "\\ELANBegin",
            Tier::ElanEnd => "\\ELANEnd",
            Tier::ElanParticipant => "\\ELANParticipant",
            Tier::Transcription => "\\tx",
            Tier::Phonetic => "\\ph",
            Tier::MorphemeBreak => "\\mb",
            Tier::Gloss => "\\ge",
            Tier::PartOfSpeech => "\\ps",
            Tier::LexemeId => "\\lxid",
            Tier::FreeTranslation => "\\ft",
            Tier::Note => "\\nt",
            Tier::Media => "\\media",
            Tier::ElanMediaUrl => "\\ELANMediaURL",
            Tier::ElanMediaMime => "\\ELANMediaMIME",
            Tier::Id => "\\id",
            Tier::Lexeme => "\\lx",
            Tier::Alternate => "\\a",
            Tier::Homonym => "\\hm",
            Tier::DateStamp => "\\dt",
            Tier::Other(marker) => marker,
        }
    }

    /// Whether this marker has no dedicated variant.
    pub fn is_other(&self) -> bool {
        matches!(self, Tier::Other(_))
    }

    /// Known corpus tiers in canonical output order, excluding `\id`.
    pub fn corpus_order() -> &'static [Tier] {
        &CORPUS_ORDER
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// Returns true for a well-formed marker name (without the backslash).
pub(crate) fn is_marker_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_')
}

impl FromStr for Tier {
    type Err = String;

    /// Accepts markers with or without the leading backslash (`ps`, `\ps`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches('\\');
        if !is_marker_name(name) {
            return Err(format!("invalid field marker: {s:?}"));
        }
        Ok(Tier::from_marker(&format!("\\{name}")))
    }
}

impl TryFrom<String> for Tier {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Tier> for String {
    fn from(tier: Tier) -> Self {
        tier.marker().to_string()
    }
}
