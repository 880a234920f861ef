//! Configuration module

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tbx_core::{Aligner, CorpusPipeline, TableColumns, Tier};

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct CliConfig {
    /// Input and output locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Replacement table layout and target tier
    #[serde(default)]
    pub replacement: ReplacementConfig,

    /// Corpus record handling
    #[serde(default)]
    pub corpus: CorpusConfig,
}

impl CliConfig {
    /// Load a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Load the given file, or fall back to defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

/// Directory configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding `<iso>-*.txt` corpus files
    pub corpus_dir: PathBuf,

    /// Directory holding `<iso>-*` replacement tables
    pub tables_dir: PathBuf,

    /// Directory receiving rewritten files and `replace.log`
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            corpus_dir: PathBuf::from("corpus"),
            tables_dir: PathBuf::from("tables"),
            output_dir: PathBuf::from("output"),
        }
    }
}

/// Replacement table configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ReplacementConfig {
    /// Column holding the lookup key
    pub key_column: String,

    /// Column holding the value to replace
    pub old_column: String,

    /// Column holding the replacement value
    pub new_column: String,

    /// Tier whose slots are looked up in the key column
    pub key_tier: Tier,

    /// Tier being edited
    pub target_tier: Tier,

    /// Zero-pad keys to this width (0 disables padding)
    pub key_pad_width: usize,
}

impl Default for ReplacementConfig {
    fn default() -> Self {
        let columns = TableColumns::default();
        Self {
            key_column: columns.key,
            old_column: columns.old,
            new_column: columns.new,
            key_tier: Tier::LexemeId,
            target_tier: Tier::PartOfSpeech,
            key_pad_width: columns.key_pad_width.unwrap_or(0),
        }
    }
}

impl ReplacementConfig {
    /// Column layout for loading replacement tables
    pub fn columns(&self) -> TableColumns {
        TableColumns {
            key: self.key_column.clone(),
            old: self.old_column.clone(),
            new: self.new_column.clone(),
            key_pad_width: (self.key_pad_width > 0).then_some(self.key_pad_width),
        }
    }
}

/// Corpus record configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CorpusConfig {
    /// Marker that starts a record
    pub record_marker: Tier,

    /// Realign interlinear columns on output
    pub align: bool,

    /// Tiers aligned morpheme by morpheme (`\ph` is added automatically)
    pub morpheme_tiers: Vec<Tier>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            record_marker: Tier::Ref,
            align: true,
            morpheme_tiers: Aligner::default_morpheme_tiers(),
        }
    }
}

impl CorpusConfig {
    /// Pipeline for one corpus file; `phonetic` adds `\ph` to the aligned tiers
    pub fn pipeline(&self, phonetic: bool) -> CorpusPipeline {
        let mut aligner = Aligner::new(self.morpheme_tiers.clone());
        if phonetic {
            aligner = aligner.with_phonetic();
        }
        CorpusPipeline::new()
            .with_record_marker(self.record_marker.clone())
            .with_aligner(aligner)
            .with_align(self.align)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.replacement.target_tier, Tier::PartOfSpeech);
        assert_eq!(config.paths.output_dir, PathBuf::from("output"));
    }

    #[test]
    fn test_partial_sections() {
        let config: CliConfig = toml::from_str(
            r#"
[paths]
corpus_dir = "data/txt"

[replacement]
target_tier = "tx"
old_column = "old_form"
new_column = "new_form"
key_pad_width = 0

[corpus]
align = false
morpheme_tiers = ["\\mb", "ge", "ps", "lxid"]
"#,
        )
        .unwrap();

        assert_eq!(config.paths.corpus_dir, PathBuf::from("data/txt"));
        assert_eq!(config.paths.tables_dir, PathBuf::from("tables"));
        assert_eq!(config.replacement.target_tier, Tier::Transcription);
        assert_eq!(config.replacement.key_tier, Tier::LexemeId);
        assert!(!config.corpus.align);
        assert_eq!(
            config.corpus.morpheme_tiers,
            Aligner::default_morpheme_tiers()
        );

        let columns = config.replacement.columns();
        assert_eq!(columns.old, "old_form");
        assert_eq!(columns.key_pad_width, None);
    }

    #[test]
    fn test_invalid_tier_is_rejected() {
        let result: Result<CliConfig, _> = toml::from_str("[replacement]\ntarget_tier = \"p s\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[replacement]\nkey_column = \"id\"").unwrap();

        let config = CliConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.replacement.key_column, "id");
        assert_eq!(config.replacement.columns().key_pad_width, Some(4));
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = CliConfig::load(Some(Path::new("/nonexistent/tbx.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_phonetic_pipeline() {
        let config = CorpusConfig::default();
        let pipeline = config.pipeline(true);
        assert!(pipeline.aligner().morpheme_tiers().contains(&Tier::Phonetic));
        assert!(!config
            .pipeline(false)
            .aligner()
            .morpheme_tiers()
            .contains(&Tier::Phonetic));
    }
}
