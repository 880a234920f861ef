//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

const TEMPLATE: &str = r#"# tbx configuration
#
# Command-line flags override the values in this file.

[paths]
# Corpus files named <iso>-<anything>.txt
corpus_dir = "corpus"
# Replacement tables named <iso>-<anything>.xlsx (or .xls, .ods, .csv)
tables_dir = "tables"
# Rewritten corpus files and replace.log
output_dir = "output"

[replacement]
# Table columns: lookup key, value to replace, replacement
key_column = "lxid"
old_column = "old_ps"
new_column = "new_ps"

# Tier whose morpheme slots are looked up in key_column
key_tier = "lxid"

# Tier to edit. "tx" replaces every occurrence in the transcription line;
# any other tier replaces single morphemes that match exactly.
target_tier = "ps"

# Zero-pad table keys to this many digits (0 = off)
key_pad_width = 4

[corpus]
# Marker that starts a record
record_marker = "ref"

# Realign interlinear columns in the output
align = true

# Tiers aligned morpheme by morpheme ("ph" is added when a file uses it)
morpheme_tiers = ["mb", "ge", "ps", "lxid"]
"#;

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        println!("Generating configuration template...");
        println!("  Output file: {}", self.output.display());

        fs::write(&self.output, self.generate_template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the paths and table columns for your data");
        println!("2. Check your corpus files:");
        println!(
            "   tbx check -i 'corpus/*.txt' --config {}",
            self.output.display()
        );
        println!("3. Run the replacement:");
        println!("   tbx replace --config {}", self.output.display());

        Ok(())
    }

    /// Generate template configuration content
    fn generate_template(&self) -> String {
        TEMPLATE.to_string()
    }
}
