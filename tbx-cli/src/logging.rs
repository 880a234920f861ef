//! Logger initialization

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Run log written next to the rewritten files
pub const LOG_FILE: &str = "replace.log";

/// Log level for a `-v` count
pub fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Log to stderr. `RUST_LOG` overrides the verbosity flags.
pub fn init_stderr(verbose: u8) {
    let result =
        Builder::from_env(Env::default().default_filter_or(level_for(verbose))).try_init();
    if result.is_err() {
        log::debug!("logger already initialized");
    }
}

/// Log to a run log file as `target|LEVEL|message` lines.
///
/// The file always receives at least `info`, which is where applied
/// replacements are reported.
pub fn init_file(path: &Path, verbose: u8) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;

    let result = Builder::from_env(Env::default().default_filter_or(level_for(verbose.max(1))))
        .format(|buf, record| {
            writeln!(
                buf,
                "{}|{}|{}",
                record.target(),
                record.level(),
                record.args()
            )
        })
        .target(Target::Pipe(Box::new(file)))
        .try_init();
    if result.is_err() {
        log::debug!("logger already initialized");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(0), "warn");
        assert_eq!(level_for(1), "info");
        assert_eq!(level_for(2), "debug");
        assert_eq!(level_for(3), "trace");
        assert_eq!(level_for(10), "trace");
    }

    #[test]
    fn test_init_file_in_missing_directory() {
        let err = init_file(Path::new("/nonexistent/dir/replace.log"), 0).unwrap_err();
        assert!(err.to_string().contains("Failed to create log file"));
    }
}
