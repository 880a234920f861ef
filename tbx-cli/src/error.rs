//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// File not found or inaccessible
    FileNotFound(String),
    /// Invalid file pattern
    InvalidPattern(String),
    /// Configuration error
    ConfigError(String),
    /// Replacement table could not be loaded
    TableError(String),
    /// Some files of a batch could not be processed
    BatchFailed {
        /// Files that failed
        failed: usize,
        /// Files attempted
        total: usize,
    },
    /// Records failed structural validation
    ValidationFailed {
        /// Invalid records across all files
        records: usize,
    },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::TableError(msg) => write!(f, "Replacement table error: {msg}"),
            CliError::BatchFailed { failed, total } => {
                write!(f, "{failed} of {total} files could not be processed")
            }
            CliError::ValidationFailed { records } => {
                write!(f, "{records} records failed validation")
            }
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_error_display() {
        let error = CliError::FileNotFound("kuf-01.txt".to_string());
        assert_eq!(error.to_string(), "File not found: kuf-01.txt");
    }

    #[test]
    fn test_invalid_pattern_error_display() {
        let error = CliError::InvalidPattern("[invalid".to_string());
        assert_eq!(error.to_string(), "Invalid file pattern: [invalid");
    }

    #[test]
    fn test_config_error_display() {
        let error = CliError::ConfigError("unknown tier".to_string());
        assert_eq!(error.to_string(), "Configuration error: unknown tier");
    }

    #[test]
    fn test_table_error_display() {
        let error = CliError::TableError("workbook has no sheets".to_string());
        assert_eq!(
            error.to_string(),
            "Replacement table error: workbook has no sheets"
        );
    }

    #[test]
    fn test_batch_failed_display() {
        let error = CliError::BatchFailed {
            failed: 2,
            total: 5,
        };
        assert_eq!(error.to_string(), "2 of 5 files could not be processed");
    }

    #[test]
    fn test_validation_failed_display() {
        let error = CliError::ValidationFailed { records: 3 };
        assert_eq!(error.to_string(), "3 records failed validation");
    }

    #[test]
    fn test_error_trait_implementation() {
        let error = CliError::FileNotFound("kuf-01.txt".to_string());
        let _: &dyn std::error::Error = &error;

        let debug_str = format!("{:?}", error);
        assert!(debug_str.contains("FileNotFound"));
        assert!(debug_str.contains("kuf-01.txt"));
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let failure: CliResult<()> = Err(CliError::BatchFailed {
            failed: 1,
            total: 1,
        }
        .into());
        let err = failure.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::BatchFailed { failed: 1, .. })
        ));
    }

    #[test]
    fn test_error_with_non_ascii_path() {
        let error = CliError::FileNotFound("corpus/kʰa-01.txt".to_string());
        assert_eq!(error.to_string(), "File not found: corpus/kʰa-01.txt");
    }
}
