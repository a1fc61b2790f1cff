//! Error Types
//!
//! Errors that escape the demo sequence. Individual step failures are not
//! errors: they are reported as [`StepOutcome`](crate::execution::StepOutcome)
//! values and the run continues.

use thiserror::Error;

/// Errors that abort the whole run.
#[derive(Debug, Error)]
pub enum DemoError {
    /// Invalid command-line arguments
    #[error("{0}")]
    Arguments(String),

    /// Configuration failed validation
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Filesystem or process I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Payload serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DemoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = DemoError::Config("health_url must not be empty".to_string());
        assert_eq!(
            err.to_string(),
            "invalid configuration: health_url must not be empty"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: DemoError = io.into();
        assert!(matches!(err, DemoError::Io(_)));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_arguments_error_is_verbatim() {
        let err = DemoError::Arguments("Unknown option: --bogus".to_string());
        assert_eq!(err.to_string(), "Unknown option: --bogus");
    }
}
