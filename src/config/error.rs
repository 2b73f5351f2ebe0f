//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("History capacity must be between 1 and {max}")]
    InvalidHistoryCapacity { max: usize },

    #[error("Maximum input length must be between 1 and {max} characters")]
    InvalidMaxInputChars { max: usize },

    #[error("Extractor timeout must be between 1 and {max} ms")]
    InvalidExtractorTimeout { max: u64 },

    #[error("Idle timeout must be between 1 and {max} seconds")]
    InvalidIdleTimeout { max: u64 },

    #[error("Reap interval must be non-zero and no longer than the idle timeout")]
    InvalidReapInterval,

    #[error("Mood log capacity must be between 1 and {max}")]
    InvalidMoodCapacity { max: usize },

    #[error("Resource library path is empty")]
    EmptyLibraryPath,
}
