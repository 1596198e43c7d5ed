//! Error types for the scrub pipeline.
//!
//! Every internal failure is wrapped into one of the four public reason
//! codes before it crosses the `Scrubber` boundary. The returned error value
//! is the only observable effect of a failed call — no partial bytes, no
//! partial report.

use thiserror::Error;

/// Reason code for a pipeline failure, for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed, unsupported, or empty input; bounds violations.
    InvalidInput,
    /// A re-encode or transform could not produce valid output.
    EncodingFailure,
    /// The detector backend raised or returned an invalid structure.
    DetectionFailure,
    /// Invariant violation inside the pipeline.
    Internal,
}

/// Terminal failure signal for a single scrub call.
///
/// None of these are retried internally — there is no transient-failure
/// class in an in-memory pipeline.
#[derive(Error, Debug)]
pub enum ScrubError {
    /// Input bytes could not be validated or decoded
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Re-encoding the pixel buffer failed
    #[error("encoding failure: {0}")]
    EncodingFailure(String),

    /// The face detection backend failed
    #[error("detection failure: {0}")]
    DetectionFailure(String),

    /// A pipeline invariant was violated
    #[error("internal error: {0}")]
    Internal(String),
}

impl ScrubError {
    /// The reason code carried by this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScrubError::InvalidInput(_) => ErrorKind::InvalidInput,
            ScrubError::EncodingFailure(_) => ErrorKind::EncodingFailure,
            ScrubError::DetectionFailure(_) => ErrorKind::DetectionFailure,
            ScrubError::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Convenience type alias for pipeline results.
pub type Result<T> = std::result::Result<T, ScrubError>;
