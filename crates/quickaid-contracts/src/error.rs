//! Error types for the quickaid analysis pipeline.
//!
//! All fallible operations return `TriageResult<T>`. None of these errors is
//! fatal to the process: the pipeline converts every variant into a guidance
//! message at the response boundary.

use thiserror::Error;

/// The unified error type for quickaid.
#[derive(Debug, Error)]
pub enum TriageError {
    /// No symptom text was provided, or it was blank.
    #[error("no input provided")]
    EmptyInput,

    /// The pixel buffer is empty, has the wrong channel count, or its length
    /// does not match its declared dimensions.
    #[error("invalid image: {reason}")]
    InvalidImage { reason: String },

    /// The text did not match any lexicon pattern.
    #[error("no recognizable symptoms found")]
    NoSymptomsRecognized,

    /// The external analysis service could not be reached or refused the call.
    #[error("external analysis unavailable: {reason}")]
    ExternalUnavailable { reason: String },

    /// The external analysis service answered with something we cannot use.
    #[error("malformed external response: {reason}")]
    MalformedExternalResponse { reason: String },

    /// A serialized response failed schema or rule verification.
    #[error("response verification failed: {reason}")]
    VerificationFailed { reason: String },

    /// Knowledge tables or other configuration are missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },
}

/// Convenience alias used throughout the quickaid crates.
pub type TriageResult<T> = Result<T, TriageError>;
