//! # Error Types
//!
//! Errors used at the edges of the stack: loading records and configuration,
//! canonicalizing values for digests. Scoring itself has no failure path.

use thiserror::Error;

/// Top-level error type for the data governance stack.
#[derive(Error, Debug)]
pub enum DgovError {
    /// A record or argument could not be interpreted.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Analyzer configuration is malformed or out of range.
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Canonicalization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values have no single canonical rendering and are rejected.
    #[error("float values are not permitted in canonical representations: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
