//! Error types for the senwell scoring engine

use thiserror::Error;

/// Errors that can occur during profile parsing or score calculation
#[derive(Debug, Error)]
pub enum ScoreError {
    /// Nonpositive height or weight. This is a caller contract violation and
    /// is never silently defaulted, unlike missing optional metrics.
    #[error("Invalid biometric input: {0}")]
    InvalidBiometric(String),

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to parse profile record: {0}")]
    ParseError(String),
}
