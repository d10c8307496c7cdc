//! # Error Types
//!
//! Field-level errors shared by every crate in the workspace. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! Higher layers wrap these: `obv3-vc` collects [`ValidationError`]s into
//! itemized structural error lists, and `obv3-crypto` surfaces
//! [`CanonicalizationError`] when signing input cannot be produced.

use thiserror::Error;

/// A single field value failed a format check.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The value is not an absolute URI (`scheme:rest`).
    #[error("invalid URI: \"{value}\" ({reason})")]
    InvalidUri {
        /// The rejected string.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The value does not satisfy email address syntax.
    #[error("invalid email address: \"{0}\"")]
    InvalidEmail(String),

    /// Timestamp string is not a parseable ISO 8601 date-time.
    #[error("invalid timestamp: \"{value}\" ({reason})")]
    InvalidTimestamp {
        /// The string that failed to parse.
        value: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
