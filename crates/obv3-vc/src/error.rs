//! # Credential Error Types
//!
//! Structural and semantic failures carry every offending field, one message
//! each, so a caller can report the full set at once.

use obv3_core::CanonicalizationError;
use obv3_crypto::CryptoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VcError {
    /// Required field missing, wrong JSON type, or bad format.
    #[error("{entity} failed structural validation: {}", .errors.join("; "))]
    Structural {
        entity: &'static str,
        errors: Vec<String>,
    },

    /// Cross-field rule violated (date ordering, unsigned proof value, …).
    #[error("semantic validation failed: {}", .errors.join("; "))]
    Semantic { errors: Vec<String> },

    /// An entity-or-reference field holds neither a URI nor an object.
    #[error("{field}: {reason}")]
    ReferenceFormat { field: String, reason: String },

    /// `credentialSchema` names an unrecognized validator, or a JSON
    /// Schema could not be compiled.
    #[error("schema error: {0}")]
    Schema(String),

    #[error("credential already carries a proof")]
    AlreadySigned,

    #[error("credential has no proof")]
    NoProof,

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VcError {
    /// The itemized messages behind this error.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Structural { errors, .. } | Self::Semantic { errors } => errors.clone(),
            other => vec![other.to_string()],
        }
    }
}
