//! # Cryptographic Error Types
//!
//! Configuration and decode errors abort the call that raised them. A bad
//! signature is reported as [`CryptoError::VerificationFailed`] only by the
//! strict verification functions; the boolean checks in `obv3-vc` fold it
//! into `false`.

use obv3_core::CanonicalizationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CryptoError {
    /// Unknown algorithm name or out-of-range key generation parameter.
    #[error("crypto configuration error: {0}")]
    Configuration(String),

    /// Malformed key file, key encoding, or signature encoding.
    #[error("decode error: {0}")]
    Decode(String),

    /// The key handle cannot perform the requested operation.
    #[error("capability error: {0}")]
    Capability(String),

    /// Signature suite does not belong to the key's algorithm.
    #[error("signature suite {suite} cannot be used with a {algorithm} key")]
    KeyMismatch {
        suite: String,
        algorithm: String,
    },

    /// Proof type names a suite this crate does not implement.
    #[error("unsupported signature suite: {0}")]
    UnsupportedSuite(String),

    /// Signature is well-formed but does not match the message and key.
    #[error("signature verification failed: {0}")]
    VerificationFailed(String),

    /// The signing backend reported an error.
    #[error("signing failed: {0}")]
    Signing(String),

    #[error(transparent)]
    Canonicalization(#[from] CanonicalizationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
