//! # obv3-core — Foundational Types for OpenBadge v3 Credentials
//!
//! This crate is the leaf of the workspace DAG. It defines the primitives
//! every other crate builds on:
//!
//! 1. **`CanonicalBytes` newtype.** All signing input flows through
//!    `CanonicalBytes::new()`. No raw `serde_json::to_vec()` for anything
//!    that is signed, verified, or digested.
//!
//! 2. **UTC-only timestamps.** `Timestamp` renders as `YYYY-MM-DDTHH:MM:SSZ`
//!    so the same instant always canonicalizes to the same bytes.
//!
//! 3. **Validated identifiers.** `Uri` and `Email` can only be constructed
//!    through validating constructors (including their `Deserialize` impls).
//!
//! 4. **`sha256_digest()` accepts only `&CanonicalBytes`.**
//!
//! ## Crate Policy
//!
//! - No dependencies on other `obv3-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod identity;
pub mod temporal;

pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, sha256_hex, ContentDigest, DigestAlgorithm};
pub use error::{CanonicalizationError, ValidationError};
pub use identity::{Email, Uri};
pub use temporal::Timestamp;
