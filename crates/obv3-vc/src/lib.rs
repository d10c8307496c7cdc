//! # obv3-vc — OpenBadge v3 Credentials
//!
//! The badge entity model and everything done with it:
//!
//! - **Entities** (`profile.rs`, `achievement.rs`, `credential.rs`,
//!   `endorsement.rs`): typed records with builder-style constructors.
//!   Relations such as `issuer` and `achievement` are [`EntityRef`]s,
//!   either embedded or a bare URI.
//!
//! - **JSON-LD** (`jsonld.rs`): `to_json_ld()` / `from_json_ld()` through the
//!   [`JsonLd`] trait. Each entity declares one field table (`field.rs`)
//!   used for both construction and validation.
//!
//! - **Validation** (`validate.rs`, `schema.rs`): structural and semantic
//!   checks on typed or raw input, returning every error at once, plus
//!   local JSON Schema validation.
//!
//! - **Proofs** (`proof.rs`, `signing.rs`): Ed25519 and RSA linked-data
//!   proofs over the JCS-canonical document minus `proof`.
//!
//! ## Security Invariant
//!
//! Signing input is always produced by `CanonicalBytes::new()` over the
//! complete JSON-LD document with only `proof` removed. Changing any other
//! field, at any depth, invalidates the signature.
//!
//! ## Crate Policy
//!
//! - Depends on `obv3-core` and `obv3-crypto` internally.
//! - No I/O. References are never fetched.
//! - Boolean verification APIs never return an error.

pub mod achievement;
pub mod credential;
pub mod endorsement;
pub mod error;
pub mod field;
pub mod jsonld;
pub mod profile;
pub mod proof;
pub mod reference;
pub mod schema;
pub mod signing;
pub mod validate;

pub use achievement::{Achievement, AchievementSubject, Alignment, Criteria};
pub use credential::{CredentialSchema, Evidence, OpenBadgeCredential};
pub use endorsement::{EndorsementCredential, EndorsementSubject};
pub use error::VcError;
pub use jsonld::{
    json_ld_to_achievement, json_ld_to_credential, json_ld_to_endorsement, json_ld_to_profile,
    ContextKind, JsonLd, OB_CONTEXT_V3, VC_CONTEXT_V1,
};
pub use profile::{Address, Image, Profile};
pub use proof::{check_proof, create_proof, signing_bytes, verify_proof, Proof, ProofOptions, ProofPurpose};
pub use reference::EntityRef;
pub use schema::{validate_against_schema, RECOGNIZED_SCHEMA_TYPES};
pub use signing::{check_credential, sign_credential, sign_credential_with, verify_credential, Signable};
pub use validate::{
    validate, validate_achievement, validate_credential, validate_endorsement, validate_profile,
    Candidate, ValidationResult,
};
