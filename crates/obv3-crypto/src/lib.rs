//! # obv3-crypto — Key Material and Raw Signatures
//!
//! Provides the key-handling half of the badge signing protocol:
//!
//! - **Algorithms and suites.** [`KeyAlgorithm`] (Ed25519, RSA) and the
//!   [`SignatureSuite`] names that appear in a proof's `type`.
//! - **Key generation.** [`generate_keypair`] driven by [`KeyGenOptions`].
//! - **Signing and verification** over `&CanonicalBytes` only. A caller cannot
//!   sign bytes that did not come out of the canonicalization pipeline.
//! - **Key files.** JSON records holding the algorithm tag and base64 key
//!   material ([`keyfile`]).
//!
//! Proof documents themselves live in `obv3-vc`; this crate never sees JSON-LD.
//!
//! ## Crate Policy
//!
//! - Depends only on `obv3-core` internally.
//! - Tests use real keys and real signatures, never mocks.
//! - Private key material is never logged or printed by `Debug`.

pub mod algorithm;
pub mod ed25519;
pub mod error;
pub mod keyfile;
pub mod keys;
pub mod rsa;

pub use algorithm::{KeyAlgorithm, KeyGenOptions, SignatureSuite, DEFAULT_RSA_KEY_SIZE, MIN_RSA_KEY_SIZE};
pub use error::CryptoError;
pub use keyfile::{load_keypair, load_public_key, save_to_file, KeyFile};
pub use keys::{generate_keypair, KeyPair, PrivateKey, PublicKey};
