//! # Ed25519 Signing and Verification
//!
//! Key generation, signing and verification for the `Ed25519Signature2020`
//! suite.
//!
//! ## Security Invariant
//!
//! - Signing input is `&CanonicalBytes`. Raw bytes cannot be signed.
//! - `Ed25519KeyPair` does not implement `Serialize`, and its `Debug`
//!   prints `<private>`. The seed leaves the type only through
//!   [`Ed25519KeyPair::seed_bytes`], which exists for key-file persistence.
//!
//! ## Encoding
//!
//! Public keys and signatures are raw bytes (32 and 64). Text forms are
//! standard base64, the encoding used in key files and in `proofValue`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use ed25519_dalek::{Signer, Verifier};
use obv3_core::CanonicalBytes;

use crate::error::CryptoError;

/// An Ed25519 public key (32 bytes).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Ed25519PublicKey([u8; 32]);

/// An Ed25519 signature (64 bytes).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Ed25519Signature([u8; 64]);

/// An Ed25519 signing key.
pub struct Ed25519KeyPair {
    signing_key: ed25519_dalek::SigningKey,
}

// ---------------------------------------------------------------------------
// Ed25519PublicKey
// ---------------------------------------------------------------------------

impl Ed25519PublicKey {
    /// Decode from raw bytes, checking the point is a valid curve point.
    ///
    /// # Errors
    ///
    /// `CryptoError::Decode` on wrong length or an invalid point.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; 32] = bytes.try_into().map_err(|_| {
            CryptoError::Decode(format!(
                "Ed25519 public key must be 32 bytes, got {}",
                bytes.len()
            ))
        })?;
        ed25519_dalek::VerifyingKey::from_bytes(&arr)
            .map_err(|e| CryptoError::Decode(format!("invalid Ed25519 public key: {e}")))?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.0)
    }

    pub fn from_base64(s: &str) -> Result<Self, CryptoError> {
        let bytes = decode_base64(s, "Ed25519 public key")?;
        Self::from_slice(&bytes)
    }

    fn to_verifying_key(&self) -> Result<ed25519_dalek::VerifyingKey, CryptoError> {
        ed25519_dalek::VerifyingKey::from_bytes(&self.0)
            .map_err(|e| CryptoError::Decode(format!("invalid Ed25519 public key: {e}")))
    }

    /// Verify a signature over canonical bytes.
    ///
    /// # Errors
    ///
    /// `CryptoError::VerificationFailed` if the signature does not match.
    pub fn verify(
        &self,
        data: &CanonicalBytes,
        signature: &Ed25519Signature,
    ) -> Result<(), CryptoError> {
        let vk = self.to_verifying_key()?;
        let sig = ed25519_dalek::Signature::from_bytes(&signature.0);
        vk.verify(data.as_bytes(), &sig)
            .map_err(|e| CryptoError::VerificationFailed(format!("Ed25519: {e}")))
    }
}

impl std::fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519PublicKey({}...)", hex_prefix(&self.0))
    }
}

// ---------------------------------------------------------------------------
// Ed25519Signature
// ---------------------------------------------------------------------------

impl Ed25519Signature {
    /// # Errors
    ///
    /// `CryptoError::Decode` unless exactly 64 bytes are given.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; 64] = bytes.try_into().map_err(|_| {
            CryptoError::Decode(format!(
                "Ed25519 signature must be 64 bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

impl std::fmt::Debug for Ed25519Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519Signature({}...)", hex_prefix(&self.0))
    }
}

// ---------------------------------------------------------------------------
// Ed25519KeyPair
// ---------------------------------------------------------------------------

impl Ed25519KeyPair {
    /// Generate a new key from the OS CSPRNG.
    pub fn generate() -> Self {
        let mut csprng = rand::rngs::OsRng;
        Self {
            signing_key: ed25519_dalek::SigningKey::generate(&mut csprng),
        }
    }

    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: ed25519_dalek::SigningKey::from_bytes(seed),
        }
    }

    /// # Errors
    ///
    /// `CryptoError::Decode` unless exactly 32 seed bytes are given.
    pub fn from_seed_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let seed: [u8; 32] = bytes.try_into().map_err(|_| {
            CryptoError::Decode(format!(
                "Ed25519 private key must be 32 bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self::from_seed(&seed))
    }

    /// The 32-byte secret seed.
    pub fn seed_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }

    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign canonical bytes.
    pub fn sign(&self, data: &CanonicalBytes) -> Ed25519Signature {
        Ed25519Signature(self.signing_key.sign(data.as_bytes()).to_bytes())
    }
}

impl Clone for Ed25519KeyPair {
    fn clone(&self) -> Self {
        Self::from_seed(&self.seed_bytes())
    }
}

impl PartialEq for Ed25519KeyPair {
    fn eq(&self, other: &Self) -> bool {
        self.public_key() == other.public_key()
    }
}

impl std::fmt::Debug for Ed25519KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519KeyPair(<private>)")
    }
}

pub(crate) fn decode_base64(s: &str, what: &str) -> Result<Vec<u8>, CryptoError> {
    STANDARD
        .decode(s.trim())
        .map_err(|e| CryptoError::Decode(format!("{what} is not valid base64: {e}")))
}

fn hex_prefix(bytes: &[u8]) -> String {
    bytes.iter().take(4).map(|b| format!("{b:02x}")).collect()
}
