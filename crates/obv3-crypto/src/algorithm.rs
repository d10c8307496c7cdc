//! # Algorithms, Suites and Key Generation Options
//!
//! Each key algorithm has exactly one signature suite:
//!
//! | Algorithm | Suite (`proof.type`)   | Scheme                          |
//! |-----------|------------------------|---------------------------------|
//! | Ed25519   | `Ed25519Signature2020` | Ed25519 over canonical bytes    |
//! | RSA       | `RsaSignature2018`     | RSASSA-PKCS1-v1_5 with SHA-256  |

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CryptoError;

/// Smallest RSA modulus accepted for generation, in bits.
pub const MIN_RSA_KEY_SIZE: usize = 2048;

pub const DEFAULT_RSA_KEY_SIZE: usize = 2048;

/// Key algorithm family. Serialized as the key-file `algorithm` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KeyAlgorithm {
    #[default]
    Ed25519,
    #[serde(rename = "RSA")]
    Rsa,
}

impl KeyAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ed25519 => "Ed25519",
            Self::Rsa => "RSA",
        }
    }

    /// The suite used when signing with a key of this algorithm.
    pub fn suite(&self) -> SignatureSuite {
        match self {
            Self::Ed25519 => SignatureSuite::Ed25519Signature2020,
            Self::Rsa => SignatureSuite::RsaSignature2018,
        }
    }
}

impl std::fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyAlgorithm {
    type Err = CryptoError;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ed25519" => Ok(Self::Ed25519),
            "rsa" => Ok(Self::Rsa),
            _ => Err(CryptoError::Configuration(format!(
                "unsupported key algorithm \"{s}\"; expected Ed25519 or RSA"
            ))),
        }
    }
}

/// Linked-data signature suite named by `proof.type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureSuite {
    Ed25519Signature2020,
    RsaSignature2018,
}

impl SignatureSuite {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ed25519Signature2020 => "Ed25519Signature2020",
            Self::RsaSignature2018 => "RsaSignature2018",
        }
    }

    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            Self::Ed25519Signature2020 => KeyAlgorithm::Ed25519,
            Self::RsaSignature2018 => KeyAlgorithm::Rsa,
        }
    }
}

impl std::fmt::Display for SignatureSuite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureSuite {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Ed25519Signature2020" => Ok(Self::Ed25519Signature2020),
            "RsaSignature2018" => Ok(Self::RsaSignature2018),
            other => Err(CryptoError::UnsupportedSuite(other.to_string())),
        }
    }
}

/// Parameters for [`crate::generate_keypair`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyGenOptions {
    pub algorithm: KeyAlgorithm,
    /// Modulus size in bits. Ignored for Ed25519.
    pub rsa_key_size: usize,
}

impl Default for KeyGenOptions {
    fn default() -> Self {
        Self {
            algorithm: KeyAlgorithm::Ed25519,
            rsa_key_size: DEFAULT_RSA_KEY_SIZE,
        }
    }
}

impl KeyGenOptions {
    pub fn ed25519() -> Self {
        Self::default()
    }

    pub fn rsa(key_size: usize) -> Self {
        Self {
            algorithm: KeyAlgorithm::Rsa,
            rsa_key_size: key_size,
        }
    }

    /// Build options from an algorithm name and an optional RSA key size.
    ///
    /// # Errors
    ///
    /// `CryptoError::Configuration` for an unknown algorithm name, or when a
    /// key size is supplied for Ed25519.
    pub fn from_name(algorithm: &str, rsa_key_size: Option<usize>) -> Result<Self, CryptoError> {
        let algorithm = algorithm.parse::<KeyAlgorithm>()?;
        match (algorithm, rsa_key_size) {
            (KeyAlgorithm::Ed25519, Some(_)) => Err(CryptoError::Configuration(
                "Ed25519 does not take a key size parameter".to_string(),
            )),
            (KeyAlgorithm::Ed25519, None) => Ok(Self::ed25519()),
            (KeyAlgorithm::Rsa, size) => Ok(Self::rsa(size.unwrap_or(DEFAULT_RSA_KEY_SIZE))),
        }
    }

    /// # Errors
    ///
    /// `CryptoError::Configuration` if an RSA key size is below
    /// [`MIN_RSA_KEY_SIZE`].
    pub fn validate(&self) -> Result<(), CryptoError> {
        if self.algorithm == KeyAlgorithm::Rsa && self.rsa_key_size < MIN_RSA_KEY_SIZE {
            return Err(CryptoError::Configuration(format!(
                "RSA key size {} is below the minimum of {MIN_RSA_KEY_SIZE} bits",
                self.rsa_key_size
            )));
        }
        Ok(())
    }
}
