//! # Key Files
//!
//! A key file is a JSON record:
//!
//! ```json
//! { "algorithm": "Ed25519", "private_key": "<base64>", "public_key": "<base64>" }
//! ```
//!
//! `private_key` is omitted for a public-only file. Loading such a file
//! yields a [`KeyPair`] that verifies but refuses to sign.
//!
//! Material encodings per algorithm:
//!
//! | Algorithm | `private_key`        | `public_key`        |
//! |-----------|----------------------|---------------------|
//! | Ed25519   | 32-byte seed         | 32-byte point       |
//! | RSA       | PKCS#8 DER           | SPKI DER            |

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::algorithm::KeyAlgorithm;
use crate::error::CryptoError;
use crate::keys::{KeyPair, PrivateKey, PublicKey};

/// On-disk form of a [`KeyPair`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyFile {
    pub algorithm: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    pub public_key: String,
}

impl KeyFile {
    pub fn from_keypair(keypair: &KeyPair) -> Result<Self, CryptoError> {
        let private_key = match keypair.private_key() {
            Ok(sk) => Some(sk.to_base64()?),
            Err(_) => None,
        };
        Ok(Self {
            algorithm: keypair.algorithm().as_str().to_string(),
            private_key,
            public_key: keypair.public_key().to_base64()?,
        })
    }

    fn parsed_algorithm(&self) -> Result<KeyAlgorithm, CryptoError> {
        self.algorithm.parse::<KeyAlgorithm>().map_err(|_| {
            CryptoError::Decode(format!(
                "unrecognized algorithm tag \"{}\" in key file",
                self.algorithm
            ))
        })
    }

    /// Decode the public key only. The private key, if present, is ignored.
    pub fn public_key(&self) -> Result<PublicKey, CryptoError> {
        PublicKey::from_base64(self.parsed_algorithm()?, &self.public_key)
    }

    /// Decode into a key pair.
    ///
    /// # Errors
    ///
    /// `CryptoError::Decode` for an unknown algorithm tag, malformed
    /// material, or a public key that does not belong to the private key.
    pub fn to_keypair(&self) -> Result<KeyPair, CryptoError> {
        let algorithm = self.parsed_algorithm()?;
        let public_key = PublicKey::from_base64(algorithm, &self.public_key)?;
        let Some(encoded) = &self.private_key else {
            return Ok(KeyPair::public_only(public_key));
        };
        let private_key = PrivateKey::from_base64(algorithm, encoded)?;
        if private_key.public_key() != public_key {
            return Err(CryptoError::Decode(
                "public key in key file does not match its private key".to_string(),
            ));
        }
        Ok(KeyPair::from_private(private_key))
    }

    pub fn to_json(&self) -> Result<String, CryptoError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CryptoError::Decode(format!("cannot encode key file: {e}")))
    }

    pub fn from_json(s: &str) -> Result<Self, CryptoError> {
        serde_json::from_str(s).map_err(|e| CryptoError::Decode(format!("malformed key file: {e}")))
    }
}

/// Write a key pair (or a public-only handle) to `path`, replacing any
/// existing file.
pub fn save_to_file(keypair: &KeyPair, path: impl AsRef<Path>) -> Result<(), CryptoError> {
    let path = path.as_ref();
    let json = KeyFile::from_keypair(keypair)?.to_json()?;
    std::fs::write(path, json)?;
    tracing::info!(
        path = %path.display(),
        algorithm = %keypair.algorithm(),
        private = keypair.has_private_key(),
        "saved key file"
    );
    Ok(())
}

/// Load a key pair. A file without `private_key` yields a public-only handle.
pub fn load_keypair(path: impl AsRef<Path>) -> Result<KeyPair, CryptoError> {
    let path = path.as_ref();
    let keypair = KeyFile::from_json(&std::fs::read_to_string(path)?)?.to_keypair()?;
    tracing::debug!(
        path = %path.display(),
        algorithm = %keypair.algorithm(),
        private = keypair.has_private_key(),
        "loaded key file"
    );
    Ok(keypair)
}

/// Load only the public key from a key file.
pub fn load_public_key(path: impl AsRef<Path>) -> Result<PublicKey, CryptoError> {
    let path = path.as_ref();
    let public_key = KeyFile::from_json(&std::fs::read_to_string(path)?)?.public_key()?;
    tracing::debug!(path = %path.display(), algorithm = %public_key.algorithm(), "loaded public key");
    Ok(public_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::KeyGenOptions;
    use crate::keys::generate_keypair;

    #[test]
    fn keyfile_json_shape() {
        let kp = generate_keypair(&KeyGenOptions::default()).unwrap();
        let file = KeyFile::from_keypair(&kp).unwrap();
        let value: serde_json::Value = serde_json::from_str(&file.to_json().unwrap()).unwrap();
        assert_eq!(value["algorithm"], "Ed25519");
        assert!(value["private_key"].is_string());
        assert!(value["public_key"].is_string());

        let public = KeyFile::from_keypair(&kp.to_public_only()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&public.to_json().unwrap()).unwrap();
        assert!(value.get("private_key").is_none());
    }

    #[test]
    fn unknown_algorithm_tag_is_decode_error() {
        let file = KeyFile {
            algorithm: "DSA".to_string(),
            private_key: None,
            public_key: "AAAA".to_string(),
        };
        assert!(matches!(file.to_keypair(), Err(CryptoError::Decode(_))));
        assert!(matches!(file.public_key(), Err(CryptoError::Decode(_))));
    }

    #[test]
    fn mismatched_halves_are_rejected() {
        let a = KeyFile::from_keypair(&generate_keypair(&KeyGenOptions::default()).unwrap()).unwrap();
        let b = KeyFile::from_keypair(&generate_keypair(&KeyGenOptions::default()).unwrap()).unwrap();
        let spliced = KeyFile {
            public_key: b.public_key,
            ..a
        };
        assert!(matches!(spliced.to_keypair(), Err(CryptoError::Decode(_))));
    }

    #[test]
    fn malformed_json_is_decode_error() {
        assert!(matches!(KeyFile::from_json("{\"algorithm\":"), Err(CryptoError::Decode(_))));
        assert!(matches!(KeyFile::from_json("{\"algorithm\":\"RSA\"}"), Err(CryptoError::Decode(_))));
    }
}
