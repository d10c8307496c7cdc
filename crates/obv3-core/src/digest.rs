//! # Content Digest
//!
//! SHA-256 digests of canonical document bytes. A digest identifies the exact
//! signing input of a credential, so two parties can compare what they are
//! about to sign or verify without exchanging the full document.
//!
//! `sha256_digest()` accepts only `&CanonicalBytes`, so every digest in the
//! workspace is taken over JCS output.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;

/// Hash algorithm tag carried by every digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    Sha256,
}

impl DigestAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
        }
    }
}

impl std::fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A 32-byte digest with its algorithm tag. Displays as `sha256:<hex>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentDigest {
    pub algorithm: DigestAlgorithm,
    pub bytes: [u8; 32],
}

impl ContentDigest {
    pub fn new(algorithm: DigestAlgorithm, bytes: [u8; 32]) -> Self {
        Self { algorithm, bytes }
    }

    /// Lowercase hex rendering of the digest bytes.
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.to_hex())
    }
}

/// SHA-256 over canonical bytes.
pub fn sha256_digest(data: &CanonicalBytes) -> ContentDigest {
    let hash = Sha256::digest(data.as_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    ContentDigest::new(DigestAlgorithm::Sha256, bytes)
}

pub fn sha256_hex(data: &CanonicalBytes) -> String {
    sha256_digest(data).to_hex()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn digest_of_empty_object_matches_known_vector() {
        let cb = CanonicalBytes::new(&json!({})).unwrap();
        assert_eq!(
            sha256_hex(&cb),
            "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
        );
    }

    #[test]
    fn display_is_tagged_hex() {
        let cb = CanonicalBytes::new(&json!({"id": "urn:uuid:1"})).unwrap();
        let s = sha256_digest(&cb).to_string();
        assert!(s.starts_with("sha256:"));
        assert_eq!(s.len(), "sha256:".len() + 64);
    }

    #[test]
    fn key_order_does_not_change_digest() {
        let a: serde_json::Value =
            serde_json::from_str(r#"{"name":"Badge","type":["Achievement"]}"#).unwrap();
        let b: serde_json::Value =
            serde_json::from_str(r#"{"type":["Achievement"],"name":"Badge"}"#).unwrap();
        assert_eq!(
            sha256_digest(&CanonicalBytes::new(&a).unwrap()),
            sha256_digest(&CanonicalBytes::new(&b).unwrap())
        );
    }

    #[test]
    fn any_value_change_changes_digest() {
        let a = CanonicalBytes::new(&json!({"name": "Badge"})).unwrap();
        let b = CanonicalBytes::new(&json!({"name": "Badge "})).unwrap();
        assert_ne!(sha256_digest(&a), sha256_digest(&b));
    }
}
