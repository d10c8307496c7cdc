//! # Canonical Serialization
//!
//! `CanonicalBytes` is the only form in which a badge document is fed to a
//! signer, a verifier, or a digest function.
//!
//! ## Invariant
//!
//! The inner buffer is private. The single constructor serializes the value
//! to a JSON tree and emits RFC 8785 (JCS) output: object keys sorted by
//! code point, no insignificant whitespace, UTF-8 without escaping of
//! non-ASCII characters, and numbers in the ECMAScript shortest form.
//! Every JSON value has a canonical form; canonicalization never rejects
//! content.
//!
//! Two semantically equal documents therefore always produce identical bytes
//! regardless of the key order in which they were parsed or built, which is
//! what makes a proof computed over one of them verify against the other.
//!
//! Timestamps are not touched here. [`crate::Timestamp`] already serializes
//! to a single second-precision UTC form.

use serde::Serialize;

use crate::error::CanonicalizationError;

/// Deterministic byte encoding of a JSON-serializable value.
///
/// # Invariants
///
/// - The only constructor is [`CanonicalBytes::new`].
/// - Object keys are sorted, separators are compact (RFC 8785).
/// - `1.5`, `1.50` and `15e-1` all render as `1.5`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(String);

impl CanonicalBytes {
    /// Canonicalize any serializable value.
    ///
    /// # Errors
    ///
    /// `SerializationFailed` if the value cannot be represented as JSON,
    /// e.g. a map with non-string keys.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        Ok(Self(serde_jcs::to_string(&value)?))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The canonical form as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn keys_are_sorted_at_every_depth() {
        let doc = json!({
            "type": ["VerifiableCredential", "OpenBadgeCredential"],
            "issuer": {"name": "Example University", "id": "https://example.edu/issuers/1"},
            "@context": ["https://www.w3.org/2018/credentials/v1"]
        });
        let cb = CanonicalBytes::new(&doc).unwrap();
        assert_eq!(
            cb.as_str(),
            r#"{"@context":["https://www.w3.org/2018/credentials/v1"],"issuer":{"id":"https://example.edu/issuers/1","name":"Example University"},"type":["VerifiableCredential","OpenBadgeCredential"]}"#
        );
    }

    #[test]
    fn array_order_is_preserved() {
        let cb = CanonicalBytes::new(&json!({"tags": ["z", "a", "m"]})).unwrap();
        assert_eq!(cb.as_str(), r#"{"tags":["z","a","m"]}"#);
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let a: Value = serde_json::from_str(r#"{"name":"Badge","id":"urn:x:1"}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"id":"urn:x:1","name":"Badge"}"#).unwrap();
        assert_eq!(
            CanonicalBytes::new(&a).unwrap(),
            CanonicalBytes::new(&b).unwrap()
        );
    }

    #[test]
    fn non_integer_numbers_have_one_form() {
        let cb = CanonicalBytes::new(&json!({"publicKey": {"version": 1.5, "scale": 1e-7}}))
            .unwrap();
        assert_eq!(cb.as_str(), r#"{"publicKey":{"scale":1e-7,"version":1.5}}"#);

        let a: Value = serde_json::from_str(r#"{"v":1.50}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"v":15e-1}"#).unwrap();
        assert_eq!(CanonicalBytes::new(&a).unwrap(), CanonicalBytes::new(&b).unwrap());
    }

    #[test]
    fn non_string_map_keys_are_an_error() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(vec![1u8], "x");
        assert!(matches!(
            CanonicalBytes::new(&map),
            Err(CanonicalizationError::SerializationFailed(_))
        ));
    }

    #[test]
    fn integers_null_and_bools_pass_through() {
        let cb = CanonicalBytes::new(&json!({"width": 512, "revoked": false, "caption": null}))
            .unwrap();
        assert_eq!(cb.as_str(), r#"{"caption":null,"revoked":false,"width":512}"#);
    }

    #[test]
    fn non_ascii_is_not_escaped() {
        let cb = CanonicalBytes::new(&json!({"name": "Universit\u{00e9}"})).unwrap();
        assert!(cb.as_str().contains('\u{00e9}'));
        assert!(!cb.as_str().contains("\\u"));
    }

    #[test]
    fn empty_containers() {
        assert_eq!(CanonicalBytes::new(&json!({})).unwrap().as_bytes(), b"{}");
        assert_eq!(CanonicalBytes::new(&json!([])).unwrap().as_bytes(), b"[]");
        assert!(!CanonicalBytes::new(&json!({})).unwrap().is_empty());
    }
}
