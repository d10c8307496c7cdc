//! # Canonical Form Vectors
//!
//! Badge documents produced by other OpenBadge tooling are signed over
//! `json.dumps(doc, sort_keys=True, separators=(",", ":"))`. For documents made
//! of strings, integers, booleans, arrays and objects with ASCII keys, that
//! output coincides with RFC 8785. These vectors pin the exact bytes so a
//! signature produced elsewhere verifies here.

use obv3_core::{sha256_digest, CanonicalBytes, Timestamp};
use serde_json::json;
use sha2::{Digest, Sha256};

fn canonical(v: &serde_json::Value) -> String {
    CanonicalBytes::new(v).unwrap().as_str().to_string()
}

#[test]
fn profile_document() {
    let doc = json!({
        "@context": "https://w3id.org/openbadges/v3",
        "id": "https://example.org/issuers/1",
        "type": ["Profile"],
        "name": "Org",
        "email": "badges@example.org"
    });
    assert_eq!(
        canonical(&doc),
        r#"{"@context":"https://w3id.org/openbadges/v3","email":"badges@example.org","id":"https://example.org/issuers/1","name":"Org","type":["Profile"]}"#
    );
}

#[test]
fn nested_credential_document() {
    let doc = json!({
        "type": ["VerifiableCredential", "OpenBadgeCredential"],
        "id": "https://example.org/credentials/1",
        "issuer": "https://example.org/issuers/1",
        "issuanceDate": "2024-03-01T10:00:00Z",
        "credentialSubject": {
            "type": ["AchievementSubject"],
            "id": "did:example:1",
            "achievement": {
                "name": "Badge",
                "issuer": "https://example.org/issuers/1",
                "id": "https://example.org/badges/1",
                "type": ["Achievement"],
                "tags": ["rust", "crypto"]
            }
        }
    });
    assert_eq!(
        canonical(&doc),
        concat!(
            r#"{"credentialSubject":{"achievement":{"id":"https://example.org/badges/1","#,
            r#""issuer":"https://example.org/issuers/1","name":"Badge","tags":["rust","crypto"],"#,
            r#""type":["Achievement"]},"id":"did:example:1","type":["AchievementSubject"]},"#,
            r#""id":"https://example.org/credentials/1","issuanceDate":"2024-03-01T10:00:00Z","#,
            r#""issuer":"https://example.org/issuers/1","#,
            r#""type":["VerifiableCredential","OpenBadgeCredential"]}"#
        )
    );
}

#[test]
fn digest_is_plain_sha256_of_canonical_bytes() {
    let doc = json!({"name": "Badge", "id": "https://example.org/badges/1"});
    let cb = CanonicalBytes::new(&doc).unwrap();
    let expected = Sha256::digest(cb.as_bytes());
    assert_eq!(sha256_digest(&cb).bytes.as_slice(), expected.as_slice());
}

#[test]
fn timestamps_canonicalize_to_one_form() {
    let a = Timestamp::parse("2024-03-01T12:00:00+02:00").unwrap();
    let b = Timestamp::parse("2024-03-01T10:00:00.999Z").unwrap();
    assert_eq!(
        CanonicalBytes::new(&json!({"issuanceDate": a})).unwrap(),
        CanonicalBytes::new(&json!({"issuanceDate": b})).unwrap()
    );
}
