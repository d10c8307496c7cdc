//! # Issue, Sign and Verify
//!
//! Full badge lifecycle through the public API: key generation, entity
//! construction, signing, verification, tamper detection and expiry.

use obv3_core::{Timestamp, Uri};
use obv3_crypto::{generate_keypair, load_keypair, load_public_key, save_to_file, KeyGenOptions};
use obv3_vc::{
    json_ld_to_credential, sign_credential, validate_achievement, validate_credential,
    verify_credential, verify_proof, Achievement, AchievementSubject, EntityRef, JsonLd,
    OpenBadgeCredential, Profile, Signable,
};
use serde_json::json;

fn uri(s: &str) -> Uri {
    Uri::new(s).unwrap()
}

fn issuer() -> Profile {
    Profile::new(uri("https://example.org/issuers/1"), "Org")
}

fn badge() -> Achievement {
    Achievement::new(uri("https://example.org/badges/1"), "Badge", issuer())
}

fn credential_issued_at(issued: Timestamp) -> OpenBadgeCredential {
    OpenBadgeCredential::new(
        uri("https://example.org/credentials/1"),
        issuer(),
        issued,
        AchievementSubject::new(uri("did:example:1"), badge()),
    )
}

fn verification_method() -> Uri {
    uri("https://example.org/issuers/1/keys/1")
}

#[test]
fn issue_sign_verify() {
    let kp = generate_keypair(&KeyGenOptions::default()).unwrap();
    let credential = credential_issued_at(Timestamp::now());

    let signed = sign_credential(&credential, kp.private_key().unwrap(), &verification_method()).unwrap();

    assert!(verify_credential(&signed, kp.public_key()));
    assert!(signed.is_valid(Some(kp.public_key())));

    let proof = signed.proof.as_ref().unwrap();
    assert_eq!(proof.proof_type, "Ed25519Signature2020");
    assert_eq!(proof.verification_method, verification_method());
    assert_eq!(proof.proof_purpose.as_str(), "assertionMethod");
}

#[test]
fn expired_credential_is_not_valid_though_signature_verifies() {
    let kp = generate_keypair(&KeyGenOptions::default()).unwrap();
    let now = Timestamp::now();
    let credential = credential_issued_at(now.plus_seconds(-3600))
        .with_expiration_date(now.plus_seconds(-1));

    let signed = sign_credential(&credential, kp.private_key().unwrap(), &verification_method()).unwrap();

    assert!(verify_credential(&signed, kp.public_key()));
    assert!(!signed.is_valid(Some(kp.public_key())));
    assert!(signed.is_valid_at(now.plus_seconds(-2), Some(kp.public_key())));
}

#[test]
fn nested_tampering_is_detected() {
    let kp = generate_keypair(&KeyGenOptions::default()).unwrap();
    let signed = sign_credential(
        &credential_issued_at(Timestamp::now()),
        kp.private_key().unwrap(),
        &verification_method(),
    )
    .unwrap();

    let mut doc = signed.to_json_ld().unwrap();
    doc["credentialSubject"]["achievement"]["name"] = json!("Better Badge");
    let tampered = json_ld_to_credential(&doc).unwrap();

    assert!(!verify_credential(&tampered, kp.public_key()));
    assert!(!tampered.is_valid(Some(kp.public_key())));

    let proof = signed.proof.clone().unwrap();
    assert!(!verify_proof(&doc, &proof, kp.public_key()));
    assert!(verify_proof(&signed.to_json_ld().unwrap(), &proof, kp.public_key()));
}

#[test]
fn every_top_level_field_is_covered() {
    let kp = generate_keypair(&KeyGenOptions::default()).unwrap();
    let signed = sign_credential(
        &credential_issued_at(Timestamp::parse("2024-01-01T00:00:00Z").unwrap()),
        kp.private_key().unwrap(),
        &verification_method(),
    )
    .unwrap();

    let edits = [
        ("id", json!("https://example.org/credentials/2")),
        ("issuer", json!("https://example.org/issuers/1")),
        ("issuanceDate", json!("2024-01-01T00:00:01Z")),
        ("expirationDate", json!("2030-01-01T00:00:00Z")),
        ("name", json!("cosmetic")),
        ("@context", json!(["https://www.w3.org/2018/credentials/v1"])),
    ];
    for (field, value) in edits {
        let mut doc = signed.to_json_ld().unwrap();
        doc[field] = value;
        let proof = signed.proof.clone().unwrap();
        assert!(!verify_proof(&doc, &proof, kp.public_key()), "{field} not covered");
    }
}

#[test]
fn non_integer_numbers_are_signed_and_verified() {
    let kp = generate_keypair(&KeyGenOptions::default()).unwrap();
    let mut org = issuer();
    org.public_key = Some(json!({"kty": "OKP", "version": 1.5}));
    let credential = OpenBadgeCredential::new(
        uri("https://example.org/credentials/1"),
        org,
        Timestamp::now(),
        AchievementSubject::new(uri("did:example:1"), badge()),
    );
    assert!(credential.ensure_valid().is_ok());

    let signed = sign_credential(&credential, kp.private_key().unwrap(), &verification_method()).unwrap();
    assert!(verify_credential(&signed, kp.public_key()));

    let mut doc = signed.to_json_ld().unwrap();
    let received = json_ld_to_credential(&doc).unwrap();
    assert!(received.is_valid(Some(kp.public_key())));

    doc["issuer"]["publicKey"]["version"] = json!(1.25);
    let proof = signed.proof.clone().unwrap();
    assert!(!verify_proof(&doc, &proof, kp.public_key()));
}

#[test]
fn another_keypair_cannot_verify() {
    let signer = generate_keypair(&KeyGenOptions::default()).unwrap();
    let other = generate_keypair(&KeyGenOptions::default()).unwrap();
    let rsa = generate_keypair(&KeyGenOptions::rsa(2048)).unwrap();

    let signed = sign_credential(
        &credential_issued_at(Timestamp::now()),
        signer.private_key().unwrap(),
        &verification_method(),
    )
    .unwrap();

    assert!(!verify_credential(&signed, other.public_key()));
    assert!(!verify_credential(&signed, rsa.public_key()));
}

#[test]
fn rsa_signed_credential_verifies() {
    let kp = generate_keypair(&KeyGenOptions::from_name("rsa", Some(2048)).unwrap()).unwrap();
    let signed = sign_credential(
        &credential_issued_at(Timestamp::now()),
        kp.private_key().unwrap(),
        &verification_method(),
    )
    .unwrap();

    assert_eq!(signed.proof.as_ref().unwrap().proof_type, "RsaSignature2018");
    assert!(verify_credential(&signed, kp.public_key()));
    assert!(signed.is_valid(Some(kp.public_key())));
}

#[test]
fn keys_survive_a_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("issuer-key.json");
    let kp = generate_keypair(&KeyGenOptions::default()).unwrap();
    save_to_file(&kp, &path).unwrap();

    let loaded = load_keypair(&path).unwrap();
    let signed = sign_credential(
        &credential_issued_at(Timestamp::now()),
        loaded.private_key().unwrap(),
        &verification_method(),
    )
    .unwrap();

    let public = load_public_key(&path).unwrap();
    assert!(verify_credential(&signed, &public));
}

#[test]
fn received_document_verifies_without_retyping() {
    let kp = generate_keypair(&KeyGenOptions::default()).unwrap();
    let signed = sign_credential(
        &credential_issued_at(Timestamp::now()),
        kp.private_key().unwrap(),
        &verification_method(),
    )
    .unwrap();

    let wire = serde_json::to_string(&signed.to_json_ld().unwrap()).unwrap();
    let received: serde_json::Value = serde_json::from_str(&wire).unwrap();
    let credential = json_ld_to_credential(&received).unwrap();

    assert_eq!(credential, signed);
    assert!(validate_credential(&received).is_valid);
    assert!(verify_credential(&credential, kp.public_key()));
}

#[test]
fn issuer_reference_forms_are_equivalent() {
    let embedded = badge();
    let by_ref = Achievement::new(
        uri("https://example.org/badges/1"),
        "Badge",
        uri("https://example.org/issuers/1"),
    );

    assert!(validate_achievement(&embedded).is_valid);
    assert!(validate_achievement(&by_ref).is_valid);

    let embedded_doc = embedded.to_json_ld().unwrap();
    let by_ref_doc = by_ref.to_json_ld().unwrap();
    assert_eq!(embedded_doc["issuer"]["id"], "https://example.org/issuers/1");
    assert_eq!(embedded_doc["issuer"]["name"], "Org");
    assert_eq!(by_ref_doc["issuer"], "https://example.org/issuers/1");

    assert_eq!(embedded.issuer.id(), by_ref.issuer.id());
    assert_eq!(embedded.issuer.to_reference(), Some(EntityRef::reference(uri("https://example.org/issuers/1"))));
}

#[test]
fn required_fields_are_named() {
    let profile = validate_credential(&json!({
        "id": "https://example.org/credentials/1",
        "type": ["VerifiableCredential", "OpenBadgeCredential"],
        "issuer": {"id": "https://example.org/issuers/1"},
        "issuanceDate": "2024-01-01T00:00:00Z",
        "credentialSubject": {
            "id": "did:example:1",
            "achievement": {"id": "https://example.org/badges/1", "name": "Badge"}
        }
    }));
    assert!(!profile.is_valid);
    assert_eq!(
        profile.errors,
        vec![
            "issuer.name: required field is missing",
            "credentialSubject.achievement.issuer: required field is missing",
        ]
    );
}

#[test]
fn inverted_dates_fail_validation() {
    let credential = credential_issued_at(Timestamp::parse("2024-06-01T00:00:00Z").unwrap())
        .with_expiration_date(Timestamp::parse("2024-05-01T00:00:00Z").unwrap());
    let result = validate_credential(&credential);
    assert!(!result.is_valid);
    assert!(result.errors[0].starts_with("expirationDate:"));
    assert!(!credential.is_valid(None));
}
