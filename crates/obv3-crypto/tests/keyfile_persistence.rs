//! Key-file save/load through the filesystem, for both key families.

use obv3_core::CanonicalBytes;
use obv3_crypto::{
    generate_keypair, load_keypair, load_public_key, save_to_file, CryptoError, KeyAlgorithm,
    KeyGenOptions,
};

fn message() -> CanonicalBytes {
    CanonicalBytes::new(&serde_json::json!({
        "id": "https://example.org/credentials/1",
        "type": ["VerifiableCredential", "OpenBadgeCredential"]
    }))
    .unwrap()
}

#[test]
fn ed25519_keypair_survives_a_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("issuer.json");

    let kp = generate_keypair(&KeyGenOptions::default()).unwrap();
    save_to_file(&kp, &path).unwrap();

    let loaded = load_keypair(&path).unwrap();
    assert_eq!(loaded, kp);

    let sig = loaded.sign(&message()).unwrap();
    kp.public_key().verify(&message(), &sig).unwrap();
}

#[test]
fn rsa_keypair_survives_a_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rsa.json");

    let kp = generate_keypair(&KeyGenOptions::from_name("RSA", None).unwrap()).unwrap();
    save_to_file(&kp, &path).unwrap();

    let loaded = load_keypair(&path).unwrap();
    assert_eq!(loaded.algorithm(), KeyAlgorithm::Rsa);
    let sig = kp.sign(&message()).unwrap();
    loaded.public_key().verify(&message(), &sig).unwrap();

    let public = load_public_key(&path).unwrap();
    assert_eq!(&public, kp.public_key());
}

#[test]
fn public_only_file_loads_but_cannot_sign() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("verifier.json");

    let kp = generate_keypair(&KeyGenOptions::default()).unwrap();
    save_to_file(&kp.to_public_only(), &path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(!contents.contains("private_key"));

    let loaded = load_keypair(&path).unwrap();
    assert_eq!(loaded.public_key(), kp.public_key());
    assert!(matches!(loaded.sign(&message()), Err(CryptoError::Capability(_))));
}

#[test]
fn corrupt_files_fail_with_decode_errors() {
    let dir = tempfile::tempdir().unwrap();

    let garbage = dir.path().join("garbage.json");
    std::fs::write(&garbage, "not json at all").unwrap();
    assert!(matches!(load_keypair(&garbage), Err(CryptoError::Decode(_))));

    let bad_material = dir.path().join("bad.json");
    std::fs::write(
        &bad_material,
        r#"{"algorithm":"Ed25519","public_key":"AAAA"}"#,
    )
    .unwrap();
    assert!(matches!(load_public_key(&bad_material), Err(CryptoError::Decode(_))));

    let missing = dir.path().join("missing.json");
    assert!(matches!(load_keypair(&missing), Err(CryptoError::Io(_))));
}
