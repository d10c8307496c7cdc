//! # Linked-Data Proofs
//!
//! A [`Proof`] is the signature block attached to a signed document. The
//! signed bytes are the JCS canonicalization of the document's JSON-LD
//! mapping with its `proof` member removed, so a proof never covers itself
//! and every other field, nested or not, is covered.
//!
//! [`create_proof`] and [`check_proof`] are the strict operations.
//! [`verify_proof`] folds every failure into `false`: a forged badge is an
//! expected outcome, not an error.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use obv3_core::{CanonicalBytes, Timestamp, Uri};
use obv3_crypto::{CryptoError, PrivateKey, PublicKey, SignatureSuite};

use crate::error::VcError;
use crate::field::{check_non_empty_string, check_string, check_timestamp, check_uri, FieldSpec};
use crate::jsonld::JsonLd;

/// The role a proof plays for its verification method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProofPurpose {
    /// The issuer asserts the claims in the document.
    #[default]
    AssertionMethod,
    Authentication,
}

impl ProofPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AssertionMethod => "assertionMethod",
            Self::Authentication => "authentication",
        }
    }
}

impl std::fmt::Display for ProofPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn check_proof_purpose(value: &Value, path: &str) -> Vec<String> {
    match value.as_str() {
        Some("assertionMethod" | "authentication") => Vec::new(),
        Some(other) => vec![format!("{path}: unknown proof purpose \"{other}\"")],
        None => check_string(value, path),
    }
}

/// A signature over a document's canonical form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proof {
    /// Signature suite name, e.g. `Ed25519Signature2020`.
    #[serde(rename = "type")]
    pub proof_type: String,
    pub created: Timestamp,
    /// URI identifying the key that produced the signature.
    pub verification_method: Uri,
    pub proof_purpose: ProofPurpose,
    /// Base64 signature bytes.
    pub proof_value: String,
}

impl Proof {
    /// The suite named by `type`.
    ///
    /// # Errors
    ///
    /// `CryptoError::UnsupportedSuite` for any other name.
    pub fn suite(&self) -> Result<SignatureSuite, CryptoError> {
        self.proof_type.parse()
    }

    /// Decode `proofValue` into raw signature bytes.
    pub fn signature_bytes(&self) -> Result<Vec<u8>, CryptoError> {
        STANDARD
            .decode(self.proof_value.trim())
            .map_err(|e| CryptoError::Decode(format!("proofValue is not valid base64: {e}")))
    }
}

impl JsonLd for Proof {
    const ENTITY: &'static str = "Proof";
    const REQUIRED_TYPES: &'static [&'static str] = &[];
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("type", check_non_empty_string),
        FieldSpec::required("created", check_timestamp),
        FieldSpec::required("verificationMethod", check_uri),
        FieldSpec::required("proofPurpose", check_proof_purpose),
        FieldSpec::required("proofValue", check_string),
    ];

    fn entity_id(&self) -> Option<&Uri> {
        None
    }

    fn semantic_errors(&self) -> Vec<String> {
        if self.proof_value.trim().is_empty() {
            vec!["proofValue: must not be empty".to_string()]
        } else {
            Vec::new()
        }
    }
}

/// Parameters for [`create_proof`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProofOptions {
    /// Defaults to the suite of the signing key's algorithm.
    pub suite: Option<SignatureSuite>,
    pub purpose: ProofPurpose,
    /// Defaults to the current time.
    pub created: Option<Timestamp>,
}

impl ProofOptions {
    pub fn with_suite(mut self, suite: SignatureSuite) -> Self {
        self.suite = Some(suite);
        self
    }

    pub fn with_purpose(mut self, purpose: ProofPurpose) -> Self {
        self.purpose = purpose;
        self
    }

    pub fn created_at(mut self, created: Timestamp) -> Self {
        self.created = Some(created);
        self
    }
}

/// Canonical bytes of `document` with any top-level `proof` removed.
pub fn signing_bytes(document: &Value) -> Result<CanonicalBytes, VcError> {
    let mut unsigned = document.clone();
    if let Some(map) = unsigned.as_object_mut() {
        map.remove("proof");
    }
    Ok(CanonicalBytes::new(&unsigned)?)
}

/// Sign `document` and return the proof to attach to it.
///
/// # Errors
///
/// `CryptoError::KeyMismatch` if `options.suite` does not belong to the
/// key's algorithm. Canonicalization and signing failures propagate.
pub fn create_proof(
    document: &Value,
    private_key: &PrivateKey,
    verification_method: &Uri,
    options: &ProofOptions,
) -> Result<Proof, VcError> {
    let algorithm = private_key.algorithm();
    let suite = options.suite.unwrap_or_else(|| algorithm.suite());
    if suite.algorithm() != algorithm {
        return Err(CryptoError::KeyMismatch {
            suite: suite.to_string(),
            algorithm: algorithm.to_string(),
        }
        .into());
    }

    let message = signing_bytes(document)?;
    let signature = private_key.sign(&message)?;
    tracing::info!(
        suite = %suite,
        verification_method = %verification_method,
        signed_bytes = message.len(),
        "created proof"
    );

    Ok(Proof {
        proof_type: suite.to_string(),
        created: options.created.unwrap_or_else(Timestamp::now),
        verification_method: verification_method.clone(),
        proof_purpose: options.purpose,
        proof_value: STANDARD.encode(signature),
    })
}

/// Check `proof` over `document` with `public_key`.
///
/// # Errors
///
/// - `CryptoError::UnsupportedSuite` for an unknown `proof.type`.
/// - `CryptoError::KeyMismatch` if the suite and key algorithm differ.
/// - `CryptoError::Decode` for a malformed `proofValue`.
/// - `CryptoError::VerificationFailed` if the signature does not match.
pub fn check_proof(document: &Value, proof: &Proof, public_key: &PublicKey) -> Result<(), VcError> {
    let suite = proof.suite()?;
    if suite.algorithm() != public_key.algorithm() {
        return Err(CryptoError::KeyMismatch {
            suite: suite.to_string(),
            algorithm: public_key.algorithm().to_string(),
        }
        .into());
    }
    let signature = proof.signature_bytes()?;
    let message = signing_bytes(document)?;
    public_key.verify(&message, &signature)?;
    Ok(())
}

/// `true` only if `proof` is an exact signature over `document` by the
/// holder of `public_key`.
pub fn verify_proof(document: &Value, proof: &Proof, public_key: &PublicKey) -> bool {
    match check_proof(document, proof, public_key) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(
                verification_method = %proof.verification_method,
                error = %e,
                "proof did not verify"
            );
            false
        }
    }
}
