//! # Credential Signing and Verification
//!
//! A credential moves `Unsigned -> Signed` through [`sign_credential`],
//! which returns a new value and leaves its input untouched. Whether a
//! signed credential is valid is never stored; [`verify_credential`]
//! recomputes it from the current content on every call.
//!
//! Both [`OpenBadgeCredential`](crate::OpenBadgeCredential) and
//! [`EndorsementCredential`](crate::EndorsementCredential) implement
//! [`Signable`].

use obv3_core::{sha256_digest, CanonicalBytes, ContentDigest, Timestamp, Uri};
use obv3_crypto::{PrivateKey, PublicKey};

use crate::error::VcError;
use crate::jsonld::JsonLd;
use crate::proof::{check_proof, create_proof, signing_bytes, Proof, ProofOptions};

/// A credential document that carries at most one proof.
pub trait Signable: JsonLd {
    fn proof(&self) -> Option<&Proof>;
    fn proof_mut(&mut self) -> &mut Option<Proof>;
    fn issuance_date(&self) -> Timestamp;
    fn expiration_date(&self) -> Option<Timestamp>;

    fn is_revoked(&self) -> bool {
        false
    }

    fn is_signed(&self) -> bool {
        self.proof().is_some()
    }

    fn with_proof(&self, proof: Proof) -> Self {
        let mut signed = self.clone();
        *signed.proof_mut() = Some(proof);
        signed
    }

    fn without_proof(&self) -> Self {
        let mut unsigned = self.clone();
        *unsigned.proof_mut() = None;
        unsigned
    }

    /// Canonical bytes of the JSON-LD document minus `proof`.
    fn signing_input(&self) -> Result<CanonicalBytes, VcError> {
        signing_bytes(&self.to_json_ld()?)
    }

    /// SHA-256 of [`Signable::signing_input`].
    fn content_digest(&self) -> Result<ContentDigest, VcError> {
        Ok(sha256_digest(&self.signing_input()?))
    }

    /// Expired once `now` reaches `expirationDate`.
    fn is_expired_at(&self, now: Timestamp) -> bool {
        self.expiration_date().is_some_and(|expiration| now >= expiration)
    }

    /// [`Signable::is_valid_at`] the current time.
    fn is_valid(&self, public_key: Option<&PublicKey>) -> bool {
        self.is_valid_at(Timestamp::now(), public_key)
    }

    /// Structurally and semantically valid, not revoked, not expired at
    /// `now`, and, if it carries a proof, verified under `public_key`.
    ///
    /// A proof with no key to check it against is not valid. `None` only
    /// suits unsigned drafts. Never fails; every problem yields `false`.
    fn is_valid_at(&self, now: Timestamp, public_key: Option<&PublicKey>) -> bool {
        if let Err(e) = self.ensure_valid() {
            tracing::debug!(entity = Self::ENTITY, error = %e, "credential failed validation");
            return false;
        }
        if self.is_revoked() {
            tracing::debug!(entity = Self::ENTITY, "credential is revoked");
            return false;
        }
        if self.is_expired_at(now) {
            tracing::debug!(entity = Self::ENTITY, now = %now, "credential has expired");
            return false;
        }
        match (self.proof(), public_key) {
            (Some(_), Some(key)) => verify_credential(self, key),
            (Some(_), None) => {
                tracing::debug!(entity = Self::ENTITY, "proof present but no key to verify it");
                false
            }
            (None, _) => true,
        }
    }
}

/// Sign with the suite that matches the key and the current time.
///
/// # Errors
///
/// `VcError::AlreadySigned` if the credential already carries a proof.
/// Key and canonicalization failures propagate.
pub fn sign_credential<T: Signable>(
    credential: &T,
    private_key: &PrivateKey,
    verification_method: &Uri,
) -> Result<T, VcError> {
    sign_credential_with(credential, private_key, verification_method, &ProofOptions::default())
}

/// [`sign_credential`] with explicit proof options.
pub fn sign_credential_with<T: Signable>(
    credential: &T,
    private_key: &PrivateKey,
    verification_method: &Uri,
    options: &ProofOptions,
) -> Result<T, VcError> {
    if credential.is_signed() {
        return Err(VcError::AlreadySigned);
    }
    let proof = create_proof(&credential.to_json_ld()?, private_key, verification_method, options)?;
    Ok(credential.with_proof(proof))
}

/// Check the credential's proof against its current content.
///
/// # Errors
///
/// `VcError::NoProof` for an unsigned credential, otherwise as
/// [`check_proof`].
pub fn check_credential<T: Signable>(credential: &T, public_key: &PublicKey) -> Result<(), VcError> {
    let proof = credential.proof().ok_or(VcError::NoProof)?;
    check_proof(&credential.to_json_ld()?, proof, public_key)
}

/// `true` only for a signed credential whose proof verifies under
/// `public_key`.
pub fn verify_credential<T: Signable>(credential: &T, public_key: &PublicKey) -> bool {
    match check_credential(credential, public_key) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(entity = T::ENTITY, error = %e, "credential did not verify");
            false
        }
    }
}
