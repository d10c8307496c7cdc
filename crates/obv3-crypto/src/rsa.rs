//! # RSA Signing and Verification
//!
//! `RsaSignature2018` signatures: RSASSA-PKCS1-v1_5 over the SHA-256 digest
//! of the canonical bytes.
//!
//! Private keys persist as PKCS#8 DER, public keys as SubjectPublicKeyInfo
//! DER. Both are base64 in key files.

use ::rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use ::rsa::traits::PublicKeyParts;
use ::rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use obv3_core::CanonicalBytes;
use sha2::{Digest, Sha256};

use crate::error::CryptoError;

/// An RSA private key.
#[derive(Clone, PartialEq)]
pub struct RsaKeyPair {
    private_key: RsaPrivateKey,
}

/// An RSA public key.
#[derive(Clone, PartialEq, Eq)]
pub struct RsaPublicKeyMaterial {
    public_key: RsaPublicKey,
}

impl RsaKeyPair {
    /// Generate a key with a `bits`-bit modulus from the OS CSPRNG.
    ///
    /// Callers enforce the minimum size; see `KeyGenOptions::validate`.
    pub fn generate(bits: usize) -> Result<Self, CryptoError> {
        let mut rng = rand::rngs::OsRng;
        let private_key = RsaPrivateKey::new(&mut rng, bits)
            .map_err(|e| CryptoError::Configuration(format!("RSA key generation failed: {e}")))?;
        Ok(Self { private_key })
    }

    /// # Errors
    ///
    /// `CryptoError::Decode` if the bytes are not a PKCS#8 RSA private key.
    pub fn from_pkcs8_der(der: &[u8]) -> Result<Self, CryptoError> {
        let private_key = RsaPrivateKey::from_pkcs8_der(der)
            .map_err(|e| CryptoError::Decode(format!("invalid RSA private key: {e}")))?;
        Ok(Self { private_key })
    }

    pub fn to_pkcs8_der(&self) -> Result<Vec<u8>, CryptoError> {
        let doc = self
            .private_key
            .to_pkcs8_der()
            .map_err(|e| CryptoError::Decode(format!("cannot encode RSA private key: {e}")))?;
        Ok(doc.as_bytes().to_vec())
    }

    pub fn public_key(&self) -> RsaPublicKeyMaterial {
        RsaPublicKeyMaterial {
            public_key: self.private_key.to_public_key(),
        }
    }

    /// Modulus size in bits.
    pub fn key_size(&self) -> usize {
        self.private_key.size() * 8
    }

    /// PKCS#1 v1.5 signature over SHA-256 of the canonical bytes.
    pub fn sign(&self, data: &CanonicalBytes) -> Result<Vec<u8>, CryptoError> {
        let digest = Sha256::digest(data.as_bytes());
        self.private_key
            .sign(Pkcs1v15Sign::new::<Sha256>(), &digest)
            .map_err(|e| CryptoError::Signing(format!("RSA: {e}")))
    }
}

impl std::fmt::Debug for RsaKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RsaKeyPair({} bits, <private>)", self.key_size())
    }
}

impl RsaPublicKeyMaterial {
    /// # Errors
    ///
    /// `CryptoError::Decode` if the bytes are not an SPKI RSA public key.
    pub fn from_public_key_der(der: &[u8]) -> Result<Self, CryptoError> {
        let public_key = RsaPublicKey::from_public_key_der(der)
            .map_err(|e| CryptoError::Decode(format!("invalid RSA public key: {e}")))?;
        Ok(Self { public_key })
    }

    pub fn to_public_key_der(&self) -> Result<Vec<u8>, CryptoError> {
        let doc = self
            .public_key
            .to_public_key_der()
            .map_err(|e| CryptoError::Decode(format!("cannot encode RSA public key: {e}")))?;
        Ok(doc.as_bytes().to_vec())
    }

    pub fn key_size(&self) -> usize {
        self.public_key.size() * 8
    }

    /// # Errors
    ///
    /// `CryptoError::VerificationFailed` if the signature does not match.
    pub fn verify(&self, data: &CanonicalBytes, signature: &[u8]) -> Result<(), CryptoError> {
        let digest = Sha256::digest(data.as_bytes());
        self.public_key
            .verify(Pkcs1v15Sign::new::<Sha256>(), &digest, signature)
            .map_err(|e| CryptoError::VerificationFailed(format!("RSA: {e}")))
    }
}

impl std::fmt::Debug for RsaPublicKeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RsaPublicKey({} bits)", self.key_size())
    }
}
