//! # Algorithm-Tagged Keys
//!
//! [`PrivateKey`] and [`PublicKey`] wrap the per-algorithm key types so proof
//! code can sign and verify without caring which family a key belongs to.
//! [`KeyPair`] is what key generation produces and key files store; its
//! private half is optional so a verifier can hold a public-only handle.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use obv3_core::CanonicalBytes;

use crate::algorithm::{KeyAlgorithm, KeyGenOptions};
use crate::ed25519::{decode_base64, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
use crate::error::CryptoError;
use crate::rsa::{RsaKeyPair, RsaPublicKeyMaterial};

#[derive(Debug, Clone, PartialEq)]
pub enum PrivateKey {
    Ed25519(Ed25519KeyPair),
    Rsa(Box<RsaKeyPair>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKey {
    Ed25519(Ed25519PublicKey),
    Rsa(Box<RsaPublicKeyMaterial>),
}

impl PrivateKey {
    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            Self::Ed25519(_) => KeyAlgorithm::Ed25519,
            Self::Rsa(_) => KeyAlgorithm::Rsa,
        }
    }

    pub fn public_key(&self) -> PublicKey {
        match self {
            Self::Ed25519(kp) => PublicKey::Ed25519(kp.public_key()),
            Self::Rsa(kp) => PublicKey::Rsa(Box::new(kp.public_key())),
        }
    }

    /// Sign canonical bytes with this key's algorithm.
    pub fn sign(&self, data: &CanonicalBytes) -> Result<Vec<u8>, CryptoError> {
        match self {
            Self::Ed25519(kp) => Ok(kp.sign(data).as_bytes().to_vec()),
            Self::Rsa(kp) => kp.sign(data),
        }
    }

    /// Raw Ed25519 seed or PKCS#8 DER, base64-encoded.
    pub fn to_base64(&self) -> Result<String, CryptoError> {
        let bytes = match self {
            Self::Ed25519(kp) => kp.seed_bytes().to_vec(),
            Self::Rsa(kp) => kp.to_pkcs8_der()?,
        };
        Ok(STANDARD.encode(bytes))
    }

    /// # Errors
    ///
    /// `CryptoError::Decode` for bad base64 or key material.
    pub fn from_base64(algorithm: KeyAlgorithm, encoded: &str) -> Result<Self, CryptoError> {
        let bytes = decode_base64(encoded, "private key")?;
        match algorithm {
            KeyAlgorithm::Ed25519 => Ok(Self::Ed25519(Ed25519KeyPair::from_seed_slice(&bytes)?)),
            KeyAlgorithm::Rsa => Ok(Self::Rsa(Box::new(RsaKeyPair::from_pkcs8_der(&bytes)?))),
        }
    }
}

impl PublicKey {
    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            Self::Ed25519(_) => KeyAlgorithm::Ed25519,
            Self::Rsa(_) => KeyAlgorithm::Rsa,
        }
    }

    /// Check `signature` over `data`.
    ///
    /// # Errors
    ///
    /// `CryptoError::Decode` if the signature has the wrong shape for the
    /// algorithm, `CryptoError::VerificationFailed` if it does not match.
    pub fn verify(&self, data: &CanonicalBytes, signature: &[u8]) -> Result<(), CryptoError> {
        match self {
            Self::Ed25519(pk) => pk.verify(data, &Ed25519Signature::from_slice(signature)?),
            Self::Rsa(pk) => pk.verify(data, signature),
        }
    }

    /// Raw Ed25519 point or SPKI DER, base64-encoded.
    pub fn to_base64(&self) -> Result<String, CryptoError> {
        match self {
            Self::Ed25519(pk) => Ok(pk.to_base64()),
            Self::Rsa(pk) => Ok(STANDARD.encode(pk.to_public_key_der()?)),
        }
    }

    /// # Errors
    ///
    /// `CryptoError::Decode` for bad base64 or key material.
    pub fn from_base64(algorithm: KeyAlgorithm, encoded: &str) -> Result<Self, CryptoError> {
        match algorithm {
            KeyAlgorithm::Ed25519 => Ok(Self::Ed25519(Ed25519PublicKey::from_base64(encoded)?)),
            KeyAlgorithm::Rsa => {
                let der = decode_base64(encoded, "RSA public key")?;
                Ok(Self::Rsa(Box::new(RsaPublicKeyMaterial::from_public_key_der(&der)?)))
            }
        }
    }
}

/// A public key, optionally with its private half.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyPair {
    private_key: Option<PrivateKey>,
    public_key: PublicKey,
}

impl KeyPair {
    pub fn from_private(private_key: PrivateKey) -> Self {
        let public_key = private_key.public_key();
        Self {
            private_key: Some(private_key),
            public_key,
        }
    }

    pub fn public_only(public_key: PublicKey) -> Self {
        Self {
            private_key: None,
            public_key,
        }
    }

    pub fn algorithm(&self) -> KeyAlgorithm {
        self.public_key.algorithm()
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn has_private_key(&self) -> bool {
        self.private_key.is_some()
    }

    /// # Errors
    ///
    /// `CryptoError::Capability` for a public-only handle.
    pub fn private_key(&self) -> Result<&PrivateKey, CryptoError> {
        self.private_key.as_ref().ok_or_else(|| {
            CryptoError::Capability("key pair holds only a public key and cannot sign".to_string())
        })
    }

    /// A copy of this key pair without the private half.
    pub fn to_public_only(&self) -> Self {
        Self::public_only(self.public_key.clone())
    }

    /// Sign canonical bytes with the private half.
    pub fn sign(&self, data: &CanonicalBytes) -> Result<Vec<u8>, CryptoError> {
        self.private_key()?.sign(data)
    }
}

/// Generate a fresh key pair.
///
/// # Errors
///
/// `CryptoError::Configuration` if an RSA key size is below the minimum.
pub fn generate_keypair(options: &KeyGenOptions) -> Result<KeyPair, CryptoError> {
    options.validate()?;
    let private_key = match options.algorithm {
        KeyAlgorithm::Ed25519 => PrivateKey::Ed25519(Ed25519KeyPair::generate()),
        KeyAlgorithm::Rsa => PrivateKey::Rsa(Box::new(RsaKeyPair::generate(options.rsa_key_size)?)),
    };
    tracing::info!(
        algorithm = %options.algorithm,
        rsa_key_size = (options.algorithm == KeyAlgorithm::Rsa).then_some(options.rsa_key_size),
        "generated key pair"
    );
    Ok(KeyPair::from_private(private_key))
}
