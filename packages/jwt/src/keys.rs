//! Key material accepted by the signer and verifier constructors
//!
//! Loaders report an empty input as [`JwtError::NilKey`] and anything that
//! cannot be decoded as [`JwtError::InvalidKey`], so callers can tell "no key
//! provided" apart from "key provided but wrong".

use crate::error::{JwtError, JwtResult};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::fmt;
use zeroize::Zeroizing;

/// Ed25519 keypair length (seed followed by public key).
pub const ED25519_PRIVATE_KEY_SIZE: usize = 64;

/// Ed25519 public key length.
pub const ED25519_PUBLIC_KEY_SIZE: usize = 32;

/// NIST curve backing an ECDSA key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    /// secp256r1
    P256,
    /// secp384r1
    P384,
    /// secp521r1
    P521,
}

impl Curve {
    /// Order bit size.
    #[must_use]
    pub const fn bits(self) -> usize {
        match self {
            Curve::P256 => 256,
            Curve::P384 => 384,
            Curve::P521 => 521,
        }
    }

    /// `ceil(bits / 8)`, the width each of r and s is padded to.
    #[must_use]
    pub const fn field_size(self) -> usize {
        self.bits().div_ceil(8)
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Curve::P256 => f.write_str("P-256"),
            Curve::P384 => f.write_str("P-384"),
            Curve::P521 => f.write_str("P-521"),
        }
    }
}

/// ECDSA private key on one of the supported curves.
pub enum EcSigningKey {
    /// P-256 key
    P256(p256::ecdsa::SigningKey),
    /// P-384 key
    P384(p384::ecdsa::SigningKey),
    /// P-521 key with its public half, derived once at load time
    P521(p521::ecdsa::SigningKey, p521::ecdsa::VerifyingKey),
}

impl EcSigningKey {
    /// Curve of this key.
    #[must_use]
    pub fn curve(&self) -> Curve {
        match self {
            EcSigningKey::P256(_) => Curve::P256,
            EcSigningKey::P384(_) => Curve::P384,
            EcSigningKey::P521(..) => Curve::P521,
        }
    }

    /// Decode a PKCS#8 DER private key, detecting the curve.
    pub fn from_pkcs8_der(der: &[u8]) -> JwtResult<Self> {
        if der.is_empty() {
            return Err(JwtError::NilKey);
        }
        if let Ok(key) = p256::ecdsa::SigningKey::from_pkcs8_der(der) {
            return Ok(EcSigningKey::P256(key));
        }
        if let Ok(key) = p384::ecdsa::SigningKey::from_pkcs8_der(der) {
            return Ok(EcSigningKey::P384(key));
        }
        if let Ok(secret) = p521::SecretKey::from_pkcs8_der(der) {
            return Self::p521(&secret);
        }
        Err(JwtError::invalid_key("Unrecognised EC private key"))
    }

    /// Decode a PKCS#8 PEM private key, detecting the curve.
    pub fn from_pkcs8_pem(pem: &str) -> JwtResult<Self> {
        if pem.trim().is_empty() {
            return Err(JwtError::NilKey);
        }
        if let Ok(key) = p256::ecdsa::SigningKey::from_pkcs8_pem(pem) {
            return Ok(EcSigningKey::P256(key));
        }
        if let Ok(key) = p384::ecdsa::SigningKey::from_pkcs8_pem(pem) {
            return Ok(EcSigningKey::P384(key));
        }
        if let Ok(secret) = p521::SecretKey::from_pkcs8_pem(pem) {
            return Self::p521(&secret);
        }
        Err(JwtError::invalid_key("Unrecognised EC private key"))
    }

    fn p521(secret: &p521::SecretKey) -> JwtResult<Self> {
        let invalid = |e| JwtError::InvalidKey(format!("Invalid P-521 private key: {e}"));
        let signing = p521::ecdsa::SigningKey::from_bytes(&secret.to_bytes()).map_err(invalid)?;
        let point = secret.public_key().to_encoded_point(false);
        let verifying =
            p521::ecdsa::VerifyingKey::from_sec1_bytes(point.as_bytes()).map_err(invalid)?;
        Ok(EcSigningKey::P521(signing, verifying))
    }

    /// Matching public key.
    #[must_use]
    pub fn verifying_key(&self) -> EcVerifyingKey {
        match self {
            EcSigningKey::P256(key) => EcVerifyingKey::P256(p256::ecdsa::VerifyingKey::from(key)),
            EcSigningKey::P384(key) => EcVerifyingKey::P384(p384::ecdsa::VerifyingKey::from(key)),
            EcSigningKey::P521(_, public) => EcVerifyingKey::P521(public.clone()),
        }
    }
}

impl fmt::Debug for EcSigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EcSigningKey({})", self.curve())
    }
}

/// ECDSA public key on one of the supported curves.
pub enum EcVerifyingKey {
    /// P-256 key
    P256(p256::ecdsa::VerifyingKey),
    /// P-384 key
    P384(p384::ecdsa::VerifyingKey),
    /// P-521 key
    P521(p521::ecdsa::VerifyingKey),
}

impl EcVerifyingKey {
    /// Curve of this key.
    #[must_use]
    pub fn curve(&self) -> Curve {
        match self {
            EcVerifyingKey::P256(_) => Curve::P256,
            EcVerifyingKey::P384(_) => Curve::P384,
            EcVerifyingKey::P521(_) => Curve::P521,
        }
    }

    /// Decode an SPKI DER public key, detecting the curve.
    pub fn from_public_key_der(der: &[u8]) -> JwtResult<Self> {
        if der.is_empty() {
            return Err(JwtError::NilKey);
        }
        if let Ok(key) = p256::ecdsa::VerifyingKey::from_public_key_der(der) {
            return Ok(EcVerifyingKey::P256(key));
        }
        if let Ok(key) = p384::ecdsa::VerifyingKey::from_public_key_der(der) {
            return Ok(EcVerifyingKey::P384(key));
        }
        if let Ok(public) = p521::PublicKey::from_public_key_der(der) {
            return Self::from_sec1_bytes(Curve::P521, public.to_encoded_point(false).as_bytes());
        }
        Err(JwtError::invalid_key("Unrecognised EC public key"))
    }

    /// Decode an SPKI PEM public key, detecting the curve.
    pub fn from_public_key_pem(pem: &str) -> JwtResult<Self> {
        if pem.trim().is_empty() {
            return Err(JwtError::NilKey);
        }
        if let Ok(key) = p256::ecdsa::VerifyingKey::from_public_key_pem(pem) {
            return Ok(EcVerifyingKey::P256(key));
        }
        if let Ok(key) = p384::ecdsa::VerifyingKey::from_public_key_pem(pem) {
            return Ok(EcVerifyingKey::P384(key));
        }
        if let Ok(public) = p521::PublicKey::from_public_key_pem(pem) {
            return Self::from_sec1_bytes(Curve::P521, public.to_encoded_point(false).as_bytes());
        }
        Err(JwtError::invalid_key("Unrecognised EC public key"))
    }

    /// Decode a SEC1 point (compressed or uncompressed) on `curve`.
    pub fn from_sec1_bytes(curve: Curve, bytes: &[u8]) -> JwtResult<Self> {
        if bytes.is_empty() {
            return Err(JwtError::NilKey);
        }
        let invalid = |_| JwtError::InvalidKey(format!("Invalid SEC1 point for {curve}"));
        let key = match curve {
            Curve::P256 => {
                EcVerifyingKey::P256(p256::ecdsa::VerifyingKey::from_sec1_bytes(bytes).map_err(invalid)?)
            }
            Curve::P384 => {
                EcVerifyingKey::P384(p384::ecdsa::VerifyingKey::from_sec1_bytes(bytes).map_err(invalid)?)
            }
            Curve::P521 => {
                EcVerifyingKey::P521(p521::ecdsa::VerifyingKey::from_sec1_bytes(bytes).map_err(invalid)?)
            }
        };
        Ok(key)
    }
}

impl fmt::Debug for EcVerifyingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EcVerifyingKey({})", self.curve())
    }
}

/// Signing key for any supported family.
pub enum PrivateKey {
    /// Shared HMAC secret
    Hmac(Zeroizing<Vec<u8>>),
    /// RSA private key, used by both RS* and PS*
    Rsa(RsaPrivateKey),
    /// ECDSA private key
    Ec(EcSigningKey),
    /// Ed25519 keypair bytes (32-byte seed followed by 32-byte public key)
    Ed25519(Zeroizing<Vec<u8>>),
}

impl PrivateKey {
    /// Wrap an HMAC secret.
    pub fn hmac(secret: impl Into<Vec<u8>>) -> Self {
        PrivateKey::Hmac(Zeroizing::new(secret.into()))
    }

    /// Wrap Ed25519 keypair bytes.
    pub fn ed25519(keypair: impl Into<Vec<u8>>) -> Self {
        PrivateKey::Ed25519(Zeroizing::new(keypair.into()))
    }

    /// Load an RSA private key from PKCS#8 or PKCS#1 PEM.
    pub fn rsa_from_pem(pem: &str) -> JwtResult<Self> {
        if pem.trim().is_empty() {
            return Err(JwtError::NilKey);
        }
        RsaPrivateKey::from_pkcs8_pem(pem)
            .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
            .map(PrivateKey::Rsa)
            .map_err(|e| JwtError::InvalidKey(format!("Invalid RSA private key: {e}")))
    }

    /// Load an RSA private key from PKCS#8 DER.
    pub fn rsa_from_der(der: &[u8]) -> JwtResult<Self> {
        if der.is_empty() {
            return Err(JwtError::NilKey);
        }
        RsaPrivateKey::from_pkcs8_der(der)
            .map(PrivateKey::Rsa)
            .map_err(|e| JwtError::InvalidKey(format!("Invalid RSA private key: {e}")))
    }

    /// Load an ECDSA private key from PKCS#8 PEM.
    pub fn ec_from_pem(pem: &str) -> JwtResult<Self> {
        EcSigningKey::from_pkcs8_pem(pem).map(PrivateKey::Ec)
    }

    /// Load an ECDSA private key from PKCS#8 DER.
    pub fn ec_from_der(der: &[u8]) -> JwtResult<Self> {
        EcSigningKey::from_pkcs8_der(der).map(PrivateKey::Ec)
    }

    /// Short family name, used in error messages.
    #[must_use]
    pub fn family(&self) -> &'static str {
        match self {
            PrivateKey::Hmac(_) => "HMAC",
            PrivateKey::Rsa(_) => "RSA",
            PrivateKey::Ec(_) => "ECDSA",
            PrivateKey::Ed25519(_) => "Ed25519",
        }
    }

    /// Derive the key that verifies this key's signatures.
    pub fn public_key(&self) -> JwtResult<PublicKey> {
        match self {
            PrivateKey::Hmac(secret) => Ok(PublicKey::Hmac(secret.clone())),
            PrivateKey::Rsa(key) => Ok(PublicKey::Rsa(key.to_public_key())),
            PrivateKey::Ec(key) => Ok(PublicKey::Ec(key.verifying_key())),
            PrivateKey::Ed25519(keypair) => {
                let signing = ed25519_signing_key(keypair)?;
                Ok(PublicKey::Ed25519(signing.verifying_key().to_bytes().to_vec()))
            }
        }
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey({})", self.family())
    }
}

/// Verification key for any supported family.
pub enum PublicKey {
    /// Shared HMAC secret
    Hmac(Zeroizing<Vec<u8>>),
    /// RSA public key, used by both RS* and PS*
    Rsa(RsaPublicKey),
    /// ECDSA public key
    Ec(EcVerifyingKey),
    /// Ed25519 public key bytes
    Ed25519(Vec<u8>),
}

impl PublicKey {
    /// Wrap an HMAC secret.
    pub fn hmac(secret: impl Into<Vec<u8>>) -> Self {
        PublicKey::Hmac(Zeroizing::new(secret.into()))
    }

    /// Wrap Ed25519 public key bytes.
    pub fn ed25519(public: impl Into<Vec<u8>>) -> Self {
        PublicKey::Ed25519(public.into())
    }

    /// Load an RSA public key from SPKI or PKCS#1 PEM.
    pub fn rsa_from_pem(pem: &str) -> JwtResult<Self> {
        if pem.trim().is_empty() {
            return Err(JwtError::NilKey);
        }
        RsaPublicKey::from_public_key_pem(pem)
            .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
            .map(PublicKey::Rsa)
            .map_err(|e| JwtError::InvalidKey(format!("Invalid RSA public key: {e}")))
    }

    /// Load an RSA public key from SPKI DER.
    pub fn rsa_from_der(der: &[u8]) -> JwtResult<Self> {
        if der.is_empty() {
            return Err(JwtError::NilKey);
        }
        RsaPublicKey::from_public_key_der(der)
            .map(PublicKey::Rsa)
            .map_err(|e| JwtError::InvalidKey(format!("Invalid RSA public key: {e}")))
    }

    /// Load an ECDSA public key from SPKI PEM.
    pub fn ec_from_pem(pem: &str) -> JwtResult<Self> {
        EcVerifyingKey::from_public_key_pem(pem).map(PublicKey::Ec)
    }

    /// Load an ECDSA public key from SPKI DER.
    pub fn ec_from_der(der: &[u8]) -> JwtResult<Self> {
        EcVerifyingKey::from_public_key_der(der).map(PublicKey::Ec)
    }

    /// Short family name, used in error messages.
    #[must_use]
    pub fn family(&self) -> &'static str {
        match self {
            PublicKey::Hmac(_) => "HMAC",
            PublicKey::Rsa(_) => "RSA",
            PublicKey::Ec(_) => "ECDSA",
            PublicKey::Ed25519(_) => "Ed25519",
        }
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.family())
    }
}

pub(crate) fn ed25519_signing_key(keypair: &[u8]) -> JwtResult<ed25519_dalek::SigningKey> {
    if keypair.is_empty() {
        return Err(JwtError::NilKey);
    }
    let bytes: &[u8; ED25519_PRIVATE_KEY_SIZE] = keypair.try_into().map_err(|_| {
        JwtError::InvalidKey(format!(
            "Ed25519 private key must be {ED25519_PRIVATE_KEY_SIZE} bytes, got {}",
            keypair.len()
        ))
    })?;
    ed25519_dalek::SigningKey::from_keypair_bytes(bytes)
        .map_err(|_| JwtError::invalid_key("Ed25519 keypair halves do not match"))
}

pub(crate) fn ed25519_verifying_key(public: &[u8]) -> JwtResult<ed25519_dalek::VerifyingKey> {
    if public.is_empty() {
        return Err(JwtError::NilKey);
    }
    let bytes: &[u8; ED25519_PUBLIC_KEY_SIZE] = public.try_into().map_err(|_| {
        JwtError::InvalidKey(format!(
            "Ed25519 public key must be {ED25519_PUBLIC_KEY_SIZE} bytes, got {}",
            public.len()
        ))
    })?;
    ed25519_dalek::VerifyingKey::from_bytes(bytes)
        .map_err(|_| JwtError::invalid_key("Ed25519 public key is not a curve point"))
}
