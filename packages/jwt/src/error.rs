//! Error types for building, parsing and verifying tokens

use thiserror::Error;

/// Result alias used across the crate
pub type JwtResult<T> = Result<T, JwtError>;

/// Every failure the crate can report.
///
/// Callers can branch on "no key" versus "wrong key", and on "signed by
/// another algorithm" versus "bad signature".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    /// No key material was supplied
    #[error("Missing key")]
    NilKey,

    /// Key material does not fit the requested algorithm
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Algorithm is not implemented by the requested family
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Wrong number or order of segments
    #[error("Invalid token format")]
    InvalidFormat,

    /// Header segment is not base64url JSON
    #[error("Invalid header format")]
    InvalidHeaderFormat,

    /// Claims segment is not valid base64url, or not the expected JSON
    #[error("Invalid claims format")]
    InvalidClaimsFormat,

    /// Signature segment is not base64url, or has the wrong length
    #[error("Invalid signature format")]
    InvalidSignatureFormat,

    /// Header `alg` differs from the verifier's algorithm
    #[error("Token is signed by another algorithm")]
    AlgorithmMismatch,

    /// Cryptographic check failed
    #[error("Invalid signature")]
    InvalidSignature,

    /// Claims value could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The primitive refused to produce a signature
    #[error("Signing error: {0}")]
    Signing(String),
}

impl JwtError {
    /// Create an invalid key error
    #[inline]
    #[must_use]
    pub fn invalid_key(msg: &str) -> Self {
        JwtError::InvalidKey(msg.to_string())
    }

    /// Create an unsupported algorithm error
    #[inline]
    #[must_use]
    pub fn unsupported_algorithm(alg: &str) -> Self {
        JwtError::UnsupportedAlgorithm(alg.to_string())
    }

    /// Create a signing error
    #[inline]
    #[must_use]
    pub fn signing(msg: &str) -> Self {
        JwtError::Signing(msg.to_string())
    }

    /// True for the four wire-format kinds.
    #[must_use]
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            JwtError::InvalidFormat
                | JwtError::InvalidHeaderFormat
                | JwtError::InvalidClaimsFormat
                | JwtError::InvalidSignatureFormat
        )
    }

    /// True when the key was missing or unusable.
    #[must_use]
    pub fn is_key_error(&self) -> bool {
        matches!(self, JwtError::NilKey | JwtError::InvalidKey(_))
    }
}
