//! Signer and verifier capabilities.

use crate::algorithm::Algorithm;
use crate::error::JwtResult;
use std::sync::Arc;

/// Signs the payload of a token.
///
/// Implementations must be immutable after construction so one instance can
/// serve any number of concurrent callers.
pub trait Signer: Send + Sync {
    /// Algorithm written into the header.
    fn algorithm(&self) -> &Algorithm;

    /// Exact length of every signature this signer produces.
    fn signature_size(&self) -> usize;

    /// Signature length for a payload of `payload_len` bytes.
    ///
    /// Fixed-size families keep the default. The builder preallocates with
    /// this value and treats any disagreement with [`Signer::sign`] as a
    /// broken implementation.
    fn signature_len(&self, _payload_len: usize) -> usize {
        self.signature_size()
    }

    /// Sign `payload`, which is `header_b64 "." claims_b64`.
    fn sign(&self, payload: &[u8]) -> JwtResult<Vec<u8>>;
}

/// Verifies the signature of a token.
pub trait Verifier: Send + Sync {
    /// Algorithm this verifier accepts.
    fn algorithm(&self) -> &Algorithm;

    /// Exact signature length expected before any cryptographic work.
    fn signature_size(&self) -> usize;

    /// Check `signature` over `payload`.
    ///
    /// Wrong length is `InvalidSignatureFormat`; any cryptographic mismatch
    /// is `InvalidSignature`.
    fn verify(&self, payload: &[u8], signature: &[u8]) -> JwtResult<()>;
}

impl<T: Signer + ?Sized> Signer for &T {
    fn algorithm(&self) -> &Algorithm {
        (**self).algorithm()
    }

    fn signature_size(&self) -> usize {
        (**self).signature_size()
    }

    fn signature_len(&self, payload_len: usize) -> usize {
        (**self).signature_len(payload_len)
    }

    fn sign(&self, payload: &[u8]) -> JwtResult<Vec<u8>> {
        (**self).sign(payload)
    }
}

impl<T: Signer + ?Sized> Signer for Box<T> {
    fn algorithm(&self) -> &Algorithm {
        (**self).algorithm()
    }

    fn signature_size(&self) -> usize {
        (**self).signature_size()
    }

    fn signature_len(&self, payload_len: usize) -> usize {
        (**self).signature_len(payload_len)
    }

    fn sign(&self, payload: &[u8]) -> JwtResult<Vec<u8>> {
        (**self).sign(payload)
    }
}

/// Implementation of Signer for `Arc<T>` to allow shared ownership.
impl<T: Signer + ?Sized> Signer for Arc<T> {
    fn algorithm(&self) -> &Algorithm {
        (**self).algorithm()
    }

    fn signature_size(&self) -> usize {
        (**self).signature_size()
    }

    fn signature_len(&self, payload_len: usize) -> usize {
        (**self).signature_len(payload_len)
    }

    fn sign(&self, payload: &[u8]) -> JwtResult<Vec<u8>> {
        (**self).sign(payload)
    }
}

impl<T: Verifier + ?Sized> Verifier for &T {
    fn algorithm(&self) -> &Algorithm {
        (**self).algorithm()
    }

    fn signature_size(&self) -> usize {
        (**self).signature_size()
    }

    fn verify(&self, payload: &[u8], signature: &[u8]) -> JwtResult<()> {
        (**self).verify(payload, signature)
    }
}

impl<T: Verifier + ?Sized> Verifier for Box<T> {
    fn algorithm(&self) -> &Algorithm {
        (**self).algorithm()
    }

    fn signature_size(&self) -> usize {
        (**self).signature_size()
    }

    fn verify(&self, payload: &[u8], signature: &[u8]) -> JwtResult<()> {
        (**self).verify(payload, signature)
    }
}

/// Implementation of Verifier for `Arc<T>` to allow shared ownership.
impl<T: Verifier + ?Sized> Verifier for Arc<T> {
    fn algorithm(&self) -> &Algorithm {
        (**self).algorithm()
    }

    fn signature_size(&self) -> usize {
        (**self).signature_size()
    }

    fn verify(&self, payload: &[u8], signature: &[u8]) -> JwtResult<()> {
        (**self).verify(payload, signature)
    }
}
