//! Ed25519 (EdDSA)

use crate::algorithm::Algorithm;
use crate::error::{JwtError, JwtResult};
use crate::keys::{ed25519_signing_key, ed25519_verifying_key};
use crate::traits::{Signer, Verifier};
use ed25519_dalek::{Signature, SIGNATURE_LENGTH};

/// Ed25519 signer over a 64-byte keypair.
pub struct EdSigner {
    alg: Algorithm,
    key: ed25519_dalek::SigningKey,
}

impl EdSigner {
    /// Build a signer from seed-then-public keypair bytes.
    pub fn new(keypair: &[u8]) -> JwtResult<Self> {
        let key = ed25519_signing_key(keypair)?;
        tracing::debug!(alg = "EdDSA", signature_size = SIGNATURE_LENGTH, "Ed25519 signer ready");
        Ok(Self {
            alg: Algorithm::EdDSA,
            key,
        })
    }
}

impl Signer for EdSigner {
    fn algorithm(&self) -> &Algorithm {
        &self.alg
    }

    fn signature_size(&self) -> usize {
        SIGNATURE_LENGTH
    }

    fn sign(&self, payload: &[u8]) -> JwtResult<Vec<u8>> {
        Ok(ed25519_dalek::Signer::sign(&self.key, payload).to_bytes().to_vec())
    }
}

impl std::fmt::Debug for EdSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EdSigner").finish_non_exhaustive()
    }
}

/// Ed25519 verifier over a 32-byte public key.
#[derive(Debug)]
pub struct EdVerifier {
    alg: Algorithm,
    key: ed25519_dalek::VerifyingKey,
}

impl EdVerifier {
    /// Build a verifier from public key bytes.
    pub fn new(public: &[u8]) -> JwtResult<Self> {
        let key = ed25519_verifying_key(public)?;
        tracing::debug!(alg = "EdDSA", signature_size = SIGNATURE_LENGTH, "Ed25519 verifier ready");
        Ok(Self {
            alg: Algorithm::EdDSA,
            key,
        })
    }
}

impl Verifier for EdVerifier {
    fn algorithm(&self) -> &Algorithm {
        &self.alg
    }

    fn signature_size(&self) -> usize {
        SIGNATURE_LENGTH
    }

    fn verify(&self, payload: &[u8], signature: &[u8]) -> JwtResult<()> {
        let bytes: &[u8; SIGNATURE_LENGTH] = signature
            .try_into()
            .map_err(|_| JwtError::InvalidSignatureFormat)?;
        let sig = Signature::from_bytes(bytes);
        self.key
            .verify_strict(payload, &sig)
            .map_err(|_| JwtError::InvalidSignature)
    }
}
