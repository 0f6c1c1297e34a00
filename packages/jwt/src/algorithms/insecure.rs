//! The unsecured `none` algorithm
//!
//! Tokens produced here carry no protection at all. [`NoneAlg`] is never
//! returned by [`new_signer`](super::new_signer) or
//! [`new_verifier`](super::new_verifier); it has to be named explicitly.

use crate::algorithm::Algorithm;
use crate::error::JwtResult;
use crate::traits::{Signer, Verifier};

/// Signs by echoing the payload and accepts every signature.
#[derive(Debug)]
pub struct NoneAlg {
    alg: Algorithm,
}

impl NoneAlg {
    /// Construct the insecure algorithm. Logs a warning every time.
    #[must_use]
    pub fn new() -> Self {
        tracing::warn!("insecure `none` algorithm constructed, tokens will not be signed");
        Self {
            alg: Algorithm::Unsecured,
        }
    }
}

impl Default for NoneAlg {
    fn default() -> Self {
        Self::new()
    }
}

impl Signer for NoneAlg {
    fn algorithm(&self) -> &Algorithm {
        &self.alg
    }

    fn signature_size(&self) -> usize {
        0
    }

    fn signature_len(&self, payload_len: usize) -> usize {
        payload_len
    }

    fn sign(&self, payload: &[u8]) -> JwtResult<Vec<u8>> {
        Ok(payload.to_vec())
    }
}

impl Verifier for NoneAlg {
    fn algorithm(&self) -> &Algorithm {
        &self.alg
    }

    fn signature_size(&self) -> usize {
        0
    }

    fn verify(&self, _payload: &[u8], _signature: &[u8]) -> JwtResult<()> {
        Ok(())
    }
}
