//! Hash selection and constant-time helpers shared by the algorithm families

use sha2::{Digest, Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;

/// SHA-2 variant selected by an algorithm's numeric suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlg {
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

impl HashAlg {
    /// Digest length in bytes.
    #[inline]
    #[must_use]
    pub const fn size(self) -> usize {
        match self {
            HashAlg::Sha256 => 32,
            HashAlg::Sha384 => 48,
            HashAlg::Sha512 => 64,
        }
    }

    /// Hash the payload in one shot.
    #[must_use]
    pub fn digest(self, payload: &[u8]) -> Vec<u8> {
        match self {
            HashAlg::Sha256 => Sha256::digest(payload).to_vec(),
            HashAlg::Sha384 => Sha384::digest(payload).to_vec(),
            HashAlg::Sha512 => Sha512::digest(payload).to_vec(),
        }
    }
}

/// Byte comparison whose timing does not depend on the first mismatch.
#[inline]
pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
