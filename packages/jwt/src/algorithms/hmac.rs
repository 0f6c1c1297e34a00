//! HMAC-SHA algorithms (HS256, HS384, HS512)
//!
//! Keyed MAC state is built once at construction and handed out from a pool,
//! so signing never re-derives the inner and outer pads.

use crate::algorithm::Algorithm;
use crate::error::{JwtError, JwtResult};
use crate::hash::{constant_time_eq, HashAlg};
use crate::pool::Pool;
use crate::traits::{Signer, Verifier};
use digest::{FixedOutputReset, Reset};
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

enum MacPool {
    Sha256(Pool<HmacSha256>),
    Sha384(Pool<HmacSha384>),
    Sha512(Pool<HmacSha512>),
}

impl MacPool {
    fn new(hash: HashAlg, key: &[u8]) -> JwtResult<Self> {
        let invalid = |_| JwtError::invalid_key("Invalid HMAC key");
        let pool = match hash {
            HashAlg::Sha256 => MacPool::Sha256(Pool::new(
                HmacSha256::new_from_slice(key).map_err(invalid)?,
            )),
            HashAlg::Sha384 => MacPool::Sha384(Pool::new(
                HmacSha384::new_from_slice(key).map_err(invalid)?,
            )),
            HashAlg::Sha512 => MacPool::Sha512(Pool::new(
                HmacSha512::new_from_slice(key).map_err(invalid)?,
            )),
        };
        Ok(pool)
    }

    fn tag(&self, payload: &[u8]) -> Vec<u8> {
        match self {
            MacPool::Sha256(pool) => keyed_tag(pool, payload),
            MacPool::Sha384(pool) => keyed_tag(pool, payload),
            MacPool::Sha512(pool) => keyed_tag(pool, payload),
        }
    }
}

#[inline]
fn keyed_tag<M>(pool: &Pool<M>, payload: &[u8]) -> Vec<u8>
where
    M: Mac + Clone + Reset + FixedOutputReset,
{
    let mut mac = pool.checkout();
    Mac::update(&mut *mac, payload);
    mac.finalize_reset().into_bytes().to_vec()
}

/// HMAC signer and verifier.
///
/// The same value both signs and verifies since the key is shared. When both
/// [`Signer`] and [`Verifier`] are in scope, call `algorithm` through the
/// trait, e.g. `Signer::algorithm(&hs)`.
pub struct HsAlg {
    alg: Algorithm,
    hash: HashAlg,
    macs: MacPool,
}

impl HsAlg {
    /// Build an HMAC algorithm for `alg` (HS256, HS384 or HS512).
    ///
    /// An empty key is [`JwtError::NilKey`].
    pub fn new(alg: Algorithm, key: &[u8]) -> JwtResult<Self> {
        let hash = match alg {
            Algorithm::HS256 => HashAlg::Sha256,
            Algorithm::HS384 => HashAlg::Sha384,
            Algorithm::HS512 => HashAlg::Sha512,
            other => return Err(JwtError::unsupported_algorithm(other.as_str())),
        };
        if key.is_empty() {
            return Err(JwtError::NilKey);
        }
        let macs = MacPool::new(hash, key)?;
        tracing::debug!(alg = %alg, signature_size = hash.size(), "HMAC algorithm ready");
        Ok(Self { alg, hash, macs })
    }
}

impl Signer for HsAlg {
    fn algorithm(&self) -> &Algorithm {
        &self.alg
    }

    fn signature_size(&self) -> usize {
        self.hash.size()
    }

    fn sign(&self, payload: &[u8]) -> JwtResult<Vec<u8>> {
        Ok(self.macs.tag(payload))
    }
}

impl Verifier for HsAlg {
    fn algorithm(&self) -> &Algorithm {
        &self.alg
    }

    fn signature_size(&self) -> usize {
        self.hash.size()
    }

    fn verify(&self, payload: &[u8], signature: &[u8]) -> JwtResult<()> {
        if signature.len() != self.hash.size() {
            return Err(JwtError::InvalidSignatureFormat);
        }
        let expected = self.macs.tag(payload);
        if constant_time_eq(&expected, signature) {
            Ok(())
        } else {
            Err(JwtError::InvalidSignature)
        }
    }
}

impl std::fmt::Debug for HsAlg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HsAlg").field("alg", &self.alg).finish_non_exhaustive()
    }
}
