//! RSA algorithms: PKCS#1 v1.5 (RS256, RS384, RS512) and PSS (PS256, PS384, PS512)
//!
//! The payload is hashed first and the digest handed to the padding scheme.
//! PSS signs with a salt as long as the digest. Verification also accepts the
//! maximum salt the modulus allows, which other signers emit by default.

use crate::algorithm::Algorithm;
use crate::error::{JwtError, JwtResult};
use crate::hash::HashAlg;
use crate::traits::{Signer, Verifier};
use rand::rngs::OsRng;
use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Sign, Pss, RsaPrivateKey, RsaPublicKey};
use sha2::{Sha256, Sha384, Sha512};

/// Smallest accepted modulus, in bits.
pub const MIN_RSA_BITS: usize = 2048;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Padding {
    Pkcs1v15,
    Pss,
}

fn params(alg: &Algorithm) -> JwtResult<(Padding, HashAlg)> {
    match alg {
        Algorithm::RS256 => Ok((Padding::Pkcs1v15, HashAlg::Sha256)),
        Algorithm::RS384 => Ok((Padding::Pkcs1v15, HashAlg::Sha384)),
        Algorithm::RS512 => Ok((Padding::Pkcs1v15, HashAlg::Sha512)),
        Algorithm::PS256 => Ok((Padding::Pss, HashAlg::Sha256)),
        Algorithm::PS384 => Ok((Padding::Pss, HashAlg::Sha384)),
        Algorithm::PS512 => Ok((Padding::Pss, HashAlg::Sha512)),
        other => Err(JwtError::unsupported_algorithm(other.as_str())),
    }
}

fn pkcs1v15(hash: HashAlg) -> Pkcs1v15Sign {
    match hash {
        HashAlg::Sha256 => Pkcs1v15Sign::new::<Sha256>(),
        HashAlg::Sha384 => Pkcs1v15Sign::new::<Sha384>(),
        HashAlg::Sha512 => Pkcs1v15Sign::new::<Sha512>(),
    }
}

fn pss(hash: HashAlg) -> Pss {
    match hash {
        HashAlg::Sha256 => Pss::new::<Sha256>(),
        HashAlg::Sha384 => Pss::new::<Sha384>(),
        HashAlg::Sha512 => Pss::new::<Sha512>(),
    }
}

fn pss_with_salt(hash: HashAlg, salt_len: usize) -> Pss {
    match hash {
        HashAlg::Sha256 => Pss::new_with_salt::<Sha256>(salt_len),
        HashAlg::Sha384 => Pss::new_with_salt::<Sha384>(salt_len),
        HashAlg::Sha512 => Pss::new_with_salt::<Sha512>(salt_len),
    }
}

/// Largest PSS salt for this key: `emLen - hLen - 2`.
fn max_pss_salt(key: &RsaPublicKey, hash: HashAlg) -> Option<usize> {
    let em_len = key.n().bits().checked_sub(1)?.div_ceil(8);
    em_len.checked_sub(hash.size())?.checked_sub(2)
}

fn check_modulus(size_bytes: usize) -> JwtResult<()> {
    if size_bytes * 8 < MIN_RSA_BITS {
        return Err(JwtError::InvalidKey(format!(
            "RSA key must be at least {MIN_RSA_BITS} bits, got {}",
            size_bytes * 8
        )));
    }
    Ok(())
}

/// RSA signer for the RS* and PS* algorithms.
pub struct RsaSigner {
    alg: Algorithm,
    padding: Padding,
    hash: HashAlg,
    key: RsaPrivateKey,
}

impl RsaSigner {
    /// Build a signer for `alg`; the key must be at least 2048 bits.
    pub fn new(alg: Algorithm, key: RsaPrivateKey) -> JwtResult<Self> {
        let (padding, hash) = params(&alg)?;
        check_modulus(key.size())?;
        tracing::debug!(alg = %alg, signature_size = key.size(), "RSA signer ready");
        Ok(Self {
            alg,
            padding,
            hash,
            key,
        })
    }
}

impl Signer for RsaSigner {
    fn algorithm(&self) -> &Algorithm {
        &self.alg
    }

    fn signature_size(&self) -> usize {
        self.key.size()
    }

    fn sign(&self, payload: &[u8]) -> JwtResult<Vec<u8>> {
        let digest = self.hash.digest(payload);
        let signed = match self.padding {
            Padding::Pkcs1v15 => self
                .key
                .sign_with_rng(&mut OsRng, pkcs1v15(self.hash), &digest),
            Padding::Pss => self.key.sign_with_rng(&mut OsRng, pss(self.hash), &digest),
        };
        signed.map_err(|e| JwtError::Signing(format!("RSA signing failed: {e}")))
    }
}

impl std::fmt::Debug for RsaSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsaSigner")
            .field("alg", &self.alg)
            .field("bits", &(self.key.size() * 8))
            .finish_non_exhaustive()
    }
}

/// RSA verifier for the RS* and PS* algorithms.
#[derive(Debug)]
pub struct RsaVerifier {
    alg: Algorithm,
    padding: Padding,
    hash: HashAlg,
    key: RsaPublicKey,
}

impl RsaVerifier {
    /// Build a verifier for `alg`; the key must be at least 2048 bits.
    pub fn new(alg: Algorithm, key: RsaPublicKey) -> JwtResult<Self> {
        let (padding, hash) = params(&alg)?;
        check_modulus(key.size())?;
        tracing::debug!(alg = %alg, signature_size = key.size(), "RSA verifier ready");
        Ok(Self {
            alg,
            padding,
            hash,
            key,
        })
    }
}

impl Verifier for RsaVerifier {
    fn algorithm(&self) -> &Algorithm {
        &self.alg
    }

    fn signature_size(&self) -> usize {
        self.key.size()
    }

    fn verify(&self, payload: &[u8], signature: &[u8]) -> JwtResult<()> {
        if signature.len() != self.key.size() {
            return Err(JwtError::InvalidSignatureFormat);
        }
        let digest = self.hash.digest(payload);
        let checked = match self.padding {
            Padding::Pkcs1v15 => self.key.verify(pkcs1v15(self.hash), &digest, signature),
            Padding::Pss => self
                .key
                .verify(pss(self.hash), &digest, signature)
                .or_else(|e| match max_pss_salt(&self.key, self.hash) {
                    Some(salt) if salt != self.hash.size() => {
                        self.key
                            .verify(pss_with_salt(self.hash, salt), &digest, signature)
                    }
                    _ => Err(e),
                }),
        };
        checked.map_err(|_| JwtError::InvalidSignature)
    }
}
