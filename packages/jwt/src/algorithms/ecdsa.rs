//! ECDSA algorithms (ES256, ES384, ES512)
//!
//! Each algorithm is pinned to one curve. Signatures are the fixed-width
//! concatenation `r || s`, each scalar left-padded to the curve's field size.

use crate::algorithm::Algorithm;
use crate::error::{JwtError, JwtResult};
use crate::keys::{Curve, EcSigningKey, EcVerifyingKey};
use crate::traits::{Signer, Verifier};
use p256::ecdsa::signature::{Signer as _, Verifier as _};

fn curve_for(alg: &Algorithm) -> JwtResult<Curve> {
    match alg {
        Algorithm::ES256 => Ok(Curve::P256),
        Algorithm::ES384 => Ok(Curve::P384),
        Algorithm::ES512 => Ok(Curve::P521),
        other => Err(JwtError::unsupported_algorithm(other.as_str())),
    }
}

fn check_curve(alg: &Algorithm, expected: Curve, actual: Curve) -> JwtResult<()> {
    if expected != actual {
        return Err(JwtError::InvalidKey(format!(
            "{alg} requires a {expected} key, got {actual}"
        )));
    }
    Ok(())
}

/// ECDSA signer.
#[derive(Debug)]
pub struct EsSigner {
    alg: Algorithm,
    key: EcSigningKey,
}

impl EsSigner {
    /// Build a signer; the key's curve must be the one `alg` names.
    pub fn new(alg: Algorithm, key: EcSigningKey) -> JwtResult<Self> {
        let curve = curve_for(&alg)?;
        check_curve(&alg, curve, key.curve())?;
        tracing::debug!(alg = %alg, signature_size = 2 * curve.field_size(), "ECDSA signer ready");
        Ok(Self { alg, key })
    }
}

impl Signer for EsSigner {
    fn algorithm(&self) -> &Algorithm {
        &self.alg
    }

    fn signature_size(&self) -> usize {
        2 * self.key.curve().field_size()
    }

    fn sign(&self, payload: &[u8]) -> JwtResult<Vec<u8>> {
        let failed = |e| JwtError::Signing(format!("ECDSA signing failed: {e}"));
        let bytes = match &self.key {
            EcSigningKey::P256(key) => {
                let sig: p256::ecdsa::Signature = key.try_sign(payload).map_err(failed)?;
                sig.to_bytes().to_vec()
            }
            EcSigningKey::P384(key) => {
                let sig: p384::ecdsa::Signature = key.try_sign(payload).map_err(failed)?;
                sig.to_bytes().to_vec()
            }
            EcSigningKey::P521(key, _) => {
                let sig: p521::ecdsa::Signature = key.try_sign(payload).map_err(failed)?;
                sig.to_bytes().to_vec()
            }
        };
        Ok(bytes)
    }
}

/// ECDSA verifier.
#[derive(Debug)]
pub struct EsVerifier {
    alg: Algorithm,
    key: EcVerifyingKey,
}

impl EsVerifier {
    /// Build a verifier; the key's curve must be the one `alg` names.
    pub fn new(alg: Algorithm, key: EcVerifyingKey) -> JwtResult<Self> {
        let curve = curve_for(&alg)?;
        check_curve(&alg, curve, key.curve())?;
        tracing::debug!(alg = %alg, signature_size = 2 * curve.field_size(), "ECDSA verifier ready");
        Ok(Self { alg, key })
    }
}

impl Verifier for EsVerifier {
    fn algorithm(&self) -> &Algorithm {
        &self.alg
    }

    fn signature_size(&self) -> usize {
        2 * self.key.curve().field_size()
    }

    fn verify(&self, payload: &[u8], signature: &[u8]) -> JwtResult<()> {
        if signature.len() != self.signature_size() {
            return Err(JwtError::InvalidSignatureFormat);
        }
        let checked = match &self.key {
            EcVerifyingKey::P256(key) => p256::ecdsa::Signature::from_slice(signature)
                .and_then(|sig| key.verify(payload, &sig)),
            EcVerifyingKey::P384(key) => p384::ecdsa::Signature::from_slice(signature)
                .and_then(|sig| key.verify(payload, &sig)),
            EcVerifyingKey::P521(key) => p521::ecdsa::Signature::from_slice(signature)
                .and_then(|sig| key.verify(payload, &sig)),
        };
        checked.map_err(|_| JwtError::InvalidSignature)
    }
}
