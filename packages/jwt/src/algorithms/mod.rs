//! Signing algorithm families and the constructors that dispatch to them

pub mod ecdsa;
pub mod eddsa;
pub mod hmac;
pub mod insecure;
pub mod rsa;

pub use ecdsa::{EsSigner, EsVerifier};
pub use eddsa::{EdSigner, EdVerifier};
pub use hmac::HsAlg;
pub use rsa::{RsaSigner, RsaVerifier};

use crate::algorithm::Algorithm;
use crate::error::{JwtError, JwtResult};
use crate::keys::{PrivateKey, PublicKey};
use crate::traits::{Signer, Verifier};

fn ensure_supported(alg: &Algorithm) -> JwtResult<()> {
    if Algorithm::SUPPORTED.contains(alg) {
        Ok(())
    } else {
        Err(JwtError::unsupported_algorithm(alg.as_str()))
    }
}

fn wrong_family(alg: &Algorithm, family: &str) -> JwtError {
    JwtError::InvalidKey(format!("{alg} cannot use a {family} key"))
}

/// Create a signer for `alg` from any supported key.
///
/// `none` is refused here; use [`insecure::NoneAlg`] directly when an
/// unsigned token is really wanted.
///
/// # Errors
/// - [`JwtError::UnsupportedAlgorithm`] for `none` and unknown names
/// - [`JwtError::InvalidKey`] when the key belongs to another family
/// - whatever the family constructor reports for the key itself
pub fn new_signer(alg: impl Into<Algorithm>, key: PrivateKey) -> JwtResult<Box<dyn Signer>> {
    let alg = alg.into();
    ensure_supported(&alg)?;
    let signer: Box<dyn Signer> = match (alg, key) {
        (alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512), PrivateKey::Hmac(secret)) => {
            Box::new(HsAlg::new(alg, &secret)?)
        }
        (
            alg @ (Algorithm::RS256
            | Algorithm::RS384
            | Algorithm::RS512
            | Algorithm::PS256
            | Algorithm::PS384
            | Algorithm::PS512),
            PrivateKey::Rsa(key),
        ) => Box::new(RsaSigner::new(alg, key)?),
        (alg @ (Algorithm::ES256 | Algorithm::ES384 | Algorithm::ES512), PrivateKey::Ec(key)) => {
            Box::new(EsSigner::new(alg, key)?)
        }
        (Algorithm::EdDSA, PrivateKey::Ed25519(keypair)) => Box::new(EdSigner::new(&keypair)?),
        (alg, key) => return Err(wrong_family(&alg, key.family())),
    };
    Ok(signer)
}

/// Create a verifier for `alg` from any supported key.
///
/// # Errors
/// Same classification as [`new_signer`].
pub fn new_verifier(alg: impl Into<Algorithm>, key: PublicKey) -> JwtResult<Box<dyn Verifier>> {
    let alg = alg.into();
    ensure_supported(&alg)?;
    let verifier: Box<dyn Verifier> = match (alg, key) {
        (alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512), PublicKey::Hmac(secret)) => {
            Box::new(HsAlg::new(alg, &secret)?)
        }
        (
            alg @ (Algorithm::RS256
            | Algorithm::RS384
            | Algorithm::RS512
            | Algorithm::PS256
            | Algorithm::PS384
            | Algorithm::PS512),
            PublicKey::Rsa(key),
        ) => Box::new(RsaVerifier::new(alg, key)?),
        (alg @ (Algorithm::ES256 | Algorithm::ES384 | Algorithm::ES512), PublicKey::Ec(key)) => {
            Box::new(EsVerifier::new(alg, key)?)
        }
        (Algorithm::EdDSA, PublicKey::Ed25519(public)) => Box::new(EdVerifier::new(&public)?),
        (alg, key) => return Err(wrong_family(&alg, key.family())),
    };
    Ok(verifier)
}
