//! Key fixtures shared by the integration tests
#![allow(dead_code)]

use compact_jwt::{
    new_signer, new_verifier, Algorithm, PrivateKey, PublicKey, Signer, Verifier,
};
use hex_literal::hex;

pub const HMAC_KEY_A: &[u8] = b"hmac-secret-key";
pub const HMAC_KEY_B: &[u8] = b"another-hmac-secret";

pub const RSA_A: &str = include_str!("../fixtures/rsa1.pem");
pub const RSA_A_PUB: &str = include_str!("../fixtures/rsa1.pub.pem");
pub const RSA_A_PKCS1: &str = include_str!("../fixtures/rsa1_pkcs1.pem");
pub const RSA_A_PUB_DER: &[u8] = include_bytes!("../fixtures/rsa1.pub.der");
pub const RSA_B: &str = include_str!("../fixtures/rsa2.pem");
pub const RSA_B_PUB: &str = include_str!("../fixtures/rsa2.pub.pem");
pub const RSA_SMALL: &str = include_str!("../fixtures/rsa_small.pem");
pub const RSA_SMALL_PUB: &str = include_str!("../fixtures/rsa_small.pub.pem");

pub const P256_A: &str = include_str!("../fixtures/ec_p256.pem");
pub const P256_A_PUB: &str = include_str!("../fixtures/ec_p256.pub.pem");
pub const P256_A_DER: &[u8] = include_bytes!("../fixtures/ec_p256.der");
pub const P256_B: &str = include_str!("../fixtures/ec_p256_b.pem");
pub const P256_B_PUB: &str = include_str!("../fixtures/ec_p256_b.pub.pem");
pub const P384_A: &str = include_str!("../fixtures/ec_p384.pem");
pub const P384_A_PUB: &str = include_str!("../fixtures/ec_p384.pub.pem");
pub const P384_B: &str = include_str!("../fixtures/ec_p384_b.pem");
pub const P384_B_PUB: &str = include_str!("../fixtures/ec_p384_b.pub.pem");
pub const P521_A: &str = include_str!("../fixtures/ec_p521.pem");
pub const P521_A_PUB: &str = include_str!("../fixtures/ec_p521.pub.pem");
pub const P521_B: &str = include_str!("../fixtures/ec_p521_b.pem");
pub const P521_B_PUB: &str = include_str!("../fixtures/ec_p521_b.pub.pem");

/// RFC 8032 section 7.1, test 1.
pub const ED25519_SECRET: [u8; 32] =
    hex!("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60");
pub const ED25519_PUBLIC: [u8; 32] =
    hex!("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a");

pub fn ed25519_keypair_a() -> Vec<u8> {
    [ED25519_SECRET.as_slice(), ED25519_PUBLIC.as_slice()].concat()
}

pub fn ed25519_keypair_b() -> Vec<u8> {
    ed25519_dalek::SigningKey::from_bytes(&[7u8; 32])
        .to_keypair_bytes()
        .to_vec()
}

/// Which fixture key of a family to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Which {
    A,
    B,
}

fn pick<T>(which: Which, a: T, b: T) -> T {
    match which {
        Which::A => a,
        Which::B => b,
    }
}

pub fn private_key(alg: &Algorithm, which: Which) -> PrivateKey {
    match alg {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {
            PrivateKey::hmac(pick(which, HMAC_KEY_A, HMAC_KEY_B))
        }
        Algorithm::RS256
        | Algorithm::RS384
        | Algorithm::RS512
        | Algorithm::PS256
        | Algorithm::PS384
        | Algorithm::PS512 => {
            PrivateKey::rsa_from_pem(pick(which, RSA_A, RSA_B)).expect("RSA fixture should load")
        }
        Algorithm::ES256 => {
            PrivateKey::ec_from_pem(pick(which, P256_A, P256_B)).expect("P-256 fixture should load")
        }
        Algorithm::ES384 => {
            PrivateKey::ec_from_pem(pick(which, P384_A, P384_B)).expect("P-384 fixture should load")
        }
        Algorithm::ES512 => {
            PrivateKey::ec_from_pem(pick(which, P521_A, P521_B)).expect("P-521 fixture should load")
        }
        Algorithm::EdDSA => PrivateKey::ed25519(pick(which, ed25519_keypair_a(), ed25519_keypair_b())),
        other => panic!("no fixture for {other}"),
    }
}

pub fn public_key(alg: &Algorithm, which: Which) -> PublicKey {
    match alg {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {
            PublicKey::hmac(pick(which, HMAC_KEY_A, HMAC_KEY_B))
        }
        Algorithm::RS256
        | Algorithm::RS384
        | Algorithm::RS512
        | Algorithm::PS256
        | Algorithm::PS384
        | Algorithm::PS512 => {
            PublicKey::rsa_from_pem(pick(which, RSA_A_PUB, RSA_B_PUB)).expect("RSA fixture should load")
        }
        Algorithm::ES256 => PublicKey::ec_from_pem(pick(which, P256_A_PUB, P256_B_PUB))
            .expect("P-256 fixture should load"),
        Algorithm::ES384 => PublicKey::ec_from_pem(pick(which, P384_A_PUB, P384_B_PUB))
            .expect("P-384 fixture should load"),
        Algorithm::ES512 => PublicKey::ec_from_pem(pick(which, P521_A_PUB, P521_B_PUB))
            .expect("P-521 fixture should load"),
        Algorithm::EdDSA => private_key(alg, which)
            .public_key()
            .expect("Ed25519 public key derivation should succeed"),
        other => panic!("no fixture for {other}"),
    }
}

pub fn signer(alg: &Algorithm, which: Which) -> Box<dyn Signer> {
    new_signer(alg.clone(), private_key(alg, which)).expect("signer construction should succeed")
}

pub fn verifier(alg: &Algorithm, which: Which) -> Box<dyn Verifier> {
    new_verifier(alg.clone(), public_key(alg, which))
        .expect("verifier construction should succeed")
}

/// Reassemble a token from its payload and a raw `signature`.
pub fn with_signature(payload: &[u8], signature: &[u8]) -> Vec<u8> {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
    let mut raw = payload.to_vec();
    raw.push(b'.');
    raw.extend_from_slice(URL_SAFE_NO_PAD.encode(signature).as_bytes());
    raw
}
