//! Compact signed tokens (JWS compact serialization)
//!
//! This crate provides:
//! - HMAC, RSA PKCS#1 v1.5, RSA-PSS, ECDSA and Ed25519 signers and verifiers
//! - A builder that signs caller-supplied claims bytes into a token
//! - A parser that checks the wire format, the header algorithm and the
//!   signature, in that order
//!
//! Claims are opaque bytes here. Expiry, audience and similar checks belong
//! to the caller.
//!
//! ```no_run
//! use compact_jwt::{parse, Algorithm, Builder, HsAlg};
//!
//! # fn main() -> compact_jwt::JwtResult<()> {
//! let hs = HsAlg::new(Algorithm::HS256, b"secret")?;
//! let token = Builder::new(&hs)?.build(br#"{"sub":"42"}"#)?;
//! let parsed = parse(token.raw_bytes(), &hs)?;
//! assert_eq!(parsed.claims_bytes(), br#"{"sub":"42"}"#);
//! # Ok(())
//! # }
//! ```

mod algorithm;
pub mod algorithms;
mod builder;
mod compact;
mod error;
mod hash;
mod header;
pub mod keys;
mod parser;
mod pool;
mod token;
mod traits;

pub use algorithm::Algorithm;
pub use algorithms::{
    insecure, new_signer, new_verifier, EdSigner, EdVerifier, EsSigner, EsVerifier, HsAlg,
    RsaSigner, RsaVerifier,
};
pub use builder::{build, Builder};
pub use error::{JwtError, JwtResult};
pub use hash::HashAlg;
pub use header::{Header, JWT_TYPE};
pub use keys::{Curve, EcSigningKey, EcVerifyingKey, PrivateKey, PublicKey};
pub use parser::{
    parse, parse_claims, parse_no_verify, parse_no_verify_with, Parser, ParserOptions,
    DEFAULT_MAX_TOKEN_LEN,
};
pub use token::Token;
pub use traits::{Signer, Verifier};
