//! Token builder
//!
//! A [`Builder`] is a template: signer plus pre-encoded header. Each
//! [`Builder::build`] makes one allocation of exactly the final token size.

use crate::compact::{CompactLayout, DELIMITER};
use crate::error::{JwtError, JwtResult};
use crate::header::Header;
use crate::token::Token;
use crate::traits::Signer;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::Serialize;
use std::borrow::Cow;
use std::sync::Arc;

/// Builds tokens for one signer and one header.
///
/// Reusable across calls and threads; `build` takes `&self`.
pub struct Builder<S: Signer> {
    signer: S,
    header: Arc<Header>,
    encoded_header: Cow<'static, str>,
}

impl<S: Signer> Builder<S> {
    /// Builder with the plain `{"alg":..,"typ":"JWT"}` header.
    pub fn new(signer: S) -> JwtResult<Self> {
        let header = Header::new(signer.algorithm().clone());
        Self::with_header(signer, header)
    }

    /// Builder with a custom header.
    ///
    /// # Errors
    /// [`JwtError::AlgorithmMismatch`] if `header.alg` is not the signer's
    /// algorithm.
    pub fn with_header(signer: S, header: Header) -> JwtResult<Self> {
        if header.alg != *signer.algorithm() {
            return Err(JwtError::AlgorithmMismatch);
        }
        let encoded_header = header.encode()?;
        Ok(Self {
            signer,
            header: Arc::new(header),
            encoded_header,
        })
    }

    /// Header written into every token.
    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Underlying signer.
    #[must_use]
    pub fn signer(&self) -> &S {
        &self.signer
    }

    /// Sign `claims` as-is.
    ///
    /// # Panics
    /// If the signer returns a signature whose length differs from
    /// [`Signer::signature_len`]. That is a broken signer, not bad input.
    pub fn build(&self, claims: &[u8]) -> JwtResult<Token> {
        let header = self.encoded_header.as_bytes();
        let claims_b64 = crate::compact::encoded_len(claims.len())?;
        let payload_len = header.len() + 1 + claims_b64;
        let expected = self.signer.signature_len(payload_len);
        let layout = CompactLayout::new(header.len(), claims.len(), expected)?;

        let mut raw = vec![0u8; layout.total()];
        raw[layout.header()].copy_from_slice(header);
        raw[layout.dot1()] = DELIMITER;
        encode_into(claims, &mut raw[layout.claims()])?;
        raw[layout.dot2()] = DELIMITER;

        let signature = self.signer.sign(&raw[..layout.dot2()])?;
        if signature.len() != expected {
            tracing::error!(
                alg = %self.signer.algorithm(),
                expected,
                actual = signature.len(),
                "signer produced a signature of the wrong length"
            );
            panic!(
                "{} signer returned {} signature bytes, declared {}",
                self.signer.algorithm(),
                signature.len(),
                expected
            );
        }
        encode_into(&signature, &mut raw[layout.signature()])?;

        // Signature first so its buffer is reused as-is.
        let signature_range = 0..signature.len();
        let mut decoded = signature;
        decoded.extend_from_slice(claims);
        let claims_range = signature_range.end..decoded.len();

        Ok(Token::from_parts(
            raw,
            (layout.dot1(), layout.dot2()),
            Arc::clone(&self.header),
            decoded,
            claims_range,
            signature_range,
        ))
    }

    /// Serialize `claims` to JSON and sign it.
    ///
    /// # Errors
    /// [`JwtError::Serialization`] if serde_json rejects the value.
    pub fn build_claims<T: Serialize + ?Sized>(&self, claims: &T) -> JwtResult<Token> {
        let json =
            serde_json::to_vec(claims).map_err(|e| JwtError::Serialization(e.to_string()))?;
        self.build(&json)
    }
}

impl<S: Signer> std::fmt::Debug for Builder<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builder")
            .field("header", &*self.header)
            .finish_non_exhaustive()
    }
}

/// One-off build with the plain header.
pub fn build<S: Signer>(signer: S, claims: &[u8]) -> JwtResult<Token> {
    Builder::new(signer)?.build(claims)
}

fn encode_into(input: &[u8], out: &mut [u8]) -> JwtResult<()> {
    let written = URL_SAFE_NO_PAD
        .encode_slice(input, out)
        .map_err(|e| JwtError::Serialization(format!("base64: {e}")))?;
    debug_assert_eq!(written, out.len());
    Ok(())
}
