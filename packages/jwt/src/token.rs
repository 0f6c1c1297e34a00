//! Immutable view over a compact token
//!
//! A [`Token`] owns the raw wire bytes and the decoded claims and signature.
//! Every accessor is a sub-slice; nothing is copied after construction.

use crate::error::{JwtError, JwtResult};
use crate::header::Header;
use serde::de::DeserializeOwned;
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

/// A built or parsed token.
///
/// `payload_bytes()` is always `raw[..dot2]`, the exact bytes that were
/// signed or have to be verified. Two tokens are equal when their wire bytes
/// are. Tokens from the same [`Builder`](crate::Builder) share one header.
#[derive(Clone)]
pub struct Token {
    raw: Vec<u8>,
    dot1: usize,
    dot2: usize,
    header: Arc<Header>,
    decoded: Vec<u8>,
    claims: Range<usize>,
    signature: Range<usize>,
}

impl Token {
    pub(crate) fn from_parts(
        raw: Vec<u8>,
        (dot1, dot2): (usize, usize),
        header: Arc<Header>,
        decoded: Vec<u8>,
        claims: Range<usize>,
        signature: Range<usize>,
    ) -> Self {
        debug_assert!(dot1 < dot2 && dot2 < raw.len());
        debug_assert!(claims.end <= decoded.len() && signature.end <= decoded.len());
        Self {
            raw,
            dot1,
            dot2,
            header,
            decoded,
            claims,
            signature,
        }
    }

    /// Decoded header.
    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Complete wire form.
    #[must_use]
    pub fn raw_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// `header_b64 "." claims_b64`, the signed bytes.
    #[must_use]
    pub fn payload_bytes(&self) -> &[u8] {
        &self.raw[..self.dot2]
    }

    /// Decoded claims.
    #[must_use]
    pub fn claims_bytes(&self) -> &[u8] {
        &self.decoded[self.claims.clone()]
    }

    /// Decoded signature.
    #[must_use]
    pub fn signature_bytes(&self) -> &[u8] {
        &self.decoded[self.signature.clone()]
    }

    /// Encoded header segment.
    #[must_use]
    pub fn header_part(&self) -> &[u8] {
        &self.raw[..self.dot1]
    }

    /// Encoded claims segment.
    #[must_use]
    pub fn claims_part(&self) -> &[u8] {
        &self.raw[self.dot1 + 1..self.dot2]
    }

    /// Encoded signature segment.
    #[must_use]
    pub fn signature_part(&self) -> &[u8] {
        &self.raw[self.dot2 + 1..]
    }

    /// Deserialize the claims JSON.
    ///
    /// # Errors
    /// [`JwtError::InvalidClaimsFormat`] if the claims are not valid JSON for `T`.
    pub fn decode_claims<T: DeserializeOwned>(&self) -> JwtResult<T> {
        serde_json::from_slice(self.claims_bytes()).map_err(|_| JwtError::InvalidClaimsFormat)
    }

    /// Give up the view and keep the wire bytes.
    #[must_use]
    pub fn into_raw(self) -> Vec<u8> {
        self.raw
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Token {}

impl AsRef<[u8]> for Token {
    fn as_ref(&self) -> &[u8] {
        &self.raw
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.raw))
    }
}

// Only the header and sizes, never claims or signature bytes.
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("header", &self.header)
            .field("len", &self.raw.len())
            .field("claims_len", &self.claims.len())
            .field("signature_len", &self.signature.len())
            .finish()
    }
}
