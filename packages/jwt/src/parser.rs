//! Token parser and verifier entry points
//!
//! Parsing moves through fixed stages: size and prefix checks, delimiter
//! location, then header, claims and signature decoding. The first failing
//! stage ends the call. Verification adds a constant-time algorithm check
//! before any cryptography runs.

use crate::compact::locate_delimiters;
use crate::error::{JwtError, JwtResult};
use crate::header::Header;
use crate::token::Token;
use crate::traits::Verifier;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::de::DeserializeOwned;
use std::ops::Range;
use std::sync::Arc;

/// Default upper bound on accepted input, 64 KiB.
pub const DEFAULT_MAX_TOKEN_LEN: usize = 64 * 1024;

/// Base64url form of `{"`, the start of every JSON header.
const HEADER_PREFIX: &[u8] = b"eyJ";

/// Limits applied before any decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Inputs longer than this are rejected as `InvalidFormat`.
    pub max_token_len: usize,
    /// Reject inputs that do not begin with `eyJ`.
    pub require_header_prefix: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_token_len: DEFAULT_MAX_TOKEN_LEN,
            require_header_prefix: true,
        }
    }
}

impl ParserOptions {
    /// Set `max_token_len`.
    #[must_use]
    pub fn with_max_token_len(mut self, max_token_len: usize) -> Self {
        self.max_token_len = max_token_len;
        self
    }

    /// Set `require_header_prefix`.
    #[must_use]
    pub fn with_header_prefix(mut self, require_header_prefix: bool) -> Self {
        self.require_header_prefix = require_header_prefix;
        self
    }
}

fn reject(stage: &'static str, error: JwtError) -> JwtError {
    tracing::debug!(stage, %error, "token rejected");
    error
}

fn decode_segment(
    segment: &[u8],
    scratch: &mut [u8],
    offset: usize,
    error: JwtError,
) -> Result<Range<usize>, JwtError> {
    let written = URL_SAFE_NO_PAD
        .decode_slice(segment, &mut scratch[offset..])
        .map_err(|_| error)?;
    Ok(offset..offset + written)
}

/// Parse with explicit options and no signature check.
pub fn parse_no_verify_with(raw: &[u8], options: &ParserOptions) -> JwtResult<Token> {
    if raw.len() > options.max_token_len {
        return Err(reject("size", JwtError::InvalidFormat));
    }
    if options.require_header_prefix && !raw.starts_with(HEADER_PREFIX) {
        return Err(reject("prefix", JwtError::InvalidFormat));
    }
    let (dot1, dot2) =
        locate_delimiters(raw).ok_or_else(|| reject("segments", JwtError::InvalidFormat))?;

    let header_b64 = &raw[..dot1];
    let claims_b64 = &raw[dot1 + 1..dot2];
    let signature_b64 = &raw[dot2 + 1..];

    // decoding never grows a segment, so the estimates bound the scratch space
    let mut scratch = vec![
        0u8;
        base64::decoded_len_estimate(header_b64.len())
            + base64::decoded_len_estimate(claims_b64.len())
            + base64::decoded_len_estimate(signature_b64.len())
    ];

    let header_range = decode_segment(header_b64, &mut scratch, 0, JwtError::InvalidHeaderFormat)
        .map_err(|e| reject("header", e))?;
    let header =
        Header::from_json(&scratch[header_range.clone()]).map_err(|e| reject("header", e))?;

    let claims = decode_segment(
        claims_b64,
        &mut scratch,
        header_range.end,
        JwtError::InvalidClaimsFormat,
    )
    .map_err(|e| reject("claims", e))?;

    let signature = decode_segment(
        signature_b64,
        &mut scratch,
        claims.end,
        JwtError::InvalidSignatureFormat,
    )
    .map_err(|e| reject("signature", e))?;

    scratch.truncate(signature.end);
    Ok(Token::from_parts(
        raw.to_vec(),
        (dot1, dot2),
        Arc::new(header),
        scratch,
        claims,
        signature,
    ))
}

/// Parse without checking the signature.
///
/// The result is unauthenticated. Only use it to pick a key, e.g. by `kid`.
pub fn parse_no_verify(raw: impl AsRef<[u8]>) -> JwtResult<Token> {
    parse_no_verify_with(raw.as_ref(), &ParserOptions::default())
}

fn verify_token<V: Verifier + ?Sized>(token: Token, verifier: &V) -> JwtResult<Token> {
    if !token.header().alg.ct_eq(verifier.algorithm()) {
        return Err(reject("algorithm", JwtError::AlgorithmMismatch));
    }
    match verifier.verify(token.payload_bytes(), token.signature_bytes()) {
        Ok(()) => Ok(token),
        Err(error) => {
            tracing::debug!(alg = %verifier.algorithm(), %error, "signature verification failed");
            Err(JwtError::InvalidSignature)
        }
    }
}

/// Parse and verify in one step.
///
/// # Errors
/// - format errors from parsing
/// - [`JwtError::AlgorithmMismatch`] if the header names another algorithm
/// - [`JwtError::InvalidSignature`] for any verifier failure
pub fn parse<V: Verifier + ?Sized>(raw: impl AsRef<[u8]>, verifier: &V) -> JwtResult<Token> {
    let token = parse_no_verify(raw)?;
    verify_token(token, verifier)
}

/// Parse, verify and deserialize the claims.
pub fn parse_claims<T, V>(raw: impl AsRef<[u8]>, verifier: &V) -> JwtResult<T>
where
    T: DeserializeOwned,
    V: Verifier + ?Sized,
{
    parse(raw, verifier)?.decode_claims()
}

/// Reusable parser bound to one verifier.
#[derive(Debug)]
pub struct Parser<V: Verifier> {
    verifier: V,
    options: ParserOptions,
}

impl<V: Verifier> Parser<V> {
    /// Parser with default options.
    pub fn new(verifier: V) -> Self {
        Self::with_options(verifier, ParserOptions::default())
    }

    /// Parser with explicit options.
    pub fn with_options(verifier: V, options: ParserOptions) -> Self {
        Self { verifier, options }
    }

    /// Active options.
    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse and verify.
    pub fn parse(&self, raw: impl AsRef<[u8]>) -> JwtResult<Token> {
        let token = parse_no_verify_with(raw.as_ref(), &self.options)?;
        verify_token(token, &self.verifier)
    }

    /// Parse, verify and deserialize the claims.
    pub fn parse_claims<T: DeserializeOwned>(&self, raw: impl AsRef<[u8]>) -> JwtResult<T> {
        self.parse(raw)?.decode_claims()
    }
}
