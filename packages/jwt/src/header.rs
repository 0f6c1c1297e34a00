//! JOSE header and its compact encoding
//!
//! Headers that are exactly `{"alg":..,"typ":"JWT"}` are served from a fixed
//! table of pre-encoded strings; everything else goes through serde_json.
//! Both paths produce identical bytes.

use crate::algorithm::Algorithm;
use crate::error::{JwtError, JwtResult};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Value of `typ` set by [`Header::new`].
pub const JWT_TYPE: &str = "JWT";

/// Token header. Field order here is the JSON emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Signing algorithm
    pub alg: Algorithm,
    /// Media type of the whole token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
    /// Media type of the claims
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cty: Option<String>,
    /// Key identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    /// JWK set URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jku: Option<String>,
    /// X.509 certificate URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x5u: Option<String>,
    /// X.509 SHA-1 thumbprint, base64url
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x5t: Option<String>,
}

impl Header {
    /// Header with `typ` set to `JWT` and nothing else.
    #[must_use]
    pub fn new(alg: impl Into<Algorithm>) -> Self {
        Self {
            alg: alg.into(),
            typ: Some(JWT_TYPE.to_string()),
            cty: None,
            kid: None,
            jku: None,
            x5u: None,
            x5t: None,
        }
    }

    /// Replace the `typ` field; an empty string removes it.
    #[must_use]
    pub fn with_type(mut self, typ: impl Into<String>) -> Self {
        let typ = typ.into();
        self.typ = (!typ.is_empty()).then_some(typ);
        self
    }

    /// Set `cty`.
    #[must_use]
    pub fn with_content_type(mut self, cty: impl Into<String>) -> Self {
        self.cty = Some(cty.into());
        self
    }

    /// Set `kid`.
    #[must_use]
    pub fn with_key_id(mut self, kid: impl Into<String>) -> Self {
        self.kid = Some(kid.into());
        self
    }

    /// Set `jku`.
    #[must_use]
    pub fn with_jwk_url(mut self, jku: impl Into<String>) -> Self {
        self.jku = Some(jku.into());
        self
    }

    /// Set `x5u`.
    #[must_use]
    pub fn with_x509_url(mut self, x5u: impl Into<String>) -> Self {
        self.x5u = Some(x5u.into());
        self
    }

    /// Set `x5t`.
    #[must_use]
    pub fn with_x509_thumbprint(mut self, x5t: impl Into<String>) -> Self {
        self.x5t = Some(x5t.into());
        self
    }

    fn is_plain(&self) -> bool {
        self.typ.as_deref() == Some(JWT_TYPE)
            && self.cty.is_none()
            && self.kid.is_none()
            && self.jku.is_none()
            && self.x5u.is_none()
            && self.x5t.is_none()
    }

    /// Base64url (unpadded) encoding of the header JSON.
    pub fn encode(&self) -> JwtResult<Cow<'static, str>> {
        if self.is_plain() {
            if let Some(encoded) = predefined(&self.alg) {
                return Ok(Cow::Borrowed(encoded));
            }
        }
        let json = serde_json::to_vec(self)
            .map_err(|e| JwtError::Serialization(format!("header: {e}")))?;
        Ok(Cow::Owned(URL_SAFE_NO_PAD.encode(json)))
    }

    /// Decode a base64url header segment.
    pub fn decode(encoded: &[u8]) -> JwtResult<Self> {
        let json = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|_| JwtError::InvalidHeaderFormat)?;
        Self::from_json(&json)
    }

    /// Parse already-decoded header JSON. Unknown fields are ignored.
    pub fn from_json(json: &[u8]) -> JwtResult<Self> {
        serde_json::from_slice(json).map_err(|_| JwtError::InvalidHeaderFormat)
    }
}

/// Pre-encoded `{"alg":X,"typ":"JWT"}` for each algorithm with a fixed name.
fn predefined(alg: &Algorithm) -> Option<&'static str> {
    let encoded = match alg {
        Algorithm::HS256 => "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9",
        Algorithm::HS384 => "eyJhbGciOiJIUzM4NCIsInR5cCI6IkpXVCJ9",
        Algorithm::HS512 => "eyJhbGciOiJIUzUxMiIsInR5cCI6IkpXVCJ9",
        Algorithm::RS256 => "eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9",
        Algorithm::RS384 => "eyJhbGciOiJSUzM4NCIsInR5cCI6IkpXVCJ9",
        Algorithm::RS512 => "eyJhbGciOiJSUzUxMiIsInR5cCI6IkpXVCJ9",
        Algorithm::PS256 => "eyJhbGciOiJQUzI1NiIsInR5cCI6IkpXVCJ9",
        Algorithm::PS384 => "eyJhbGciOiJQUzM4NCIsInR5cCI6IkpXVCJ9",
        Algorithm::PS512 => "eyJhbGciOiJQUzUxMiIsInR5cCI6IkpXVCJ9",
        Algorithm::ES256 => "eyJhbGciOiJFUzI1NiIsInR5cCI6IkpXVCJ9",
        Algorithm::ES384 => "eyJhbGciOiJFUzM4NCIsInR5cCI6IkpXVCJ9",
        Algorithm::ES512 => "eyJhbGciOiJFUzUxMiIsInR5cCI6IkpXVCJ9",
        Algorithm::EdDSA => "eyJhbGciOiJFZERTQSIsInR5cCI6IkpXVCJ9",
        Algorithm::Unsecured => "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0",
        Algorithm::Other(_) => return None,
    };
    Some(encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generic(header: &Header) -> String {
        let json = serde_json::to_vec(header).expect("header serialization should succeed");
        URL_SAFE_NO_PAD.encode(json)
    }

    #[test]
    fn test_predefined_matches_generic_encoding() {
        let mut algs = Algorithm::SUPPORTED.to_vec();
        algs.push(Algorithm::Unsecured);
        for alg in algs {
            let header = Header::new(alg.clone());
            let fast = predefined(&alg).expect("every fixed name has an entry");
            assert_eq!(fast, generic(&header), "table entry for {alg}");
            assert!(matches!(header.encode(), Ok(Cow::Borrowed(_))));
        }
    }

    #[test]
    fn test_optional_fields_in_emission_order() {
        let header = Header::new(Algorithm::RS256)
            .with_key_id("k")
            .with_content_type("JWT");
        let encoded = header.encode().expect("encode should succeed");
        assert_eq!(
            encoded,
            "eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCIsImN0eSI6IkpXVCIsImtpZCI6ImsifQ"
        );
        let json = URL_SAFE_NO_PAD
            .decode(encoded.as_bytes())
            .expect("decode should succeed");
        assert_eq!(json, br#"{"alg":"RS256","typ":"JWT","cty":"JWT","kid":"k"}"#);
    }

    #[test]
    fn test_extras_follow_kid() {
        let header = Header::new(Algorithm::ES256)
            .with_x509_thumbprint("t")
            .with_x509_url("u")
            .with_jwk_url("j")
            .with_key_id("k");
        let json = serde_json::to_string(&header).expect("serialize should succeed");
        assert_eq!(
            json,
            r#"{"alg":"ES256","typ":"JWT","kid":"k","jku":"j","x5u":"u","x5t":"t"}"#
        );
    }

    #[test]
    fn test_decode_ignores_unknown_and_keeps_unknown_alg() {
        let json = br#"{"alg":"XY999","typ":"JWT","zip":"DEF","nested":{"a":1}}"#;
        let header = Header::from_json(json).expect("decode should succeed");
        assert_eq!(header.alg, Algorithm::Other("XY999".to_string()));
        assert_eq!(header.typ.as_deref(), Some("JWT"));
    }

    #[test]
    fn test_decode_requires_alg() {
        assert_eq!(
            Header::from_json(br#"{"typ":"JWT"}"#),
            Err(JwtError::InvalidHeaderFormat)
        );
        assert_eq!(Header::decode(b"!!!"), Err(JwtError::InvalidHeaderFormat));
    }

    #[test]
    fn test_empty_type_removes_field() {
        let header = Header::new(Algorithm::HS256).with_type("");
        let encoded = header.encode().expect("encode should succeed");
        assert!(matches!(encoded, Cow::Owned(_)));
        assert_eq!(Header::decode(encoded.as_bytes()), Ok(header));
    }
}
