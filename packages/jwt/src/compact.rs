//! Byte layout of the compact serialization
//!
//! `header "." claims "." signature`, all three base64url without padding.
//! Offsets are computed once here so the builder and parser never do the
//! delimiter arithmetic themselves.

use crate::error::{JwtError, JwtResult};
use std::ops::Range;

/// Segment separator.
pub(crate) const DELIMITER: u8 = b'.';

/// Unpadded base64 length of `n` input bytes.
pub(crate) fn encoded_len(n: usize) -> JwtResult<usize> {
    base64::encoded_len(n, false)
        .ok_or_else(|| JwtError::Serialization("token length overflows usize".to_string()))
}

/// Named regions of a token buffer about to be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CompactLayout {
    header_len: usize,
    claims_len: usize,
    signature_len: usize,
}

impl CompactLayout {
    /// Layout for an encoded header of `header_len` bytes plus raw claims and
    /// signature of the given lengths.
    pub(crate) fn new(header_len: usize, claims: usize, signature: usize) -> JwtResult<Self> {
        let layout = Self {
            header_len,
            claims_len: encoded_len(claims)?,
            signature_len: encoded_len(signature)?,
        };
        layout
            .header_len
            .checked_add(layout.claims_len)
            .and_then(|n| n.checked_add(layout.signature_len))
            .and_then(|n| n.checked_add(2))
            .ok_or_else(|| JwtError::Serialization("token length overflows usize".to_string()))?;
        Ok(layout)
    }

    pub(crate) fn header(&self) -> Range<usize> {
        0..self.header_len
    }

    pub(crate) fn dot1(&self) -> usize {
        self.header_len
    }

    pub(crate) fn claims(&self) -> Range<usize> {
        self.dot1() + 1..self.dot2()
    }

    /// Also the length of the signed payload.
    pub(crate) fn dot2(&self) -> usize {
        self.header_len + 1 + self.claims_len
    }

    pub(crate) fn signature(&self) -> Range<usize> {
        self.dot2() + 1..self.total()
    }

    pub(crate) fn total(&self) -> usize {
        self.dot2() + 1 + self.signature_len
    }
}

/// First and last delimiter positions, if they describe three segments.
pub(crate) fn locate_delimiters(raw: &[u8]) -> Option<(usize, usize)> {
    let dot1 = raw.iter().position(|&b| b == DELIMITER)?;
    let dot2 = raw.iter().rposition(|&b| b == DELIMITER)?;
    (dot2 > dot1).then_some((dot1, dot2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_regions_are_contiguous() {
        let layout = CompactLayout::new(36, 5, 32).expect("layout should succeed");
        assert_eq!(layout.header(), 0..36);
        assert_eq!(layout.dot1(), 36);
        // 5 bytes -> 7 chars, 32 bytes -> 43 chars
        assert_eq!(layout.claims(), 37..44);
        assert_eq!(layout.dot2(), 44);
        assert_eq!(layout.signature(), 45..88);
        assert_eq!(layout.total(), 88);
    }

    #[test]
    fn test_layout_with_empty_segments() {
        let layout = CompactLayout::new(3, 0, 0).expect("layout should succeed");
        assert_eq!(layout.claims(), 4..4);
        assert_eq!(layout.signature(), 5..5);
        assert_eq!(layout.total(), 5);
    }

    #[test]
    fn test_layout_overflow_is_an_error() {
        assert!(CompactLayout::new(usize::MAX, 1, 1).is_err());
    }

    #[test]
    fn test_locate_delimiters() {
        assert_eq!(locate_delimiters(b"a.b.c"), Some((1, 3)));
        assert_eq!(locate_delimiters(b"a.b.c.d"), Some((1, 5)));
        assert_eq!(locate_delimiters(b".."), Some((0, 1)));
        assert_eq!(locate_delimiters(b"xyz.xyz"), None);
        assert_eq!(locate_delimiters(b"nodots"), None);
        assert_eq!(locate_delimiters(b""), None);
    }
}
