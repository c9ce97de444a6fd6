//! Untransformed ("fast") hex form of a buffer.

use crate::error::{WireError, WireResult};

/// Encodes bytes as lowercase hex, two digits per byte.
#[must_use]
pub fn to_fast_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decodes the first `2 * LEN` hex digits of `s`.
///
/// Digits of either case are accepted. Characters past the first `2 * LEN`
/// are ignored.
pub fn from_fast_hex<const LEN: usize>(s: &str) -> WireResult<[u8; LEN]> {
    let mut bytes = [0u8; LEN];
    decode_prefix(s, &mut bytes)?;
    Ok(bytes)
}

pub(crate) fn decode_prefix(s: &str, out: &mut [u8]) -> WireResult<()> {
    let expected = out.len() * 2;
    let too_short = WireError::TooShort {
        expected,
        found: s.len(),
    };
    if s.len() < expected {
        return Err(too_short);
    }
    if let Some(invalid) = first_invalid_digit(s, expected) {
        return Err(invalid);
    }
    let digits = s.get(..expected).ok_or_else(|| too_short.clone())?;
    hex::decode_to_slice(digits, out).map_err(|err| match err {
        hex::FromHexError::InvalidHexCharacter { c, index } => {
            WireError::InvalidHexDigit { index, found: c }
        }
        _ => too_short,
    })
}

/// First non-hex character starting within the first `limit` bytes.
fn first_invalid_digit(s: &str, limit: usize) -> Option<WireError> {
    s.char_indices()
        .take_while(|(index, _)| *index < limit)
        .find(|(_, c)| !c.is_ascii_hexdigit())
        .map(|(index, found)| WireError::InvalidHexDigit { index, found })
}
