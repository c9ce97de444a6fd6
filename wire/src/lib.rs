//! Transport strings for the watchkit state codec.
//!
//! A packed buffer travels as a hex string in one of two forms:
//! - **fast** - plain lowercase hex of the raw bytes, for cheap equality checks
//! - **display** - hex of the bytes after a fixed-key block transform, for
//!   storage and sharing
//!
//! # Design Principles
//!
//! - **Explicit configuration** - The transform key lives in a [`Transport`]
//!   value built once and passed by reference, never in hidden global state.
//! - **Total encoding** - Encoding never fails; an unusable transform yields
//!   [`PLACEHOLDER`].
//! - **Strict decoding** - Short or malformed strings are reported, not guessed.
//! - **No domain knowledge** - This crate moves bytes, not presets.

mod error;
mod fast;
mod transport;

pub use error::{WireError, WireResult};
pub use fast::{from_fast_hex, to_fast_hex};
pub use transport::{
    Transport, TransportKey, BLOCK_LEN, DEFAULT_PHRASE, HASH_LEN, KEY_LEN, PLACEHOLDER,
};

/// Hex digits in a transport string for a default-sized buffer.
pub const HEX_LEN: usize = bitstream::BUFFER_LEN * 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let _ = Transport::default();
        let _ = TransportKey::FALLBACK;
        let _ = to_fast_hex(&[]);
        let _: WireResult<[u8; 0]> = from_fast_hex("");
        let _ = (BLOCK_LEN, HASH_LEN, KEY_LEN, PLACEHOLDER, DEFAULT_PHRASE);
    }

    #[test]
    fn default_string_is_32_digits() {
        assert_eq!(HEX_LEN, 32);
        let transport = Transport::default();
        assert_eq!(transport.to_hex(&[0u8; bitstream::BUFFER_LEN]).len(), HEX_LEN);
        assert_eq!(to_fast_hex(&[0u8; bitstream::BUFFER_LEN]).len(), HEX_LEN);
    }

    #[test]
    fn placeholder_is_shorter_than_a_real_string() {
        assert!(PLACEHOLDER.len() < HEX_LEN);
        assert!(PLACEHOLDER.len() >= HASH_LEN);
    }
}
