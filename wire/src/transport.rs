//! Keyed ("display") transport form of a buffer.
//!
//! The buffer is run through AES-128 in ECB mode, block by block and without
//! padding, before hex encoding. The transform scatters near-identical
//! buffers across the output space so display strings and their short
//! hashes look unrelated. It is not a security boundary: the key is public.

use std::fmt;

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::Aes128;
use md5::{Digest, Md5};
use tracing::{debug, warn};

use crate::error::{WireError, WireResult};
use crate::fast::decode_prefix;

/// Cipher block length in bytes.
pub const BLOCK_LEN: usize = 16;

/// Key length in bytes.
pub const KEY_LEN: usize = 16;

/// Emitted by [`Transport::to_hex`] when the buffer cannot be transformed.
pub const PLACEHOLDER: &str = "0000000000000000";

/// Number of leading display digits used as a short fingerprint.
pub const HASH_LEN: usize = 8;

/// Phrase the default key is derived from.
pub const DEFAULT_PHRASE: &str = "For God so loved the world, that he gave his only begotten Son, \
    that whosoever believeth in him should not perish, but have everlasting life.";

/// A 128-bit transform key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransportKey([u8; KEY_LEN]);

impl TransportKey {
    /// Precomputed MD5 of [`DEFAULT_PHRASE`]; returned by [`Default`].
    pub const FALLBACK: Self = Self([
        0xbd, 0xa6, 0x15, 0xc4, 0xbe, 0x1e, 0x90, 0xa9, 0x85, 0xec, 0xe4, 0xc6, 0x83, 0x9a, 0xd6,
        0x4e,
    ]);

    #[must_use]
    pub const fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Derives a key as the MD5 digest of `phrase`.
    #[must_use]
    pub fn derive(phrase: &str) -> Self {
        let digest = Md5::digest(phrase.as_bytes());
        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(&digest);
        Self(key)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl Default for TransportKey {
    fn default() -> Self {
        Self::FALLBACK
    }
}

impl fmt::Debug for TransportKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransportKey({})", hex::encode(self.0))
    }
}

/// Immutable transform configuration.
///
/// Built once and shared by reference; encoding and decoding never mutate
/// it, so one `Transport` can serve any number of threads.
pub struct Transport {
    cipher: Option<Aes128>,
}

impl Transport {
    /// Creates a transport for `key`.
    #[must_use]
    pub fn new(key: TransportKey) -> Self {
        Self::from_key_bytes(key.as_bytes())
    }

    /// Creates a transport from the first [`KEY_LEN`] bytes of `key`.
    ///
    /// Shorter keys leave the transport unavailable: display encoding then
    /// yields [`PLACEHOLDER`] and display decoding fails.
    #[must_use]
    pub fn from_key_bytes(key: &[u8]) -> Self {
        let cipher = key
            .get(..KEY_LEN)
            .and_then(|key| Aes128::new_from_slice(key).ok());
        if cipher.is_none() {
            warn!(key_len = key.len(), "transport cipher unavailable");
        }
        Self { cipher }
    }

    /// Whether the transform is usable.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.cipher.is_some()
    }

    /// Transforms and hex-encodes `bytes`.
    ///
    /// Never fails: returns [`PLACEHOLDER`] when the cipher is unavailable or
    /// `bytes` is not a whole number of blocks.
    #[must_use]
    pub fn to_hex(&self, bytes: &[u8]) -> String {
        match self.encrypt(bytes) {
            Ok(encrypted) => hex::encode(encrypted),
            Err(err) => {
                warn!(%err, len = bytes.len(), "emitting placeholder transport string");
                PLACEHOLDER.to_owned()
            }
        }
    }

    /// Decodes and reverses [`Transport::to_hex`].
    ///
    /// Reads the first `2 * LEN` hex digits; trailing characters are ignored.
    pub fn from_hex<const LEN: usize>(&self, s: &str) -> WireResult<[u8; LEN]> {
        let cipher = self.cipher.as_ref().ok_or(WireError::CipherUnavailable)?;
        check_block_size(LEN)?;

        let mut bytes = [0u8; LEN];
        decode_prefix(s, &mut bytes).map_err(|err| {
            debug!(%err, "transport string rejected");
            err
        })?;
        for block in bytes.chunks_exact_mut(BLOCK_LEN) {
            cipher.decrypt_block(GenericArray::from_mut_slice(block));
        }
        Ok(bytes)
    }

    /// Short, non-unique display fingerprint of `bytes`.
    #[must_use]
    pub fn hash(&self, bytes: &[u8]) -> String {
        let mut display = self.to_hex(bytes);
        display.truncate(HASH_LEN);
        display
    }

    fn encrypt(&self, bytes: &[u8]) -> WireResult<Vec<u8>> {
        let cipher = self.cipher.as_ref().ok_or(WireError::CipherUnavailable)?;
        check_block_size(bytes.len())?;

        let mut out = bytes.to_vec();
        for block in out.chunks_exact_mut(BLOCK_LEN) {
            cipher.encrypt_block(GenericArray::from_mut_slice(block));
        }
        Ok(out)
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new(TransportKey::default())
    }
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("available", &self.is_available())
            .finish()
    }
}

fn check_block_size(len: usize) -> WireResult<()> {
    if len % BLOCK_LEN == 0 {
        Ok(())
    } else {
        Err(WireError::BlockSize {
            len,
            block: BLOCK_LEN,
        })
    }
}
