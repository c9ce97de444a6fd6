//! Shared pack/unpack machinery for versioned models.

use bitstream::{BitBuffer, BUFFER_LEN};
use schema::{FieldVisitor, Layout, LayoutRecorder};
use tracing::{debug, warn};
use wire::Transport;

use crate::error::{CodecError, CodecResult, ModelKind};

/// Width of the leading version tag.
pub const VERSION_BITS: usize = 3;

/// Decodes the fields that follow a version tag.
pub type Decoder<T> = fn(&mut BitBuffer) -> T;

/// A model stored in a 128-bit buffer behind a version tag.
///
/// Encoding always writes the current version. Decoding dispatches on the
/// stored tag; every known version decodes to a fully populated current
/// model, and unknown versions are rejected.
pub trait PackedModel: Sized {
    /// Model name used in errors and logs.
    const KIND: ModelKind;

    /// Version written by [`PackedModel::pack`].
    const CURRENT_VERSION: u8;

    /// Walks the current layout, version tag first.
    fn visit<V: FieldVisitor>(&self, visitor: &mut V);

    /// The decoder for a stored version, if it is known.
    fn decoder(version: u8) -> Option<Decoder<Self>>;

    /// Packs into a fresh, padded buffer.
    fn pack(&self) -> BitBuffer {
        let mut buf = BitBuffer::new();
        self.visit(&mut buf);
        buf.finish();
        buf
    }

    /// Packed bytes of the current layout.
    fn to_bytes(&self) -> [u8; BUFFER_LEN] {
        self.pack().into_bytes()
    }

    /// Decodes packed bytes of any known version.
    fn unpack(bytes: [u8; BUFFER_LEN]) -> CodecResult<Self> {
        let mut buf = BitBuffer::from_bytes(bytes);
        let version = buf.read_bits(VERSION_BITS);
        let Some(decode) = Self::decoder(version) else {
            warn!(kind = %Self::KIND, version, "unsupported version tag");
            return Err(CodecError::UnsupportedVersion {
                kind: Self::KIND,
                version,
            });
        };
        if version != Self::CURRENT_VERSION {
            debug!(
                kind = %Self::KIND,
                version,
                current = Self::CURRENT_VERSION,
                "upgrading legacy layout"
            );
        }
        Ok(decode(&mut buf))
    }

    /// Decodes a byte slice that must be exactly one buffer long.
    fn unpack_slice(bytes: &[u8]) -> CodecResult<Self> {
        let buf = BitBuffer::<BUFFER_LEN>::from_slice(bytes)?;
        Self::unpack(buf.into_bytes())
    }

    /// Plain hex of the packed bytes, for cheap equality checks.
    fn to_fast_string(&self) -> String {
        wire::to_fast_hex(&self.to_bytes())
    }

    fn from_fast_string(s: &str) -> CodecResult<Self> {
        let bytes = wire::from_fast_hex(s)?;
        Self::unpack(bytes)
    }

    /// Transformed hex of the packed bytes, for storage and sharing.
    fn to_display_string(&self, transport: &Transport) -> String {
        transport.to_hex(&self.to_bytes())
    }

    fn from_display_string(s: &str, transport: &Transport) -> CodecResult<Self> {
        let bytes = transport.from_hex(s)?;
        Self::unpack(bytes)
    }

    /// Short display fingerprint.
    fn hash(&self, transport: &Transport) -> String {
        transport.hash(&self.to_bytes())
    }

    /// Describes the current layout.
    fn layout(&self) -> Layout {
        let mut recorder = LayoutRecorder::new();
        self.visit(&mut recorder);
        recorder.finish()
    }
}

/// Version tag stored in packed bytes, without decoding the rest.
#[must_use]
pub fn stored_version(bytes: &[u8; BUFFER_LEN]) -> u8 {
    BitBuffer::from_bytes(*bytes).read_bits(VERSION_BITS)
}
