//! Error types for bitstream operations.

use std::fmt;

/// Result type for bitstream operations.
pub type BitResult<T> = Result<T, BitError>;

/// Errors that can occur when building a bit buffer.
///
/// Reads and writes on a [`BitBuffer`](crate::BitBuffer) never fail: out-of-range
/// lengths and positions are clamped. The only fallible step is adopting
/// bytes whose length does not match the buffer's fixed capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitError {
    /// The provided bytes do not match the buffer's fixed length.
    LengthMismatch {
        /// Fixed buffer length in bytes.
        expected: usize,
        /// Length of the provided bytes.
        found: usize,
    },
}

impl fmt::Display for BitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { expected, found } => {
                write!(
                    f,
                    "bit buffer holds exactly {expected} bytes but {found} bytes were provided"
                )
            }
        }
    }
}

impl std::error::Error for BitError {}
