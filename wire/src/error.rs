//! Error types for transport string operations.

use std::fmt;

/// Result type for transport string operations.
pub type WireResult<T> = Result<T, WireError>;

/// Errors that can occur when decoding a transport string.
///
/// Encoding never fails: an unusable transform yields
/// [`PLACEHOLDER`](crate::PLACEHOLDER) instead.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WireError {
    /// Fewer hex digits than the buffer needs.
    TooShort { expected: usize, found: usize },

    /// A character that is not a hex digit.
    InvalidHexDigit { index: usize, found: char },

    /// Buffer length is not a whole number of cipher blocks.
    BlockSize { len: usize, block: usize },

    /// The transform could not be initialized from its key.
    CipherUnavailable,
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { expected, found } => {
                write!(
                    f,
                    "transport string too short: {found} hex digits, need at least {expected}"
                )
            }
            Self::InvalidHexDigit { index, found } => {
                write!(f, "invalid hex digit {found:?} at index {index}")
            }
            Self::BlockSize { len, block } => {
                write!(
                    f,
                    "buffer of {len} bytes is not a multiple of the {block}-byte block"
                )
            }
            Self::CipherUnavailable => write!(f, "transport cipher unavailable"),
        }
    }
}

impl std::error::Error for WireError {}
