//! Error types for codec operations.

use std::fmt;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Which packed model an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    Preset,
    Settings,
}

/// Errors that can occur while decoding a preset or settings string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Transport string error.
    Wire(wire::WireError),

    /// Bitstream error.
    Bitstream(bitstream::BitError),

    /// Version tag with no known layout.
    UnsupportedVersion { kind: ModelKind, version: u8 },

    /// Combined state string without the `~` separator.
    MissingSeparator,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wire(e) => write!(f, "transport error: {e}"),
            Self::Bitstream(e) => write!(f, "bitstream error: {e}"),
            Self::UnsupportedVersion { kind, version } => {
                write!(f, "unsupported {kind} version: {version}")
            }
            Self::MissingSeparator => {
                write!(f, "state string has no '~' between preset and settings")
            }
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Preset => "preset",
            Self::Settings => "settings",
        };
        write!(f, "{name}")
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Wire(e) => Some(e),
            Self::Bitstream(e) => Some(e),
            _ => None,
        }
    }
}

impl From<wire::WireError> for CodecError {
    fn from(err: wire::WireError) -> Self {
        Self::Wire(err)
    }
}

impl From<bitstream::BitError> for CodecError {
    fn from(err: bitstream::BitError) -> Self {
        Self::Bitstream(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn unsupported_version_display() {
        let err = CodecError::UnsupportedVersion {
            kind: ModelKind::Preset,
            version: 6,
        };
        assert_eq!(err.to_string(), "unsupported preset version: 6");
    }

    #[test]
    fn wire_error_is_source() {
        let err = CodecError::from(wire::WireError::CipherUnavailable);
        assert!(err.to_string().contains("transport"));
        assert!(err.source().is_some());
        assert!(CodecError::MissingSeparator.source().is_none());
    }

    #[test]
    fn bit_error_converts() {
        let err: CodecError = bitstream::BitError::LengthMismatch {
            expected: 16,
            found: 2,
        }
        .into();
        assert!(matches!(err, CodecError::Bitstream(_)));
    }
}
