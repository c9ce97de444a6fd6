//! The combined `preset~settings` state string.

use tracing::debug;
use wire::Transport;

use crate::error::{CodecError, CodecResult};
use crate::model::PackedModel;
use crate::preset::Preset;
use crate::settings::Settings;

/// Separates the preset and settings halves of a state string.
pub const SEPARATOR: char = '~';

/// Everything a watch face persists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FaceState {
    pub preset: Preset,
    pub settings: Settings,
}

impl FaceState {
    #[must_use]
    pub fn new(preset: Preset, settings: Settings) -> Self {
        Self { preset, settings }
    }

    /// Display strings of both halves joined by [`SEPARATOR`].
    #[must_use]
    pub fn to_state_string(&self, transport: &Transport) -> String {
        format!(
            "{}{SEPARATOR}{}",
            self.preset.to_display_string(transport),
            self.settings.to_display_string(transport)
        )
    }

    /// Parses a state string. Each half decodes on its own, so either may be
    /// any supported version.
    pub fn parse(s: &str, transport: &Transport) -> CodecResult<Self> {
        let Some((preset, settings)) = s.split_once(SEPARATOR) else {
            debug!(len = s.len(), "state string has no separator");
            return Err(CodecError::MissingSeparator);
        };
        Ok(Self {
            preset: Preset::from_display_string(preset, transport)?,
            settings: Settings::from_display_string(settings, transport)?,
        })
    }
}
