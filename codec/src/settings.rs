//! User settings, the second half of a face state string.

use std::hash::{Hash, Hasher};

use bitstream::BitBuffer;
use schema::{
    ComplicationCount, ComplicationRotation, ComplicationScale, ComplicationSize, FieldVisitor,
    PackedField, SixBitColor, TextStyle, Typeface,
};

use crate::error::ModelKind;
use crate::model::{Decoder, PackedModel, VERSION_BITS};

/// Layout version written by [`Settings::pack`](PackedModel::pack).
pub const SETTINGS_VERSION: u8 = 1;

const SETTINGS_DECODERS: [Decoder<Settings>; 2] = [decode_v0, decode_v1];

/// Per-user settings that are not part of a shareable preset.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Settings {
    pub show_unread_notifications: bool,
    pub night_vision: bool,
    pub complication_count: ComplicationCount,
    pub complication_rotation: ComplicationRotation,
    pub complication_size: ComplicationSize,
    pub complication_scale: ComplicationScale,
    pub typeface: Typeface,
    pub ambient_day_color: SixBitColor,
    pub ambient_night_color: SixBitColor,
    pub complication_text_style: TextStyle,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_unread_notifications: true,
            night_vision: false,
            complication_count: ComplicationCount::Count5,
            complication_rotation: ComplicationRotation::Rotate00,
            complication_size: ComplicationSize::Medium,
            complication_scale: ComplicationScale::Medium,
            typeface: Typeface::SansRegular,
            ambient_day_color: 63,
            ambient_night_color: 48,
            complication_text_style: TextStyle::Fill,
        }
    }
}

impl Settings {
    /// Flips the unread-notification indicator and returns the new value.
    pub fn toggle_show_unread_notifications(&mut self) -> bool {
        self.show_unread_notifications = !self.show_unread_notifications;
        self.show_unread_notifications
    }

    /// Flips night-vision mode and returns the new value.
    pub fn toggle_night_vision(&mut self) -> bool {
        self.night_vision = !self.night_vision;
        self.night_vision
    }
}

impl PackedModel for Settings {
    const KIND: ModelKind = ModelKind::Settings;
    const CURRENT_VERSION: u8 = SETTINGS_VERSION;

    fn visit<V: FieldVisitor>(&self, v: &mut V) {
        v.tag("version", VERSION_BITS, SETTINGS_VERSION);
        v.flag("show_unread_notifications", self.show_unread_notifications);
        v.flag("night_vision", self.night_vision);
        v.field("complication_count", self.complication_count);
        v.field("complication_rotation", self.complication_rotation);
        v.field("complication_size", self.complication_size);
        v.field("complication_scale", self.complication_scale);
        v.field("typeface", self.typeface);
        v.color("ambient_day_color", self.ambient_day_color);
        v.color("ambient_night_color", self.ambient_night_color);
        v.field("complication_text_style", self.complication_text_style);
    }

    fn decoder(version: u8) -> Option<Decoder<Self>> {
        SETTINGS_DECODERS.get(usize::from(version)).copied()
    }
}

fn decode_v0(buf: &mut BitBuffer) -> Settings {
    Settings {
        show_unread_notifications: buf.read_bool(),
        night_vision: buf.read_bool(),
        ..Settings::default()
    }
}

fn decode_v1(buf: &mut BitBuffer) -> Settings {
    Settings {
        show_unread_notifications: buf.read_bool(),
        night_vision: buf.read_bool(),
        complication_count: ComplicationCount::unpack(buf),
        complication_rotation: ComplicationRotation::unpack(buf),
        complication_size: ComplicationSize::unpack(buf),
        complication_scale: ComplicationScale::unpack(buf),
        typeface: Typeface::unpack(buf),
        ambient_day_color: buf.read_six_bit_color(),
        ambient_night_color: buf.read_six_bit_color(),
        complication_text_style: TextStyle::unpack(buf),
    }
}

impl PartialEq for Settings {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for Settings {}

impl Hash for Settings {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_bytes().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;

    #[test]
    fn layout_is_31_bits() {
        let layout = Settings::default().layout();
        assert_eq!(layout.total_bits(), 31);
        assert_eq!(layout.get("typeface").map(|e| e.offset), Some(13));
        assert_eq!(layout.get("ambient_night_color").map(|e| e.offset), Some(23));
        let text_style = layout.get("complication_text_style").copied();
        assert_eq!(text_style.map(|e| (e.offset, e.bits)), Some((29, 2)));
    }

    #[test]
    fn text_style_is_packed_after_night_color() {
        let settings = Settings {
            complication_text_style: TextStyle::Highlight,
            ..Settings::default()
        };
        let bytes = settings.to_bytes();
        // Bits 29..31 hold HIGHLIGHT (0b10); bit 31 is padding.
        assert_eq!(bytes[3] & 0b0000_0111, 0b0000_0100);
        let decoded = Settings::unpack(bytes).unwrap();
        assert_eq!(decoded.complication_text_style, TextStyle::Highlight);
        assert_ne!(decoded, Settings::default());
    }

    #[test]
    fn roundtrip_current() {
        let settings = Settings {
            show_unread_notifications: false,
            night_vision: true,
            complication_count: ComplicationCount::Count8,
            complication_rotation: ComplicationRotation::Rotate75,
            complication_size: ComplicationSize::Small,
            complication_scale: ComplicationScale::XLarge,
            typeface: Typeface::ProductSansBold,
            ambient_day_color: 5,
            ambient_night_color: 60,
            complication_text_style: TextStyle::Base,
        };
        let decoded = Settings::unpack(settings.to_bytes()).unwrap();
        assert_eq!(decoded.typeface, Typeface::ProductSansBold);
        assert_eq!(decoded.ambient_night_color, 60);
        assert!(decoded.night_vision);
        assert_eq!(decoded.complication_text_style, TextStyle::Base);
        assert_eq!(decoded, settings);
    }

    #[test]
    fn version_zero_keeps_flags_and_fills_defaults() {
        // 000 1 1 ...: version 0, unread on, night vision on.
        let mut bytes = [0u8; 16];
        bytes[0] = 0b0001_1000;
        bytes[1] = 0xFF;
        let decoded = Settings::unpack(bytes).unwrap();
        assert!(decoded.show_unread_notifications);
        assert!(decoded.night_vision);
        assert_eq!(decoded.typeface, Settings::default().typeface);
        assert_eq!(decoded.complication_text_style, TextStyle::Fill);
        assert_eq!(
            decoded.ambient_day_color,
            Settings::default().ambient_day_color
        );
    }

    #[test]
    fn version_zero_fast_string() {
        let decoded = Settings::from_fast_string("00000000000000000000000000000000").unwrap();
        assert!(!decoded.show_unread_notifications);
        assert!(!decoded.night_vision);

        let mut bytes = [0u8; 16];
        bytes[0] = 0b0000_1000;
        assert!(Settings::unpack(bytes).unwrap().night_vision);
    }

    #[test]
    fn unknown_version_is_rejected() {
        let mut bytes = [0u8; 16];
        bytes[0] = 0b0100_0000;
        assert_eq!(
            Settings::unpack(bytes).unwrap_err(),
            CodecError::UnsupportedVersion {
                kind: ModelKind::Settings,
                version: 2
            }
        );
    }

    #[test]
    fn toggles_return_new_value() {
        let mut settings = Settings::default();
        let before = settings.show_unread_notifications;
        assert_eq!(settings.toggle_show_unread_notifications(), !before);
        assert_eq!(settings.toggle_show_unread_notifications(), before);
        assert!(settings.toggle_night_vision());
        assert!(!settings.toggle_night_vision());
    }
}
