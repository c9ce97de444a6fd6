//! The watch-face preset model.

use std::hash::{Hash, Hasher};

use schema::{
    DigitDisplay, DigitFormat, DigitRotation, DigitSize, FieldVisitor, HandCutout, HandLength,
    HandShape, HandStalk, HandThickness, Material, MaterialGradient, MaterialTexture, PackedField,
    PipMargin, PipShape, PipSize, PipsDisplay, SixBitColor,
};

use crate::decode::PRESET_DECODERS;
use crate::error::ModelKind;
use crate::model::{Decoder, PackedModel, VERSION_BITS};

/// Layout version written by [`Preset::pack`](PackedModel::pack).
pub const PRESET_VERSION: u8 = 3;

/// An hour or minute hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hand {
    pub shape: HandShape,
    pub length: HandLength,
    pub thickness: HandThickness,
    pub stalk: HandStalk,
    pub cutout: HandCutout,
    pub material: Material,
}

/// The second hand. Its shape is always [`HandShape::Straight`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SecondHand {
    pub length: HandLength,
    pub thickness: HandThickness,
    pub material: Material,
}

impl SecondHand {
    /// Drawn when the second hand is not overridden.
    pub const FALLBACK: Self = Self {
        length: HandLength::Long,
        thickness: HandThickness::Thin,
        material: Material::AccentHighlight,
    };

    /// Shape of every second hand.
    pub const SHAPE: HandShape = HandShape::Straight;
}

/// Hour digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Digits {
    pub material: Material,
    pub display: DigitDisplay,
    pub size: DigitSize,
    pub rotation: DigitRotation,
    pub format: DigitFormat,
}

/// One ring of pips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pips {
    pub shape: PipShape,
    pub size: PipSize,
    pub material: Material,
}

/// Gradient and texture of one material.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaterialStyle {
    pub gradient: MaterialGradient,
    pub texture: MaterialTexture,
}

/// The four six-bit palette colours, in pack order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Palette {
    pub fill: SixBitColor,
    pub highlight: SixBitColor,
    pub accent: SixBitColor,
    pub base: SixBitColor,
}

/// A complete watch-face configuration.
///
/// Two presets are equal when they pack to the same bytes. Colour indices
/// are stored in six bits, so indices that differ only above bit 5 compare
/// equal.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Preset {
    pub hour_hand: Hand,
    pub minute_hand_override: bool,
    pub minute_hand: Hand,
    pub second_hand_override: bool,
    pub second_hand: SecondHand,
    pub digits: Digits,
    pub pips_display: PipsDisplay,
    pub pip_margin: PipMargin,
    pub pip_background_material: Material,
    pub four_pips: Pips,
    pub twelve_pips_override: bool,
    pub twelve_pips: Pips,
    pub sixty_pips_override: bool,
    pub sixty_pips: Pips,
    /// Indexed by [`Material`] ordinal.
    pub styles: [MaterialStyle; 4],
    pub palette: Palette,
}

impl Default for Preset {
    fn default() -> Self {
        let hand = Hand {
            shape: HandShape::Diamond,
            length: HandLength::Long,
            thickness: HandThickness::Regular,
            stalk: HandStalk::Short,
            cutout: HandCutout::None,
            material: Material::FillHighlight,
        };
        let pips = Pips {
            shape: PipShape::Bar1_4,
            size: PipSize::Medium,
            material: Material::AccentHighlight,
        };
        Self {
            hour_hand: hand,
            minute_hand_override: true,
            minute_hand: hand,
            second_hand_override: false,
            second_hand: SecondHand::FALLBACK,
            digits: Digits {
                material: Material::AccentHighlight,
                display: DigitDisplay::Below,
                size: DigitSize::Medium,
                rotation: DigitRotation::Upright,
                format: DigitFormat::Numerals12_4,
            },
            pips_display: PipsDisplay::FourTwelveSixty,
            pip_margin: PipMargin::Small,
            pip_background_material: Material::BaseAccent,
            four_pips: pips,
            twelve_pips_override: false,
            twelve_pips: pips,
            sixty_pips_override: false,
            sixty_pips: pips,
            styles: [
                MaterialStyle {
                    gradient: MaterialGradient::Radial,
                    texture: MaterialTexture::Spun,
                },
                MaterialStyle {
                    gradient: MaterialGradient::Sweep,
                    texture: MaterialTexture::None,
                },
                MaterialStyle {
                    gradient: MaterialGradient::Sweep,
                    texture: MaterialTexture::None,
                },
                MaterialStyle {
                    gradient: MaterialGradient::Sweep,
                    texture: MaterialTexture::Spun,
                },
            ],
            palette: Palette {
                fill: 63,
                highlight: 49,
                accent: 22,
                base: 0,
            },
        }
    }
}

impl Preset {
    /// The minute hand as drawn: the hour hand unless overridden.
    #[must_use]
    pub const fn effective_minute_hand(&self) -> Hand {
        if self.minute_hand_override {
            self.minute_hand
        } else {
            self.hour_hand
        }
    }

    /// The second hand as drawn.
    #[must_use]
    pub const fn effective_second_hand(&self) -> SecondHand {
        if self.second_hand_override {
            self.second_hand
        } else {
            SecondHand::FALLBACK
        }
    }

    /// The twelve pips as drawn: the four pips unless overridden.
    #[must_use]
    pub const fn effective_twelve_pips(&self) -> Pips {
        if self.twelve_pips_override {
            self.twelve_pips
        } else {
            self.four_pips
        }
    }

    /// The sixty pips as drawn: the four pips unless overridden.
    #[must_use]
    pub const fn effective_sixty_pips(&self) -> Pips {
        if self.sixty_pips_override {
            self.sixty_pips
        } else {
            self.four_pips
        }
    }

    #[must_use]
    pub fn is_four_pips_visible(&self) -> bool {
        self.pips_display.shows_four()
    }

    #[must_use]
    pub fn is_twelve_pips_visible(&self) -> bool {
        self.pips_display.shows_twelve()
    }

    #[must_use]
    pub fn is_sixty_pips_visible(&self) -> bool {
        self.pips_display.shows_sixty()
    }

    #[must_use]
    pub fn is_digit_visible(&self) -> bool {
        self.digits.display != DigitDisplay::None
    }

    /// Gradient and texture of `material`.
    #[must_use]
    pub fn style(&self, material: Material) -> MaterialStyle {
        self.styles[material.ordinal()]
    }

    pub fn style_mut(&mut self, material: Material) -> &mut MaterialStyle {
        &mut self.styles[material.ordinal()]
    }
}

fn visit_hand<V: FieldVisitor>(visitor: &mut V, names: [&'static str; 6], hand: &Hand) {
    let [shape, length, thickness, stalk, cutout, material] = names;
    visitor.field(shape, hand.shape);
    visitor.field(length, hand.length);
    visitor.field(thickness, hand.thickness);
    visitor.field(stalk, hand.stalk);
    visitor.field(cutout, hand.cutout);
    visitor.field(material, hand.material);
}

fn visit_pips<V: FieldVisitor>(visitor: &mut V, names: [&'static str; 3], pips: &Pips) {
    let [shape, size, material] = names;
    visitor.field(shape, pips.shape);
    visitor.field(size, pips.size);
    visitor.field(material, pips.material);
}

const STYLE_NAMES: [[&str; 2]; 4] = [
    ["fill_highlight.gradient", "fill_highlight.texture"],
    ["accent_fill.gradient", "accent_fill.texture"],
    ["accent_highlight.gradient", "accent_highlight.texture"],
    ["base_accent.gradient", "base_accent.texture"],
];

impl PackedModel for Preset {
    const KIND: ModelKind = ModelKind::Preset;
    const CURRENT_VERSION: u8 = PRESET_VERSION;

    fn visit<V: FieldVisitor>(&self, v: &mut V) {
        v.tag("version", VERSION_BITS, PRESET_VERSION);

        visit_hand(
            v,
            [
                "hour_hand.shape",
                "hour_hand.length",
                "hour_hand.thickness",
                "hour_hand.stalk",
                "hour_hand.cutout",
                "hour_hand.material",
            ],
            &self.hour_hand,
        );

        v.field("digits.material", self.digits.material);
        v.field("digits.display", self.digits.display);
        v.field("digits.size", self.digits.size);
        v.field("digits.rotation", self.digits.rotation);
        v.field("digits.format", self.digits.format);

        v.flag("minute_hand_override", self.minute_hand_override);
        visit_hand(
            v,
            [
                "minute_hand.shape",
                "minute_hand.length",
                "minute_hand.thickness",
                "minute_hand.stalk",
                "minute_hand.cutout",
                "minute_hand.material",
            ],
            &self.minute_hand,
        );

        v.flag("second_hand_override", self.second_hand_override);
        v.field("second_hand.length", self.second_hand.length);
        v.field("second_hand.thickness", self.second_hand.thickness);
        v.field("second_hand.material", self.second_hand.material);

        v.field("pips_display", self.pips_display);
        v.field("pip_margin", self.pip_margin);
        v.field("pip_background_material", self.pip_background_material);

        visit_pips(
            v,
            ["four_pips.shape", "four_pips.size", "four_pips.material"],
            &self.four_pips,
        );
        v.flag("twelve_pips_override", self.twelve_pips_override);
        visit_pips(
            v,
            ["twelve_pips.shape", "twelve_pips.size", "twelve_pips.material"],
            &self.twelve_pips,
        );
        v.flag("sixty_pips_override", self.sixty_pips_override);
        visit_pips(
            v,
            ["sixty_pips.shape", "sixty_pips.size", "sixty_pips.material"],
            &self.sixty_pips,
        );

        for (style, [gradient, texture]) in self.styles.iter().zip(STYLE_NAMES) {
            v.field(gradient, style.gradient);
            v.field(texture, style.texture);
        }

        v.color("palette.fill", self.palette.fill);
        v.color("palette.highlight", self.palette.highlight);
        v.color("palette.accent", self.palette.accent);
        v.color("palette.base", self.palette.base);
    }

    fn decoder(version: u8) -> Option<Decoder<Self>> {
        PRESET_DECODERS.get(usize::from(version)).copied()
    }
}

impl PartialEq for Preset {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for Preset {}

impl Hash for Preset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_bytes().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::{layout_hash, SlotKind};

    #[test]
    fn layout_is_124_bits() {
        let layout = Preset::default().layout();
        assert_eq!(layout.total_bits(), 124);
        assert_eq!(layout.entries()[0].name, "version");
        assert_eq!(layout.entries()[0].bits, VERSION_BITS);
    }

    #[test]
    fn layout_offsets() {
        let layout = Preset::default().layout();
        let offset = |name: &str| layout.get(name).map(|e| e.offset);
        assert_eq!(offset("hour_hand.shape"), Some(3));
        assert_eq!(offset("hour_hand.length"), Some(5));
        assert_eq!(offset("digits.material"), Some(17));
        assert_eq!(offset("minute_hand_override"), Some(27));
        assert_eq!(offset("second_hand_override"), Some(42));
        assert_eq!(offset("pips_display"), Some(49));
        assert_eq!(offset("four_pips.shape"), Some(55));
        assert_eq!(offset("twelve_pips_override"), Some(64));
        assert_eq!(offset("sixty_pips_override"), Some(74));
        assert_eq!(offset("fill_highlight.gradient"), Some(84));
        assert_eq!(offset("palette.fill"), Some(100));
        assert_eq!(offset("palette.base"), Some(118));
    }

    #[test]
    fn layout_kinds() {
        let layout = Preset::default().layout();
        let colors = layout
            .iter()
            .filter(|e| e.kind == SlotKind::Color)
            .count();
        let flags = layout.iter().filter(|e| e.kind == SlotKind::Flag).count();
        assert_eq!(colors, 4);
        assert_eq!(flags, 4);
        assert!(layout.get("second_hand.shape").is_none());
    }

    #[test]
    fn layout_hash_ignores_values() {
        let mut preset = Preset::default();
        let before = layout_hash(&preset.layout());
        preset.hour_hand.shape = HandShape::Triangle;
        preset.palette.base = 12;
        assert_eq!(layout_hash(&preset.layout()), before);
    }

    #[test]
    fn hour_hand_bit_layout() {
        let mut preset = Preset::default();
        preset.hour_hand.shape = HandShape::Triangle;
        preset.hour_hand.length = HandLength::Long;
        preset.hour_hand.thickness = HandThickness::Thin;
        let bytes = preset.to_bytes();
        // [011][11][10][0]: version 3, TRIANGLE, LONG, first bit of THIN.
        assert_eq!(bytes[0], 0b0111_1100);
    }

    #[test]
    fn padding_is_zero() {
        let mut preset = Preset::default();
        preset.palette.base = 63;
        let bytes = preset.to_bytes();
        // Bits 118..124 hold the base colour, 124..128 are padding.
        assert_eq!(bytes[14] & 0b11, 0b11);
        assert_eq!(bytes[15], 0b1111_0000);
    }

    #[test]
    fn effective_minute_hand_falls_back_to_hour_hand() {
        let mut preset = Preset::default();
        preset.minute_hand.shape = HandShape::Rounded;
        assert_eq!(preset.effective_minute_hand().shape, HandShape::Rounded);

        preset.minute_hand_override = false;
        assert_eq!(preset.effective_minute_hand(), preset.hour_hand);
    }

    #[test]
    fn effective_second_hand() {
        let mut preset = Preset::default();
        preset.second_hand = SecondHand {
            length: HandLength::Short,
            thickness: HandThickness::XThick,
            material: Material::AccentFill,
        };
        preset.second_hand_override = false;
        assert_eq!(preset.effective_second_hand(), SecondHand::FALLBACK);

        preset.second_hand_override = true;
        assert_eq!(preset.effective_second_hand().length, HandLength::Short);
        assert_eq!(SecondHand::SHAPE, HandShape::Straight);
    }

    #[test]
    fn effective_pips_fall_back_to_four() {
        let mut preset = Preset::default();
        preset.twelve_pips.shape = PipShape::Dot;
        preset.sixty_pips.shape = PipShape::Sector;
        assert_eq!(preset.effective_twelve_pips(), preset.four_pips);
        assert_eq!(preset.effective_sixty_pips(), preset.four_pips);

        preset.twelve_pips_override = true;
        preset.sixty_pips_override = true;
        assert_eq!(preset.effective_twelve_pips().shape, PipShape::Dot);
        assert_eq!(preset.effective_sixty_pips().shape, PipShape::Sector);
    }

    #[test]
    fn visibility() {
        let mut preset = Preset::default();
        preset.pips_display = PipsDisplay::FourTwelve;
        assert!(preset.is_four_pips_visible());
        assert!(preset.is_twelve_pips_visible());
        assert!(!preset.is_sixty_pips_visible());

        preset.digits.display = DigitDisplay::None;
        assert!(!preset.is_digit_visible());
        preset.digits.display = DigitDisplay::Over;
        assert!(preset.is_digit_visible());
    }

    #[test]
    fn styles_are_indexed_by_material() {
        let mut preset = Preset::default();
        preset.style_mut(Material::AccentHighlight).texture = MaterialTexture::Hex;
        assert_eq!(preset.styles[2].texture, MaterialTexture::Hex);
        assert_eq!(
            preset.style(Material::AccentHighlight).texture,
            MaterialTexture::Hex
        );
    }

    #[test]
    fn equality_follows_packed_bytes() {
        let a = Preset::default();
        let mut b = Preset::default();
        assert_eq!(a, b);

        // Only the low six bits of a colour are stored.
        b.palette.fill = a.palette.fill + 64;
        assert_eq!(a, b);

        b.hour_hand.stalk = HandStalk::Negative;
        assert_ne!(a, b);
    }

    #[test]
    fn equal_presets_hash_equally() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(Preset::default());
        let mut masked = Preset::default();
        masked.palette.accent += 128;
        assert!(!set.insert(masked));
        assert_eq!(set.len(), 1);
    }
}
