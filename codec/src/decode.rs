//! Preset decoders, one per stored layout version.
//!
//! | version | bits | differences from the next version |
//! |---------|------|-----------------------------------|
//! | 0       | 101  | no cutouts, no digits, no pip background; 3-bit materials; 2-bit pip shape and size |
//! | 1       | 116  | 2-bit pip shape and size; 2-bit digit format; a reserved bit after each pip override |
//! | 2       | 123  | pip background material stored before the margin; 2-bit digit format |
//! | 3       | 124  | current layout |
//!
//! Every decoder starts from [`legacy_defaults`] so fields a version never
//! stored always take the same documented values.

use bitstream::BitBuffer;
use schema::{
    DigitDisplay, DigitFormat, DigitRotation, DigitSize, HandCutout, HandLength, HandShape,
    HandStalk, HandThickness, Material, MaterialGradient, MaterialTexture, PackedField, PipMargin,
    PipShape, PipSize, PipsDisplay,
};

use crate::model::Decoder;
use crate::preset::{Digits, Hand, MaterialStyle, Palette, Pips, Preset, SecondHand};

/// Decoders indexed by version tag.
pub(crate) const PRESET_DECODERS: [Decoder<Preset>; 4] =
    [decode_v0, decode_v1, decode_v2, decode_v3];

/// How a layout stores materials.
#[derive(Clone, Copy)]
enum MaterialSlot {
    /// Three bits, wrapped onto the four materials.
    Wide,
    Current,
}

impl MaterialSlot {
    fn read(self, buf: &mut BitBuffer) -> Material {
        match self {
            Self::Wide => Material::unpack_wrapping(buf, 3),
            Self::Current => Material::unpack(buf),
        }
    }
}

/// How a layout stores pip shape and size.
#[derive(Clone, Copy)]
enum PipSlot {
    /// Two bits each.
    Narrow,
    Current,
}

/// Values for fields an older layout did not store.
pub(crate) fn legacy_defaults() -> Preset {
    let mut preset = Preset::default();
    preset.hour_hand.cutout = HandCutout::None;
    preset.minute_hand.cutout = HandCutout::None;
    preset.digits = Digits {
        material: Material::AccentHighlight,
        display: DigitDisplay::None,
        size: DigitSize::Medium,
        rotation: DigitRotation::Upright,
        format: DigitFormat::Numerals12_4,
    };
    preset.pip_background_material = Material::BaseAccent;
    preset
}

fn read_hand(buf: &mut BitBuffer, cutout: bool, material: MaterialSlot) -> Hand {
    Hand {
        shape: HandShape::unpack(buf),
        length: HandLength::unpack(buf),
        thickness: HandThickness::unpack(buf),
        stalk: HandStalk::unpack(buf),
        cutout: if cutout {
            HandCutout::unpack(buf)
        } else {
            HandCutout::None
        },
        material: material.read(buf),
    }
}

fn read_second_hand(buf: &mut BitBuffer, material: MaterialSlot) -> SecondHand {
    SecondHand {
        length: HandLength::unpack(buf),
        thickness: HandThickness::unpack(buf),
        material: material.read(buf),
    }
}

fn read_digits(buf: &mut BitBuffer, format_bits: usize) -> Digits {
    Digits {
        material: Material::unpack(buf),
        display: DigitDisplay::unpack(buf),
        size: DigitSize::unpack(buf),
        rotation: DigitRotation::unpack(buf),
        format: DigitFormat::unpack_narrow(buf, format_bits),
    }
}

fn read_pips(buf: &mut BitBuffer, slot: PipSlot, material: MaterialSlot) -> Pips {
    let (shape, size) = match slot {
        PipSlot::Narrow => (
            PipShape::unpack_narrow(buf, 2),
            PipSize::unpack_narrow(buf, 2),
        ),
        PipSlot::Current => (PipShape::unpack(buf), PipSize::unpack(buf)),
    };
    Pips {
        shape,
        size,
        material: material.read(buf),
    }
}

fn read_styles(buf: &mut BitBuffer) -> [MaterialStyle; 4] {
    let mut styles = [MaterialStyle::default(); 4];
    for style in &mut styles {
        style.gradient = MaterialGradient::unpack(buf);
        style.texture = MaterialTexture::unpack(buf);
    }
    styles
}

fn read_palette(buf: &mut BitBuffer) -> Palette {
    Palette {
        fill: buf.read_six_bit_color(),
        highlight: buf.read_six_bit_color(),
        accent: buf.read_six_bit_color(),
        base: buf.read_six_bit_color(),
    }
}

/// Reads the hands and digits shared by versions 1 to 3.
fn read_hands_with_digits(buf: &mut BitBuffer, preset: &mut Preset, format_bits: usize) {
    preset.hour_hand = read_hand(buf, true, MaterialSlot::Current);
    preset.digits = read_digits(buf, format_bits);
    preset.minute_hand_override = buf.read_bool();
    preset.minute_hand = read_hand(buf, true, MaterialSlot::Current);
    preset.second_hand_override = buf.read_bool();
    preset.second_hand = read_second_hand(buf, MaterialSlot::Current);
}

/// Reads the twelve and sixty pip rings after the four pips.
fn read_override_pips(
    buf: &mut BitBuffer,
    preset: &mut Preset,
    slot: PipSlot,
    material: MaterialSlot,
    reserved_bits: usize,
) {
    preset.twelve_pips_override = buf.read_bool();
    buf.discard_bits(reserved_bits);
    preset.twelve_pips = read_pips(buf, slot, material);
    preset.sixty_pips_override = buf.read_bool();
    buf.discard_bits(reserved_bits);
    preset.sixty_pips = read_pips(buf, slot, material);
}

fn decode_v0(buf: &mut BitBuffer) -> Preset {
    let mut preset = legacy_defaults();
    preset.hour_hand = read_hand(buf, false, MaterialSlot::Wide);
    preset.minute_hand_override = buf.read_bool();
    preset.minute_hand = read_hand(buf, false, MaterialSlot::Wide);
    preset.second_hand_override = buf.read_bool();
    preset.second_hand = read_second_hand(buf, MaterialSlot::Wide);

    preset.pips_display = PipsDisplay::unpack(buf);
    preset.pip_margin = PipMargin::unpack(buf);
    preset.four_pips = read_pips(buf, PipSlot::Narrow, MaterialSlot::Wide);
    read_override_pips(buf, &mut preset, PipSlot::Narrow, MaterialSlot::Wide, 0);

    preset.styles = read_styles(buf);
    preset.palette = read_palette(buf);
    preset
}

fn decode_v1(buf: &mut BitBuffer) -> Preset {
    let mut preset = legacy_defaults();
    read_hands_with_digits(buf, &mut preset, 2);

    preset.pips_display = PipsDisplay::unpack(buf);
    preset.pip_margin = PipMargin::unpack(buf);
    preset.pip_background_material = Material::unpack(buf);
    preset.four_pips = read_pips(buf, PipSlot::Narrow, MaterialSlot::Current);
    read_override_pips(buf, &mut preset, PipSlot::Narrow, MaterialSlot::Current, 1);

    preset.styles = read_styles(buf);
    preset.palette = read_palette(buf);
    preset
}

fn decode_v2(buf: &mut BitBuffer) -> Preset {
    let mut preset = legacy_defaults();
    read_hands_with_digits(buf, &mut preset, 2);

    preset.pips_display = PipsDisplay::unpack(buf);
    preset.pip_background_material = Material::unpack(buf);
    preset.pip_margin = PipMargin::unpack(buf);
    preset.four_pips = read_pips(buf, PipSlot::Current, MaterialSlot::Current);
    read_override_pips(buf, &mut preset, PipSlot::Current, MaterialSlot::Current, 0);

    preset.styles = read_styles(buf);
    preset.palette = read_palette(buf);
    preset
}

fn decode_v3(buf: &mut BitBuffer) -> Preset {
    let mut preset = legacy_defaults();
    read_hands_with_digits(buf, &mut preset, DigitFormat::BITS);

    preset.pips_display = PipsDisplay::unpack(buf);
    preset.pip_margin = PipMargin::unpack(buf);
    preset.pip_background_material = Material::unpack(buf);
    preset.four_pips = read_pips(buf, PipSlot::Current, MaterialSlot::Current);
    read_override_pips(buf, &mut preset, PipSlot::Current, MaterialSlot::Current, 0);

    preset.styles = read_styles(buf);
    preset.palette = read_palette(buf);
    preset
}
