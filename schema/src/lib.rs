//! Packed field catalogue for the watchkit state codec.
//!
//! This crate defines how watch-face settings are represented in a bit
//! buffer:
//! - The [`PackedField`] contract (canonical order, bit width, sampling pool)
//! - Every enumerated setting of a preset and of the user settings
//! - [`FieldVisitor`], the single description of a model's pack order
//! - Layout descriptions and deterministic layout hashing
//!
//! # Design Principles
//!
//! - **Compiler-checked ordinals** - A value's index is its declaration order.
//! - **Narrow reads stay valid** - Older, narrower slots index a prefix of the
//!   current canonical order.
//! - **Deterministic hashing** - The layout hash is stable given the same layout.

mod field;
mod hash;
mod layout;
mod visit;

pub use field::{
    ComplicationCount, ComplicationRotation, ComplicationScale, ComplicationSize, DigitDisplay,
    DigitFormat, DigitRotation, DigitSize, HandCutout, HandCutoutShape, HandCutoutStyle,
    HandLength, HandShape, HandStalk, HandThickness, Material, MaterialGradient, MaterialTexture,
    PackedField, PipMargin, PipShape, PipSize, PipsDisplay, TextStyle, Typeface,
};
pub use hash::layout_hash;
pub use layout::{Layout, LayoutEntry, LayoutRecorder, SlotKind};
pub use visit::FieldVisitor;

/// A six-bit palette colour index (0..=63).
pub type SixBitColor = u8;

/// Number of distinct six-bit colours.
pub const SIX_BIT_COLORS: u8 = 64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let _ = HandShape::default();
        let _ = LayoutRecorder::new().finish();
        let _ = layout_hash(&Layout::default());
        let _: SixBitColor = SIX_BIT_COLORS - 1;
    }

    #[test]
    fn six_bit_colors_fill_the_slot() {
        assert_eq!(
            usize::from(SIX_BIT_COLORS),
            1 << bitstream::SIX_BIT_COLOR_BITS
        );
    }
}
