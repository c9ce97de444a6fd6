//! Packed field definitions.
//!
//! Every setting of a watch face is a closed enumeration with a fixed bit
//! width. The ordinal of a value is its declaration order, which is also the
//! index written to the buffer.

use std::fmt;

use bitstream::BitBuffer;

/// A closed, ordered enumeration stored in a fixed number of bits.
///
/// `VALUES` is the canonical packing order: `VALUES[i].ordinal() == i`.
/// `WEIGHTED` is only used for random sampling and may repeat values to bias
/// the draw; it never affects what is written.
pub trait PackedField: Copy + Eq + Default + fmt::Debug + 'static {
    /// Human-readable type name, used by layout descriptions.
    const NAME: &'static str;
    /// Bit width; `2^BITS >= VALUES.len()`.
    const BITS: usize;
    /// Canonical values in ordinal order.
    const VALUES: &'static [Self];
    /// Sampling pool for randomized presets.
    const WEIGHTED: &'static [Self] = Self::VALUES;

    /// Position of this value in [`Self::VALUES`].
    fn ordinal(self) -> usize;

    /// Looks up a value by ordinal.
    fn from_ordinal(index: usize) -> Option<Self> {
        Self::VALUES.get(index).copied()
    }

    /// Writes the ordinal at the buffer cursor.
    fn pack<const LEN: usize>(self, buf: &mut BitBuffer<LEN>) {
        let ordinal = u32::try_from(self.ordinal()).unwrap_or(0);
        buf.write_bits(ordinal, Self::BITS);
    }

    /// Reads a value written with the current width.
    fn unpack<const LEN: usize>(buf: &mut BitBuffer<LEN>) -> Self {
        Self::unpack_narrow(buf, Self::BITS)
    }

    /// Reads a value from an older, narrower slot.
    ///
    /// The narrow index addresses a prefix of the current canonical order.
    /// An index with no value decodes to the default.
    fn unpack_narrow<const LEN: usize>(buf: &mut BitBuffer<LEN>, bits: usize) -> Self {
        let index = usize::from(buf.read_bits(bits));
        Self::from_ordinal(index).unwrap_or_default()
    }

    /// Reads a value from a wider slot, wrapping the index onto the
    /// canonical values.
    fn unpack_wrapping<const LEN: usize>(buf: &mut BitBuffer<LEN>, bits: usize) -> Self {
        let index = usize::from(buf.read_bits(bits));
        match Self::VALUES.len() {
            0 => Self::default(),
            len => Self::VALUES[index % len],
        }
    }
}

macro_rules! packed_field {
    (
        $(#[$meta:meta])*
        $name:ident: $bits:literal {
            $($variant:ident),+ $(,)?
        }
        $(weighted [$($weight:ident),+ $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
        #[repr(u8)]
        pub enum $name {
            $($variant),+
        }

        impl PackedField for $name {
            const NAME: &'static str = stringify!($name);
            const BITS: usize = $bits;
            const VALUES: &'static [Self] = &[$(Self::$variant),+];
            $(const WEIGHTED: &'static [Self] = &[$(Self::$weight),+];)?

            fn ordinal(self) -> usize {
                self as usize
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::VALUES[0]
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(self, f)
            }
        }
    };
}

packed_field! {
    /// Outline of a clock hand.
    HandShape: 2 { Straight, Rounded, Diamond, Triangle }
    weighted [Straight, Straight, Straight, Rounded, Rounded, Diamond, Triangle, Triangle]
}

packed_field! {
    /// Length of a clock hand.
    HandLength: 2 { Short, Medium, Long, XLong }
}

packed_field! {
    /// Thickness of a clock hand.
    HandThickness: 2 { Thin, Regular, Thick, XThick }
}

packed_field! {
    /// Length of the stalk joining a hand to the centre.
    HandStalk: 2 { Negative, None, Short, Medium }
    weighted [Negative, None, None, Short, Short, Medium]
}

packed_field! {
    /// Combined cutout shape and style of a clock hand.
    ///
    /// Values enumerate every (shape, style) pair in shape-major order,
    /// followed by `None`.
    HandCutout: 4 {
        TipPlusOne, TipPlusTwo, TipPlusThree,
        TipStalkPlusOne, TipStalkPlusTwo, TipStalkPlusThree,
        HandPlusOne, HandPlusTwo, HandPlusThree,
        StalkPlusOne, StalkPlusTwo, StalkPlusThree,
        HandStalkPlusOne, HandStalkPlusTwo, HandStalkPlusThree,
        None,
    }
    weighted [
        None, None, None, None, None, None, None, None,
        TipPlusOne, TipStalkPlusOne, HandPlusOne, StalkPlusOne, HandStalkPlusOne,
        TipPlusTwo, HandPlusTwo, HandStalkPlusThree,
    ]
}

packed_field! {
    /// Pair of palette colours a part is painted with.
    Material: 2 { FillHighlight, AccentFill, AccentHighlight, BaseAccent }
}

packed_field! {
    /// Gradient applied to a material.
    MaterialGradient: 2 { Flat, Sweep, Radial, Triangle }
    weighted [Flat, Flat, Flat, Sweep, Radial, Radial, Triangle]
}

packed_field! {
    /// Texture applied to a material.
    MaterialTexture: 2 { None, Spun, Weave, Hex }
    weighted [None, None, None, None, Spun, Weave, Hex]
}

packed_field! {
    /// Which pip rings are drawn.
    PipsDisplay: 2 { None, Four, FourTwelve, FourTwelveSixty }
}

packed_field! {
    /// Gap between the pips and the bezel.
    PipMargin: 2 { None, Small, Medium, Large }
}

packed_field! {
    /// Shape of a pip.
    ///
    /// The first four shapes fit the two-bit slot of older layouts.
    PipShape: 4 {
        Sector, Dot, Triangle, Diamond,
        Square, Bar1_2, Bar1_4, Bar1_8,
        SquareWide, DotThin, TriangleThin, DiamondThin,
        SquareCutout, DotCutout, TriangleCutout, DiamondCutout,
    }
    weighted [
        Sector, Dot, Dot, Triangle, Diamond,
        Square, Square, Bar1_2, Bar1_4, Bar1_8,
        SquareWide, DotThin, TriangleThin, DiamondThin,
        SquareCutout, DotCutout, TriangleCutout, DiamondCutout,
    ]
}

packed_field! {
    /// Radial length of a pip.
    PipSize: 3 { XxShort, XShort, Short, Medium, Long, XLong, XxLong, XxxLong }
    weighted [XShort, Short, Short, Medium, Medium, Medium, Long, Long, XLong, XxLong]
}

packed_field! {
    /// Placement of the hour digits relative to the pips.
    DigitDisplay: 2 { None, Below, Over, Above }
    weighted [None, None, None, Below, Over, Above]
}

packed_field! {
    /// Size of the hour digits.
    DigitSize: 2 { Small, Medium, Large, XLarge }
}

packed_field! {
    /// Whether digits stay upright or follow the dial.
    DigitRotation: 1 { Upright, Curved }
}

packed_field! {
    /// Numbering system for the hour digits.
    DigitFormat: 3 {
        Numerals12_4, Numerals12_12, Numerals60, Roman,
        Circled, NegativeCircled, DoubleStruck, ClockFaces,
    }
}

packed_field! {
    /// Number of complication slots around the dial.
    ComplicationCount: 2 { Count5, Count6, Count7, Count8 }
}

packed_field! {
    /// Rotation of the complication ring, in quarter steps.
    ComplicationRotation: 2 { Rotate00, Rotate25, Rotate50, Rotate75 }
}

packed_field! {
    /// Size of the complication slots.
    ComplicationSize: 2 { Small, Medium, Large, XLarge }
}

packed_field! {
    /// Scale of complication content within a slot.
    ComplicationScale: 2 { Small, Medium, Large, XLarge }
}

packed_field! {
    /// Font family and weight for digits and complications.
    Typeface: 4 {
        SansThin, SansLight, SansRegular, SansMedium, SansBold, SansBlack,
        CondensedLight, CondensedRegular, CondensedMedium, CondensedBold,
        SerifRegular, SerifBold,
        MonoRegular,
        ProductSansRegular, ProductSansMedium, ProductSansBold,
    }
}

packed_field! {
    /// Palette colour used for complication text.
    TextStyle: 2 { Fill, Accent, Highlight, Base }
}

/// Where a hand cutout is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandCutoutShape {
    Tip,
    TipStalk,
    Hand,
    Stalk,
    HandStalk,
}

/// How far a hand cutout extends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandCutoutStyle {
    PlusOne,
    PlusTwo,
    PlusThree,
}

const CUTOUT_SHAPES: [HandCutoutShape; 5] = [
    HandCutoutShape::Tip,
    HandCutoutShape::TipStalk,
    HandCutoutShape::Hand,
    HandCutoutShape::Stalk,
    HandCutoutShape::HandStalk,
];

const CUTOUT_STYLES: [HandCutoutStyle; 3] = [
    HandCutoutStyle::PlusOne,
    HandCutoutStyle::PlusTwo,
    HandCutoutStyle::PlusThree,
];

impl HandCutout {
    /// Builds a cutout from its parts.
    #[must_use]
    pub fn from_parts(shape: HandCutoutShape, style: HandCutoutStyle) -> Self {
        let index = shape as usize * CUTOUT_STYLES.len() + style as usize;
        Self::from_ordinal(index).unwrap_or(Self::None)
    }

    /// The cutout shape, or `None` when no cutout is drawn.
    #[must_use]
    pub fn shape(self) -> Option<HandCutoutShape> {
        CUTOUT_SHAPES
            .get(self.ordinal() / CUTOUT_STYLES.len())
            .copied()
    }

    /// The cutout style, or `None` when no cutout is drawn.
    #[must_use]
    pub fn style(self) -> Option<HandCutoutStyle> {
        if self == Self::None {
            return None;
        }
        CUTOUT_STYLES
            .get(self.ordinal() % CUTOUT_STYLES.len())
            .copied()
    }
}

impl PipsDisplay {
    /// Whether the four quarter pips are drawn.
    #[must_use]
    pub fn shows_four(self) -> bool {
        self != Self::None
    }

    /// Whether the twelve hour pips are drawn.
    #[must_use]
    pub fn shows_twelve(self) -> bool {
        matches!(self, Self::FourTwelve | Self::FourTwelveSixty)
    }

    /// Whether the sixty minute pips are drawn.
    #[must_use]
    pub fn shows_sixty(self) -> bool {
        self == Self::FourTwelveSixty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_field<T: PackedField>() {
        assert!(!T::VALUES.is_empty(), "{} has no values", T::NAME);
        assert!(
            T::VALUES.len() <= 1 << T::BITS,
            "{} does not fit {} bits",
            T::NAME,
            T::BITS
        );
        for (index, value) in T::VALUES.iter().enumerate() {
            assert_eq!(value.ordinal(), index, "{}::{value:?}", T::NAME);
        }
        assert!(!T::WEIGHTED.is_empty(), "{} has no sampling pool", T::NAME);
        assert_eq!(T::default(), T::VALUES[0]);
    }

    #[test]
    fn every_field_is_consistent() {
        check_field::<HandShape>();
        check_field::<HandLength>();
        check_field::<HandThickness>();
        check_field::<HandStalk>();
        check_field::<HandCutout>();
        check_field::<Material>();
        check_field::<MaterialGradient>();
        check_field::<MaterialTexture>();
        check_field::<PipsDisplay>();
        check_field::<PipMargin>();
        check_field::<PipShape>();
        check_field::<PipSize>();
        check_field::<DigitDisplay>();
        check_field::<DigitSize>();
        check_field::<DigitRotation>();
        check_field::<DigitFormat>();
        check_field::<ComplicationCount>();
        check_field::<ComplicationRotation>();
        check_field::<ComplicationSize>();
        check_field::<ComplicationScale>();
        check_field::<Typeface>();
        check_field::<TextStyle>();
    }

    #[test]
    fn widths_match_catalogue() {
        assert_eq!(HandCutout::BITS, 4);
        assert_eq!(HandCutout::VALUES.len(), 16);
        assert_eq!(PipShape::BITS, 4);
        assert_eq!(PipSize::BITS, 3);
        assert_eq!(DigitRotation::BITS, 1);
        assert_eq!(DigitFormat::BITS, 3);
        assert_eq!(Typeface::VALUES.len(), 16);
        assert_eq!(TextStyle::BITS, 2);
        assert_eq!(
            TextStyle::VALUES,
            &[TextStyle::Fill, TextStyle::Accent, TextStyle::Highlight, TextStyle::Base]
        );
    }

    #[test]
    fn weighted_pool_only_holds_canonical_values() {
        for value in HandCutout::WEIGHTED {
            assert!(HandCutout::VALUES.contains(value));
        }
        let none_count = HandCutout::WEIGHTED
            .iter()
            .filter(|&&cutout| cutout == HandCutout::None)
            .count();
        assert!(none_count > 1, "cutout pool should favour None");
        assert_eq!(HandLength::WEIGHTED, HandLength::VALUES);
    }

    #[test]
    fn pack_writes_ordinal() {
        let mut buf = BitBuffer::<1>::new();
        HandShape::Triangle.pack(&mut buf);
        HandLength::Long.pack(&mut buf);
        assert_eq!(buf.as_bytes(), &[0b1110_0000]);

        buf.rewind();
        assert_eq!(HandShape::unpack(&mut buf), HandShape::Triangle);
        assert_eq!(HandLength::unpack(&mut buf), HandLength::Long);
    }

    #[test]
    fn narrow_read_indexes_prefix() {
        let mut buf = BitBuffer::<1>::from_bytes([0b1101_0000]);
        assert_eq!(PipShape::unpack_narrow(&mut buf, 2), PipShape::Diamond);
        assert_eq!(PipSize::unpack_narrow(&mut buf, 2), PipSize::XShort);
        assert_eq!(buf.position(), 4);
    }

    #[test]
    fn wrapping_read_folds_wide_index() {
        let mut buf = BitBuffer::<1>::from_bytes([0b1111_0100]);
        assert_eq!(Material::unpack_wrapping(&mut buf, 3), Material::BaseAccent);
        assert_eq!(Material::unpack_wrapping(&mut buf, 3), Material::AccentFill);
        assert_eq!(buf.position(), 6);
    }

    #[test]
    fn cutout_parts() {
        assert_eq!(HandCutout::None.shape(), None);
        assert_eq!(HandCutout::None.style(), None);
        assert_eq!(HandCutout::TipPlusOne.shape(), Some(HandCutoutShape::Tip));
        assert_eq!(HandCutout::TipPlusOne.style(), Some(HandCutoutStyle::PlusOne));
        assert_eq!(
            HandCutout::HandStalkPlusThree.shape(),
            Some(HandCutoutShape::HandStalk)
        );
        assert_eq!(
            HandCutout::StalkPlusTwo.style(),
            Some(HandCutoutStyle::PlusTwo)
        );

        for shape in CUTOUT_SHAPES {
            for style in CUTOUT_STYLES {
                let cutout = HandCutout::from_parts(shape, style);
                assert_eq!(cutout.shape(), Some(shape));
                assert_eq!(cutout.style(), Some(style));
            }
        }
    }

    #[test]
    fn pips_visibility() {
        assert!(!PipsDisplay::None.shows_four());
        assert!(PipsDisplay::Four.shows_four());
        assert!(!PipsDisplay::Four.shows_twelve());
        assert!(PipsDisplay::FourTwelve.shows_twelve());
        assert!(!PipsDisplay::FourTwelve.shows_sixty());
        assert!(PipsDisplay::FourTwelveSixty.shows_sixty());
    }

    #[test]
    fn display_uses_variant_name() {
        assert_eq!(PipShape::Bar1_4.to_string(), "Bar1_4");
        assert_eq!(Typeface::ProductSansBold.to_string(), "ProductSansBold");
    }

    proptest::proptest! {
        #[test]
        fn unpack_then_pack_reproduces_bits(byte in proptest::prelude::any::<u8>()) {
            let mut buf = BitBuffer::<1>::from_bytes([byte]);
            let shape = PipShape::unpack(&mut buf);
            let size = PipSize::unpack(&mut buf);
            let rotation = DigitRotation::unpack(&mut buf);

            let mut out = BitBuffer::<1>::new();
            shape.pack(&mut out);
            size.pack(&mut out);
            rotation.pack(&mut out);
            proptest::prop_assert_eq!(out.as_bytes(), &[byte]);
        }
    }
}
