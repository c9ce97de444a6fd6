//! Versioned preset and settings codec for watch-face state.
//!
//! This is the main codec crate that ties together bitstream, schema, and
//! wire to turn a whole watch-face configuration into a short string and back.
//!
//! # Features
//!
//! - Preset and settings packing into a 128-bit buffer behind a 3-bit version
//! - Decoding of every historical preset layout into the current model
//! - Fast and display string forms, plus a short display fingerprint
//! - Combined `preset~settings` state strings
//! - Randomized presets biased by each field's sampling pool
//!
//! # Design Principles
//!
//! - **One description of the layout** - Packing and layout inspection walk
//!   the same [`schema::FieldVisitor`] sequence.
//! - **Upgrade on read** - Older layouts decode to a fully populated current
//!   model; encoding always writes the current version.
//! - **Unknown is an error** - Version tags without a decoder are rejected.

mod decode;
mod error;
mod model;
mod preset;
mod random;
mod settings;
mod state;

pub use error::{CodecError, CodecResult, ModelKind};
pub use model::{stored_version, Decoder, PackedModel, VERSION_BITS};
pub use preset::{
    Digits, Hand, MaterialStyle, Palette, Pips, Preset, SecondHand, PRESET_VERSION,
};
pub use schema::{
    ComplicationCount, ComplicationRotation, ComplicationScale, ComplicationSize, DigitDisplay,
    DigitFormat, DigitRotation, DigitSize, HandCutout, HandCutoutShape, HandCutoutStyle,
    HandLength, HandShape, HandStalk, HandThickness, Material, MaterialGradient, MaterialTexture,
    PackedField, PipMargin, PipShape, PipSize, PipsDisplay, SixBitColor, TextStyle, Typeface,
};
pub use settings::{Settings, SETTINGS_VERSION};
pub use state::{FaceState, SEPARATOR};
pub use wire::{Transport, TransportKey};
