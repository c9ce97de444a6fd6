//! Inspection and debugging tools for watch-face state strings.
//!
//! This crate provides utilities for understanding what a state string holds:
//!
//! - Decode preset and settings strings of any supported version
//! - Print every packed field with its value
//! - Describe the current bit layout and its fingerprint
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Human-readable output** - Make it easy to understand what the codec is doing.

use std::fmt::Write as _;

use codec::{
    stored_version, CodecError, CodecResult, PackedModel, Preset, Settings, Transport,
};
use schema::{layout_hash, FieldVisitor, Layout, PackedField, SlotKind, SIX_BIT_COLORS};
use serde::Serialize;

/// Which string form an input is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringForm {
    Fast,
    Display,
}

/// A decoded model together with the strings it re-encodes to.
#[derive(Debug, Clone, Serialize)]
pub struct ModelReport<T> {
    /// Version tag found in the input.
    pub stored_version: u8,
    /// Whether the input used an older layout.
    pub upgraded: bool,
    pub fast: String,
    pub display: String,
    pub hash: String,
    pub value: T,
}

/// Both halves of a decoded state string.
#[derive(Debug, Clone, Serialize)]
pub struct StateReport {
    pub preset: ModelReport<Preset>,
    pub settings: ModelReport<Settings>,
}

/// Decodes one model string and re-encodes it in every form.
pub fn decode_model<T: PackedModel>(
    s: &str,
    form: StringForm,
    transport: &Transport,
) -> CodecResult<ModelReport<T>> {
    let bytes = match form {
        StringForm::Fast => wire::from_fast_hex(s)?,
        StringForm::Display => transport.from_hex(s)?,
    };
    decode_bytes(bytes, transport)
}

/// Decodes a combined `preset~settings` display string.
pub fn decode_state(s: &str, transport: &Transport) -> CodecResult<StateReport> {
    let (preset, settings) = s
        .split_once(codec::SEPARATOR)
        .ok_or(CodecError::MissingSeparator)?;
    Ok(StateReport {
        preset: decode_bytes(transport.from_hex(preset)?, transport)?,
        settings: decode_bytes(transport.from_hex(settings)?, transport)?,
    })
}

fn decode_bytes<T: PackedModel>(
    bytes: [u8; wire::BLOCK_LEN],
    transport: &Transport,
) -> CodecResult<ModelReport<T>> {
    let version = stored_version(&bytes);
    let value = T::unpack(bytes)?;
    Ok(report(value, version, transport))
}

/// Reports a model that was not decoded from a string.
pub fn encode_model<T: PackedModel>(value: T, transport: &Transport) -> ModelReport<T> {
    report(value, T::CURRENT_VERSION, transport)
}

fn report<T: PackedModel>(value: T, version: u8, transport: &Transport) -> ModelReport<T> {
    ModelReport {
        stored_version: version,
        upgraded: version != T::CURRENT_VERSION,
        fast: value.to_fast_string(),
        display: value.to_display_string(transport),
        hash: value.hash(transport),
        value,
    }
}

/// Collects `(name, value)` pairs in pack order.
#[derive(Debug, Default)]
pub struct FieldDump {
    pub fields: Vec<(&'static str, String)>,
}

impl FieldVisitor for FieldDump {
    fn tag(&mut self, name: &'static str, _bits: usize, value: u8) {
        self.fields.push((name, value.to_string()));
    }

    fn field<T: PackedField>(&mut self, name: &'static str, value: T) {
        self.fields.push((name, format!("{value:?}")));
    }

    fn flag(&mut self, name: &'static str, value: bool) {
        self.fields.push((name, value.to_string()));
    }

    fn color(&mut self, name: &'static str, value: u8) {
        self.fields.push((name, value.to_string()));
    }
}

/// Colour slots holding a value that does not fit in six bits.
///
/// Packing keeps only the low six bits, so these would silently change.
pub fn out_of_range_colors<T: PackedModel>(value: &T) -> Vec<(&'static str, u8)> {
    let mut check = ColorCheck::default();
    value.visit(&mut check);
    check.0
}

#[derive(Default)]
struct ColorCheck(Vec<(&'static str, u8)>);

impl FieldVisitor for ColorCheck {
    fn tag(&mut self, _name: &'static str, _bits: usize, _value: u8) {}

    fn field<T: PackedField>(&mut self, _name: &'static str, _value: T) {}

    fn flag(&mut self, _name: &'static str, _value: bool) {}

    fn color(&mut self, name: &'static str, value: u8) {
        if value >= SIX_BIT_COLORS {
            self.0.push((name, value));
        }
    }
}

/// Human-readable listing of a decoded model.
pub fn format_model_pretty<T: PackedModel>(label: &str, report: &ModelReport<T>) -> String {
    let mut dump = FieldDump::default();
    report.value.visit(&mut dump);

    let mut out = String::new();
    let _ = writeln!(out, "{label}:");
    let _ = write!(out, "  stored version: {}", report.stored_version);
    if report.upgraded {
        let _ = write!(out, " (upgraded to {})", T::CURRENT_VERSION);
    }
    out.push('\n');
    let _ = writeln!(out, "  fast: {}", report.fast);
    let _ = writeln!(out, "  display: {}", report.display);
    let _ = writeln!(out, "  hash: {}", report.hash);
    let width = dump.fields.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, value) in &dump.fields {
        let _ = writeln!(out, "  {name:<width$}  {value}");
    }
    out
}

/// Offset, width and name of each slot, followed by the layout hash.
pub fn format_layout(layout: &Layout) -> String {
    let mut out = String::new();
    for entry in layout {
        let kind = match entry.kind {
            SlotKind::Tag => "tag".to_string(),
            SlotKind::Enum { type_name, values } => format!("{type_name} ({values})"),
            SlotKind::Flag => "flag".to_string(),
            SlotKind::Color => "color".to_string(),
        };
        let _ = writeln!(
            out,
            "{:>4} {:>2}  {:<28} {kind}",
            entry.offset, entry.bits, entry.name
        );
    }
    let _ = writeln!(out, "total bits: {}", layout.total_bits());
    let _ = writeln!(out, "layout hash: 0x{:016x}", layout_hash(layout));
    out
}
