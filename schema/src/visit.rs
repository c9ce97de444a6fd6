//! Ordered traversal of a model's packed fields.

use bitstream::BitBuffer;

use crate::PackedField;

/// Receives a model's fields in pack order.
///
/// A model describes its current layout once, by walking its fields through
/// a visitor. Writing into a [`BitBuffer`] encodes the model; a
/// [`LayoutRecorder`](crate::LayoutRecorder) describes the layout instead.
pub trait FieldVisitor {
    /// A raw unsigned tag such as a format version.
    fn tag(&mut self, name: &'static str, bits: usize, value: u8);

    /// An enumerated field at its current width.
    fn field<T: PackedField>(&mut self, name: &'static str, value: T);

    /// A one-bit flag.
    fn flag(&mut self, name: &'static str, value: bool);

    /// A six-bit palette colour index.
    fn color(&mut self, name: &'static str, value: u8);
}

impl<const LEN: usize> FieldVisitor for BitBuffer<LEN> {
    fn tag(&mut self, _name: &'static str, bits: usize, value: u8) {
        self.write_bits(u32::from(value), bits);
    }

    fn field<T: PackedField>(&mut self, _name: &'static str, value: T) {
        value.pack(self);
    }

    fn flag(&mut self, _name: &'static str, value: bool) {
        self.write_bool(value);
    }

    fn color(&mut self, _name: &'static str, value: u8) {
        self.write_six_bit_color(value);
    }
}
