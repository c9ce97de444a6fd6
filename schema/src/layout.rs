//! Bit layout descriptions.

use crate::{FieldVisitor, PackedField};

/// What a layout slot holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SlotKind {
    /// Raw unsigned tag.
    Tag,
    /// Enumerated field of the named type with `values` canonical values.
    Enum { type_name: &'static str, values: usize },
    /// One-bit flag.
    Flag,
    /// Six-bit palette colour index.
    Color,
}

/// One slot of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LayoutEntry {
    pub name: &'static str,
    pub kind: SlotKind,
    /// Bit offset from the start of the buffer.
    pub offset: usize,
    pub bits: usize,
}

/// The ordered slots a model occupies in its buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Layout {
    entries: Vec<LayoutEntry>,
}

impl Layout {
    /// Slots in pack order.
    #[must_use]
    pub fn entries(&self) -> &[LayoutEntry] {
        &self.entries
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bits used before padding.
    #[must_use]
    pub fn total_bits(&self) -> usize {
        self.entries.last().map_or(0, |entry| entry.offset + entry.bits)
    }

    /// Finds a slot by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&LayoutEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LayoutEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a Layout {
    type Item = &'a LayoutEntry;
    type IntoIter = std::slice::Iter<'a, LayoutEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A [`FieldVisitor`] that records slot positions instead of writing bits.
#[derive(Debug, Default)]
pub struct LayoutRecorder {
    entries: Vec<LayoutEntry>,
    offset: usize,
}

impl LayoutRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded layout.
    #[must_use]
    pub fn finish(self) -> Layout {
        Layout {
            entries: self.entries,
        }
    }

    fn push(&mut self, name: &'static str, kind: SlotKind, bits: usize) {
        self.entries.push(LayoutEntry {
            name,
            kind,
            offset: self.offset,
            bits,
        });
        self.offset += bits;
    }
}

impl FieldVisitor for LayoutRecorder {
    fn tag(&mut self, name: &'static str, bits: usize, _value: u8) {
        self.push(name, SlotKind::Tag, bits);
    }

    fn field<T: PackedField>(&mut self, name: &'static str, _value: T) {
        let kind = SlotKind::Enum {
            type_name: T::NAME,
            values: T::VALUES.len(),
        };
        self.push(name, kind, T::BITS);
    }

    fn flag(&mut self, name: &'static str, _value: bool) {
        self.push(name, SlotKind::Flag, 1);
    }

    fn color(&mut self, name: &'static str, _value: u8) {
        self.push(name, SlotKind::Color, bitstream::SIX_BIT_COLOR_BITS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HandCutout, PipSize};

    fn sample() -> Layout {
        let mut recorder = LayoutRecorder::new();
        recorder.tag("version", 3, 0);
        recorder.field("hour_hand_cutout", HandCutout::None);
        recorder.flag("twelve_pips_override", false);
        recorder.field("twelve_pip_size", PipSize::Medium);
        recorder.color("fill", 0);
        recorder.finish()
    }

    #[test]
    fn recorder_tracks_offsets() {
        let layout = sample();
        let offsets: Vec<_> = layout.iter().map(|e| (e.offset, e.bits)).collect();
        assert_eq!(offsets, vec![(0, 3), (3, 4), (7, 1), (8, 3), (11, 6)]);
        assert_eq!(layout.total_bits(), 17);
        assert_eq!(layout.len(), 5);
    }

    #[test]
    fn recorder_describes_kinds() {
        let layout = sample();
        assert_eq!(layout.get("version").map(|e| e.kind), Some(SlotKind::Tag));
        assert_eq!(
            layout.get("twelve_pip_size").map(|e| e.kind),
            Some(SlotKind::Enum {
                type_name: "PipSize",
                values: 8
            })
        );
        assert_eq!(layout.get("fill").map(|e| e.kind), Some(SlotKind::Color));
        assert!(layout.get("missing").is_none());
    }

    #[test]
    fn empty_layout() {
        let layout = LayoutRecorder::new().finish();
        assert!(layout.is_empty());
        assert_eq!(layout.total_bits(), 0);
    }
}
