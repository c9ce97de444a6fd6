//! Deterministic layout hashing.

use blake3::Hasher;

use crate::{Layout, SlotKind};

/// Computes a deterministic fingerprint of a layout.
///
/// Any change to slot order, names, widths or value counts changes the hash.
#[must_use]
pub fn layout_hash(layout: &Layout) -> u64 {
    let mut hasher = Hasher::new();
    write_len(&mut hasher, layout.len());

    for entry in layout {
        write_str(&mut hasher, entry.name);
        write_kind(&mut hasher, entry.kind);
        write_len(&mut hasher, entry.offset);
        write_len(&mut hasher, entry.bits);
    }

    let hash = hasher.finalize();
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(prefix)
}

fn write_kind(hasher: &mut Hasher, kind: SlotKind) {
    match kind {
        SlotKind::Tag => {
            write_u8(hasher, 0);
        }
        SlotKind::Enum { type_name, values } => {
            write_u8(hasher, 1);
            write_str(hasher, type_name);
            write_len(hasher, values);
        }
        SlotKind::Flag => {
            write_u8(hasher, 2);
        }
        SlotKind::Color => {
            write_u8(hasher, 3);
        }
    }
}

fn write_str(hasher: &mut Hasher, value: &str) {
    write_len(hasher, value.len());
    hasher.update(value.as_bytes());
}

fn write_u8(hasher: &mut Hasher, value: u8) {
    hasher.update(&[value]);
}

fn write_len(hasher: &mut Hasher, value: usize) {
    hasher.update(&(value as u64).to_le_bytes());
}
