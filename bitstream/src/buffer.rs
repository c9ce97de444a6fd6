//! Fixed-capacity bit buffer with a lenient cursor.

use crate::error::{BitError, BitResult};

/// Default buffer length in bytes (128 bits).
pub const BUFFER_LEN: usize = 16;

/// Widest field a single read or write can carry.
pub const MAX_FIELD_BITS: usize = 8;

/// Width of a six-bit palette colour index.
pub const SIX_BIT_COLOR_BITS: usize = 6;

/// A fixed-length byte buffer addressed bit by bit, MSB first.
///
/// Reads and writes carry 0 to 8 bits at the cursor and advance it. Requests
/// that do not fit are clamped rather than rejected:
///
/// - the length is clamped to `[0, 8]`;
/// - the effective start is clamped to `[0, LEN * 8 - length]`, so a request
///   past the end lands on the last `length` bits of the buffer.
///
/// No call can index outside the buffer, whatever the cursor or length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitBuffer<const LEN: usize = BUFFER_LEN> {
    bytes: [u8; LEN],
    cursor: usize,
}

impl<const LEN: usize> Default for BitBuffer<LEN> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const LEN: usize> BitBuffer<LEN> {
    /// Creates a zeroed buffer with the cursor at bit 0.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bytes: [0; LEN],
            cursor: 0,
        }
    }

    /// Adopts existing bytes; the cursor starts at bit 0.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; LEN]) -> Self {
        Self { bytes, cursor: 0 }
    }

    /// Adopts bytes from a slice that must be exactly `LEN` long.
    pub fn from_slice(bytes: &[u8]) -> BitResult<Self> {
        let bytes: [u8; LEN] = bytes.try_into().map_err(|_| BitError::LengthMismatch {
            expected: LEN,
            found: bytes.len(),
        })?;
        Ok(Self::from_bytes(bytes))
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; LEN] {
        &self.bytes
    }

    /// Consumes the buffer and returns its bytes.
    #[must_use]
    pub fn into_bytes(self) -> [u8; LEN] {
        self.bytes
    }

    /// Total capacity in bits.
    #[must_use]
    pub const fn capacity_bits(&self) -> usize {
        LEN * 8
    }

    /// Returns the cursor (bit offset of the next read or write).
    ///
    /// The cursor only ever moves forward between rewinds and may run past
    /// the capacity; further requests are then clamped onto the tail.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.cursor
    }

    /// Returns the number of bits between the cursor and the end.
    #[must_use]
    pub const fn bits_remaining(&self) -> usize {
        self.capacity_bits().saturating_sub(self.cursor)
    }

    /// Moves the cursor back to bit 0. The contents are left untouched.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Writes the low `bits` bits of `value` at the cursor and advances it.
    ///
    /// Higher bits of `value` are discarded so they never leak into the
    /// neighbouring fields.
    pub fn write_bits(&mut self, value: u32, bits: usize) {
        let bits = bits.min(MAX_FIELD_BITS);
        if let Some(start) = self.clamped_start(bits) {
            // Masked to `bits` (at most 8), so the narrowing is exact.
            let value = (value & u32::from(low_mask(bits))) as u8;
            self.store(start, bits, value);
        }
        self.cursor = self.cursor.saturating_add(bits);
    }

    /// Reads `bits` bits at the cursor as an unsigned value and advances it.
    pub fn read_bits(&mut self, bits: usize) -> u8 {
        let bits = bits.min(MAX_FIELD_BITS);
        let value = self
            .clamped_start(bits)
            .map_or(0, |start| self.load(start, bits));
        self.cursor = self.cursor.saturating_add(bits);
        value
    }

    /// Reads and drops `bits` bits, keeping the cursor aligned with a layout
    /// that still reserves space for a removed field.
    ///
    /// Unlike [`read_bits`](Self::read_bits), any width is accepted.
    pub fn discard_bits(&mut self, bits: usize) {
        self.cursor = self.cursor.saturating_add(bits);
    }

    /// Writes a single bit.
    pub fn write_bool(&mut self, value: bool) {
        self.write_bits(u32::from(value), 1);
    }

    /// Reads a single bit.
    pub fn read_bool(&mut self) -> bool {
        self.read_bits(1) == 1
    }

    /// Writes a six-bit palette colour index (0..=63).
    pub fn write_six_bit_color(&mut self, value: u8) {
        self.write_bits(u32::from(value), SIX_BIT_COLOR_BITS);
    }

    /// Reads a six-bit palette colour index (0..=63).
    pub fn read_six_bit_color(&mut self) -> u8 {
        self.read_bits(SIX_BIT_COLOR_BITS)
    }

    /// Writes the position of `target` within `values`.
    ///
    /// Falls back to writing 0 when `target` is not present.
    pub fn write_lookup<T: PartialEq>(&mut self, bits: usize, values: &[T], target: &T) {
        let index = values.iter().position(|value| value == target).unwrap_or(0);
        self.write_bits(u32::try_from(index).unwrap_or(0), bits);
    }

    /// Zero-fills every bit from the cursor up to the final bit.
    ///
    /// The final bit of the buffer is reserved and never written here.
    pub fn finish(&mut self) {
        let last = self.capacity_bits().saturating_sub(1);
        while self.cursor < last {
            let bits = (last - self.cursor).min(MAX_FIELD_BITS);
            self.write_bits(0, bits);
        }
    }

    /// Effective start bit for a `bits`-wide access, or `None` for no-ops.
    fn clamped_start(&self, bits: usize) -> Option<usize> {
        if bits == 0 || bits > self.capacity_bits() {
            return None;
        }
        Some(self.cursor.min(self.capacity_bits() - bits))
    }

    fn store(&mut self, start: usize, bits: usize, value: u8) {
        let start_byte = start / 8;
        // Bits still free in the first byte, 1..=8.
        let start_bit = 8 - start % 8;
        if bits <= start_bit {
            // Fits in one byte.
            let shift = start_bit - bits;
            let mask = low_mask(bits) << shift;
            let byte = &mut self.bytes[start_byte];
            *byte = (*byte & !mask) | (value << shift);
        } else {
            // Spans exactly two bytes: the high part fills the low bits of
            // byte 0, the low part fills the high bits of byte 1.
            let low_len = bits - start_bit;
            let mask0 = low_mask(start_bit);
            let mask1 = !low_mask(8 - low_len);
            let byte0 = value >> low_len;
            let byte1 = value << (8 - low_len);
            self.bytes[start_byte] = (self.bytes[start_byte] & !mask0) | byte0;
            self.bytes[start_byte + 1] = (self.bytes[start_byte + 1] & !mask1) | byte1;
        }
    }

    fn load(&self, start: usize, bits: usize) -> u8 {
        let start_byte = start / 8;
        let start_bit = 8 - start % 8;
        if bits <= start_bit {
            let shift = start_bit - bits;
            (self.bytes[start_byte] >> shift) & low_mask(bits)
        } else {
            let low_len = bits - start_bit;
            let high = (self.bytes[start_byte] & low_mask(start_bit)) << low_len;
            let low = self.bytes[start_byte + 1] >> (8 - low_len);
            high | low
        }
    }
}

const fn low_mask(bits: usize) -> u8 {
    if bits >= 8 {
        0xFF
    } else {
        (1u8 << bits) - 1
    }
}
