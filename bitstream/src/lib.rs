//! Fixed-capacity bit packing primitives for the watchkit state codec.
//!
//! This crate provides [`BitBuffer`], a 128-bit (by default) buffer with a bit
//! cursor that reads and writes fields of 1 to 8 bits, MSB first.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Lenient, never out of bounds** - Out-of-range lengths and positions are
//!   clamped onto the buffer instead of being rejected.
//! - **No domain knowledge** - This crate knows nothing about presets or fields.
//! - **Deterministic padding** - [`BitBuffer::finish`] zero-fills the unused tail.
//!
//! # Example
//!
//! ```
//! use bitstream::BitBuffer;
//!
//! let mut buf = BitBuffer::<16>::new();
//! buf.write_bits(3, 3);
//! buf.write_bool(true);
//! buf.write_six_bit_color(42);
//! buf.finish();
//!
//! buf.rewind();
//! assert_eq!(buf.read_bits(3), 3);
//! assert!(buf.read_bool());
//! assert_eq!(buf.read_six_bit_color(), 42);
//! ```

mod buffer;
mod error;

pub use buffer::{BitBuffer, BUFFER_LEN, MAX_FIELD_BITS, SIX_BIT_COLOR_BITS};
pub use error::{BitError, BitResult};
