use bitstream::{BitBuffer, BUFFER_LEN, MAX_FIELD_BITS};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Bool(bool),
    Bits { bits: usize, value: u32 },
    Color(u8),
}

impl Op {
    const fn width(&self) -> usize {
        match self {
            Self::Bool(_) => 1,
            Self::Bits { bits, .. } => *bits,
            Self::Color(_) => 6,
        }
    }
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<bool>().prop_map(Op::Bool),
        (1usize..=MAX_FIELD_BITS, any::<u32>()).prop_map(|(bits, value)| Op::Bits {
            bits,
            value: value & ((1 << bits) - 1),
        }),
        (0u8..64).prop_map(Op::Color),
    ]
}

/// Ops whose total width fits in the buffer.
fn fitting_ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 1..40).prop_map(|ops| {
        let mut total = 0;
        ops.into_iter()
            .take_while(|op| {
                total += op.width();
                total <= BUFFER_LEN * 8
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_roundtrip_ops(ops in fitting_ops(), seed in any::<[u8; BUFFER_LEN]>()) {
        // Start from arbitrary contents: every write must overwrite exactly its field.
        let mut buf = BitBuffer::from_bytes(seed);
        for op in &ops {
            match op {
                Op::Bool(b) => buf.write_bool(*b),
                Op::Bits { bits, value } => buf.write_bits(*value, *bits),
                Op::Color(c) => buf.write_six_bit_color(*c),
            }
        }

        buf.rewind();
        for op in &ops {
            match op {
                Op::Bool(b) => prop_assert_eq!(buf.read_bool(), *b),
                Op::Bits { bits, value } => prop_assert_eq!(u32::from(buf.read_bits(*bits)), *value),
                Op::Color(c) => prop_assert_eq!(buf.read_six_bit_color(), *c),
            }
        }
    }

    #[test]
    fn prop_write_leaves_other_bits_untouched(
        seed in any::<[u8; BUFFER_LEN]>(),
        offset in 0usize..(BUFFER_LEN * 8 - MAX_FIELD_BITS),
        bits in 1usize..=MAX_FIELD_BITS,
        value in any::<u32>(),
    ) {
        let mut buf = BitBuffer::from_bytes(seed);
        buf.discard_bits(offset);
        buf.write_bits(value, bits);

        for bit in 0..BUFFER_LEN * 8 {
            if (offset..offset + bits).contains(&bit) {
                continue;
            }
            let before = seed[bit / 8] >> (7 - bit % 8) & 1;
            let after = buf.as_bytes()[bit / 8] >> (7 - bit % 8) & 1;
            prop_assert_eq!(before, after, "bit {} changed", bit);
        }
    }

    #[test]
    fn prop_arbitrary_requests_never_panic(
        seed in any::<[u8; BUFFER_LEN]>(),
        requests in prop::collection::vec((0usize..64, any::<u32>(), any::<bool>()), 0..64),
    ) {
        let mut buf = BitBuffer::from_bytes(seed);
        for (bits, value, write) in requests {
            if write {
                buf.write_bits(value, bits);
            } else {
                let read = buf.read_bits(bits);
                prop_assert!(u32::from(read) < 1 << bits.min(MAX_FIELD_BITS));
            }
        }
        buf.finish();
    }
}
