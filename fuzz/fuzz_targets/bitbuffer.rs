#![no_main]

use bitstream::BitBuffer;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut seed = [0u8; 16];
    let len = data.len().min(16);
    seed[..len].copy_from_slice(&data[..len]);
    let mut buf = BitBuffer::<16>::from_bytes(seed);
    let mut idx = len;

    // Use the remaining bytes to drive a bounded sequence of operations.
    while idx < data.len() && idx < 1024 {
        let op = data[idx] % 8;
        let arg = data.get(idx + 1).copied().unwrap_or(0);
        idx += 2;

        match op {
            0 => buf.write_bits(u32::from(arg), usize::from(arg % 10)),
            1 => {
                let bits = usize::from(arg % 10);
                let value = buf.read_bits(bits);
                assert!(bits >= 8 || u32::from(value) < (1u32 << bits));
            }
            2 => buf.write_bool(arg & 1 == 1),
            3 => {
                let _ = buf.read_bool();
            }
            4 => buf.write_six_bit_color(arg),
            5 => assert!(buf.read_six_bit_color() < 64),
            6 => buf.rewind(),
            _ => buf.finish(),
        }
    }
});
