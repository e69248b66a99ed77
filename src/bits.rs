//! Nibble and big-endian field extraction, and MP gain factor decoding.

use byteorder::{BigEndian, ByteOrder};

/// Upper four bits of `byte`.
pub fn high_nibble(byte: u8) -> u8 {
    byte >> 4
}

/// Lower four bits of `byte`.
pub fn low_nibble(byte: u8) -> u8 {
    byte & 0x0F
}

/// Big-endian `u16` at `offset`. Panics if `data` is too short.
pub fn be_u16(data: &[u8], offset: usize) -> u16 {
    BigEndian::read_u16(&data[offset..offset + 2])
}

/// Big-endian 24-bit unsigned value at `offset`.
pub fn be_u24(data: &[u8], offset: usize) -> u32 {
    BigEndian::read_u24(&data[offset..offset + 3])
}

/// Big-endian `i64` at `offset`.
pub fn be_i64(data: &[u8], offset: usize) -> i64 {
    BigEndian::read_i64(&data[offset..offset + 8])
}

/// Decode the sign-magnitude MP exponent from the two-byte descriptor.
///
/// `hi` carries the sign in bit 7 and the weights 2^4..2^-2 in bits 6..0;
/// `lo` carries 2^-3..2^-10. The 15 magnitude bits are therefore a fixed
/// point number with 10 fractional bits.
pub fn mp_exponent(lo: u8, hi: u8) -> f64 {
    let raw = u16::from_be_bytes([hi, lo]);
    let magnitude = (raw & 0x7FFF) as f64 / 1024.0;
    if raw & 0x8000 != 0 {
        -magnitude
    } else {
        magnitude
    }
}

/// MP factor `2^exponent` for the two-byte descriptor.
pub fn mp_factor(lo: u8, hi: u8) -> f64 {
    mp_exponent(lo, hi).exp2()
}
