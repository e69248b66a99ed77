//! Packed binary-coded-decimal decoding.
//!
//! Most SEG-D header fields store two decimal digits per byte, high nibble
//! first, most significant byte first. [`decode_pbcd`] is the plain
//! arithmetic decoder; [`decode_pbcd_checked`] rejects nibbles above 9.

use crate::options::BcdPolicy;
use crate::{Result, SegdError};

/// Decode packed BCD without validating digits.
///
/// Every byte contributes `10 * high + low` to a base-100 accumulator, so a
/// nibble of 10-15 is folded in as-is: `[0xFF]` decodes to 165.
pub fn decode_pbcd(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0u64, |acc, &b| {
        let (high, low) = ((b >> 4) as u64, (b & 0x0F) as u64);
        acc.wrapping_mul(100).wrapping_add(10 * high + low)
    })
}

/// Decode packed BCD, failing on the first nibble above 9.
pub fn decode_pbcd_checked(bytes: &[u8], field: &'static str) -> Result<u64> {
    if let Some(&byte) = bytes.iter().find(|&&b| b >> 4 > 9 || b & 0x0F > 9) {
        return Err(SegdError::InvalidBcdDigit { field, byte });
    }
    Ok(decode_pbcd(bytes))
}

/// Decode packed BCD under the given policy.
pub fn pbcd(bytes: &[u8], policy: BcdPolicy, field: &'static str) -> Result<u64> {
    match policy {
        BcdPolicy::Strict => decode_pbcd_checked(bytes, field),
        BcdPolicy::Lenient => Ok(decode_pbcd(bytes)),
    }
}

/// Validate a single BCD digit held in the low nibble of `nibble`.
pub fn bcd_digit(nibble: u8, policy: BcdPolicy, field: &'static str) -> Result<u8> {
    if policy == BcdPolicy::Strict && nibble > 9 {
        return Err(SegdError::InvalidBcdDigit {
            field,
            byte: nibble,
        });
    }
    Ok(nibble)
}
