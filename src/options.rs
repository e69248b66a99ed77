//! Decoder configuration: [`DecodeOptions`], [`BcdPolicy`], and
//! [`UnknownFormatPolicy`].

/// How packed-BCD fields containing nibbles 10-15 are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BcdPolicy {
    /// Reject any nibble above 9 with [`SegdError::InvalidBcdDigit`](crate::SegdError).
    #[default]
    Strict,
    /// Fold every nibble into the result as-is (`0xFF` decodes to 165).
    Lenient,
}

/// What to do with a format code that is neither a known 24-bit nor a
/// known 32-bit sample format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownFormatPolicy {
    /// Read samples as 3-byte big-endian integers and log a warning.
    #[default]
    Assume24Bit,
    /// Fail with [`SegdError::UnsupportedFormatCode`](crate::SegdError).
    Reject,
}

/// Options controlling how a SEG-D file is decoded.
///
/// ```
/// use segd_rs::{BcdPolicy, DecodeOptions, UnknownFormatPolicy};
///
/// let options = DecodeOptions::new()
///     .with_bcd_policy(BcdPolicy::Lenient)
///     .with_unknown_format(UnknownFormatPolicy::Reject);
/// assert_eq!(options.bcd, BcdPolicy::Lenient);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    pub bcd: BcdPolicy,
    pub unknown_format: UnknownFormatPolicy,
}

impl DecodeOptions {
    /// Strict BCD, 24-bit fallback for unknown format codes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the BCD digit policy.
    pub fn with_bcd_policy(mut self, policy: BcdPolicy) -> Self {
        self.bcd = policy;
        self
    }

    /// Set the unknown format code policy.
    pub fn with_unknown_format(mut self, policy: UnknownFormatPolicy) -> Self {
        self.unknown_format = policy;
        self
    }
}
