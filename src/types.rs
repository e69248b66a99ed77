//! Shared types: [`SampleWidth`] and [`Revision`].

use std::fmt;

use crate::options::UnknownFormatPolicy;
use crate::{Result, SegdError};

/// 24-bit two's complement integer, demultiplexed.
pub const FORMAT_INT24: u16 = 8036;
/// 32-bit two's complement integer, demultiplexed.
pub const FORMAT_INT32: u16 = 8038;
/// 32-bit IEEE float, demultiplexed.
pub const FORMAT_IEEE32: u16 = 8058;

/// Width of one big-endian sample word in the trace payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleWidth {
    /// 3-byte samples, sign-extended to `i32`.
    Int24,
    /// 4-byte samples.
    Int32,
}

impl SampleWidth {
    /// Map a SEG-D format code to a sample width.
    ///
    /// 8038 and 8058 are 4-byte formats, 8036 is 3 bytes. Any other code is
    /// handled according to `policy`.
    pub fn from_format_code(code: u16, policy: UnknownFormatPolicy) -> Result<Self> {
        match code {
            FORMAT_IEEE32 | FORMAT_INT32 => Ok(Self::Int32),
            FORMAT_INT24 => Ok(Self::Int24),
            _ => match policy {
                UnknownFormatPolicy::Assume24Bit => {
                    log::warn!("format code {code} not recognised, reading 24-bit samples");
                    Ok(Self::Int24)
                }
                UnknownFormatPolicy::Reject => Err(SegdError::UnsupportedFormatCode(code)),
            },
        }
    }

    /// Size of one sample in bytes.
    pub fn bytes_per_sample(self) -> usize {
        match self {
            Self::Int24 => 3,
            Self::Int32 => 4,
        }
    }
}

impl fmt::Display for SampleWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int24 => write!(f, "24-bit"),
            Self::Int32 => write!(f, "32-bit"),
        }
    }
}

/// SEG-D revision number from general header block 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Revision {
    pub major: u8,
    pub minor: u8,
}

impl Revision {
    pub fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }

    /// True if this revision is `major.minor` or later.
    pub fn at_least(self, major: u8, minor: u8) -> bool {
        self >= Self::new(major, minor)
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
