//! Error types for SEG-D decoding.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SegdError {
    #[error("truncated file: needed {needed} bytes at offset {offset}")]
    TruncatedFile { offset: u64, needed: u64 },

    #[error("general header too short: expected at least {expected} bytes, got {actual}")]
    HeaderTooShort { expected: usize, actual: usize },

    #[error("channel set {index} header too short: expected 32 bytes, got {actual}")]
    ChannelSetTooShort { index: usize, actual: usize },

    #[error("channel set index {index} out of range ({count} channel sets)")]
    ChannelSetIndexOutOfRange { index: usize, count: usize },

    #[error("unsupported format code: {0}")]
    UnsupportedFormatCode(u16),

    #[error("invalid BCD digit in {field}: byte {byte:#04X}")]
    InvalidBcdDigit { field: &'static str, byte: u8 },

    #[error(
        "invalid timestamp: year {year}, day {day}, {hour:02}:{minute:02}:{second:02}"
    )]
    InvalidTimestamp {
        year: i32,
        day: u16,
        hour: u8,
        minute: u8,
        second: u8,
    },

    #[error("channel set {channel_set}: zero sample interval with a non-empty record window")]
    InvalidSampleInterval { channel_set: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SegdError>;
