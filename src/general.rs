//! General header decoding (blocks 1-3).
//!
//! Block 1 carries the classic packed-BCD fields. Block 2 carries the
//! revision and the wide binary replacements for block 1 fields whose BCD
//! form is saturated (all bits set). Block 3 starts with the GPS fine
//! timestamp introduced in revision 3.0.

use chrono::NaiveDateTime;

use crate::bcd::{bcd_digit, pbcd};
use crate::bits::{be_i64, be_u16, be_u24, high_nibble, low_nibble};
use crate::options::DecodeOptions;
use crate::time::{expand_year, gps_time, record_timestamp};
use crate::types::{Revision, SampleWidth};
use crate::{Result, SegdError};

/// Size of one general header block.
pub const GENERAL_BLOCK_LEN: usize = 32;

/// Number of fixed general header blocks.
pub const GENERAL_BLOCK_COUNT: usize = 3;

/// Total size of the fixed general header.
pub const GENERAL_HEADER_LEN: usize = GENERAL_BLOCK_LEN * GENERAL_BLOCK_COUNT;

/// Scale from the BCD record length field to seconds.
const RECORD_LENGTH_SCALE: f64 = 1.024;

/// Decoded general header.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneralHeader {
    pub file_number: u32,
    pub format_code: u16,
    /// Sample word width implied by `format_code`.
    pub sample_width: SampleWidth,
    pub revision: Revision,
    pub timestamp: NaiveDateTime,
    /// Additional general header blocks beyond block 1.
    pub additional_block_count: u8,
    /// Base scan interval in whole milliseconds; fractions are dropped.
    pub sample_interval_ms: u8,
    /// Nominal record length in seconds.
    pub nominal_trace_length: f64,
    pub channel_set_count: u16,
    pub skew_block_count: u8,
    pub extended_header_block_count: u16,
    pub external_header_block_count: u16,
    /// Raw block 3 fine timestamp. Only meaningful from revision 3.0 on.
    pub gps_fine_timestamp: i64,
}

impl GeneralHeader {
    /// Decode the three general header blocks from `data`.
    pub fn decode(data: &[u8], options: &DecodeOptions) -> Result<Self> {
        if data.len() < GENERAL_HEADER_LEN {
            return Err(SegdError::HeaderTooShort {
                expected: GENERAL_HEADER_LEN,
                actual: data.len(),
            });
        }
        let bcd = options.bcd;
        let b1 = &data[..GENERAL_BLOCK_LEN];
        let b2 = &data[GENERAL_BLOCK_LEN..2 * GENERAL_BLOCK_LEN];
        let b3 = &data[2 * GENERAL_BLOCK_LEN..GENERAL_HEADER_LEN];

        let file_number = if b1[0..2] == [0xFF, 0xFF] {
            be_u24(b2, 0)
        } else {
            pbcd(&b1[0..2], bcd, "file number")? as u32
        };
        let format_code = pbcd(&b1[2..4], bcd, "format code")? as u16;

        let year = expand_year(pbcd(&b1[10..11], bcd, "year")? as u8);
        let julian_day = bcd_digit(low_nibble(b1[11]), bcd, "julian day")? as u16 * 100
            + pbcd(&b1[12..13], bcd, "julian day")? as u16;
        let hour = pbcd(&b1[13..14], bcd, "hour")? as u8;
        let minute = pbcd(&b1[14..15], bcd, "minute")? as u8;
        let second = pbcd(&b1[15..16], bcd, "second")? as u8;
        let timestamp = record_timestamp(year, julian_day, hour, minute, second)?;

        let nominal_trace_length = if low_nibble(b1[25]) == 0x0F && b1[26] == 0xFF {
            let extended = be_u24(b2, 14) as f64 * 1e-3;
            log::debug!("record length saturated, using extended length {extended} s");
            extended
        } else {
            let tens = bcd_digit(low_nibble(b1[25]), bcd, "record length")? as f64 * 10.0;
            let rest = pbcd(&b1[26..27], bcd, "record length")? as f64 / 10.0;
            (tens + rest) * RECORD_LENGTH_SCALE
        };

        let channel_set_count = if b1[28] == 0xFF {
            be_u16(b2, 3)
        } else {
            pbcd(&b1[28..29], bcd, "channel sets")? as u16
        };
        let extended_header_block_count = if b1[30] == 0xFF {
            be_u16(b2, 5)
        } else {
            pbcd(&b1[30..31], bcd, "extended header blocks")? as u16
        };
        let external_header_block_count = if b1[31] == 0xFF {
            be_u16(b2, 7)
        } else {
            pbcd(&b1[31..32], bcd, "external header blocks")? as u16
        };

        let header = Self {
            file_number,
            format_code,
            sample_width: SampleWidth::from_format_code(format_code, options.unknown_format)?,
            revision: Revision::new(
                pbcd(&b2[10..11], bcd, "revision")? as u8,
                pbcd(&b2[11..12], bcd, "revision")? as u8,
            ),
            timestamp,
            additional_block_count: high_nibble(b1[11]),
            sample_interval_ms: high_nibble(b1[22]),
            nominal_trace_length,
            channel_set_count,
            skew_block_count: pbcd(&b1[29..30], bcd, "skew blocks")? as u8,
            extended_header_block_count,
            external_header_block_count,
            gps_fine_timestamp: be_i64(b3, 0),
        };

        log::debug!(
            "general header: file {}, format {}, rev {}, {} channel sets, {}+{} extra blocks",
            header.file_number,
            header.format_code,
            header.revision,
            header.channel_set_count,
            header.extended_header_block_count,
            header.external_header_block_count
        );
        Ok(header)
    }

    /// Sample interval in seconds.
    pub fn sample_interval(&self) -> f64 {
        self.sample_interval_ms as f64 * 1e-3
    }

    /// GPS fine timestamp in microseconds, if the revision defines one.
    pub fn fine_timestamp(&self) -> Option<i64> {
        self.revision
            .at_least(3, 0)
            .then_some(self.gps_fine_timestamp)
    }

    /// GPS fine timestamp as a calendar time, if the revision defines one.
    pub fn gps_time(&self) -> Option<NaiveDateTime> {
        self.fine_timestamp().and_then(gps_time)
    }
}
