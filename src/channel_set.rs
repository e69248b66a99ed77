//! Channel-set header decoding.
//!
//! Each channel set is described by one 32-byte block following the three
//! general header blocks. [`ChannelSetHeader`] holds the decoded fields;
//! [`ChannelSet`] pairs it with the [`TraceLayout`] computed when the file
//! is walked.

use std::fmt;

use crate::bcd::{bcd_digit, pbcd};
use crate::bits::{be_u16, high_nibble, mp_exponent, mp_factor};
use crate::layout::TraceLayout;
use crate::options::{BcdPolicy, DecodeOptions};
use crate::{Result, SegdError};

/// Size of one channel-set descriptor block.
pub const CHANNEL_SET_HEADER_LEN: usize = 32;

/// Decoded 32-byte channel-set descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSetHeader {
    pub channel_set_id: u8,
    /// Record window start in milliseconds.
    pub start_time_ms: u32,
    /// Record window end in milliseconds.
    pub stop_time_ms: u32,
    /// Signed MP exponent; `mp_factor == 2^mp_exponent`.
    pub mp_exponent: f64,
    pub mp_factor: f64,
    pub channel_count: u16,
    pub channel_type: u8,
    /// Nominal samples per channel (`2^n`), not used for layout.
    pub samples_per_channel: u32,
    pub alias_filter_frequency: u16,
    pub alias_filter_slope: u16,
    pub high_pass_filter_frequency: u16,
    pub high_pass_filter_slope: u16,
    pub streamer_number: u8,
    pub array_forming_code: u8,
}

impl ChannelSetHeader {
    /// Decode channel-set header number `index` from `data`.
    pub fn decode(index: usize, data: &[u8], options: &DecodeOptions) -> Result<Self> {
        if data.len() < CHANNEL_SET_HEADER_LEN {
            return Err(SegdError::ChannelSetTooShort {
                index,
                actual: data.len(),
            });
        }
        let bcd = options.bcd;

        let header = Self {
            channel_set_id: pbcd(&data[1..2], bcd, "channel set id")? as u8,
            start_time_ms: be_u16(data, 2) as u32 * 2,
            stop_time_ms: be_u16(data, 4) as u32 * 2,
            mp_exponent: mp_exponent(data[6], data[7]),
            mp_factor: mp_factor(data[6], data[7]),
            channel_count: pbcd(&data[8..10], bcd, "channel count")? as u16,
            channel_type: high_nibble(data[10]),
            samples_per_channel: 1u32 << high_nibble(data[11]),
            alias_filter_frequency: pbcd(&data[12..14], bcd, "alias filter frequency")? as u16,
            alias_filter_slope: filter_slope(data[14], data[15], bcd, "alias filter slope")?,
            high_pass_filter_frequency: pbcd(&data[16..18], bcd, "high-pass filter")? as u16,
            high_pass_filter_slope: filter_slope(data[18], data[19], bcd, "high-pass slope")?,
            streamer_number: data[30],
            array_forming_code: data[31],
        };

        log::debug!(
            "channel set {index}: id {}, {} channels, {}..{} ms",
            header.channel_set_id,
            header.channel_count,
            header.start_time_ms,
            header.stop_time_ms
        );
        Ok(header)
    }
}

/// Slope in dB/octave: hundreds in the high nibble of `hundreds`, the
/// remaining two digits packed BCD in `rest`.
fn filter_slope(hundreds: u8, rest: u8, policy: BcdPolicy, field: &'static str) -> Result<u16> {
    let h = bcd_digit(high_nibble(hundreds), policy, field)? as u16;
    Ok(h * 100 + pbcd(&[rest], policy, field)? as u16)
}

impl fmt::Display for ChannelSetHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "channel set {} | {}..{} ms | {} channels (type {}) | MP {}",
            self.channel_set_id,
            self.start_time_ms,
            self.stop_time_ms,
            self.channel_count,
            self.channel_type,
            self.mp_factor,
        )
    }
}

/// A channel-set header together with the location of its trace block.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSet {
    pub header: ChannelSetHeader,
    pub layout: TraceLayout,
}

impl ChannelSet {
    /// Number of traces in this channel set.
    pub fn trace_count(&self) -> usize {
        self.header.channel_count as usize
    }

    /// Sample times in seconds, evenly spaced from the record window start
    /// to its end inclusive, one per sample.
    pub fn sample_times(&self) -> Vec<f64> {
        let n = self.layout.sample_count;
        let start = self.header.start_time_ms as f64 * 1e-3;
        let stop = self.header.stop_time_ms as f64 * 1e-3;
        match n {
            0 => Vec::new(),
            1 => vec![start],
            _ => {
                let step = (stop - start) / (n - 1) as f64;
                (0..n).map(|i| start + step * i as f64).collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_block() -> [u8; 32] {
        let mut b = [0u8; 32];
        b[1] = 0x01; // id 1
        b[2..4].copy_from_slice(&0u16.to_be_bytes());
        b[4..6].copy_from_slice(&2000u16.to_be_bytes()); // 4000 ms
        b[6] = 0x00;
        b[7] = 0x84; // MP exponent -1
        b[8] = 0x01;
        b[9] = 0x20; // 120 channels
        b[10] = 0x10; // type 1
        b[11] = 0xA0; // 2^10
        b[12] = 0x02;
        b[13] = 0x06; // 206 Hz
        b[14] = 0x20;
        b[15] = 0x76; // 276 dB/oct
        b[16] = 0x00;
        b[17] = 0x03; // 3 Hz
        b[18] = 0x00;
        b[19] = 0x18; // 18 dB/oct
        b[30] = 7;
        b[31] = 2;
        b
    }

    #[test]
    fn test_decode_fields() {
        let h = ChannelSetHeader::decode(0, &sample_block(), &DecodeOptions::default()).unwrap();
        assert_eq!(h.channel_set_id, 1);
        assert_eq!(h.start_time_ms, 0);
        assert_eq!(h.stop_time_ms, 4000);
        assert_eq!(h.mp_exponent, -1.0);
        assert_eq!(h.mp_factor, 0.5);
        assert_eq!(h.channel_count, 120);
        assert_eq!(h.channel_type, 1);
        assert_eq!(h.samples_per_channel, 1024);
        assert_eq!(h.alias_filter_frequency, 206);
        assert_eq!(h.alias_filter_slope, 276);
        assert_eq!(h.high_pass_filter_frequency, 3);
        assert_eq!(h.high_pass_filter_slope, 18);
        assert_eq!(h.streamer_number, 7);
        assert_eq!(h.array_forming_code, 2);
    }

    #[test]
    fn test_zero_gain_descriptor() {
        let mut block = sample_block();
        block[6] = 0;
        block[7] = 0;
        let h = ChannelSetHeader::decode(0, &block, &DecodeOptions::default()).unwrap();
        assert_eq!(h.mp_factor, 1.0);
    }

    #[test]
    fn test_short_block_names_index() {
        let block = sample_block();
        let err = ChannelSetHeader::decode(3, &block[..20], &DecodeOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            SegdError::ChannelSetTooShort {
                index: 3,
                actual: 20
            }
        ));
    }

    #[test]
    fn test_invalid_bcd_policy() {
        let mut block = sample_block();
        block[9] = 0x2F;
        let strict = DecodeOptions::default();
        assert!(matches!(
            ChannelSetHeader::decode(0, &block, &strict),
            Err(SegdError::InvalidBcdDigit {
                field: "channel count",
                ..
            })
        ));
        let lenient = DecodeOptions::new().with_bcd_policy(BcdPolicy::Lenient);
        let h = ChannelSetHeader::decode(0, &block, &lenient).unwrap();
        assert_eq!(h.channel_count, 100 + 35);
    }

    #[test]
    fn test_sample_times() {
        let header =
            ChannelSetHeader::decode(0, &sample_block(), &DecodeOptions::default()).unwrap();
        let set = ChannelSet {
            header,
            layout: TraceLayout {
                file_offset: 0,
                trace_header_length: 20,
                sample_count: 5,
                trace_byte_length: 20 + 5 * 4,
            },
        };
        assert_eq!(set.trace_count(), 120);
        assert_eq!(set.sample_times(), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }
}
