//! Trace block layout.
//!
//! Trace blocks have no index: each channel set's traces start where the
//! previous channel set's traces end, and a trace's header length is only
//! known after peeking at its first 20 bytes. [`walk`] folds a cursor over
//! the channel sets in file order, asking a [`TraceHeaderSource`] for those
//! 20 bytes, and produces one [`TraceLayout`] per channel set.

use std::io::{Read, Seek};

use crate::channel_set::ChannelSetHeader;
use crate::reader::read_at;
use crate::types::SampleWidth;
use crate::{Result, SegdError};

/// Length of the fixed part of every trace header.
pub const TRACE_HEADER_BASE_LEN: usize = 20;

/// Length of one trace header extension block.
pub const TRACE_EXTENSION_BLOCK_LEN: u64 = 32;

/// Byte of the trace header holding the extension block count.
const EXTENSION_COUNT_BYTE: usize = 9;

/// Where a channel set's traces live and how long each one is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceLayout {
    /// Absolute offset of the first trace header.
    pub file_offset: u64,
    /// Trace header length including extension blocks.
    pub trace_header_length: u64,
    /// Samples per trace, derived from the record window.
    pub sample_count: usize,
    /// Header plus sample bytes of a single trace.
    pub trace_byte_length: u64,
}

impl TraceLayout {
    /// Offset of the header of trace `trace` within this channel set.
    pub fn trace_offset(&self, trace: usize) -> u64 {
        self.file_offset + trace as u64 * self.trace_byte_length
    }

    /// Offset of the first sample of trace `trace`.
    pub fn samples_offset(&self, trace: usize) -> u64 {
        self.trace_offset(trace) + self.trace_header_length
    }

    /// Bytes occupied by `trace_count` consecutive traces.
    pub fn block_length(&self, trace_count: usize) -> u64 {
        trace_count as u64 * self.trace_byte_length
    }
}

/// Supplies the fixed 20-byte part of the trace header at an offset.
pub trait TraceHeaderSource {
    fn trace_header(&mut self, offset: u64) -> Result<[u8; TRACE_HEADER_BASE_LEN]>;
}

/// [`TraceHeaderSource`] backed by a seekable reader.
pub struct ReaderSource<'a, R> {
    reader: &'a mut R,
}

impl<'a, R: Read + Seek> ReaderSource<'a, R> {
    pub fn new(reader: &'a mut R) -> Self {
        Self { reader }
    }
}

impl<R: Read + Seek> TraceHeaderSource for ReaderSource<'_, R> {
    fn trace_header(&mut self, offset: u64) -> Result<[u8; TRACE_HEADER_BASE_LEN]> {
        let mut buf = [0u8; TRACE_HEADER_BASE_LEN];
        read_at(self.reader, offset, &mut buf)?;
        Ok(buf)
    }
}

/// Samples in a record window, rounded to the nearest whole sample.
///
/// A window that ends before it starts holds no samples.
pub fn sample_count(
    start_ms: u32,
    stop_ms: u32,
    interval_ms: u8,
    channel_set: usize,
) -> Result<usize> {
    let span = stop_ms.saturating_sub(start_ms) as u64;
    if span == 0 {
        return Ok(0);
    }
    if interval_ms == 0 {
        return Err(SegdError::InvalidSampleInterval { channel_set });
    }
    let interval = interval_ms as u64;
    Ok(((span + interval / 2) / interval) as usize)
}

/// Compute the layout of every channel set, starting at `first_trace`.
///
/// Channel sets are visited in declaration order; the entry point of each
/// is the entry point of the previous one plus its traces' total length.
pub fn walk<S: TraceHeaderSource>(
    first_trace: u64,
    channel_sets: &[ChannelSetHeader],
    interval_ms: u8,
    width: SampleWidth,
    source: &mut S,
) -> Result<Vec<TraceLayout>> {
    let mut cursor = first_trace;
    let mut layouts = Vec::with_capacity(channel_sets.len());

    for (index, set) in channel_sets.iter().enumerate() {
        let extension_blocks = if set.channel_count == 0 {
            0
        } else {
            source.trace_header(cursor)?[EXTENSION_COUNT_BYTE] as u64
        };
        let trace_header_length =
            TRACE_HEADER_BASE_LEN as u64 + TRACE_EXTENSION_BLOCK_LEN * extension_blocks;
        let sample_count = sample_count(set.start_time_ms, set.stop_time_ms, interval_ms, index)?;
        let trace_byte_length =
            trace_header_length + (sample_count * width.bytes_per_sample()) as u64;

        let layout = TraceLayout {
            file_offset: cursor,
            trace_header_length,
            sample_count,
            trace_byte_length,
        };
        log::debug!(
            "channel set {index}: traces at {cursor}, header {trace_header_length} bytes, \
             {sample_count} samples"
        );

        cursor += layout.block_length(set.channel_count as usize);
        layouts.push(layout);
    }

    Ok(layouts)
}
