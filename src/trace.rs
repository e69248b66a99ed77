//! Trace payload extraction.
//!
//! [`read_traces`] reads every trace of one channel set into a
//! [`SampleMatrix`] with one row per trace.

use std::io::{Read, Seek};

use byteorder::{BigEndian, ByteOrder};

use crate::layout::TraceLayout;
use crate::reader::read_at;
use crate::types::SampleWidth;
use crate::Result;

/// Row-major matrix of samples: one row per trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleMatrix {
    traces: usize,
    samples: usize,
    data: Vec<i32>,
}

impl SampleMatrix {
    /// Build a matrix from row-major `data`. Returns `None` if the length
    /// does not match `traces * samples`.
    pub fn from_vec(traces: usize, samples: usize, data: Vec<i32>) -> Option<Self> {
        (data.len() == traces * samples).then_some(Self {
            traces,
            samples,
            data,
        })
    }

    /// `(traces, samples per trace)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.traces, self.samples)
    }

    pub fn trace_count(&self) -> usize {
        self.traces
    }

    pub fn samples_per_trace(&self) -> usize {
        self.samples
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Samples of trace `index`.
    pub fn trace(&self, index: usize) -> Option<&[i32]> {
        (index < self.traces).then(|| &self.data[index * self.samples..(index + 1) * self.samples])
    }

    pub fn get(&self, trace: usize, sample: usize) -> Option<i32> {
        if trace < self.traces && sample < self.samples {
            Some(self.data[trace * self.samples + sample])
        } else {
            None
        }
    }

    /// Iterate over traces in order.
    pub fn rows(&self) -> impl Iterator<Item = &[i32]> + '_ {
        (0..self.traces).map(move |t| &self.data[t * self.samples..(t + 1) * self.samples])
    }

    /// Sample-major copy: one row per sample, one column per trace.
    pub fn transpose(&self) -> SampleMatrix {
        let mut data = Vec::with_capacity(self.data.len());
        for s in 0..self.samples {
            for t in 0..self.traces {
                data.push(self.data[t * self.samples + s]);
            }
        }
        SampleMatrix {
            traces: self.samples,
            samples: self.traces,
            data,
        }
    }

    /// Reinterpret every 32-bit word as an IEEE-754 float, for format 8058.
    pub fn to_ieee_f32(&self) -> Vec<f32> {
        self.data.iter().map(|&w| f32::from_bits(w as u32)).collect()
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<i32> {
        self.data
    }
}

/// Decode big-endian sample words from `bytes` into `out`.
///
/// 24-bit words are sign-extended. Trailing bytes that do not form a whole
/// word are ignored.
pub fn decode_samples(bytes: &[u8], width: SampleWidth, out: &mut Vec<i32>) {
    match width {
        SampleWidth::Int24 => {
            out.extend(bytes.chunks_exact(3).map(BigEndian::read_i24));
        }
        SampleWidth::Int32 => {
            out.extend(bytes.chunks_exact(4).map(BigEndian::read_i32));
        }
    }
}

/// Read `trace_count` traces laid out as described by `layout`.
///
/// Fails with [`SegdError::TruncatedFile`](crate::SegdError) if any trace's
/// samples run past the end of the input.
pub fn read_traces<R: Read + Seek>(
    reader: &mut R,
    layout: &TraceLayout,
    trace_count: usize,
    width: SampleWidth,
) -> Result<SampleMatrix> {
    let trace_bytes = layout.sample_count * width.bytes_per_sample();
    let mut data = Vec::with_capacity(trace_count * layout.sample_count);
    let mut buf = vec![0u8; trace_bytes];

    for trace in 0..trace_count {
        let offset = layout.samples_offset(trace);
        log::trace!("trace {trace}: {trace_bytes} sample bytes at {offset}");
        read_at(reader, offset, &mut buf)?;
        decode_samples(&buf, width, &mut data);
    }

    Ok(SampleMatrix {
        traces: trace_count,
        samples: layout.sample_count,
        data,
    })
}
