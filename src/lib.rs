//! Pure Rust SEG-D rev3.1 decoder.
//!
//! Decodes the packed-BCD general and channel-set headers, locates each
//! channel set's trace block by walking the file, and extracts 24-bit or
//! 32-bit big-endian samples on demand. Read-only; no C dependencies.
//!
//! # Opening a file
//!
//! ```no_run
//! use segd_rs::open_segd;
//!
//! let file = open_segd("shot_1001.segd")?;
//! println!("{}", file.header());
//! for set in &file.channel_sets {
//!     println!("{}", set.header);
//! }
//!
//! let samples = file.read_channel_set(0)?;
//! let (traces, per_trace) = samples.shape();
//! println!("{traces} traces of {per_trace} samples");
//! # Ok::<(), segd_rs::SegdError>(())
//! ```
//!
//! # Decoding from memory
//!
//! Any `Read + Seek` source works, which is convenient for data that is
//! already in memory:
//!
//! ```no_run
//! use std::io::Cursor;
//! use segd_rs::{BcdPolicy, DecodeOptions, SegdHeader};
//!
//! let bytes: Vec<u8> = std::fs::read("shot_1001.segd")?;
//! let mut cursor = Cursor::new(bytes);
//! let options = DecodeOptions::new().with_bcd_policy(BcdPolicy::Lenient);
//! let header = SegdHeader::from_reader(&mut cursor, &options)?;
//! let matrix = header.read_channel_set_from(&mut cursor, 0)?;
//! assert_eq!(matrix.trace_count(), header.channel_sets[0].trace_count());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod bcd;
pub mod bits;
pub mod channel_set;
pub mod error;
pub mod general;
pub mod layout;
pub mod options;
pub mod reader;
pub mod time;
pub mod trace;
pub mod types;

pub use channel_set::{ChannelSet, ChannelSetHeader};
pub use error::{Result, SegdError};
pub use general::GeneralHeader;
pub use layout::{TraceHeaderSource, TraceLayout};
pub use options::{BcdPolicy, DecodeOptions, UnknownFormatPolicy};
pub use reader::{SegdFile, SegdHeader, open_segd, open_segd_with};
pub use trace::SampleMatrix;
pub use types::{Revision, SampleWidth};

pub use bcd::decode_pbcd;
