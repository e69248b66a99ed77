//! Whole-file decoding: [`SegdHeader`], [`SegdFile`], and [`open_segd`].
//!
//! A SEG-D file is laid out as
//!
//! ```text
//! general header blocks 1-3            3 x 32 bytes
//! channel-set headers                  channel_set_count x 32 bytes
//! host system / line id / shot info    3 x 32 bytes (not decoded)
//! client, contractor, survey, project  4 x 32 bytes
//! remaining extended/external blocks
//! trace blocks, channel set by channel set
//! ```
//!
//! The three skipped blocks and the four name fields are the first seven
//! of the extended and external header blocks.

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::ops::Deref;
use std::path::{Path, PathBuf};

use crate::channel_set::{CHANNEL_SET_HEADER_LEN, ChannelSet, ChannelSetHeader};
use crate::general::{GENERAL_BLOCK_LEN, GENERAL_HEADER_LEN, GeneralHeader};
use crate::layout::{ReaderSource, walk};
use crate::options::DecodeOptions;
use crate::trace::{SampleMatrix, read_traces};
use crate::{Result, SegdError};

/// Blocks between the channel-set headers and the name fields.
const SKIPPED_BLOCKS: u64 = 3;

/// Length of each null-padded name field.
const NAME_FIELD_LEN: usize = 32;

/// Client, contractor, survey, project.
const NAME_FIELD_COUNT: usize = 4;

/// Extended/external blocks consumed before the remainder is skipped.
const DEFAULT_EXTRA_BLOCKS: i64 = 7;

/// Seek to `offset` and fill `buf`, reporting end of file as truncation.
pub(crate) fn read_at<R: Read + Seek>(reader: &mut R, offset: u64, buf: &mut [u8]) -> Result<()> {
    let needed = buf.len() as u64;
    reader.seek(SeekFrom::Start(offset))?;
    reader.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => SegdError::TruncatedFile { offset, needed },
        _ => SegdError::Io(e),
    })
}

/// Read up to `len` bytes at `offset`; fewer are returned at end of file.
fn read_up_to<R: Read + Seek>(reader: &mut R, offset: u64, len: usize) -> Result<Vec<u8>> {
    reader.seek(SeekFrom::Start(offset))?;
    let mut buf = Vec::with_capacity(len);
    reader.by_ref().take(len as u64).read_to_end(&mut buf)?;
    Ok(buf)
}

/// Text up to the first null byte.
fn name_field(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}

/// Decoded headers of a SEG-D file and the layout of its trace blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct SegdHeader {
    pub general: GeneralHeader,
    /// Channel sets in file order.
    pub channel_sets: Vec<ChannelSet>,
    pub client_name: String,
    pub contractor: String,
    pub survey: String,
    pub project: String,
    /// Absolute offset of the first trace header.
    pub first_trace_offset: u64,
}

impl SegdHeader {
    /// Decode all headers from `reader` and locate every channel set's
    /// traces. Trace samples are not read.
    pub fn from_reader<R: Read + Seek>(reader: &mut R, options: &DecodeOptions) -> Result<Self> {
        let mut general_bytes = [0u8; GENERAL_HEADER_LEN];
        read_at(reader, 0, &mut general_bytes)?;
        let general = GeneralHeader::decode(&general_bytes, options)?;

        let mut offset = GENERAL_HEADER_LEN as u64;
        let mut headers = Vec::with_capacity(general.channel_set_count as usize);
        for index in 0..general.channel_set_count as usize {
            let block = read_up_to(reader, offset, CHANNEL_SET_HEADER_LEN)?;
            headers.push(ChannelSetHeader::decode(index, &block, options)?);
            offset += CHANNEL_SET_HEADER_LEN as u64;
        }

        offset += SKIPPED_BLOCKS * GENERAL_BLOCK_LEN as u64;
        let mut names = [0u8; NAME_FIELD_LEN * NAME_FIELD_COUNT];
        read_at(reader, offset, &mut names)?;
        offset += names.len() as u64;
        let mut fields = names.chunks_exact(NAME_FIELD_LEN).map(name_field);
        let client_name = fields.next().unwrap_or_default();
        let contractor = fields.next().unwrap_or_default();
        let survey = fields.next().unwrap_or_default();
        let project = fields.next().unwrap_or_default();

        let extra_blocks = general.extended_header_block_count as i64
            + general.external_header_block_count as i64
            - DEFAULT_EXTRA_BLOCKS;
        let first_trace_offset =
            offset.saturating_add_signed(extra_blocks * GENERAL_BLOCK_LEN as i64);
        log::debug!("client {client_name:?}, first trace at {first_trace_offset}");

        let layouts = walk(
            first_trace_offset,
            &headers,
            general.sample_interval_ms,
            general.sample_width,
            &mut ReaderSource::new(reader),
        )?;
        let channel_sets = headers
            .into_iter()
            .zip(layouts)
            .map(|(header, layout)| ChannelSet { header, layout })
            .collect();

        Ok(Self {
            general,
            channel_sets,
            client_name,
            contractor,
            survey,
            project,
            first_trace_offset,
        })
    }

    /// Channel set `index` (0-based).
    pub fn channel_set(&self, index: usize) -> Result<&ChannelSet> {
        self.channel_sets
            .get(index)
            .ok_or(SegdError::ChannelSetIndexOutOfRange {
                index,
                count: self.channel_sets.len(),
            })
    }

    /// Read the samples of channel set `index` from `reader`, which must be
    /// the same data the header was decoded from.
    pub fn read_channel_set_from<R: Read + Seek>(
        &self,
        reader: &mut R,
        index: usize,
    ) -> Result<SampleMatrix> {
        let set = self.channel_set(index)?;
        read_traces(reader, &set.layout, set.trace_count(), self.general.sample_width)
    }
}

impl fmt::Display for SegdHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "file {} | format {} rev {} | {} | {} channel sets | {} s interval",
            self.general.file_number,
            self.general.format_code,
            self.general.revision,
            self.general.timestamp,
            self.channel_sets.len(),
            self.general.sample_interval(),
        )
    }
}

/// A SEG-D file on disk with its decoded headers.
///
/// No file handle is held between calls: each [`read_channel_set`]
/// opens the file, reads, and closes it again.
///
/// [`read_channel_set`]: SegdFile::read_channel_set
#[derive(Debug, Clone)]
pub struct SegdFile {
    path: PathBuf,
    header: SegdHeader,
}

impl SegdFile {
    /// Open and decode the headers of the file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, DecodeOptions::default())
    }

    /// Open with explicit decode options.
    pub fn open_with(path: impl AsRef<Path>, options: DecodeOptions) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut reader = BufReader::new(File::open(&path)?);
        let header = SegdHeader::from_reader(&mut reader, &options)?;
        Ok(Self { path, header })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn header(&self) -> &SegdHeader {
        &self.header
    }

    /// Read the samples of channel set `index` as a `(traces, samples)`
    /// matrix.
    pub fn read_channel_set(&self, index: usize) -> Result<SampleMatrix> {
        self.header.channel_set(index)?;
        let mut reader = BufReader::new(File::open(&self.path)?);
        self.header.read_channel_set_from(&mut reader, index)
    }
}

impl Deref for SegdFile {
    type Target = SegdHeader;

    fn deref(&self) -> &SegdHeader {
        &self.header
    }
}

/// Open a SEG-D file with default [`DecodeOptions`].
pub fn open_segd(path: impl AsRef<Path>) -> Result<SegdFile> {
    SegdFile::open(path)
}

/// Open a SEG-D file with explicit [`DecodeOptions`].
pub fn open_segd_with(path: impl AsRef<Path>, options: DecodeOptions) -> Result<SegdFile> {
    SegdFile::open_with(path, options)
}
