//! Synthetic SEG-D file images for integration tests.

#![allow(dead_code)]

/// Pack `n` as BCD into `bytes` bytes, most significant first.
pub fn bcd(mut n: u32, bytes: usize) -> Vec<u8> {
    let mut out = vec![0u8; bytes];
    for b in out.iter_mut().rev() {
        let low = (n % 10) as u8;
        n /= 10;
        let high = (n % 10) as u8;
        n /= 10;
        *b = high << 4 | low;
    }
    out
}

/// One channel set: record window and per-trace samples.
pub struct SetSpec {
    pub start_ms: u16,
    pub stop_ms: u16,
    pub extension_blocks: u8,
    pub traces: Vec<Vec<i32>>,
}

/// Whole-file description.
pub struct FileSpec {
    pub file_number: u32,
    pub format_code: u32,
    pub interval_ms: u8,
    pub extended_blocks: u16,
    pub external_blocks: u16,
    /// Write 0xFF in block 1 and the real counts in block 2.
    pub wide_block_counts: bool,
    pub names: [&'static str; 4],
    pub sets: Vec<SetSpec>,
}

impl Default for FileSpec {
    fn default() -> Self {
        Self {
            file_number: 1001,
            format_code: 8058,
            interval_ms: 2,
            extended_blocks: 4,
            external_blocks: 3,
            wide_block_counts: false,
            names: ["ACME", "Contractor Ltd", "North Sea 3D", "P-17"],
            sets: Vec::new(),
        }
    }
}

impl FileSpec {
    pub fn bytes_per_sample(&self) -> usize {
        match self.format_code {
            8058 | 8038 => 4,
            _ => 3,
        }
    }

    /// Offset of the first trace header.
    pub fn first_trace_offset(&self) -> usize {
        32 * (3 + self.sets.len() + self.extended_blocks as usize + self.external_blocks as usize)
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();

        // general header block 1
        let mut b1 = [0u8; 32];
        b1[0..2].copy_from_slice(&bcd(self.file_number, 2));
        b1[2..4].copy_from_slice(&bcd(self.format_code, 2));
        b1[10] = 0x24; // 2024
        b1[11] = 0x00;
        b1[12] = 0x46; // day 46
        b1[13] = 0x10;
        b1[14] = 0x30;
        b1[15] = 0x15;
        b1[22] = self.interval_ms << 4;
        b1[25] = 0x01;
        b1[26] = 0x00;
        b1[28] = bcd(self.sets.len() as u32, 1)[0];
        let mut b2 = [0u8; 32];
        if self.wide_block_counts {
            b1[30] = 0xFF;
            b1[31] = 0xFF;
            b2[5..7].copy_from_slice(&self.extended_blocks.to_be_bytes());
            b2[7..9].copy_from_slice(&self.external_blocks.to_be_bytes());
        } else {
            b1[30] = bcd(self.extended_blocks as u32, 1)[0];
            b1[31] = bcd(self.external_blocks as u32, 1)[0];
        }
        b2[10] = 0x03;
        b2[11] = 0x01;
        out.extend_from_slice(&b1);
        out.extend_from_slice(&b2);
        out.extend_from_slice(&[0u8; 32]);

        for (i, set) in self.sets.iter().enumerate() {
            let mut cs = [0u8; 32];
            cs[1] = bcd(i as u32 + 1, 1)[0];
            cs[2..4].copy_from_slice(&(set.start_ms / 2).to_be_bytes());
            cs[4..6].copy_from_slice(&(set.stop_ms / 2).to_be_bytes());
            cs[8..10].copy_from_slice(&bcd(set.traces.len() as u32, 2));
            cs[10] = 0x10;
            out.extend_from_slice(&cs);
        }

        // host recording system, line id, shot/reel
        out.extend_from_slice(&[0u8; 96]);
        for name in self.names {
            let mut field = [0u8; 32];
            field[..name.len()].copy_from_slice(name.as_bytes());
            out.extend_from_slice(&field);
        }
        let remaining = (self.extended_blocks + self.external_blocks) as usize - 7;
        out.extend(std::iter::repeat_n(0u8, remaining * 32));
        assert_eq!(out.len(), self.first_trace_offset());

        let width = self.bytes_per_sample();
        for set in &self.sets {
            for trace in &set.traces {
                let mut header = [0u8; 20];
                header[9] = set.extension_blocks;
                out.extend_from_slice(&header);
                out.extend(std::iter::repeat_n(0x55u8, 32 * set.extension_blocks as usize));
                for sample in trace {
                    out.extend_from_slice(&sample.to_be_bytes()[4 - width..]);
                }
            }
        }
        out
    }
}
