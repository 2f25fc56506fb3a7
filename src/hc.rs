//! The high compression LZ4 compressor. It searches deeper hash chains and,
//! at the top levels, picks the cheapest parse of the whole block. The output
//! is a regular LZ4 block.

use std::fmt;

use crate::error::{Error, Result};
use crate::lz::matcher::{select_matcher, MAX_LEVEL};
use crate::lz::{LZ4Encoder, MAX_MATCH, MAX_OFFSET};
use crate::sink::split_regions;
use crate::Compressor;

/// The level used by [`Lz4HcCompressor::new`].
pub const DEFAULT_LEVEL: u8 = 9;

/// An LZ4 compressor tuned for ratio. The level is fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lz4HcCompressor {
    level: u8,
}

impl Lz4HcCompressor {
    pub fn new() -> Self {
        Self {
            level: DEFAULT_LEVEL,
        }
    }

    /// Creates a compressor with the given level (1 to 12). Higher levels
    /// search harder and use more memory.
    pub fn with_level(level: u8) -> Result<Self> {
        if level == 0 || level > MAX_LEVEL {
            return Err(Error::InvalidArgument(format!(
                "compression level {level} is not in 1..={MAX_LEVEL}"
            )));
        }
        Ok(Self { level })
    }

    pub fn level(&self) -> u8 {
        self.level
    }
}

impl Default for Lz4HcCompressor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compressor for Lz4HcCompressor {
    fn name(&self) -> &'static str {
        "Lz4HcCompressor"
    }

    fn compress_into(
        &self,
        src: &[u8],
        src_off: usize,
        src_len: usize,
        dest: &mut [u8],
        dest_off: usize,
        max_dest_len: usize,
    ) -> Result<usize> {
        let (input, sink) =
            split_regions(src, src_off, src_len, dest, dest_off, max_dest_len)?;
        let level = self.level;
        // The level was validated on construction, so a matcher always exists.
        let written = LZ4Encoder::new(input, sink).encode(|input| {
            select_matcher::<MAX_OFFSET, MAX_MATCH>(level, input)
                .into_iter()
                .flatten()
        })?;
        log::trace!(
            "{} (level {}): {} -> {} bytes",
            self.name(),
            level,
            src_len,
            written
        );
        Ok(written)
    }
}

impl fmt::Display for Lz4HcCompressor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(level={})", self.name(), self.level)
    }
}
