//! The fast LZ4 compressor: a greedy single pass over a small hash table.

use std::fmt;

use crate::error::Result;
use crate::lz::matcher::Matcher;
use crate::lz::{LZ4Encoder, MAX_MATCH, MAX_OFFSET};
use crate::sink::split_regions;
use crate::Compressor;

/// Number of bits of the hash table index.
const DICT_SIZE_BITS: usize = 16;
/// Number of positions remembered per hash bucket.
const DICT_BANKS: usize = 2;

type FastMatcher<'a> =
    Matcher<'a, MAX_OFFSET, MAX_MATCH, DICT_SIZE_BITS, DICT_BANKS, 1>;

/// An LZ4 compressor tuned for speed.
#[derive(Debug, Default, Clone, Copy)]
pub struct Lz4Compressor;

impl Lz4Compressor {
    pub fn new() -> Self {
        Self
    }
}

impl Compressor for Lz4Compressor {
    fn name(&self) -> &'static str {
        "Lz4Compressor"
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
        let written = LZ4Encoder::new(input, sink).encode(FastMatcher::new)?;
        log::trace!("{}: {} -> {} bytes", self.name(), src_len, written);
        Ok(written)
    }
}

impl fmt::Display for Lz4Compressor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
