//! A compressor that does not search for matches. The input is stored as a
//! single literal run, which is still a valid LZ4 block. Its output size is
//! exactly the worst case the bound has to cover.

use std::fmt;

use crate::error::Result;
use crate::lz::LZ4Encoder;
use crate::sink::split_regions;
use crate::Compressor;

#[derive(Debug, Default, Clone, Copy)]
pub struct LiteralCompressor;

impl LiteralCompressor {
    pub fn new() -> Self {
        Self
    }
}

impl Compressor for LiteralCompressor {
    fn name(&self) -> &'static str {
        "LiteralCompressor"
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
        let written = LZ4Encoder::new(input, sink).encode_literals()?;
        log::trace!("{}: {} -> {} bytes", self.name(), src_len, written);
        Ok(written)
    }
}

impl fmt::Display for LiteralCompressor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
