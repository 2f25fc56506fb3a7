//! Constants of the LZ4 block format, the output bound, region checks and the
//! length continuation encoding.

use crate::error::{Error, Result};

/// Constants of the LZ4 block format. Reference:
/// <https://github.com/lz4/lz4/blob/dev/doc/lz4_Block_format.md>
pub mod format {
    /// Inputs larger than this cannot be represented in a single block.
    pub const MAX_INPUT_SIZE: usize = 0x7E00_0000;
    /// The shortest match the format can express.
    pub const MIN_MATCH: usize = 4;
    /// The last 5 bytes of a block are always literals.
    pub const LAST_LITERALS: usize = 5;
    /// The last match must start at least 12 bytes before the end of block.
    pub const MF_LIMIT: usize = 12;
    /// Match offsets are stored in 16 bits and can't be zero.
    pub const MAX_DISTANCE: usize = 65535;
    /// Each half of the token holds values up to 15. Larger values continue
    /// in the following bytes.
    pub const RUN_MASK: usize = 15;
    /// Number of bits of the match length in the token.
    pub const ML_BITS: u8 = 4;
}

/// Returns the maximum compressed length for an input of 'length' bytes.
///
/// The worst case for an LZ4 block is a single literal run: one token, one
/// continuation byte per 255 literals past the first 15, and the literals
/// themselves. `length + length / 255 + 16` covers that for every length.
/// Saturates instead of wrapping for lengths near `usize::MAX`.
pub fn max_compressed_length(length: usize) -> usize {
    length.saturating_add(length / 255).saturating_add(16)
}

/// Check that the region [off, off + len) lies inside a buffer of 'capacity'
/// bytes. The 'what' argument names the region in the error message.
pub fn check_range(
    what: &str,
    capacity: usize,
    off: usize,
    len: usize,
) -> Result<()> {
    match off.checked_add(len) {
        Some(end) if end <= capacity => Ok(()),
        _ => {
            log::debug!("Rejected {what} region at {off} of {len} bytes");
            Err(Error::InvalidArgument(format!(
                "{what} region [{off}, {off}+{len}) exceeds buffer of {capacity} bytes"
            )))
        }
    }
}

/// Check that an input of 'len' bytes fits in a single block.
pub fn check_input_size(len: usize) -> Result<()> {
    if len > format::MAX_INPUT_SIZE {
        log::debug!("Rejected input of {len} bytes");
        return Err(Error::InvalidArgument(format!(
            "input of {len} bytes exceeds the maximum block size"
        )));
    }
    Ok(())
}

/// Implements the length continuation of the token fields.
/// A field that saturates its 4-bit slot (15) continues in extra bytes: each
/// 255 means "add 255 and keep reading", and the first byte below 255 ends
/// the sequence. The number 350 is serialized as [255, 80] after the 15.
pub mod variable_length_encoding {
    use super::format::RUN_MASK;
    use crate::error::Result;
    use crate::sink::Sink;

    /// Returns the value stored in the 4-bit token slot for 'num'.
    pub fn token_part(num: usize) -> u8 {
        num.min(RUN_MASK) as u8
    }

    /// Returns the number of continuation bytes needed for 'num'.
    pub fn extra_len(num: usize) -> usize {
        if num < RUN_MASK {
            0
        } else {
            (num - RUN_MASK) / 255 + 1
        }
    }

    /// Write the continuation bytes of 'num' into the sink and return the
    /// number of bytes written.
    pub fn encode(num: usize, sink: &mut Sink) -> Result<usize> {
        if num < RUN_MASK {
            return Ok(0);
        }
        let mut val = num - RUN_MASK;
        let mut written = 0;
        while val >= 255 {
            sink.push(255)?;
            val -= 255;
            written += 1;
        }
        sink.push(val as u8)?;
        Ok(written + 1)
    }
}
