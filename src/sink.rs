//! A bounded writer over the destination window.
//!
//! Every byte a backend emits goes through a [`Sink`]. The sink only ever
//! holds the window slice, so nothing can be written outside of it, and it
//! reports [`Error::Overflow`] as soon as a write would not fit.

use crate::error::{Error, Result};
use crate::utils::{check_input_size, check_range};

/// Writes into a fixed window and tracks how much was written.
pub struct Sink<'a> {
    /// The destination window.
    window: &'a mut [u8],
    /// Points to the next byte to write.
    cursor: usize,
}

impl<'a> Sink<'a> {
    pub fn new(window: &'a mut [u8]) -> Self {
        Self { window, cursor: 0 }
    }

    /// Returns the number of bytes written so far.
    pub fn written(&self) -> usize {
        self.cursor
    }

    /// Returns the size of the window.
    pub fn capacity(&self) -> usize {
        self.window.len()
    }

    /// Returns the number of bytes that can still be written.
    pub fn remaining(&self) -> usize {
        self.window.len() - self.cursor
    }

    /// Fail with an overflow unless 'len' more bytes fit in the window.
    pub fn reserve(&self, len: usize) -> Result<()> {
        if len > self.remaining() {
            log::debug!(
                "Window of {} bytes exhausted ({} written, {} more needed)",
                self.capacity(),
                self.cursor,
                len
            );
            return Err(Error::Overflow {
                max_dest_len: self.capacity(),
            });
        }
        Ok(())
    }

    pub fn push(&mut self, val: u8) -> Result<()> {
        self.reserve(1)?;
        self.window[self.cursor] = val;
        self.cursor += 1;
        Ok(())
    }

    pub fn extend(&mut self, bytes: &[u8]) -> Result<()> {
        self.reserve(bytes.len())?;
        self.window[self.cursor..self.cursor + bytes.len()]
            .copy_from_slice(bytes);
        self.cursor += bytes.len();
        Ok(())
    }

    /// Push a little endian 16-bit value.
    pub fn push_le16(&mut self, val: u16) -> Result<()> {
        self.extend(&val.to_le_bytes())
    }
}

/// Validate a source region and a destination window, and return the
/// source bytes together with a sink over the window. Nothing is written
/// when validation fails.
pub fn split_regions<'s, 'd>(
    src: &'s [u8],
    src_off: usize,
    src_len: usize,
    dest: &'d mut [u8],
    dest_off: usize,
    max_dest_len: usize,
) -> Result<(&'s [u8], Sink<'d>)> {
    check_range("source", src.len(), src_off, src_len)?;
    check_range("destination", dest.len(), dest_off, max_dest_len)?;
    check_input_size(src_len)?;
    let input = &src[src_off..src_off + src_len];
    let window = &mut dest[dest_off..dest_off + max_dest_len];
    Ok((input, Sink::new(window)))
}
