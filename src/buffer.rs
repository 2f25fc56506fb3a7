//! A positional buffer: a backing byte store with a position and a limit.
//!
//! The readable (or writable) part of the buffer is [position, limit).
//! The invariant `position <= limit <= capacity` always holds.

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct ByteBuffer<B> {
    /// The backing storage.
    inner: B,
    /// Index of the next byte to read or write.
    position: usize,
    /// Index of the first byte that should not be read or written.
    limit: usize,
}

impl<B: AsRef<[u8]>> ByteBuffer<B> {
    /// Wrap 'inner' with the position at zero and the limit at the capacity.
    pub fn new(inner: B) -> Self {
        let limit = inner.as_ref().len();
        Self {
            inner,
            position: 0,
            limit,
        }
    }

    pub fn capacity(&self) -> usize {
        self.inner.as_ref().len()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the number of bytes between the position and the limit.
    pub fn remaining(&self) -> usize {
        self.limit - self.position
    }

    pub fn has_remaining(&self) -> bool {
        self.position < self.limit
    }

    /// Move the position. Fails if 'position' is past the limit.
    pub fn set_position(&mut self, position: usize) -> Result<()> {
        if position > self.limit {
            return Err(Error::InvalidArgument(format!(
                "position {position} is past the limit {}",
                self.limit
            )));
        }
        self.position = position;
        Ok(())
    }

    /// Move the limit. Fails if 'limit' is past the capacity. The position
    /// is pulled back to the new limit if it was beyond it.
    pub fn set_limit(&mut self, limit: usize) -> Result<()> {
        if limit > self.capacity() {
            return Err(Error::InvalidArgument(format!(
                "limit {limit} is past the capacity {}",
                self.capacity()
            )));
        }
        self.limit = limit;
        self.position = self.position.min(limit);
        Ok(())
    }

    /// Make the bytes written so far readable: the limit becomes the
    /// position and the position goes back to zero.
    pub fn flip(&mut self) {
        self.limit = self.position;
        self.position = 0;
    }

    /// Reset the position to zero and the limit to the capacity.
    pub fn clear(&mut self) {
        self.position = 0;
        self.limit = self.capacity();
    }

    /// Returns the whole backing storage, ignoring position and limit.
    pub fn as_slice(&self) -> &[u8] {
        self.inner.as_ref()
    }

    /// Returns the bytes in [position, limit).
    pub fn chunk(&self) -> &[u8] {
        &self.inner.as_ref()[self.position..self.limit]
    }

    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> ByteBuffer<B> {
    /// Returns the whole backing storage for writing.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        self.inner.as_mut()
    }
}
