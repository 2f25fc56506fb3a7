pub mod buffer;
pub mod error;
pub mod fast;
pub mod hc;
pub mod literal;
pub mod lz;
pub mod sink;
pub mod utils;

pub use buffer::ByteBuffer;
pub use error::{Error, Result};
pub use fast::Lz4Compressor;
pub use hc::Lz4HcCompressor;
pub use literal::LiteralCompressor;

/// A trait that defines the interface of block compressors.
///
/// Backends implement the single primitive [`Compressor::compress_into`].
/// Everything else is provided on top of it and behaves exactly like the
/// equivalent direct call to the primitive. Compressors keep no state between
/// calls and can be shared between threads.
pub trait Compressor: Send + Sync {
    /// Compresses `src[src_off..src_off + src_len]` into
    /// `dest[dest_off..dest_off + max_dest_len]` and returns the compressed
    /// length.
    ///
    /// Fails with [`Error::InvalidArgument`] if either region is out of
    /// bounds, before anything is written. Fails with [`Error::Overflow`] if
    /// the encoding of this input does not fit in 'max_dest_len' bytes; make
    /// sure that `max_dest_len >= max_compressed_length(src_len)` to avoid
    /// it. No byte outside the destination window is ever written.
    fn compress_into(
        &self,
        src: &[u8],
        src_off: usize,
        src_len: usize,
        dest: &mut [u8],
        dest_off: usize,
        max_dest_len: usize,
    ) -> Result<usize>;

    /// Returns the maximum compressed length for an input of 'length' bytes.
    fn max_compressed_length(&self, length: usize) -> usize {
        utils::max_compressed_length(length)
    }

    /// Same as [`Compressor::compress_into`] with the window running to the
    /// end of 'dest'.
    fn compress_to(
        &self,
        src: &[u8],
        src_off: usize,
        src_len: usize,
        dest: &mut [u8],
        dest_off: usize,
    ) -> Result<usize> {
        let max_dest_len =
            dest.len().checked_sub(dest_off).ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "destination offset {dest_off} is past the end of a \
                     buffer of {} bytes",
                    dest.len()
                ))
            })?;
        self.compress_into(src, src_off, src_len, dest, dest_off, max_dest_len)
    }

    /// Compresses all of 'src' into the start of 'dest'.
    fn compress_slice(&self, src: &[u8], dest: &mut [u8]) -> Result<usize> {
        self.compress_to(src, 0, src.len(), dest, 0)
    }

    /// Returns `src[src_off..src_off + src_len]` compressed.
    ///
    /// This allocates a buffer of `max_compressed_length(src_len)` bytes,
    /// compresses into it and then shrinks it to the compressed length.
    /// Prefer the other entry points when the caller can provide the output.
    fn compress_range(
        &self,
        src: &[u8],
        src_off: usize,
        src_len: usize,
    ) -> Result<Vec<u8>> {
        utils::check_range("source", src.len(), src_off, src_len)?;
        utils::check_input_size(src_len)?;
        let mut compressed = vec![0; self.max_compressed_length(src_len)];
        let written =
            self.compress_to(src, src_off, src_len, &mut compressed, 0)?;
        compressed.truncate(written);
        compressed.shrink_to_fit();
        Ok(compressed)
    }

    /// Returns 'src' compressed.
    fn compress(&self, src: &[u8]) -> Result<Vec<u8>> {
        self.compress_range(src, 0, src.len())
    }

    /// Compresses the bytes between the position and the limit of 'src' into
    /// 'dest', starting at its position, and returns the compressed length.
    ///
    /// On success the position of 'src' moves to its limit and the position
    /// of 'dest' moves forward by the compressed length. On failure both
    /// positions are left as they were.
    fn compress_buffer<S, D>(
        &self,
        src: &mut ByteBuffer<S>,
        dest: &mut ByteBuffer<D>,
    ) -> Result<usize>
    where
        Self: Sized,
        S: AsRef<[u8]>,
        D: AsRef<[u8]> + AsMut<[u8]>,
    {
        let (src_off, src_len) = (src.position(), src.remaining());
        let (dest_off, max_dest_len) = (dest.position(), dest.remaining());
        let written = self.compress_buffer_at(
            src,
            src_off,
            src_len,
            dest,
            dest_off,
            max_dest_len,
        )?;
        src.set_position(src.limit())?;
        dest.set_position(dest_off + written)?;
        Ok(written)
    }

    /// Same as [`Compressor::compress_into`] over the backing storage of two
    /// positional buffers. Offsets are absolute and bounded by the capacity.
    /// The positions and limits of both buffers are left unchanged.
    fn compress_buffer_at<S, D>(
        &self,
        src: &ByteBuffer<S>,
        src_off: usize,
        src_len: usize,
        dest: &mut ByteBuffer<D>,
        dest_off: usize,
        max_dest_len: usize,
    ) -> Result<usize>
    where
        Self: Sized,
        S: AsRef<[u8]>,
        D: AsRef<[u8]> + AsMut<[u8]>,
    {
        self.compress_into(
            src.as_slice(),
            src_off,
            src_len,
            dest.as_mut_slice(),
            dest_off,
            max_dest_len,
        )
    }

    /// Returns a label for the backend, for logs and diagnostics.
    ///
    /// Defaults to the bare type name, without its path or generic
    /// arguments. The format of [`std::any::type_name`] is not stable, so
    /// backends that need a fixed label override this.
    fn name(&self) -> &'static str {
        let full = std::any::type_name::<Self>();
        let base = full.split('<').next().unwrap_or(full);
        base.rsplit("::").next().unwrap_or(base)
    }
}

impl<C: Compressor + ?Sized> Compressor for Box<C> {
    fn compress_into(
        &self,
        src: &[u8],
        src_off: usize,
        src_len: usize,
        dest: &mut [u8],
        dest_off: usize,
        max_dest_len: usize,
    ) -> Result<usize> {
        (**self).compress_into(src, src_off, src_len, dest, dest_off, max_dest_len)
    }

    fn max_compressed_length(&self, length: usize) -> usize {
        (**self).max_compressed_length(length)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<C: Compressor + ?Sized> Compressor for &C {
    fn compress_into(
        &self,
        src: &[u8],
        src_off: usize,
        src_len: usize,
        dest: &mut [u8],
        dest_off: usize,
        max_dest_len: usize,
    ) -> Result<usize> {
        (**self).compress_into(src, src_off, src_len, dest, dest_off, max_dest_len)
    }

    fn max_compressed_length(&self, length: usize) -> usize {
        (**self).max_compressed_length(length)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
