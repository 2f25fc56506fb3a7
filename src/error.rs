//! Error types shared by every compressor.

use thiserror::Error;

/// The ways a compression call can fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The encoding of this particular input does not fit in the destination
    /// window. Sizing the window with `max_compressed_length` avoids this.
    #[error("compressed output does not fit in a window of {max_dest_len} bytes")]
    Overflow { max_dest_len: usize },

    /// A region or a tuning parameter was out of range. Reported before any
    /// destination byte is written.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Returns true if this is an [`Error::Overflow`].
    pub fn is_overflow(&self) -> bool {
        matches!(self, Error::Overflow { .. })
    }

    /// Returns true if this is an [`Error::InvalidArgument`].
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
