//! A collection of modules that implement Lempel–Ziv matching and the LZ4
//! sequence encoding.

mod lz4;
pub mod matcher;
pub use lz4::LZ4Encoder;

/// Matches may reach this far back; LZ4 stores offsets in 16 bits.
pub const MAX_OFFSET: usize = crate::utils::format::MAX_DISTANCE + 1;
/// Upper bound on the length of a single match.
pub const MAX_MATCH: usize = 65536;
