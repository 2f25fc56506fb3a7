#![no_main]

use libfuzzer_sys::fuzz_target;
use lzblock::{Compressor, LiteralCompressor, Lz4Compressor, Lz4HcCompressor};

fn check<C: Compressor>(compressor: C, data: &[u8]) {
    // A window of exactly the bound must always be enough.
    let mut compressed = vec![0u8; compressor.max_compressed_length(data.len())];
    let written = compressor.compress_slice(data, &mut compressed).unwrap();
    assert!(written > 0);

    let decompressed =
        lz4_flex::block::decompress(&compressed[..written], data.len()).unwrap();
    assert_eq!(decompressed, data);
}

fuzz_target!(|data: &[u8]| {
    check(Lz4Compressor::new(), data);
    check(Lz4HcCompressor::with_level(4).unwrap(), data);
    check(LiteralCompressor::new(), data);
});
