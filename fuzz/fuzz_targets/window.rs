#![no_main]

use libfuzzer_sys::fuzz_target;
use lzblock::{Compressor, Lz4Compressor};

const GUARD: u8 = 0xA5;
const PAD: usize = 16;

fuzz_target!(|input: (u16, &[u8])| {
    let (max_dest_len, data) = input;
    let max_dest_len = max_dest_len as usize;

    // Surround the window with guard bytes that must survive the call.
    let mut dest = vec![GUARD; max_dest_len + 2 * PAD];
    let res = Lz4Compressor::new().compress_into(
        data,
        0,
        data.len(),
        &mut dest,
        PAD,
        max_dest_len,
    );
    assert!(dest[..PAD].iter().all(|&b| b == GUARD));
    assert!(dest[PAD + max_dest_len..].iter().all(|&b| b == GUARD));

    match res {
        Ok(written) => {
            assert!(written <= max_dest_len);
            let decompressed =
                lz4_flex::block::decompress(&dest[PAD..PAD + written], data.len())
                    .unwrap();
            assert_eq!(decompressed, data);
        }
        Err(err) => assert!(err.is_overflow()),
    }
});
