mod common;

use common::{backends, decompress};
use lzblock::{Compressor, Error, LiteralCompressor, Lz4Compressor, Lz4HcCompressor};

const GUARD: u8 = 0xA5;

fn inputs() -> Vec<Vec<u8>> {
    vec![
        vec![],
        vec![42],
        b"hello world".to_vec(),
        common::text(4000),
        common::skewed_bytes(3000, 1),
        common::random_bytes(3000, 2),
        vec![0u8; 10_000],
    ]
}

#[test]
fn test_bound_is_sufficient() {
    for compressor in backends() {
        for input in inputs() {
            let bound = compressor.max_compressed_length(input.len());
            let mut dest = vec![0u8; bound];
            let written = compressor
                .compress_into(&input, 0, input.len(), &mut dest, 0, bound)
                .unwrap();
            assert!(written > 0, "{}", compressor.name());
            assert!(written <= bound);
            assert_eq!(decompress(&dest[..written], input.len()), input);
        }
    }
}

#[test]
fn test_convenience_layers_agree() {
    for compressor in backends() {
        for input in inputs() {
            let bound = compressor.max_compressed_length(input.len());
            let mut dest = vec![0u8; bound];
            let written = compressor
                .compress_into(&input, 0, input.len(), &mut dest, 0, bound)
                .unwrap();
            let expected = &dest[..written];

            assert_eq!(compressor.compress(&input).unwrap(), expected);
            assert_eq!(
                compressor.compress_range(&input, 0, input.len()).unwrap(),
                expected
            );

            let mut other = vec![0u8; bound];
            assert_eq!(compressor.compress_slice(&input, &mut other).unwrap(), written);
            assert_eq!(&other[..written], expected);

            let mut other = vec![0u8; bound + 7];
            assert_eq!(
                compressor
                    .compress_to(&input, 0, input.len(), &mut other, 7)
                    .unwrap(),
                written
            );
            assert_eq!(&other[7..7 + written], expected);
        }
    }
}

#[test]
fn test_compress_range_trims_the_output() {
    let input = common::text(10_000);
    let compressor = Lz4Compressor::new();
    let compressed = compressor.compress_range(&input, 100, 5000).unwrap();
    assert!(compressed.len() < compressor.max_compressed_length(5000));
    assert_eq!(decompress(&compressed, 5000), &input[100..5100]);
}

#[test]
fn test_sub_regions() {
    let input = common::text(5000);
    for compressor in backends() {
        let mut dest = vec![GUARD; 8000];
        let written = compressor
            .compress_into(&input, 1234, 2000, &mut dest, 333, 3000)
            .unwrap();
        assert_eq!(decompress(&dest[333..333 + written], 2000), &input[1234..3234]);
        assert!(dest[..333].iter().all(|&b| b == GUARD));
        assert!(dest[333 + written..].iter().all(|&b| b == GUARD));
    }
}

#[test]
fn test_empty_input() {
    for compressor in backends() {
        let compressed = compressor.compress(&[]).unwrap();
        assert_eq!(compressed, [0x00]);
        assert_eq!(compressor.max_compressed_length(0), 16);

        // An empty source region inside a non-empty buffer.
        let mut dest = [GUARD; 4];
        let written = compressor.compress_into(b"abc", 3, 0, &mut dest, 2, 2).unwrap();
        assert_eq!(written, 1);
        assert_eq!(dest, [GUARD, GUARD, 0x00, GUARD]);
    }
}

#[test]
fn test_overflow_is_reported() {
    for compressor in backends() {
        let input = common::random_bytes(1000, 9);
        let mut dest = vec![GUARD; 64];
        let res = compressor.compress_into(&input, 0, input.len(), &mut dest, 16, 1);
        assert_eq!(res, Err(Error::Overflow { max_dest_len: 1 }));
        assert!(dest[..16].iter().all(|&b| b == GUARD));
        assert!(dest[17..].iter().all(|&b| b == GUARD));

        // Even the empty input needs one byte.
        let res = compressor.compress_into(&[], 0, 0, &mut dest, 0, 0);
        assert!(res.unwrap_err().is_overflow());
        assert!(dest.iter().all(|&b| b == GUARD));
    }
}

#[test]
fn test_overflow_is_data_dependent() {
    for compressor in backends() {
        for input in inputs() {
            let exact = compressor.compress(&input).unwrap();

            // A window of exactly the compressed size is enough.
            let mut dest = vec![GUARD; exact.len() + 8];
            let written = compressor
                .compress_into(&input, 0, input.len(), &mut dest, 4, exact.len())
                .unwrap();
            assert_eq!(&dest[4..4 + written], &exact[..]);

            // One byte less is not, and the bytes around the window survive.
            let mut dest = vec![GUARD; exact.len() + 8];
            let res = compressor.compress_into(
                &input,
                0,
                input.len(),
                &mut dest,
                4,
                exact.len() - 1,
            );
            assert!(res.unwrap_err().is_overflow(), "{}", compressor.name());
            assert!(dest[..4].iter().all(|&b| b == GUARD));
            assert!(dest[4 + exact.len() - 1..].iter().all(|&b| b == GUARD));
        }
    }
}

#[test]
fn test_invalid_arguments() {
    let input = common::text(100);
    for compressor in backends() {
        let mut dest = vec![GUARD; 200];
        let cases: [(usize, usize, usize, usize); 6] = [
            (0, 101, 0, 200),
            (101, 0, 0, 200),
            (50, 51, 0, 200),
            (usize::MAX, 2, 0, 200),
            (0, 100, 1, 200),
            (0, 100, usize::MAX, 2),
        ];
        for (src_off, src_len, dest_off, max_dest_len) in cases {
            let res = compressor.compress_into(
                &input,
                src_off,
                src_len,
                &mut dest,
                dest_off,
                max_dest_len,
            );
            assert!(res.unwrap_err().is_invalid_argument());
            assert!(dest.iter().all(|&b| b == GUARD), "destination was written");
        }

        let res = compressor.compress_to(&input, 0, 100, &mut dest, 201);
        assert!(res.unwrap_err().is_invalid_argument());
        let res = compressor.compress_range(&input, 90, usize::MAX);
        assert!(res.unwrap_err().is_invalid_argument());
        assert!(dest.iter().all(|&b| b == GUARD));
    }
}

#[test]
fn test_backends_are_interchangeable() {
    fn compress_with(compressor: &dyn Compressor, input: &[u8]) -> Vec<u8> {
        compressor.compress(input).unwrap()
    }

    let input = common::text(3000);
    let names: Vec<_> = backends().iter().map(|c| c.name()).collect();
    assert_eq!(names, ["Lz4Compressor", "Lz4HcCompressor", "LiteralCompressor"]);

    for compressor in backends() {
        let compressed = compress_with(&*compressor, &input);
        assert_eq!(decompress(&compressed, input.len()), input);
    }

    assert_eq!(Lz4Compressor::new().to_string(), "Lz4Compressor");
    assert_eq!(LiteralCompressor::new().to_string(), "LiteralCompressor");
    assert_eq!(
        Lz4HcCompressor::with_level(3).unwrap().to_string(),
        "Lz4HcCompressor(level=3)"
    );
}

#[test]
fn test_shared_between_threads() {
    let compressor = Lz4HcCompressor::new();
    let inputs = inputs();
    let expected: Vec<_> =
        inputs.iter().map(|i| compressor.compress(i).unwrap()).collect();

    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for (input, expected) in inputs.iter().zip(&expected) {
                    assert_eq!(&compressor.compress(input).unwrap(), expected);
                }
            });
        }
    });
}

/// A backend that adds nothing of its own, to check the provided methods.
struct Wrapper<C>(C);

impl<C: Compressor> Compressor for Wrapper<C> {
    fn compress_into(
        &self,
        src: &[u8],
        src_off: usize,
        src_len: usize,
        dest: &mut [u8],
        dest_off: usize,
        max_dest_len: usize,
    ) -> lzblock::Result<usize> {
        self.0
            .compress_into(src, src_off, src_len, dest, dest_off, max_dest_len)
    }
}

#[test]
fn test_default_name_drops_path_and_generics() {
    let wrapped = Wrapper(Lz4Compressor::new());
    assert_eq!(wrapped.name(), "Wrapper");
    assert_eq!(Wrapper(Wrapper(LiteralCompressor::new())).name(), "Wrapper");
    assert_eq!(wrapped.compress(b"hello").unwrap(), b"\x50hello");
}

/// Fails the test if the output bound is ever requested.
struct NoBound;

impl Compressor for NoBound {
    fn compress_into(
        &self,
        _src: &[u8],
        _src_off: usize,
        _src_len: usize,
        _dest: &mut [u8],
        _dest_off: usize,
        _max_dest_len: usize,
    ) -> lzblock::Result<usize> {
        panic!("compress_into reached");
    }

    fn max_compressed_length(&self, _length: usize) -> usize {
        panic!("output buffer sized for an input that can't be compressed");
    }
}

#[test]
fn test_oversized_input_is_rejected_before_allocating() {
    use lzblock::utils::format::MAX_INPUT_SIZE;

    // Zeroed allocations are mapped lazily, so the pages are never touched.
    let input = vec![0u8; MAX_INPUT_SIZE + 1];
    let res = NoBound.compress_range(&input, 0, input.len());
    assert!(res.unwrap_err().is_invalid_argument());

    let mut dest = [GUARD; 16];
    let res =
        Lz4Compressor::new().compress_into(&input, 0, input.len(), &mut dest, 0, 16);
    assert!(res.unwrap_err().is_invalid_argument());
    assert!(dest.iter().all(|&b| b == GUARD));
}
