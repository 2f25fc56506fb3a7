#![allow(dead_code)]

use lzblock::{Compressor, LiteralCompressor, Lz4Compressor, Lz4HcCompressor};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Returns one instance of every backend.
pub fn backends() -> Vec<Box<dyn Compressor>> {
    vec![
        Box::new(Lz4Compressor::new()),
        Box::new(Lz4HcCompressor::new()),
        Box::new(LiteralCompressor::new()),
    ]
}

/// Uniformly random bytes. Mostly incompressible.
pub fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = vec![0u8; len];
    rng.fill(&mut data[..]);
    data
}

/// Bytes drawn from a narrow normal distribution, so values repeat a lot.
pub fn skewed_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::<f64>::new(128.0, 3.0).unwrap();
    (0..len)
        .map(|_| normal.sample(&mut rng).clamp(0.0, 255.0) as u8)
        .collect()
}

/// Repetitive text, similar to logs.
pub fn text(len: usize) -> Vec<u8> {
    let words = ["compress ", "block ", "window ", "offset ", "literal\n"];
    let mut out = Vec::with_capacity(len);
    let mut i = 0usize;
    while out.len() < len {
        out.extend_from_slice(words[(i * 3 + i / 5) % words.len()].as_bytes());
        i += 1;
    }
    out.truncate(len);
    out
}

/// Decode an LZ4 block with an independent implementation.
pub fn decompress(block: &[u8], len: usize) -> Vec<u8> {
    lz4_flex::block::decompress(block, len).expect("invalid LZ4 block")
}

/// One sequence of an LZ4 block: literals, then a match (absent in the last
/// sequence).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sequence {
    pub start: usize,
    pub literals: usize,
    pub offset: usize,
    pub match_len: usize,
}

fn read_length(block: &[u8], pos: &mut usize, mut val: usize) -> usize {
    if val == 15 {
        loop {
            let b = block[*pos];
            *pos += 1;
            val += b as usize;
            if b != 255 {
                break;
            }
        }
    }
    val
}

/// Walk the token stream of a block and list its sequences, with 'start'
/// being the position in the uncompressed data where the sequence begins.
pub fn sequences(block: &[u8]) -> Vec<Sequence> {
    let mut pos = 0;
    let mut out_pos = 0;
    let mut res = Vec::new();
    while pos < block.len() {
        let token = block[pos];
        pos += 1;
        let literals = read_length(block, &mut pos, (token >> 4) as usize);
        pos += literals;
        let start = out_pos;
        out_pos += literals;
        if pos == block.len() {
            res.push(Sequence {
                start,
                literals,
                offset: 0,
                match_len: 0,
            });
            break;
        }
        let offset = block[pos] as usize | (block[pos + 1] as usize) << 8;
        pos += 2;
        let match_len = read_length(block, &mut pos, (token & 15) as usize) + 4;
        out_pos += match_len;
        res.push(Sequence {
            start,
            literals,
            offset,
            match_len,
        });
    }
    res
}

/// Check the end-of-block rules of the LZ4 format for a block that encodes
/// 'len' bytes.
pub fn assert_block_rules(block: &[u8], len: usize) {
    let seqs = sequences(block);
    let last = seqs.last().expect("a block has at least one sequence");
    assert_eq!(last.match_len, 0, "the last sequence must be literals only");
    if len >= 13 {
        assert!(last.literals >= 5, "the last 5 bytes must be literals");
    } else {
        assert_eq!(seqs.len(), 1, "short blocks are a single literal run");
    }
    for seq in &seqs[..seqs.len() - 1] {
        let match_start = seq.start + seq.literals;
        assert!(match_start + 12 <= len, "match starts too close to the end");
        assert!(seq.offset >= 1 && seq.offset <= 65535);
        assert!(seq.offset <= match_start);
    }
}
