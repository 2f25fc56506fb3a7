//! An LZ4 block encoder, based on the documentation in
//! <https://github.com/lz4/lz4/blob/dev/doc/lz4_Block_format.md>

use std::ops::Range;

use crate::error::Result;
use crate::sink::Sink;
use crate::utils::format::{
    LAST_LITERALS, MAX_DISTANCE, MF_LIMIT, MIN_MATCH, ML_BITS,
};
use crate::utils::variable_length_encoding::{encode, extra_len, token_part};

/// Writes the LZ4 encoding of 'input' into a sink.
pub struct LZ4Encoder<'a, 'w> {
    /// The uncompressed input.
    input: &'a [u8],
    /// The output window.
    sink: Sink<'w>,
}

impl<'a, 'w> LZ4Encoder<'a, 'w> {
    pub fn new(input: &'a [u8], sink: Sink<'w>) -> Self {
        Self { input, sink }
    }

    /// Returns true if 'input' is too short to hold any match. Such blocks
    /// are stored as a single literal run.
    pub fn is_incompressible(input: &[u8]) -> bool {
        input.len() < MF_LIMIT + 1
    }

    /// Encode one sequence: the 'literals' followed by a match of
    /// 'match_len' bytes that starts 'offset' bytes back.
    /// The whole sequence is reserved up front, so a sequence that does not
    /// fit is never partially written.
    fn encode_sequence(
        &mut self,
        literals: &[u8],
        offset: u16,
        match_len: usize,
    ) -> Result<()> {
        debug_assert!(match_len >= MIN_MATCH, "match is too short");
        debug_assert!(offset != 0, "offset zero is invalid");
        let lit_len = literals.len();
        let ml = match_len - MIN_MATCH;
        self.sink.reserve(
            1 + extra_len(lit_len) + lit_len + 2 + extra_len(ml),
        )?;

        self.sink
            .push((token_part(lit_len) << ML_BITS) | token_part(ml))?;
        encode(lit_len, &mut self.sink)?;
        self.sink.extend(literals)?;
        self.sink.push_le16(offset)?;
        encode(ml, &mut self.sink)?;
        Ok(())
    }

    /// Encode the final sequence, which carries literals only.
    fn encode_last_literals(&mut self, literals: &[u8]) -> Result<()> {
        let lit_len = literals.len();
        self.sink.reserve(1 + extra_len(lit_len) + lit_len)?;
        self.sink.push(token_part(lit_len) << ML_BITS)?;
        encode(lit_len, &mut self.sink)?;
        self.sink.extend(literals)
    }

    /// Encode the whole input as one literal run and return the number of
    /// bytes written.
    pub fn encode_literals(mut self) -> Result<usize> {
        self.encode_last_literals(self.input)?;
        Ok(self.sink.written())
    }

    /// Encode the input using the regions produced by 'make_matcher' and
    /// return the number of bytes written. The matcher is handed the input
    /// without the trailing literals, so no match can reach into them.
    pub fn encode<F, I>(mut self, make_matcher: F) -> Result<usize>
    where
        F: FnOnce(&'a [u8]) -> I,
        I: Iterator<Item = (Range<usize>, Range<usize>)>,
    {
        let input = self.input;
        let len = input.len();
        if Self::is_incompressible(input) {
            return self.encode_literals();
        }

        let mut anchor = 0;
        for (lit, mat) in make_matcher(&input[..len - LAST_LITERALS]) {
            // The last match must start at least MF_LIMIT bytes before the
            // end of the block.
            if mat.is_empty() || lit.end + MF_LIMIT > len {
                break;
            }
            let offset = lit.end - mat.start;
            debug_assert!(offset <= MAX_DISTANCE, "offset out of range");
            self.encode_sequence(&input[lit.clone()], offset as u16, mat.len())?;
            anchor = lit.end + mat.len();
        }

        self.encode_last_literals(&input[anchor..])?;
        Ok(self.sink.written())
    }
}
