//! Lempel–Ziv matchers that split an input into literal and match regions.
//!
//! A matcher yields pairs of (literals, match) ranges. The literal range is
//! the span of input bytes that are copied verbatim, and the match range is
//! an earlier span of the input that repeats right after the literals. The
//! last pair has an empty match.
use std::ops::Range;

use crate::utils::format::MIN_MATCH;

/// Marks empty cells in the hash table.
const EMPTY_CELL: u32 = u32::MAX;

/// A hash table from 4-byte sequences to the positions where they were seen.
/// Each bucket holds DICT_BANKS positions, most recent first.
/// MAX_OFFSET bounds the distance between a match and its source.
/// MAX_MATCH bounds the match length.
/// DICT_SIZE_BITS caps the number of buckets at (1 << DICT_SIZE_BITS). Short
/// inputs get a smaller table, about one bucket per input byte.
struct MatchTable<
    'a,
    const MAX_OFFSET: usize,
    const MAX_MATCH: usize,
    const DICT_SIZE_BITS: usize,
    const DICT_BANKS: usize,
> {
    /// The input to tokenize.
    input: &'a [u8],
    /// Candidate positions. A candidate may be a hash collision.
    table: Vec<u32>,
    /// Number of bits of the bucket index.
    bits: u32,
}

impl<
        'a,
        const MAX_OFFSET: usize,
        const MAX_MATCH: usize,
        const DICT_SIZE_BITS: usize,
        const DICT_BANKS: usize,
    > MatchTable<'a, MAX_OFFSET, MAX_MATCH, DICT_SIZE_BITS, DICT_BANKS>
{
    fn new(input: &'a [u8]) -> Self {
        let bits = Self::table_bits(input.len());
        Self {
            input,
            table: vec![EMPTY_CELL; (1 << bits) * DICT_BANKS],
            bits,
        }
    }

    /// Returns the number of index bits for an input of 'len' bytes:
    /// ceil(log2(len)), at least 1 and at most DICT_SIZE_BITS.
    fn table_bits(len: usize) -> u32 {
        let bits = len.max(2).next_power_of_two().trailing_zeros();
        bits.min(DICT_SIZE_BITS as u32)
    }

    fn len(&self) -> usize {
        self.input.len()
    }

    fn bucket(&self, idx: usize) -> usize {
        let b = &self.input[idx..idx + MIN_MATCH];
        let val = u32::from_le_bytes([b[0], b[1], b[2], b[3]]);
        (val.wrapping_mul(0x9E37_79B1) >> (32 - self.bits)) as usize
    }

    /// Returns the length of the common prefix of the strings at 'a' and
    /// 'b', where 'a' comes before 'b'.
    fn common_length(&self, a: usize, b: usize) -> usize {
        debug_assert!(a < b, "the source must come before the match");
        let end = self.len().min(b + MAX_MATCH);
        let mut len = 0;
        while b + len < end && self.input[a + len] == self.input[b + len] {
            len += 1;
        }
        len
    }

    /// Returns the longest earlier string that matches the string at 'idx',
    /// or an empty range if none is at least MIN_MATCH long.
    fn find(&self, idx: usize) -> Range<usize> {
        let base = self.bucket(idx) * DICT_BANKS;
        let mut best = 0..0;

        for &loc in &self.table[base..base + DICT_BANKS] {
            if loc == EMPTY_CELL {
                break;
            }
            let loc = loc as usize;
            // Entries are ordered by age, so the rest are even further away.
            if idx - loc >= MAX_OFFSET {
                break;
            }
            // Skip candidates that can't beat the current best.
            let probe = best.len();
            if idx + probe < self.len()
                && self.input[loc + probe] != self.input[idx + probe]
            {
                continue;
            }
            let len = self.common_length(loc, idx);
            if len > best.len() {
                best = loc..loc + len;
                // Nothing can be longer than the rest of the input.
                if idx + len >= self.len().min(idx + MAX_MATCH) {
                    break;
                }
            }
        }

        if best.len() >= MIN_MATCH {
            best
        } else {
            0..0
        }
    }

    /// Record position 'idx' as the most recent entry of its bucket.
    fn insert(&mut self, idx: usize) {
        let base = self.bucket(idx) * DICT_BANKS;
        self.table.copy_within(base..base + DICT_BANKS - 1, base + 1);
        self.table[base] = idx as u32;
    }

    /// Returns how many trailing literals also precede the match source, so
    /// the match can be extended backwards over them.
    fn extend_backwards(&self, lit: &Range<usize>, mat: &Range<usize>) -> usize {
        if mat.is_empty() || lit.is_empty() {
            return 0;
        }
        let limit = lit.len().min(mat.start);
        let mut i = 0;
        while i < limit && self.input[mat.start - 1 - i] == self.input[lit.end - 1 - i]
        {
            i += 1;
        }
        i
    }
}

/// A greedy matcher with a lookahead of PARSE_SEARCH positions: before
/// taking a match it checks whether starting a little later pays off.
pub struct Matcher<
    'a,
    const MAX_OFFSET: usize,
    const MAX_MATCH: usize,
    const DICT_SIZE_BITS: usize,
    const DICT_BANKS: usize,
    const PARSE_SEARCH: usize,
> {
    table: MatchTable<'a, MAX_OFFSET, MAX_MATCH, DICT_SIZE_BITS, DICT_BANKS>,
    /// The iterator location in the input.
    cursor: usize,
}

impl<
        'a,
        const MAX_OFFSET: usize,
        const MAX_MATCH: usize,
        const DICT_SIZE_BITS: usize,
        const DICT_BANKS: usize,
        const PARSE_SEARCH: usize,
    >
    Matcher<'a, MAX_OFFSET, MAX_MATCH, DICT_SIZE_BITS, DICT_BANKS, PARSE_SEARCH>
{
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            table: MatchTable::new(input),
            cursor: 0,
        }
    }

    fn next_region(&mut self) -> Option<(Range<usize>, Range<usize>)> {
        let input_len = self.table.len();
        if self.cursor == input_len {
            return None;
        }
        let mut lit = self.cursor..self.cursor;

        'outer: while self.cursor + MIN_MATCH < input_len {
            let mat = self.table.find(self.cursor);
            self.table.insert(self.cursor);

            if mat.is_empty() {
                self.cursor += 1;
                lit.end += 1;
                continue;
            }

            // Lazy parsing: prefer a later match that covers more input. See
            // http://fastcompression.blogspot.com/2011/12/advanced-parsing-strategies.html
            if self.cursor + MIN_MATCH * 2 <= input_len {
                for i in 1..PARSE_SEARCH {
                    let later = self.table.find(self.cursor + i);
                    if !later.is_empty() && later.len() >= mat.len() + i {
                        self.cursor += i;
                        lit.end += i;
                        continue 'outer;
                    }
                }
            }

            let reduce = self.table.extend_backwards(&lit, &mat);

            // Index the positions covered by the match, except the one the
            // next iteration starts at.
            let start = self.cursor + 1;
            let stop = (self.cursor + mat.len()).min(input_len - MIN_MATCH);
            for i in start..stop {
                self.table.insert(i);
            }

            self.cursor += mat.len();
            return Some((lit.start..lit.end - reduce, mat.start - reduce..mat.end));
        }

        // Too close to the end to find matches.
        lit.end = input_len;
        self.cursor = input_len;
        Some((lit, 0..0))
    }
}

impl<
        'a,
        const MAX_OFFSET: usize,
        const MAX_MATCH: usize,
        const DICT_SIZE_BITS: usize,
        const DICT_BANKS: usize,
        const PARSE_SEARCH: usize,
    > Iterator
    for Matcher<
        'a,
        MAX_OFFSET,
        MAX_MATCH,
        DICT_SIZE_BITS,
        DICT_BANKS,
        PARSE_SEARCH,
    >
{
    type Item = (Range<usize>, Range<usize>);

    fn next(&mut self) -> Option<Self::Item> {
        self.next_region()
    }
}

/// A matcher that collects every candidate first and then picks the
/// cheapest parse, walking backwards from the end of the input.
pub struct OptimalMatcher {
    matches: std::vec::IntoIter<(Range<usize>, Range<usize>)>,
}

impl OptimalMatcher {
    pub fn new<
        const MAX_OFFSET: usize,
        const MAX_MATCH: usize,
        const DICT_SIZE_BITS: usize,
        const DICT_BANKS: usize,
    >(
        input: &[u8],
    ) -> Self {
        let table = MatchTable::<
            MAX_OFFSET,
            MAX_MATCH,
            DICT_SIZE_BITS,
            DICT_BANKS,
        >::new(input);
        Self {
            matches: Self::parse(table).into_iter(),
        }
    }

    fn parse<
        const MAX_OFFSET: usize,
        const MAX_MATCH: usize,
        const DICT_SIZE_BITS: usize,
        const DICT_BANKS: usize,
    >(
        mut table: MatchTable<MAX_OFFSET, MAX_MATCH, DICT_SIZE_BITS, DICT_BANKS>,
    ) -> Vec<(Range<usize>, Range<usize>)> {
        let input_len = table.len();
        if input_len <= MIN_MATCH {
            return vec![(0..input_len, 0..0)];
        }

        let mut candidates = Vec::with_capacity(input_len);
        for cursor in 0..input_len - MIN_MATCH {
            candidates.push(table.find(cursor));
            table.insert(cursor);
        }
        candidates.resize(input_len, 0..0);

        // cost[i] is the cheapest encoding of input[i..], counting one unit
        // per literal and 'MATCH_COST' per match. Only the OPTIMAL_SEARCH
        // longest lengths of each match are tried.
        const MATCH_COST: usize = 3;
        const OPTIMAL_SEARCH: usize = 64;
        let mut cost = vec![0usize; input_len + 1];
        for i in (0..input_len).rev() {
            let literal_cost = cost[i + 1] + 1;
            let mat = candidates[i].clone();
            let mut lowest = literal_cost;
            let mut best_len = 0;
            for len in (MIN_MATCH..=mat.len()).rev().take(OPTIMAL_SEARCH) {
                let taken = MATCH_COST + cost[i + len];
                // Prefer the shortest match among equal costs.
                if taken <= lowest {
                    lowest = taken;
                    best_len = len;
                }
            }
            candidates[i] = if best_len == 0 || lowest == literal_cost {
                0..0
            } else {
                mat.start..mat.start + best_len
            };
            cost[i] = lowest;
        }

        let mut selected: Vec<(Range<usize>, Range<usize>)> = Vec::new();
        let mut lit = 0..0;
        let mut curr = 0;
        while curr < input_len {
            let mat = candidates[curr].clone();
            if mat.is_empty() {
                lit.end += 1;
                curr += 1;
                continue;
            }
            curr += mat.len();
            // A match that continues the previous one at the same offset
            // extends it. This undoes the OPTIMAL_MAX_MATCH split.
            if lit.is_empty() {
                if let Some((_, prev)) = selected.last_mut() {
                    if prev.end == mat.start {
                        prev.end = mat.end;
                        lit = curr..curr;
                        continue;
                    }
                }
            }
            let reduce = table.extend_backwards(&lit, &mat);
            selected.push((lit.start..lit.end - reduce, mat.start - reduce..mat.end));
            lit = curr..curr;
        }
        selected.push((lit, 0..0));
        selected
    }
}

impl Iterator for OptimalMatcher {
    type Item = (Range<usize>, Range<usize>);

    fn next(&mut self) -> Option<Self::Item> {
        self.matches.next()
    }
}

/// The highest level accepted by [`select_matcher`].
pub const MAX_LEVEL: u8 = 12;

/// Match length cap of the optimal parser. Longer repeats are split into
/// several matches, which keeps the search linear on repetitive input.
const OPTIMAL_MAX_MATCH: usize = 1024;

/// An iterator over (literals, match) regions.
pub type Regions<'a> =
    Box<dyn Iterator<Item = (Range<usize>, Range<usize>)> + 'a>;

/// Select the matcher and its parameters for the compression 'level'
/// (1..=MAX_LEVEL). MAX_OFF and MAX_LEN bound the offset and the length of
/// matches; the optimal levels use a shorter length cap of their own.
/// Returns None for levels out of range.
pub fn select_matcher<'a, const MAX_OFF: usize, const MAX_LEN: usize>(
    level: u8,
    input: &'a [u8],
) -> Option<Regions<'a>> {
    let matcher: Regions<'a> = match level {
        1 => Box::new(Matcher::<'a, MAX_OFF, MAX_LEN, 16, 2, 1>::new(input)),
        2 => Box::new(Matcher::<'a, MAX_OFF, MAX_LEN, 16, 4, 1>::new(input)),
        3 => Box::new(Matcher::<'a, MAX_OFF, MAX_LEN, 16, 8, 1>::new(input)),
        4 => Box::new(Matcher::<'a, MAX_OFF, MAX_LEN, 16, 8, 2>::new(input)),
        5 => Box::new(Matcher::<'a, MAX_OFF, MAX_LEN, 16, 10, 2>::new(input)),
        6 => Box::new(Matcher::<'a, MAX_OFF, MAX_LEN, 16, 12, 2>::new(input)),
        7 => Box::new(Matcher::<'a, MAX_OFF, MAX_LEN, 17, 12, 2>::new(input)),
        8 => Box::new(Matcher::<'a, MAX_OFF, MAX_LEN, 17, 16, 2>::new(input)),
        9 => Box::new(Matcher::<'a, MAX_OFF, MAX_LEN, 17, 24, 2>::new(input)),
        10 => Box::new(Matcher::<'a, MAX_OFF, MAX_LEN, 17, 32, 4>::new(input)),
        11 => Box::new(OptimalMatcher::new::<MAX_OFF, OPTIMAL_MAX_MATCH, 16, 32>(
            input,
        )),
        12 => Box::new(OptimalMatcher::new::<MAX_OFF, OPTIMAL_MAX_MATCH, 16, 64>(
            input,
        )),
        _ => return None,
    };
    Some(matcher)
}
