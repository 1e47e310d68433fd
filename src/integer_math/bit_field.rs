// src/integer_math/bit_field.rs

//! Packed composite flags over the odd integers below a bound.
//!
//! Bit `k` of the field stands for the odd integer `2k + 1`; a set bit means the
//! number is known to be composite. Even numbers are never stored.
//! The field can be split into `BitSegment`s that own disjoint runs of storage
//! words, so workers can mark composites concurrently without any locking.

use std::ops::Range;

use bitvec::prelude::*;

/// Storage word of the packed field.
pub type Word = u64;

/// Flags held by one storage word.
pub const BITS_PER_WORD: u64 = Word::BITS as u64;

/// Consecutive integers covered by one storage word.
/// Partition boundaries between concurrent segments must be multiples of this.
pub const SPAN_PER_WORD: u64 = 2 * BITS_PER_WORD;

pub struct BitField {
    bits: BitVec<Word, Lsb0>,
    bound: u64,
}

impl BitField {
    /// Creates a field with every odd number below `bound` flagged as a prime candidate.
    pub fn new(bound: u64) -> Self {
        let words = bound.div_ceil(SPAN_PER_WORD).max(1) as usize;
        BitField {
            bits: BitVec::repeat(false, words * BITS_PER_WORD as usize),
            bound,
        }
    }

    /// Exclusive upper bound of the field.
    pub fn bound(&self) -> u64 {
        self.bound
    }

    fn index(i: u64) -> usize {
        (i / 2) as usize
    }

    /// Flags the odd number `i` as composite.
    pub fn mark(&mut self, i: u64) {
        debug_assert!(i % 2 == 1 && i < self.bound, "{} is not an odd number below {}", i, self.bound);
        self.bits.set(Self::index(i), true);
    }

    /// True while the odd number `i >= 3` has not been flagged.
    pub fn is_prime(&self, i: u64) -> bool {
        debug_assert!(i % 2 == 1 && i >= 3 && i < self.bound);
        !self.bits[Self::index(i)]
    }

    /// A single mutable view over `[from, to)`.
    pub fn segment(&mut self, from: u64, to: u64) -> BitSegment<'_> {
        assert!(from >= 3 && from < to && to <= self.bound, "invalid range [{}, {})", from, to);
        let first_word = (from / SPAN_PER_WORD) as usize;
        let end_word = to.div_ceil(SPAN_PER_WORD) as usize;
        BitSegment {
            bits: BitSlice::from_slice_mut(&mut self.bits.as_raw_mut_slice()[first_word..end_word]),
            base: first_word as u64 * SPAN_PER_WORD,
            from,
            to,
        }
    }

    /// Splits `[cuts[0], cuts[last])` into one mutable segment per consecutive pair of cut points.
    ///
    /// Interior cut points must be multiples of `SPAN_PER_WORD`, so no storage word is
    /// shared by two segments.
    pub fn split(&mut self, cuts: &[u64]) -> Vec<BitSegment<'_>> {
        assert!(cuts.len() >= 2, "a partition needs at least two cut points");
        let from = cuts[0];
        let to = cuts[cuts.len() - 1];
        assert!(from >= 3 && from < to && to <= self.bound, "invalid range [{}, {})", from, to);
        for &cut in &cuts[1..cuts.len() - 1] {
            assert!(cut % SPAN_PER_WORD == 0, "cut point {} is not word aligned", cut);
        }

        let mut word = (from / SPAN_PER_WORD) as usize;
        let end_word = to.div_ceil(SPAN_PER_WORD) as usize;
        let mut rest: &mut [Word] = &mut self.bits.as_raw_mut_slice()[word..end_word];

        let mut segments = Vec::with_capacity(cuts.len() - 1);
        for pair in cuts.windows(2) {
            let (seg_from, seg_to) = (pair[0], pair[1]);
            assert!(seg_from < seg_to, "cut points must be strictly ascending");
            let seg_end = seg_to.div_ceil(SPAN_PER_WORD) as usize;
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(seg_end - word);
            segments.push(BitSegment {
                bits: BitSlice::from_slice_mut(head),
                base: word as u64 * SPAN_PER_WORD,
                from: seg_from,
                to: seg_to,
            });
            rest = tail;
            word = seg_end;
        }
        segments
    }
}

/// Mutable view over the flags of `[from, to)`, owning whole storage words.
pub struct BitSegment<'a> {
    bits: &'a mut BitSlice<Word, Lsb0>,
    // First integer covered by the first owned word.
    base: u64,
    from: u64,
    to: u64,
}

impl<'a> BitSegment<'a> {
    pub fn range(&self) -> Range<u64> {
        self.from..self.to
    }

    fn local(&self, i: u64) -> usize {
        ((i - self.base) / 2) as usize
    }

    pub fn mark(&mut self, i: u64) {
        debug_assert!(i % 2 == 1 && i >= self.from && i < self.to);
        let idx = self.local(i);
        self.bits.set(idx, true);
    }

    pub fn is_prime(&self, i: u64) -> bool {
        debug_assert!(i % 2 == 1 && i >= self.from && i < self.to);
        !self.bits[self.local(i)]
    }

    /// Flags every odd multiple of the odd prime `p` inside the segment, starting no lower than `p²`.
    pub fn cross_off(&mut self, p: u64) {
        let square = p * p;
        if square >= self.to {
            return;
        }
        let mut multiple = if square >= self.from {
            square
        } else {
            let m = self.from.div_ceil(p) * p;
            if m % 2 == 0 {
                m + p
            } else {
                m
            }
        };
        let step = 2 * p;
        while multiple < self.to {
            self.mark(multiple);
            multiple += step;
        }
    }

    /// Classic odd-only Eratosthenes over a segment that starts at 3.
    pub fn eratosthenes(&mut self) {
        debug_assert!(self.from <= 3, "self-sieving needs every base prime inside the segment");
        let mut p = 3;
        while p * p < self.to {
            if self.is_prime(p) {
                self.cross_off(p);
            }
            p += 2;
        }
    }

    /// Unflagged odd numbers of the segment in ascending order.
    pub fn collect_primes(&self) -> Vec<u64> {
        let lo = ((self.from - self.base) / 2) as usize;
        let hi = ((self.to - self.base) / 2) as usize;
        let base = self.base;
        self.bits[lo..hi]
            .iter_zeros()
            .map(|k| base + 2 * (lo + k) as u64 + 1)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_and_query() {
        let mut field = BitField::new(100);
        assert!(field.is_prime(9));
        field.mark(9);
        assert!(!field.is_prime(9));
        assert!(field.is_prime(7));
        assert!(field.is_prime(11));
    }

    #[test]
    fn test_span_follows_word_width() {
        assert_eq!(SPAN_PER_WORD, 2 * Word::BITS as u64);
    }

    #[test]
    fn test_eratosthenes_small_segment() {
        let mut field = BitField::new(50);
        let mut segment = field.segment(3, 50);
        segment.eratosthenes();
        assert_eq!(
            segment.collect_primes(),
            vec![3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47]
        );
    }

    #[test]
    fn test_collect_respects_even_from() {
        let mut field = BitField::new(30);
        let mut all = field.segment(3, 30);
        all.eratosthenes();
        drop(all);
        let segment = field.segment(10, 30);
        assert_eq!(segment.collect_primes(), vec![11, 13, 17, 19, 23, 29]);
    }

    #[test]
    fn test_cross_off_starts_at_first_odd_multiple() {
        let mut field = BitField::new(200);
        let mut segment = field.segment(100, 200);
        segment.cross_off(7);
        // 105 is the first odd multiple of 7 at or above 100.
        assert!(!segment.is_prime(105));
        assert!(segment.is_prime(107));
        assert!(!segment.is_prime(119));
        assert!(segment.is_prime(113));
    }

    #[test]
    fn test_split_segments_are_disjoint_words() {
        let bound = 5 * SPAN_PER_WORD + 17;
        let mut field = BitField::new(bound);
        let cuts = [11, SPAN_PER_WORD, 3 * SPAN_PER_WORD, bound];
        let mut segments = field.split(&cuts);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].range(), 11..SPAN_PER_WORD);
        assert_eq!(segments[1].range(), SPAN_PER_WORD..3 * SPAN_PER_WORD);
        assert_eq!(segments[2].range(), 3 * SPAN_PER_WORD..bound);

        // Marking at the edges of neighbouring segments must not bleed across.
        segments[0].mark(SPAN_PER_WORD - 1);
        segments[1].mark(SPAN_PER_WORD + 1);
        assert!(segments[1].is_prime(3 * SPAN_PER_WORD - 1));
        drop(segments);
        assert!(!field.is_prime(SPAN_PER_WORD - 1));
        assert!(!field.is_prime(SPAN_PER_WORD + 1));
        assert!(field.is_prime(SPAN_PER_WORD + 3));
    }

    #[test]
    #[should_panic(expected = "not word aligned")]
    fn test_split_rejects_unaligned_cut() {
        let mut field = BitField::new(1000);
        let _ = field.split(&[3, 100, 1000]);
    }
}
