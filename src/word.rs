//! Word-level storage primitives.
//!
//! An [`IntSet`](crate::IntSet) stores membership in a sequence of fixed width
//! words. Word `i` covers the elements `[i * WORD_BITS, (i + 1) * WORD_BITS)`,
//! with the least significant bit holding the smallest element.

use static_assertions::const_assert;

/// The storage word. Selected once for the whole crate by the `word32` feature.
#[cfg(not(feature = "word32"))]
pub type Word = u64;

/// The storage word. Selected once for the whole crate by the `word32` feature.
#[cfg(feature = "word32")]
pub type Word = u32;

/// The number of bits in a [`Word`].
pub const WORD_BITS: usize = Word::BITS as usize;

/// log2 of [`WORD_BITS`]; the shift that maps an index to its word.
pub const LG2_WORD_BITS: u32 = WORD_BITS.trailing_zeros();

/// Mask that maps an index to its bit inside a word.
pub const BIT_MASK: usize = WORD_BITS - 1;

const_assert!(WORD_BITS.is_power_of_two());
const_assert!(WORD_BITS == 32 || WORD_BITS == 64);
const_assert!(1 << LG2_WORD_BITS == WORD_BITS);

/// Return the word position and bit position of `index`
#[inline(always)]
pub const fn word_bit(index: usize) -> (usize, u32) {
    (index >> LG2_WORD_BITS, (index & BIT_MASK) as u32)
}

/// Return the word position of `index` and a single bit mask selecting it
#[inline(always)]
pub const fn word_mask(index: usize) -> (usize, Word) {
    let (word, bit) = word_bit(index);
    (word, 1 << bit)
}

/// Return the index of `bit` inside word number `word`
#[inline(always)]
pub const fn index_of(word: usize, bit: u32) -> usize {
    (word << LG2_WORD_BITS) | bit as usize
}

/// Number of set bits in `w`.
#[inline(always)]
pub const fn popcount(w: Word) -> usize {
    w.count_ones() as usize
}

/// Number of trailing zeros in `w`, i.e. the position of its lowest set bit.
#[inline(always)]
pub const fn ntz(w: Word) -> u32 {
    w.trailing_zeros()
}

/// Number of leading zeros in `w`.
#[inline(always)]
pub const fn nlz(w: Word) -> u32 {
    w.leading_zeros()
}

/// Clears every bit of `w` below `bit`.
#[inline(always)]
pub const fn mask_below(w: Word, bit: u32) -> Word {
    // bit < WORD_BITS, so the shift never overflows
    w & (Word::MAX << bit)
}

/// Returns the length of `words` once trailing zero words are ignored.
#[inline]
pub fn trimmed_len(words: &[Word]) -> usize {
    words.iter().rposition(|&w| w != 0).map_or(0, |i| i + 1)
}

/// Iterates over the positions of the set bits in a word sequence, lowest first.
#[derive(Clone, Debug)]
pub struct Ones<'a> {
    words: &'a [Word],
    cursor: usize,
    current: Word,
}

impl<'a> Ones<'a> {
    pub fn new(words: &'a [Word]) -> Self {
        let current = words.first().copied().unwrap_or(0);
        Self { words, cursor: 0, current }
    }
}

impl Iterator for Ones<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        while self.current == 0 {
            if self.cursor + 1 >= self.words.len() {
                return None;
            }
            self.cursor += 1;
            self.current = self.words[self.cursor];
        }
        let index = index_of(self.cursor, ntz(self.current));
        // clear the lowest set bit
        self.current &= self.current - 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self
            .words
            .get(self.cursor + 1..)
            .map_or(0, |ws| ws.iter().map(|&w| popcount(w)).sum());
        let n = popcount(self.current) + rest;
        (n, Some(n))
    }
}

impl std::iter::FusedIterator for Ones<'_> {}

#[cfg(test)]
mod tests {
    use bitvec::{order::Lsb0, view::BitView};
    use itertools::assert_equal;

    use super::*;

    #[test]
    fn test_word_bit() {
        assert_eq!(word_bit(0), (0, 0));
        assert_eq!(word_bit(1), (0, 1));
        assert_eq!(word_bit(WORD_BITS - 1), (0, WORD_BITS as u32 - 1));
        assert_eq!(word_bit(WORD_BITS), (1, 0));
        assert_eq!(word_bit(3 * WORD_BITS + 7), (3, 7));

        for i in [0, 1, 5, 31, 32, 63, 64, 65, 1000, 123456] {
            let (w, b) = word_bit(i);
            assert_eq!(w, i / WORD_BITS);
            assert_eq!(b as usize, i % WORD_BITS);
            assert_eq!(index_of(w, b), i);
            assert_eq!(word_mask(i), (w, 1 << b));
        }
    }

    #[test]
    fn test_mask_below() {
        assert_eq!(mask_below(Word::MAX, 0), Word::MAX);
        assert_eq!(mask_below(0b1011, 1), 0b1010);
        assert_eq!(mask_below(0b1011, 2), 0b1000);
        assert_eq!(mask_below(0b1011, 4), 0);
        assert_eq!(mask_below(Word::MAX, WORD_BITS as u32 - 1), 1 << (WORD_BITS - 1));
    }

    #[test]
    fn test_trimmed_len() {
        assert_eq!(trimmed_len(&[]), 0);
        assert_eq!(trimmed_len(&[0, 0]), 0);
        assert_eq!(trimmed_len(&[1, 0, 0]), 1);
        assert_eq!(trimmed_len(&[0, 0, 4]), 3);
    }

    #[test]
    fn test_ones() {
        assert!(Ones::new(&[]).next().is_none());
        assert!(Ones::new(&[0, 0, 0]).next().is_none());

        let words: [Word; 4] = [0b101, 0, Word::MAX, 1 << (WORD_BITS - 1)];
        let expected = [0, 2]
            .into_iter()
            .chain(2 * WORD_BITS..3 * WORD_BITS)
            .chain([4 * WORD_BITS - 1]);
        assert_equal(Ones::new(&words), expected);
        assert_eq!(Ones::new(&words).size_hint(), (WORD_BITS + 3, Some(WORD_BITS + 3)));
    }

    #[test]
    fn test_ones_matches_bitvec() {
        let words: [Word; 3] = [0xdead_beef, 0x1234_5678, 0xf00d];
        let bits = words.view_bits::<Lsb0>();
        assert_equal(Ones::new(&words), bits.iter_ones());
        assert_eq!(
            words.iter().map(|&w| popcount(w)).sum::<usize>(),
            bits.count_ones()
        );
    }
}
