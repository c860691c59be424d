use std::fmt::{self, Debug, Display};

use itertools::Itertools;

use crate::{
    IntSet,
    element::{DisplayElement, Element},
    word::word_mask,
};

impl<E: Element> Display for IntSet<E> {
    /// Renders the set as `{e1 e2 ...}` in ascending order, using
    /// [`Element::fmt_element`] for each element.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.iter().map(DisplayElement).format(" "))
    }
}

impl<E: Element> Debug for IntSet<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IntSet")?;
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<E: Element> IntSet<E> {
    /// Returns the set as a string of `1`s and `0`s denoting the sum of
    /// `2^x` for each `x` in the set, most significant bit first.
    ///
    /// ```
    /// use intset::IntSet;
    ///
    /// assert_eq!(IntSet::<i32>::new().bit_string(), "0");
    /// assert_eq!(IntSet::from_iter([4, 5]).bit_string(), "110000");
    /// assert_eq!(IntSet::from_iter([0, 4, 5]).bit_string(), "110001");
    /// ```
    pub fn bit_string(&self) -> String {
        let Some(max) = self.last_index() else {
            return "0".to_owned();
        };
        let mut out = String::with_capacity(max + 1);
        for index in (0..=max).rev() {
            let (w, mask) = word_mask(index);
            out.push(if self.words[w] & mask != 0 { '1' } else { '0' });
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use crate::{Element, IntSet, testutil::mkset, word::WORD_BITS};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Key(i32);

    const COPPER: Key = Key(0);
    const JADE: Key = Key(1);
    const CRYSTAL: Key = Key(2);

    impl Element for Key {
        const MIN: Self = Key(i32::MIN);
        const MAX: Self = Key(i32::MAX);

        fn to_index(self) -> Option<usize> {
            self.0.to_index()
        }

        fn from_index(index: usize) -> Self {
            Key(i32::from_index(index))
        }

        fn to_i128(self) -> i128 {
            self.0.to_i128()
        }

        fn fmt_element(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match *self {
                COPPER => f.write_str("copper"),
                JADE => f.write_str("jade"),
                CRYSTAL => f.write_str("crystal"),
                Key(n) => write!(f, "<unknown key: {n}>"),
            }
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(IntSet::<i64>::new().to_string(), "{}");

        let mut set = IntSet::new();
        set.add(1);
        set.add(144);
        set.add(9);
        assert_eq!(set.to_string(), "{1 9 144}");

        let other = mkset([9, 42]);
        assert_eq!(other.to_string(), "{9 42}");
    }

    #[test]
    fn test_display_hook() {
        let mut keys = IntSet::new();
        keys.add(JADE);
        keys.add(COPPER);
        assert_eq!(keys.to_string(), "{copper jade}");

        keys.remove(COPPER);
        assert!(!keys.has(COPPER));
        assert!(keys.has(JADE));

        keys.add(Key(7));
        assert_eq!(keys.to_string(), "{jade <unknown key: 7>}");
    }

    #[test]
    fn test_debug() {
        assert_eq!(format!("{:?}", mkset([3, 1])), "IntSet{1, 3}");
        assert_eq!(format!("{:?}", IntSet::from_iter([CRYSTAL])), "IntSet{Key(2)}");
    }

    #[test]
    fn test_bit_string() {
        assert_eq!(IntSet::<i64>::new().bit_string(), "0");
        assert_eq!(mkset([0]).bit_string(), "1");
        assert_eq!(mkset([4, 5]).bit_string(), "110000");
        assert_eq!(mkset([0, 4, 5]).bit_string(), "110001");

        let top = 2 * WORD_BITS as i64 + 3;
        let s = mkset([0, top]).bit_string();
        assert_eq!(s.len(), top as usize + 1);
        assert!(s.starts_with('1') && s.ends_with('1'));
        assert_eq!(s.matches('1').count(), 2);
    }

    #[test]
    fn test_bit_string_after_removal() {
        let mut set = mkset([1, 3 * WORD_BITS as i64]);
        set.remove(3 * WORD_BITS as i64);
        assert_eq!(set.bit_string(), "10");
        set.remove(1);
        assert_eq!(set.bit_string(), "0");
    }
}
