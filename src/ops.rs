use std::{
    hash::{Hash, Hasher},
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Sub, SubAssign},
};

use itertools::{EitherOrBoth, Itertools};

use crate::{IntSet, word::trimmed_len};

impl<E> IntSet<E> {
    /// Sets `self` to the union `self ∪ other`.
    ///
    /// ```
    /// use intset::IntSet;
    ///
    /// let mut a = IntSet::from_iter([1, 144, 9]);
    /// a.union_with(&IntSet::from_iter([9, 42]));
    /// assert_eq!(a.to_string(), "{1 9 42 144}");
    /// ```
    pub fn union_with(&mut self, other: &IntSet<E>) {
        let overlap = self.words.len().min(other.words.len());
        for (w, &o) in self.words.iter_mut().zip(&other.words) {
            *w |= o;
        }
        self.extend_words(&other.words[overlap..]);
    }

    /// Sets `self` to the intersection `self ∩ other`.
    ///
    /// ```
    /// use intset::IntSet;
    ///
    /// let mut a = IntSet::from_iter([1, 144, 9]);
    /// a.intersect_with(&IntSet::from_iter([9, 42]));
    /// assert_eq!(a.to_string(), "{9}");
    /// ```
    pub fn intersect_with(&mut self, other: &IntSet<E>) {
        for pair in self.words.iter_mut().zip_longest(&other.words) {
            match pair {
                EitherOrBoth::Both(w, &o) => *w &= o,
                // other has no counterpart for these words
                EitherOrBoth::Left(w) => *w = 0,
                EitherOrBoth::Right(_) => break,
            }
        }
    }

    /// Returns `true` if `self ∩ other` is non-empty. Neither set is modified.
    pub fn intersects(&self, other: &IntSet<E>) -> bool {
        self.words
            .iter()
            .zip(&other.words)
            .any(|(&w, &o)| w & o != 0)
    }

    /// Sets `self` to the difference `self ∖ other`.
    ///
    /// ```
    /// use intset::IntSet;
    ///
    /// let mut a = IntSet::from_iter([1, 144, 9]);
    /// a.difference_with(&IntSet::from_iter([9, 42]));
    /// assert_eq!(a.to_string(), "{1 144}");
    /// ```
    pub fn difference_with(&mut self, other: &IntSet<E>) {
        for (w, &o) in self.words.iter_mut().zip(&other.words) {
            *w &= !o;
        }
    }

    /// Sets `self` to the symmetric difference `self ∆ other`.
    ///
    /// ```
    /// use intset::IntSet;
    ///
    /// let mut a = IntSet::from_iter([1, 144, 9]);
    /// a.symmetric_difference(&IntSet::from_iter([9, 42]));
    /// assert_eq!(a.to_string(), "{1 42 144}");
    /// ```
    pub fn symmetric_difference(&mut self, other: &IntSet<E>) {
        let overlap = self.words.len().min(other.words.len());
        for (w, &o) in self.words.iter_mut().zip(&other.words) {
            *w ^= o;
        }
        self.extend_words(&other.words[overlap..]);
    }

    /// Returns `true` if every element of `self` is also in `other`.
    pub fn subset_of(&self, other: &IntSet<E>) -> bool {
        self.words
            .iter()
            .zip_longest(&other.words)
            .all(|pair| match pair {
                EitherOrBoth::Both(&w, &o) => w & !o == 0,
                EitherOrBoth::Left(&w) => w == 0,
                EitherOrBoth::Right(_) => true,
            })
    }

    /// Returns `true` if `self` and `other` contain the same elements.
    ///
    /// Trailing zero words left behind by removals do not affect the result.
    pub fn equals(&self, other: &IntSet<E>) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        if self.len() != other.len() {
            return false;
        }
        self.words
            .iter()
            .zip_longest(&other.words)
            .all(|pair| match pair {
                EitherOrBoth::Both(w, o) => w == o,
                EitherOrBoth::Left(&w) | EitherOrBoth::Right(&w) => w == 0,
            })
    }

    /// Appends `words` verbatim past the end of the current storage.
    fn extend_words(&mut self, words: &[crate::word::Word]) {
        if !words.is_empty() {
            let len = self.words.len() + words.len();
            tracing::trace!(from = self.words.len(), to = len, "intset grow");
            self.words.extend_from_slice(words);
        }
    }
}

impl<E> PartialEq for IntSet<E> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl<E> Eq for IntSet<E> {}

impl<E> Hash for IntSet<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // trailing zero words do not participate in equality
        self.words[..trimmed_len(&self.words)].hash(state);
    }
}

macro_rules! binary_bitop {
    ($BitOp:tt, $bitop:ident, $BitOpAssign:tt, $bitassign:ident, $method:ident) => {
        impl<E> $BitOpAssign<&IntSet<E>> for IntSet<E> {
            #[inline]
            fn $bitassign(&mut self, rhs: &IntSet<E>) {
                self.$method(rhs)
            }
        }
        impl<E> $BitOpAssign<IntSet<E>> for IntSet<E> {
            #[inline]
            fn $bitassign(&mut self, rhs: IntSet<E>) {
                self.$method(&rhs)
            }
        }
        impl<E> $BitOp<&IntSet<E>> for IntSet<E> {
            type Output = IntSet<E>;
            #[inline]
            fn $bitop(mut self, rhs: &IntSet<E>) -> Self::Output {
                self.$method(rhs);
                self
            }
        }
        impl<E> $BitOp<IntSet<E>> for IntSet<E> {
            type Output = IntSet<E>;
            #[inline]
            fn $bitop(mut self, rhs: IntSet<E>) -> Self::Output {
                self.$method(&rhs);
                self
            }
        }
        impl<E> $BitOp<&IntSet<E>> for &IntSet<E> {
            type Output = IntSet<E>;
            #[inline]
            fn $bitop(self, rhs: &IntSet<E>) -> Self::Output {
                let mut out = self.clone();
                out.$method(rhs);
                out
            }
        }
    };
}

binary_bitop!(BitOr, bitor, BitOrAssign, bitor_assign, union_with);
binary_bitop!(BitAnd, bitand, BitAndAssign, bitand_assign, intersect_with);
binary_bitop!(BitXor, bitxor, BitXorAssign, bitxor_assign, symmetric_difference);
binary_bitop!(Sub, sub, SubAssign, sub_assign, difference_with);
