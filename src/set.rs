use std::marker::PhantomData;

use crate::{
    IntSetError,
    element::Element,
    iter::Iter,
    word::{self, Word, WORD_BITS, index_of, mask_below, nlz, ntz, popcount, word_bit, word_mask},
};

/// A set of small non-negative integers backed by a packed bit vector.
///
/// Membership of the element with index `x` is stored in bit `x % W` of word
/// `x / W`, where `W` is the width of [`Word`]. Storage grows to fit the
/// largest element ever added and is never trimmed automatically, so
/// `add`, `remove` and `has` run in constant time while `len`, `min`, `max`
/// and `take_min` are linear in the number of words.
///
/// The default value is a valid empty set. `IntSet` is not `Copy`; use
/// [`IntSet::copy`] or `Clone` to produce an independent set.
///
/// # Examples
///
/// ```
/// use intset::IntSet;
///
/// let mut s1 = IntSet::<i32>::new();
/// s1.add(1);
/// s1.add(144);
/// s1.add(9);
/// assert_eq!(s1.to_string(), "{1 9 144}");
///
/// let s2 = IntSet::from_iter([9, 42]);
/// s1.union_with(&s2);
/// assert_eq!(s1.to_string(), "{1 9 42 144}");
///
/// assert!(s1.has(9));
/// assert!(!s1.has(123));
/// ```
pub struct IntSet<E = isize> {
    pub(crate) words: Vec<Word>,
    _marker: PhantomData<E>,
}

impl<E> Clone for IntSet<E> {
    fn clone(&self) -> Self {
        Self { words: self.words.clone(), _marker: PhantomData }
    }

    fn clone_from(&mut self, source: &Self) {
        self.words.clone_from(&source.words);
    }
}

static_assertions::const_assert_eq!(
    std::mem::size_of::<IntSet<i64>>(),
    std::mem::size_of::<Vec<Word>>()
);

impl<E> Default for IntSet<E> {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl<E> IntSet<E> {
    /// An empty set, suitable for usage in a const context.
    pub const EMPTY: Self = Self { words: Vec::new(), _marker: PhantomData };

    /// Creates an empty set.
    #[inline]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Creates an empty set with storage preallocated for indices below `bits`.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            words: Vec::with_capacity(bits.div_ceil(WORD_BITS)),
            _marker: PhantomData,
        }
    }

    /// Returns the backing words, least significant first. May contain
    /// trailing zero words.
    #[inline]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Returns the number of elements in the set.
    ///
    /// ```
    /// use intset::IntSet;
    ///
    /// let set = IntSet::from_iter([1, 144, 9, 9]);
    /// assert_eq!(set.len(), 3);
    /// ```
    pub fn len(&self) -> usize {
        self.words.iter().map(|&w| popcount(w)).sum()
    }

    /// Returns `true` if the set contains no elements.
    ///
    /// A set may be empty while still holding allocated zero words.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Removes every element and releases the storage.
    pub fn clear(&mut self) {
        if !self.words.is_empty() {
            tracing::trace!(words = self.words.len(), "intset clear");
        }
        self.words = Vec::new();
    }

    /// Returns an independent copy of this set.
    #[inline]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Ensures `words` holds at least `len` words, appending zero words.
    #[inline]
    pub(crate) fn grow_to(&mut self, len: usize) {
        if len > self.words.len() {
            tracing::trace!(from = self.words.len(), to = len, "intset grow");
            self.words.resize(len, 0);
        }
    }

    /// Returns the index of the smallest element.
    #[inline]
    fn first_index(&self) -> Option<usize> {
        let (i, &w) = self.words.iter().enumerate().find(|&(_, &w)| w != 0)?;
        Some(index_of(i, ntz(w)))
    }

    /// Returns the index of the largest element.
    #[inline]
    pub(crate) fn last_index(&self) -> Option<usize> {
        let (i, &w) = self.words.iter().enumerate().rev().find(|&(_, &w)| w != 0)?;
        Some(index_of(i, WORD_BITS as u32 - 1 - nlz(w)))
    }

    /// Returns the smallest index `>= index` present in the set.
    fn ceiling_index(&self, index: usize) -> Option<usize> {
        let (w, bit) = word_bit(index);
        let first = mask_below(*self.words.get(w)?, bit);
        if first != 0 {
            return Some(index_of(w, ntz(first)));
        }
        let (i, &word) = self
            .words
            .iter()
            .enumerate()
            .skip(w + 1)
            .find(|&(_, &word)| word != 0)?;
        Some(index_of(i, ntz(word)))
    }

    /// Removes the smallest index from the set.
    fn pop_first_index(&mut self) -> Option<usize> {
        let (i, w) = self.words.iter_mut().enumerate().find(|(_, w)| **w != 0)?;
        let tz = ntz(*w);
        *w &= !(1 << tz);
        Some(index_of(i, tz))
    }
}

impl<E: Element> IntSet<E> {
    /// Returns the index of `value`, panicking if it is outside the domain.
    #[inline]
    #[track_caller]
    fn checked_index(value: E) -> usize {
        match value.to_index() {
            Some(index) => index,
            None => panic!("{}", IntSetError::negative(value)),
        }
    }

    /// Returns `true` if the set contains `value`.
    ///
    /// Values outside the non-negative domain are never present.
    ///
    /// ```
    /// use intset::IntSet;
    ///
    /// let set = IntSet::from_iter([1, 144, 9]);
    /// assert!(set.has(9));
    /// assert!(!set.has(10));
    /// assert!(!set.has(-9));
    /// ```
    #[inline]
    pub fn has(&self, value: E) -> bool {
        let Some(index) = value.to_index() else {
            return false;
        };
        let (w, mask) = word_mask(index);
        self.words.get(w).is_some_and(|&word| word & mask != 0)
    }

    /// Adds `value` to the set, growing storage as needed.
    ///
    /// Returns `true` if the set grew, `false` if `value` was already present.
    ///
    /// # Panics
    ///
    /// Panics if `value` is negative. Use [`IntSet::try_add`] to handle that
    /// case as an error.
    ///
    /// ```
    /// use intset::IntSet;
    ///
    /// let mut set = IntSet::<i64>::new();
    /// assert!(set.add(42));
    /// assert!(!set.add(42));
    /// assert_eq!(set.len(), 1);
    /// ```
    #[inline]
    #[track_caller]
    pub fn add(&mut self, value: E) -> bool {
        self.add_index(Self::checked_index(value))
    }

    /// Adds `value` to the set, returning an error if it is negative.
    ///
    /// ```
    /// use intset::{IntSet, IntSetError};
    ///
    /// let mut set = IntSet::<i32>::new();
    /// assert_eq!(set.try_add(3), Ok(true));
    /// assert_eq!(set.try_add(-3), Err(IntSetError::NegativeElement { value: -3 }));
    /// ```
    pub fn try_add(&mut self, value: E) -> Result<bool, IntSetError> {
        let index = value.to_index().ok_or_else(|| IntSetError::negative(value))?;
        Ok(self.add_index(index))
    }

    #[inline]
    fn add_index(&mut self, index: usize) -> bool {
        let (w, mask) = word_mask(index);
        if self.words.get(w).is_some_and(|&word| word & mask != 0) {
            return false;
        }
        self.grow_to(w + 1);
        self.words[w] |= mask;
        true
    }

    /// Adds every value in `values`, in order.
    ///
    /// ```
    /// use intset::IntSet;
    ///
    /// let mut set = IntSet::new();
    /// set.add_all([1, 144, 9]);
    /// assert_eq!(set.to_string(), "{1 9 144}");
    /// ```
    #[track_caller]
    pub fn add_all<I: IntoIterator<Item = E>>(&mut self, values: I) {
        for value in values {
            self.add(value);
        }
    }

    /// Adds every value in `values`, growing storage to fit the largest one
    /// before any bit is set.
    ///
    /// # Panics
    ///
    /// Panics if any value is negative, leaving the set unchanged.
    #[track_caller]
    pub fn add_slice(&mut self, values: &[E]) {
        let Some(max) = values.iter().map(|&v| Self::checked_index(v)).max() else {
            return;
        };
        let len = word_bit(max).0 + 1;
        if len > self.words.len() {
            self.words.reserve_exact(len - self.words.len());
            self.grow_to(len);
        }
        for &value in values {
            self.add(value);
        }
    }

    /// Removes `value` from the set.
    ///
    /// Returns `true` if `value` was present. Storage is never released.
    #[inline]
    pub fn remove(&mut self, value: E) -> bool {
        let Some(index) = value.to_index() else {
            return false;
        };
        self.remove_index(index)
    }

    /// Removes `value` from the set, returning an error if it is negative.
    pub fn try_remove(&mut self, value: E) -> Result<bool, IntSetError> {
        let index = value.to_index().ok_or_else(|| IntSetError::negative(value))?;
        Ok(self.remove_index(index))
    }

    #[inline]
    fn remove_index(&mut self, index: usize) -> bool {
        let (w, mask) = word_mask(index);
        match self.words.get_mut(w) {
            Some(word) if *word & mask != 0 => {
                *word &= !mask;
                true
            }
            _ => false,
        }
    }

    /// Returns an iterator over the elements in ascending order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, E> {
        Iter::new(word::Ones::new(&self.words))
    }

    /// Appends the elements of the set to `out` in ascending order.
    ///
    /// `out` is grown at most once.
    ///
    /// ```
    /// use intset::IntSet;
    ///
    /// let set = IntSet::from_iter([144, 9]);
    /// let mut out = vec![-1];
    /// set.append_to(&mut out);
    /// assert_eq!(out, [-1, 9, 144]);
    /// ```
    pub fn append_to(&self, out: &mut Vec<E>) {
        out.reserve_exact(self.len());
        out.extend(self.iter());
    }

    /// Returns the elements of the set in ascending order.
    pub fn elems(&self) -> Vec<E> {
        let mut out = Vec::new();
        self.append_to(&mut out);
        out
    }

    /// Removes the smallest element and writes it to `out`.
    ///
    /// Returns `false` and leaves `out` untouched if the set is empty. This
    /// supports draining the set as a worklist:
    ///
    /// ```
    /// use intset::IntSet;
    ///
    /// let mut worklist = IntSet::from_iter([5, 3, 8]);
    /// let mut x = 0;
    /// let mut seen = vec![];
    /// while worklist.take_min(&mut x) {
    ///     seen.push(x);
    /// }
    /// assert_eq!(seen, [3, 5, 8]);
    /// assert!(worklist.is_empty());
    /// ```
    pub fn take_min(&mut self, out: &mut E) -> bool {
        match self.pop_min() {
            Some(value) => {
                *out = value;
                true
            }
            None => false,
        }
    }

    /// Removes and returns the smallest element, or `None` if the set is empty.
    #[inline]
    pub fn pop_min(&mut self) -> Option<E> {
        self.pop_first_index().map(E::from_index)
    }

    /// Returns the smallest element, or `None` if the set is empty.
    #[inline]
    pub fn first(&self) -> Option<E> {
        self.first_index().map(E::from_index)
    }

    /// Returns the largest element, or `None` if the set is empty.
    #[inline]
    pub fn last(&self) -> Option<E> {
        self.last_index().map(E::from_index)
    }

    /// Returns the smallest element, or [`Element::MAX`] if the set is empty.
    ///
    /// ```
    /// use intset::IntSet;
    ///
    /// assert_eq!(IntSet::from_iter([9, 1, 144]).min(), 1);
    /// assert_eq!(IntSet::<i32>::new().min(), i32::MAX);
    /// ```
    #[inline]
    pub fn min(&self) -> E {
        self.first().unwrap_or(E::MAX)
    }

    /// Returns the largest element, or [`Element::MIN`] if the set is empty.
    ///
    /// ```
    /// use intset::IntSet;
    ///
    /// assert_eq!(IntSet::from_iter([9, 1, 144]).max(), 144);
    /// assert_eq!(IntSet::<i32>::new().max(), i32::MIN);
    /// ```
    #[inline]
    pub fn max(&self) -> E {
        self.last().unwrap_or(E::MIN)
    }

    /// Returns the smallest element `>= value`, or `None` if there is none.
    ///
    /// Negative values behave like `0`.
    pub fn ceiling(&self, value: E) -> Option<E> {
        let index = value.to_index().unwrap_or(0);
        self.ceiling_index(index).map(E::from_index)
    }

    /// Returns the smallest element `>= value`, or [`Element::MAX`] if there
    /// is none.
    ///
    /// ```
    /// use intset::IntSet;
    ///
    /// let set = IntSet::from_iter([1, 9, 144]);
    /// assert_eq!(set.lower_bound(1), 1);
    /// assert_eq!(set.lower_bound(8), 9);
    /// assert_eq!(set.lower_bound(145), isize::MAX);
    /// ```
    #[inline]
    pub fn lower_bound(&self, value: E) -> E {
        self.ceiling(value).unwrap_or(E::MAX)
    }
}
