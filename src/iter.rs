use std::{iter::FusedIterator, marker::PhantomData};

use crate::{
    IntSet,
    element::Element,
    word::{Ones, Word, index_of, ntz},
};

/// Iterator over the elements of an [`IntSet`] in ascending order.
#[must_use]
#[derive(Clone, Debug)]
pub struct Iter<'a, E> {
    ones: Ones<'a>,
    _marker: PhantomData<E>,
}

impl<'a, E> Iter<'a, E> {
    pub(crate) fn new(ones: Ones<'a>) -> Self {
        Self { ones, _marker: PhantomData }
    }
}

impl<E: Element> Iterator for Iter<'_, E> {
    type Item = E;

    #[inline]
    fn next(&mut self) -> Option<E> {
        self.ones.next().map(E::from_index)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ones.size_hint()
    }
}

impl<E: Element> FusedIterator for Iter<'_, E> {}

/// Owning iterator over the elements of an [`IntSet`] in ascending order.
#[must_use]
#[derive(Clone, Debug)]
pub struct IntoIter<E> {
    words: std::vec::IntoIter<Word>,
    cursor: usize,
    current: Word,
    _marker: PhantomData<E>,
}

impl<E: Element> Iterator for IntoIter<E> {
    type Item = E;

    fn next(&mut self) -> Option<E> {
        while self.current == 0 {
            self.current = self.words.next()?;
            self.cursor += 1;
        }
        // cursor is one past the word holding `current`
        let index = index_of(self.cursor - 1, ntz(self.current));
        self.current &= self.current - 1;
        Some(E::from_index(index))
    }
}

impl<E: Element> FusedIterator for IntoIter<E> {}

impl<E: Element> IntoIterator for IntSet<E> {
    type Item = E;
    type IntoIter = IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            words: self.words.into_iter(),
            cursor: 0,
            current: 0,
            _marker: PhantomData,
        }
    }
}

impl<'a, E: Element> IntoIterator for &'a IntSet<E> {
    type Item = E;
    type IntoIter = Iter<'a, E>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<E: Element> FromIterator<E> for IntSet<E> {
    #[track_caller]
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut set = IntSet::new();
        set.add_all(iter);
        set
    }
}

impl<E: Element> Extend<E> for IntSet<E> {
    #[inline]
    #[track_caller]
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl<'a, E: Element> Extend<&'a E> for IntSet<E> {
    #[inline]
    #[track_caller]
    fn extend<I: IntoIterator<Item = &'a E>>(&mut self, iter: I) {
        self.add_all(iter.into_iter().copied());
    }
}
