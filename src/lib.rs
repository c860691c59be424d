//! `intset` provides [`IntSet`], a compact and fast representation for sets of
//! small non-negative integers backed by a packed bit vector.
//!
//! ## Key Features:
//!
//! - **Word-packed storage**: element `x` lives in bit `x % W` of word `x / W`,
//!   where `W` is 64 (or 32 with the `word32` feature). `add`, `remove` and
//!   `has` are O(1); `len`, `min`, `max` and `take_min` scan the words.
//!
//! - **Whole-set algebra**: union, intersection, difference, symmetric
//!   difference, subset and equality tests operate directly on machine words.
//!
//! - **Typed elements**: any type implementing [`Element`] can be stored,
//!   including newtypes over integers with a custom display form.
//!
//! ```
//! use intset::{IntSet, WORD_BITS};
//!
//! let mut set = IntSet::<i64>::new();
//! set.add(WORD_BITS as i64);
//! assert_eq!(set.words().len(), 2);
//! assert_eq!(set.to_string(), format!("{{{WORD_BITS}}}"));
//! ```

use thiserror::Error;

mod element;
mod iter;
mod ops;
mod render;
mod set;
mod word;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;

pub use element::Element;
pub use iter::{IntoIter, Iter};
pub use set::IntSet;
pub use word::{WORD_BITS, Word};

/// Errors reported by the checked [`IntSet`] operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IntSetError {
    /// The element is negative and so has no index in the set.
    #[error("element {value} is outside the non-negative domain")]
    NegativeElement { value: i128 },
}

impl IntSetError {
    pub(crate) fn negative<E: Element>(element: E) -> Self {
        Self::NegativeElement { value: element.to_i128() }
    }
}
