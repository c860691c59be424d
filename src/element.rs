use std::fmt::{self, Debug};

use num::cast::AsPrimitive;

/// An element type which can be stored in an [`IntSet`](crate::IntSet).
///
/// Elements map onto the dense non-negative index domain `0..=usize::MAX`.
/// Values which have no such index (negative values) are outside the domain
/// of the set.
///
/// Implemented for the signed primitive integers. Newtypes over an integer
/// implement it by forwarding to the wrapped value and may override
/// [`Element::fmt_element`] to control how the set renders them:
///
/// ```
/// use std::fmt;
/// use intset::{Element, IntSet};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// struct Color(i32);
///
/// impl Element for Color {
///     const MIN: Self = Color(i32::MIN);
///     const MAX: Self = Color(i32::MAX);
///
///     fn to_index(self) -> Option<usize> {
///         self.0.to_index()
///     }
///
///     fn from_index(index: usize) -> Self {
///         Color(i32::from_index(index))
///     }
///
///     fn to_i128(self) -> i128 {
///         self.0.to_i128()
///     }
///
///     fn fmt_element(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         match self.0 {
///             0 => f.write_str("red"),
///             1 => f.write_str("green"),
///             n => write!(f, "color#{n}"),
///         }
///     }
/// }
///
/// let set = IntSet::from_iter([Color(1), Color(0), Color(7)]);
/// assert_eq!(set.to_string(), "{red green color#7}");
/// ```
pub trait Element: Copy + Debug {
    /// The smallest value of the element domain. Returned by
    /// [`IntSet::max`](crate::IntSet::max) when the set is empty.
    const MIN: Self;

    /// The largest value of the element domain. Returned by
    /// [`IntSet::min`](crate::IntSet::min) and
    /// [`IntSet::lower_bound`](crate::IntSet::lower_bound) when no element
    /// qualifies.
    const MAX: Self;

    /// Returns the index of this element, or `None` if the element lies
    /// outside the non-negative domain.
    fn to_index(self) -> Option<usize>;

    /// Converts an index produced by [`Element::to_index`] back into an element.
    fn from_index(index: usize) -> Self;

    /// Returns the numeric value of this element, including values outside
    /// the domain. Used to report rejected elements.
    fn to_i128(self) -> i128;

    /// Writes the textual form of this element used by the set's `Display`
    /// implementation. Defaults to the decimal index.
    fn fmt_element(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_index() {
            Some(index) => write!(f, "{index}"),
            None => write!(f, "{self:?}"),
        }
    }
}

macro_rules! impl_element {
    ($($ty:ty),*) => {
        $(
            impl Element for $ty {
                const MIN: Self = <$ty>::MIN;
                const MAX: Self = <$ty>::MAX;

                #[inline(always)]
                fn to_index(self) -> Option<usize> {
                    usize::try_from(self).ok()
                }

                #[inline(always)]
                fn from_index(index: usize) -> Self {
                    index.as_()
                }

                #[inline(always)]
                fn to_i128(self) -> i128 {
                    self.as_()
                }

                fn fmt_element(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    fmt::Display::fmt(self, f)
                }
            }
        )*
    };
}
impl_element!(i8, i16, i32, i64, isize);

/// Adapts an element to `Display` through [`Element::fmt_element`].
pub(crate) struct DisplayElement<E>(pub E);

impl<E: Element> fmt::Display for DisplayElement<E> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_element(f)
    }
}
