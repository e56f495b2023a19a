//! Ordering policies for sorted sequences
//!
//! A [`SortedSeq`](super::SortedSeq) takes its element order from one of two
//! policies: [`NaturalOrder`] for types implementing [`Ord`], and
//! [`ThreeWayOrder`] for types implementing [`ThreeWayCompare`]. The policy
//! trait is sealed so these are the only two ordering sources.

use std::cmp::Ordering;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::NaturalOrder {}
    impl Sealed for super::ThreeWayOrder {}
}

/// Three-way comparison capability for element types without a native order
///
/// `compare_to` returns a negative value when `self` sorts before `other`,
/// zero when they are equivalent and a positive value when `self` sorts
/// after `other`. Implementations must describe a total order; if they do
/// not, search and insertion results are unspecified (but memory safe).
///
/// # Examples
///
/// ```rust
/// use ordseq::ThreeWayCompare;
///
/// struct Version(u32);
///
/// impl ThreeWayCompare for Version {
///     fn compare_to(&self, other: &Self) -> i32 {
///         self.0.cmp(&other.0) as i32
///     }
/// }
///
/// assert!(Version(1).compare_to(&Version(2)) < 0);
/// ```
pub trait ThreeWayCompare {
    /// Compare `self` with `other`: negative, zero or positive
    fn compare_to(&self, other: &Self) -> i32;
}

/// Source of element ordering for a sorted sequence
pub trait OrderPolicy<T: ?Sized>: sealed::Sealed {
    /// Order `a` relative to `b`
    fn compare(a: &T, b: &T) -> Ordering;
}

/// Orders elements by their [`Ord`] implementation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> OrderPolicy<T> for NaturalOrder {
    #[inline]
    fn compare(a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Orders elements by their [`ThreeWayCompare`] implementation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThreeWayOrder;

impl<T: ThreeWayCompare + ?Sized> OrderPolicy<T> for ThreeWayOrder {
    #[inline]
    fn compare(a: &T, b: &T) -> Ordering {
        a.compare_to(b).cmp(&0)
    }
}
