//! SortedSeq: a growable array kept in ascending order
//!
//! One implementation serves both ordering sources through the
//! [`OrderPolicy`] parameter:
//!
//! - [`OrderedSeq<T>`] orders `T: Ord` values natively
//! - [`IndexedSeq<T>`] orders values through [`ThreeWayCompare`](super::ThreeWayCompare)
//!
//! Lookups are O(log n). Insertions are O(log n) to find the slot plus O(n)
//! to shift the tail. Equal elements are stored contiguously and `search`
//! always reports the leftmost match.

use super::ordering::{NaturalOrder, OrderPolicy, ThreeWayOrder};
use crate::config::{Config, SeqConfig, DEFAULT_INITIAL_CAPACITY};
use crate::error::{check_bounds, OrdSeqError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::mem;
use std::ops::Index;
use std::slice;

/// Sorted sequence over natively ordered values
pub type OrderedSeq<T> = SortedSeq<T, NaturalOrder>;

/// Sorted sequence over values exposing a three-way comparison
pub type IndexedSeq<T> = SortedSeq<T, ThreeWayOrder>;

/// Growable array that keeps its elements sorted after every insertion
///
/// The backing array is allocated lazily: nothing is reserved until the first
/// insertion, which reserves the configured initial capacity (256 slots by
/// default). After that it grows by doubling and never shrinks.
///
/// # Examples
///
/// ```rust
/// use ordseq::OrderedSeq;
///
/// let mut seq = OrderedSeq::new();
/// seq.append(2);
/// seq.append(1);
/// seq.append(5);
///
/// assert_eq!(seq.as_slice(), &[1, 2, 5]);
/// assert_eq!(seq.search(&1), (0, true));
/// assert_eq!(seq.search(&3), (2, false));
/// ```
pub struct SortedSeq<T, O = NaturalOrder> {
    values: Vec<T>,
    initial_capacity: usize,
    _order: PhantomData<O>,
}

impl<T, O> SortedSeq<T, O> {
    /// Create an empty sequence; no storage is allocated until first insert
    #[inline]
    pub fn new() -> Self {
        Self::with_initial_capacity(DEFAULT_INITIAL_CAPACITY)
    }

    /// Create an empty sequence that reserves `initial_capacity` slots on
    /// first insertion (a value of 0 is treated as 1)
    #[inline]
    pub fn with_initial_capacity(initial_capacity: usize) -> Self {
        Self {
            values: Vec::new(),
            initial_capacity: initial_capacity.max(1),
            _order: PhantomData,
        }
    }

    /// Create an empty sequence from a [`SeqConfig`]
    ///
    /// The configuration is validated first. With `eager_allocation` set,
    /// the initial capacity is reserved here instead of on first insertion,
    /// and a failed reservation is reported as `OutOfMemory`.
    pub fn with_config(config: &SeqConfig) -> Result<Self> {
        config.validate()?;
        let mut seq = Self::with_initial_capacity(config.initial_capacity);
        if config.eager_allocation {
            seq.try_ensure_init()?;
        }
        Ok(seq)
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the sequence is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Allocated slots in the backing array
    #[inline]
    pub fn capacity(&self) -> usize {
        self.values.capacity()
    }

    /// Elements in ascending order
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// Element at `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[inline]
    pub fn element_at(&self, index: usize) -> &T {
        match self.values.get(index) {
            Some(value) => value,
            None => panic!(
                "element index {} out of range for sequence of length {}",
                index,
                self.values.len()
            ),
        }
    }

    /// Element at `index`, or `None` if out of range
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.values.get(index)
    }

    /// Element at `index`, reporting an out of range index as an error
    pub fn try_element_at(&self, index: usize) -> Result<&T> {
        check_bounds(index, self.values.len())?;
        Ok(&self.values[index])
    }

    /// Smallest element
    #[inline]
    pub fn first(&self) -> Option<&T> {
        self.values.first()
    }

    /// Largest element
    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.values.last()
    }

    /// Iterate `(index, &value)` pairs from the start
    #[inline]
    pub fn iter(&self) -> IterFrom<'_, T> {
        self.iter_from(0)
    }

    /// Iterate `(index, &value)` pairs from `start` to the end
    ///
    /// A `start` at or past the end yields nothing.
    ///
    /// ```rust
    /// use ordseq::OrderedSeq;
    ///
    /// let seq: OrderedSeq<i32> = [30, 10, 20].into_iter().collect();
    /// let tail: Vec<_> = seq.iter_from(1).collect();
    /// assert_eq!(tail, vec![(1, &20), (2, &30)]);
    /// ```
    #[inline]
    pub fn iter_from(&self, start: usize) -> IterFrom<'_, T> {
        IterFrom {
            values: &self.values,
            index: start,
        }
    }

    /// Remove all elements, keeping the allocated capacity
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Copy the elements out into a `Vec`
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.values.clone()
    }

    /// Consume the sequence and return its sorted backing array
    pub fn into_vec(self) -> Vec<T> {
        self.values
    }

    fn ensure_init(&mut self) {
        if self.values.capacity() == 0 {
            log::trace!(
                "Reserving {} slots for sorted sequence",
                self.initial_capacity
            );
            self.values.reserve_exact(self.initial_capacity);
        }
    }

    fn try_ensure_init(&mut self) -> Result<()> {
        if self.values.capacity() == 0 {
            log::trace!(
                "Reserving {} slots for sorted sequence",
                self.initial_capacity
            );
            self.values
                .try_reserve_exact(self.initial_capacity)
                .map_err(|_| {
                    OrdSeqError::out_of_memory(
                        self.initial_capacity.saturating_mul(mem::size_of::<T>()),
                    )
                })?;
        }
        Ok(())
    }
}

impl<T, O: OrderPolicy<T>> SortedSeq<T, O> {
    /// Insert `value` at its sorted position and return that position
    ///
    /// A value equal to existing elements is placed before them.
    ///
    /// ```rust
    /// use ordseq::OrderedSeq;
    ///
    /// let mut seq = OrderedSeq::new();
    /// assert_eq!(seq.append(10), 0);
    /// assert_eq!(seq.append(20), 1);
    /// assert_eq!(seq.append(5), 0);
    /// ```
    pub fn append(&mut self, value: T) -> usize {
        self.ensure_init();
        let pos = self.find_insert_position(&value);
        self.values.insert(pos, value);
        pos
    }

    /// Insert every value from `values`, one at a time
    ///
    /// Each value goes through [`append`](Self::append), so inserting k values
    /// costs O(k·n).
    pub fn append_all<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in values {
            self.append(value);
        }
    }

    /// Insert `value`, reporting allocation failure instead of aborting
    pub fn try_append(&mut self, value: T) -> Result<usize> {
        self.try_ensure_init()?;
        if self.values.len() == self.values.capacity() {
            let requested = self
                .values
                .capacity()
                .saturating_mul(2)
                .saturating_mul(mem::size_of::<T>());
            self.values
                .try_reserve(1)
                .map_err(|_| OrdSeqError::out_of_memory(requested))?;
        }
        let pos = self.find_insert_position(&value);
        self.values.insert(pos, value);
        Ok(pos)
    }

    /// Leftmost index at which `value` can be inserted without breaking order
    ///
    /// Returns 0 for a value below every element (or an empty sequence) and
    /// `len()` for a value above every element.
    pub fn find_insert_position(&self, value: &T) -> usize {
        if self.values.is_empty() {
            return 0;
        }

        // Half-open window [low, high); everything left of `low` compares
        // less than `value`, everything from `high` on compares
        // greater or equal.
        let mut low = 0;
        let mut high = self.values.len();
        while low < high {
            let pos = low + (high - low) / 2;
            match O::compare(value, &self.values[pos]) {
                Ordering::Greater => low = pos + 1,
                Ordering::Less | Ordering::Equal => high = pos,
            }
        }
        low
    }

    /// Binary search for `value`
    ///
    /// Returns `(index, true)` with the leftmost matching index when found,
    /// or `(insertion_point, false)` when no element compares equal.
    pub fn search(&self, value: &T) -> (usize, bool) {
        let pos = self.find_insert_position(value);
        let found = self
            .values
            .get(pos)
            .map_or(false, |existing| O::compare(value, existing) == Ordering::Equal);
        (pos, found)
    }

    /// Check whether an element equal to `value` is present
    #[inline]
    pub fn contains(&self, value: &T) -> bool {
        self.search(value).1
    }
}

impl<T, O> Default for SortedSeq<T, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, O> Clone for SortedSeq<T, O> {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            initial_capacity: self.initial_capacity,
            _order: PhantomData,
        }
    }
}

impl<T: fmt::Debug, O> fmt::Debug for SortedSeq<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.values.iter()).finish()
    }
}

impl<T: PartialEq, O> PartialEq for SortedSeq<T, O> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<T: Eq, O> Eq for SortedSeq<T, O> {}

impl<T, O> Index<usize> for SortedSeq<T, O> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        self.element_at(index)
    }
}

impl<T, O: OrderPolicy<T>> Extend<T> for SortedSeq<T, O> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.append_all(iter);
    }
}

impl<T, O: OrderPolicy<T>> FromIterator<T> for SortedSeq<T, O> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut seq = Self::new();
        seq.append_all(iter);
        seq
    }
}

impl<'a, T, O> IntoIterator for &'a SortedSeq<T, O> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Iterator over `(index, &value)` pairs of a [`SortedSeq`]
#[derive(Debug, Clone)]
pub struct IterFrom<'a, T> {
    values: &'a [T],
    index: usize,
}

impl<'a, T> Iterator for IterFrom<'a, T> {
    type Item = (usize, &'a T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let value = self.values.get(self.index)?;
        let index = self.index;
        self.index += 1;
        Some((index, value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.values.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for IterFrom<'_, T> {}

impl<T> FusedIterator for IterFrom<'_, T> {}
