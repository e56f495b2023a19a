//! In-memory sequence containers
//!
//! - **`SortedSeq<T, O>`** - Growable array kept sorted, with binary-search lookup
//!   - **`OrderedSeq<T>`** - ordered by `Ord`
//!   - **`IndexedSeq<T>`** - ordered by [`ThreeWayCompare`]
//! - **`LinkedSeq<T>`** - Arena-backed doubly-linked sequence with O(1) removal
//!   by handle and removal-tolerant traversal

mod linked_seq;
mod ordered_seq;
pub mod ordering;

pub use linked_seq::{Each, Iter as LinkedIter, LinkedSeq, NodeHandle};
pub use ordered_seq::{IndexedSeq, IterFrom, OrderedSeq, SortedSeq};
pub use ordering::{NaturalOrder, OrderPolicy, ThreeWayCompare, ThreeWayOrder};
