//! # ordseq: Sorted and Linked In-Memory Sequences
//!
//! Two independent single-owner containers:
//!
//! - **Sorted sequences**: [`OrderedSeq`] and [`IndexedSeq`] keep a flat
//!   array in ascending order after every insertion and answer lookups by
//!   binary search. Both are the same [`SortedSeq`] type with a different
//!   ordering policy.
//! - **Linked sequence**: [`LinkedSeq`] links nodes in both directions,
//!   pushes at either end in O(1), removes any node by [`NodeHandle`] in O(1)
//!   and supports removing the current node while traversing.
//!
//! ## Quick Start
//!
//! ```rust
//! use ordseq::{IndexedSeq, LinkedSeq, OrderedSeq, ThreeWayCompare};
//!
//! let mut seq = OrderedSeq::new();
//! seq.append_all([2, 1, 5]);
//! assert_eq!(seq.search(&1), (0, true));
//!
//! struct Task { priority: i32 }
//! impl ThreeWayCompare for Task {
//!     fn compare_to(&self, other: &Self) -> i32 {
//!         self.priority - other.priority
//!     }
//! }
//! let mut tasks = IndexedSeq::new();
//! tasks.append(Task { priority: 3 });
//! tasks.append(Task { priority: 1 });
//! assert_eq!(tasks[0].priority, 1);
//!
//! let mut list = LinkedSeq::new();
//! let node = list.push_back("a");
//! list.push_back("b");
//! list.remove(node);
//! assert_eq!(list.len(), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod containers;
pub mod error;

pub use config::{Config, SeqConfig};
pub use containers::{
    Each, IndexedSeq, IterFrom, LinkedSeq, NaturalOrder, NodeHandle, OrderPolicy, OrderedSeq,
    SortedSeq, ThreeWayCompare, ThreeWayOrder,
};
pub use error::{OrdSeqError, Result};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library (currently only logs the version)
pub fn init() {
    log::debug!("Initializing ordseq v{}", VERSION);
}
