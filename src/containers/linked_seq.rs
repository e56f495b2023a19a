//! LinkedSeq: doubly-linked sequence stored in a slot arena
//!
//! Nodes live in a `Vec` of slots and link to each other by `u32` slot index,
//! so the arena alone owns every node and back-links never form ownership
//! cycles. Freed slots are recycled through a free list. Each slot carries a
//! generation that is bumped on removal, which turns every outstanding
//! [`NodeHandle`] for that slot stale. A slot whose generation is exhausted
//! is retired and never handed out again.

use crate::config::{Config, SeqConfig};
use crate::error::{OrdSeqError, Result};
use std::fmt;
use std::iter::FusedIterator;
use std::sync::atomic::{AtomicU64, Ordering};

/// Invalid node index marker
const INVALID_NODE: u32 = u32::MAX;

/// Generation of a slot that may no longer be reused
const RETIRED_GENERATION: u32 = u32::MAX;

static NEXT_SEQ_ID: AtomicU64 = AtomicU64::new(0);

/// Reference to a node of a [`LinkedSeq`], returned by the push operations
///
/// A handle stays valid until its node is removed. Handles are tied to the
/// sequence that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    index: u32,
    generation: u32,
    seq_id: u64,
}

impl NodeHandle {
    /// Arena slot of the node
    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Slot generation the handle was issued for
    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

struct Node<T> {
    value: T,
    prev: u32,
    next: u32,
}

enum Entry<T> {
    Occupied(Node<T>),
    Vacant { next_free: u32 },
}

struct Slot<T> {
    generation: u32,
    entry: Entry<T>,
}

/// Doubly-linked sequence with O(1) push at both ends and O(1) removal by handle
///
/// # Examples
///
/// ```rust
/// use ordseq::LinkedSeq;
///
/// let mut seq = LinkedSeq::new();
/// let first = seq.push_back(1);
/// seq.push_back(2);
/// seq.push_front(0);
///
/// assert_eq!(seq.remove(first), 1);
/// assert_eq!(seq.iter().copied().collect::<Vec<_>>(), vec![0, 2]);
/// ```
pub struct LinkedSeq<T> {
    slots: Vec<Slot<T>>,
    head: u32,
    tail: u32,
    free_head: u32,
    count: usize,
    seq_id: u64,
}

impl<T> LinkedSeq<T> {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty sequence with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            head: INVALID_NODE,
            tail: INVALID_NODE,
            free_head: INVALID_NODE,
            count: 0,
            seq_id: NEXT_SEQ_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Create an empty sequence sized by a [`SeqConfig`]
    ///
    /// The configuration is validated before any node slots are reserved.
    pub fn with_config(config: &SeqConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_capacity(config.linked_initial_capacity))
    }

    /// Number of linked nodes
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Check if the sequence is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Allocated node slots, occupied or free
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Link `value` after the current tail
    pub fn push_back(&mut self, value: T) -> NodeHandle {
        let old_tail = self.tail;
        let idx = self.allocate(value, old_tail, INVALID_NODE);

        if old_tail != INVALID_NODE {
            self.node_mut(old_tail).next = idx;
        } else {
            // First node, also set as head
            self.head = idx;
        }
        self.tail = idx;
        self.count += 1;
        self.handle_at(idx)
    }

    /// Link `value` before the current head
    pub fn push_front(&mut self, value: T) -> NodeHandle {
        let old_head = self.head;
        let idx = self.allocate(value, INVALID_NODE, old_head);

        if old_head != INVALID_NODE {
            self.node_mut(old_head).prev = idx;
        } else {
            // First node, also set as tail
            self.tail = idx;
        }
        self.head = idx;
        self.count += 1;
        self.handle_at(idx)
    }

    /// Unlink the node behind `handle` and return its value
    ///
    /// # Panics
    ///
    /// Panics if the node was already removed or belongs to another sequence.
    pub fn remove(&mut self, handle: NodeHandle) -> T {
        match self.try_remove(handle) {
            Ok(value) => value,
            Err(err) => panic!("remove called with a node not linked in this sequence: {}", err),
        }
    }

    /// Unlink the node behind `handle`, reporting a stale handle as an error
    pub fn try_remove(&mut self, handle: NodeHandle) -> Result<T> {
        let idx = self
            .resolve(handle)
            .ok_or_else(|| OrdSeqError::stale_handle(handle.index, handle.generation))?;
        Ok(self.unlink(idx))
    }

    /// Check whether `handle` refers to a node currently linked in this sequence
    #[inline]
    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.resolve(handle).is_some()
    }

    /// Value of the node behind `handle`
    pub fn get(&self, handle: NodeHandle) -> Option<&T> {
        self.resolve(handle).map(|idx| &self.node(idx).value)
    }

    /// Mutable value of the node behind `handle`
    pub fn get_mut(&mut self, handle: NodeHandle) -> Option<&mut T> {
        let idx = self.resolve(handle)?;
        Some(&mut self.node_mut(idx).value)
    }

    /// Value at the head
    pub fn front(&self) -> Option<&T> {
        self.linked(self.head).map(|node| &node.value)
    }

    /// Value at the tail
    pub fn back(&self) -> Option<&T> {
        self.linked(self.tail).map(|node| &node.value)
    }

    /// Handle of the head node
    pub fn front_handle(&self) -> Option<NodeHandle> {
        (self.head != INVALID_NODE).then(|| self.handle_at(self.head))
    }

    /// Handle of the tail node
    pub fn back_handle(&self) -> Option<NodeHandle> {
        (self.tail != INVALID_NODE).then(|| self.handle_at(self.tail))
    }

    /// Unlink and return the head value
    pub fn pop_front(&mut self) -> Option<T> {
        (self.head != INVALID_NODE).then(|| self.unlink(self.head))
    }

    /// Unlink and return the tail value
    pub fn pop_back(&mut self) -> Option<T> {
        (self.tail != INVALID_NODE).then(|| self.unlink(self.tail))
    }

    /// Remove every node; all outstanding handles become stale
    pub fn clear(&mut self) {
        self.free_head = INVALID_NODE;
        for (idx, slot) in self.slots.iter_mut().enumerate().rev() {
            if matches!(slot.entry, Entry::Occupied(_)) {
                slot.generation = slot.generation.saturating_add(1);
            }
            if slot.generation == RETIRED_GENERATION {
                slot.entry = Entry::Vacant {
                    next_free: INVALID_NODE,
                };
                continue;
            }
            slot.entry = Entry::Vacant {
                next_free: self.free_head,
            };
            self.free_head = idx as u32;
        }
        self.head = INVALID_NODE;
        self.tail = INVALID_NODE;
        self.count = 0;
    }

    /// Borrowing iterator over values from head to tail
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            seq: self,
            current: self.head,
            remaining: self.count,
        }
    }

    /// Removal-tolerant traversal from head to tail
    ///
    /// The returned cursor does not borrow the sequence. Each step looks up
    /// the current node and records its successor before handing the node
    /// out, so the caller may [`remove`](Self::remove) the node it was just
    /// given. Removing any other node mid-traversal is unsupported; if the
    /// recorded successor turns out to be gone, traversal ends.
    ///
    /// ```rust
    /// use ordseq::LinkedSeq;
    ///
    /// let mut seq: LinkedSeq<i32> = (1..=5).collect();
    /// let mut each = seq.each();
    /// while let Some(node) = each.next(&seq) {
    ///     if seq.get(node).map_or(false, |v| v % 2 == 0) {
    ///         seq.remove(node);
    ///     }
    /// }
    /// assert_eq!(seq.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5]);
    /// ```
    pub fn each(&self) -> Each {
        Each {
            next: self.front_handle(),
        }
    }

    /// Keep only the values for which `keep` returns true
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        let mut each = self.each();
        while let Some(node) = each.next(self) {
            if !self.get(node).map_or(true, &mut keep) {
                self.remove(node);
            }
        }
    }

    fn allocate(&mut self, value: T, prev: u32, next: u32) -> u32 {
        let node = Node { value, prev, next };

        if self.free_head != INVALID_NODE {
            let idx = self.free_head;
            let slot = &mut self.slots[idx as usize];
            if let Entry::Vacant { next_free } = slot.entry {
                self.free_head = next_free;
            }
            slot.entry = Entry::Occupied(node);
            return idx;
        }

        let idx = self.slots.len();
        assert!(
            idx < INVALID_NODE as usize,
            "linked sequence cannot hold more than {} nodes",
            INVALID_NODE
        );
        self.slots.push(Slot {
            generation: 0,
            entry: Entry::Occupied(node),
        });
        idx as u32
    }

    fn unlink(&mut self, idx: u32) -> T {
        let slot = &mut self.slots[idx as usize];
        slot.generation = slot.generation.saturating_add(1);
        let retired = slot.generation == RETIRED_GENERATION;
        let next_free = if retired { INVALID_NODE } else { self.free_head };
        let entry = std::mem::replace(&mut slot.entry, Entry::Vacant { next_free });
        let node = match entry {
            Entry::Occupied(node) => node,
            Entry::Vacant { .. } => unreachable!("unlink of a vacant slot"),
        };
        if retired {
            log::trace!("Retiring linked sequence slot {} after generation exhaustion", idx);
        } else {
            self.free_head = idx;
        }

        if node.prev != INVALID_NODE {
            self.node_mut(node.prev).next = node.next;
        } else {
            // Removing head
            self.head = node.next;
        }

        if node.next != INVALID_NODE {
            self.node_mut(node.next).prev = node.prev;
        } else {
            // Removing tail
            self.tail = node.prev;
        }

        self.count -= 1;
        node.value
    }

    fn resolve(&self, handle: NodeHandle) -> Option<u32> {
        if handle.seq_id != self.seq_id {
            return None;
        }
        let slot = self.slots.get(handle.index as usize)?;
        match slot.entry {
            Entry::Occupied(_) if slot.generation == handle.generation => Some(handle.index),
            _ => None,
        }
    }

    fn handle_at(&self, idx: u32) -> NodeHandle {
        NodeHandle {
            index: idx,
            generation: self.slots[idx as usize].generation,
            seq_id: self.seq_id,
        }
    }

    fn linked(&self, idx: u32) -> Option<&Node<T>> {
        match self.slots.get(idx as usize) {
            Some(Slot {
                entry: Entry::Occupied(node),
                ..
            }) => Some(node),
            _ => None,
        }
    }

    fn node(&self, idx: u32) -> &Node<T> {
        match self.linked(idx) {
            Some(node) => node,
            None => unreachable!("link to vacant slot {}", idx),
        }
    }

    fn node_mut(&mut self, idx: u32) -> &mut Node<T> {
        match &mut self.slots[idx as usize].entry {
            Entry::Occupied(node) => node,
            Entry::Vacant { .. } => unreachable!("link to vacant slot {}", idx),
        }
    }
}

impl<T> Default for LinkedSeq<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedSeq<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for LinkedSeq<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> FromIterator<T> for LinkedSeq<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut seq = Self::new();
        seq.extend(iter);
        seq
    }
}

impl<'a, T> IntoIterator for &'a LinkedSeq<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over the values of a [`LinkedSeq`]
pub struct Iter<'a, T> {
    seq: &'a LinkedSeq<T>,
    current: u32,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.seq.linked(self.current)?;
        self.current = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Detached cursor returned by [`LinkedSeq::each`]
#[derive(Debug, Clone)]
pub struct Each {
    next: Option<NodeHandle>,
}

impl Each {
    /// Yield the next node handle, or `None` at the end of the sequence
    pub fn next<T>(&mut self, seq: &LinkedSeq<T>) -> Option<NodeHandle> {
        let current = self.next.take()?;
        let idx = seq.resolve(current)?;
        let successor = seq.node(idx).next;
        if successor != INVALID_NODE {
            self.next = Some(seq.handle_at(successor));
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Num {
        num: i32,
    }

    fn values<T: Clone>(seq: &LinkedSeq<T>) -> Vec<T> {
        seq.iter().cloned().collect()
    }

    /// Walk head to tail and back checking every link invariant
    fn assert_links<T>(seq: &LinkedSeq<T>) {
        let mut forward = Vec::new();
        let mut prev = INVALID_NODE;
        let mut idx = seq.head;
        while idx != INVALID_NODE {
            let node = seq.node(idx);
            assert_eq!(node.prev, prev);
            forward.push(idx);
            prev = idx;
            idx = node.next;
        }
        assert_eq!(prev, seq.tail);
        assert_eq!(forward.len(), seq.len());
    }

    #[test]
    fn test_push_back_order() {
        let mut seq = LinkedSeq::new();
        for num in 1..=4 {
            seq.push_back(Num { num });
        }

        let mut expected = 1;
        let mut each = seq.each();
        let mut visited = false;
        while let Some(node) = each.next(&seq) {
            visited = true;
            assert_eq!(seq.get(node).map(|n| n.num), Some(expected));
            expected += 1;
        }
        assert!(visited);
        assert_links(&seq);
    }

    #[test]
    fn test_push_front_order() {
        let mut seq = LinkedSeq::new();
        for num in 1..=4 {
            seq.push_front(num);
        }
        assert_eq!(values(&seq), vec![4, 3, 2, 1]);
        assert_eq!(seq.front(), Some(&4));
        assert_eq!(seq.back(), Some(&1));
        assert_links(&seq);
    }

    #[test]
    fn test_remove_endpoints() {
        let mut seq = LinkedSeq::new();
        let first = seq.push_back(Num { num: 1 });
        seq.push_back(Num { num: 2 });
        seq.push_back(Num { num: 3 });
        let last = seq.push_back(Num { num: 4 });

        assert_eq!(seq.remove(first), Num { num: 1 });
        assert_eq!(seq.remove(last), Num { num: 4 });

        let nums: Vec<i32> = seq.iter().map(|n| n.num).collect();
        assert_eq!(nums, vec![2, 3]);
        assert_eq!(seq.len(), 2);
        assert_links(&seq);
    }

    #[test]
    fn test_remove_middle() {
        let mut seq = LinkedSeq::new();
        seq.push_back('a');
        let b = seq.push_back('b');
        seq.push_back('c');

        seq.remove(b);
        assert_eq!(values(&seq), vec!['a', 'c']);
        assert_links(&seq);
    }

    #[test]
    fn test_remove_inside_each() {
        let mut seq = LinkedSeq::new();
        seq.push_back(Num { num: 1 });
        assert_eq!(seq.len(), 1);

        let mut each = seq.each();
        while let Some(node) = each.next(&seq) {
            if seq.get(node).map(|n| n.num) == Some(1) {
                seq.remove(node);
            }
        }

        assert_eq!(seq.len(), 0);
        assert!(seq.each().next(&seq).is_none());
        assert!(seq.iter().next().is_none());
    }

    #[test]
    fn test_remove_every_node_during_each() {
        let mut seq: LinkedSeq<i32> = (0..10).collect();
        let mut each = seq.each();
        let mut seen = Vec::new();
        while let Some(node) = each.next(&seq) {
            seen.push(seq.remove(node));
        }
        assert_eq!(seen, (0..10).collect::<Vec<_>>());
        assert!(seq.is_empty());
    }

    #[test]
    fn test_each_ends_when_successor_removed() {
        let mut seq = LinkedSeq::new();
        let a = seq.push_back(1);
        let b = seq.push_back(2);
        seq.push_back(3);

        let mut each = seq.each();
        assert_eq!(each.next(&seq), Some(a));
        seq.remove(b);
        assert_eq!(each.next(&seq), None);
        assert_links(&seq);
    }

    #[test]
    fn test_each_is_restartable() {
        let seq: LinkedSeq<i32> = (1..=3).collect();
        for _ in 0..2 {
            let mut each = seq.each();
            let mut count = 0;
            while each.next(&seq).is_some() {
                count += 1;
            }
            assert_eq!(count, 3);
        }
    }

    #[test]
    #[should_panic(expected = "not linked in this sequence")]
    fn test_double_remove_panics() {
        let mut seq = LinkedSeq::new();
        let node = seq.push_back(1);
        seq.remove(node);
        seq.remove(node);
    }

    #[test]
    #[should_panic(expected = "not linked in this sequence")]
    fn test_foreign_handle_panics() {
        let mut a = LinkedSeq::new();
        let mut b = LinkedSeq::new();
        let from_a = a.push_back(1);
        b.push_back(1);
        b.remove(from_a);
    }

    #[test]
    fn test_try_remove_reports_stale_handle() {
        let mut seq = LinkedSeq::new();
        let node = seq.push_back(7);
        assert_eq!(seq.try_remove(node).ok(), Some(7));

        let err = seq.try_remove(node).unwrap_err();
        assert!(matches!(err, OrdSeqError::StaleHandle { .. }));
        assert!(!seq.contains(node));
        assert_eq!(seq.get(node), None);
    }

    #[test]
    fn test_slot_reuse_invalidates_old_handles() {
        let mut seq = LinkedSeq::new();
        let old = seq.push_back("old");
        seq.remove(old);

        let new = seq.push_back("new");
        assert_eq!(new.index(), old.index());
        assert_ne!(new.generation(), old.generation());
        assert_eq!(seq.get(old), None);
        assert_eq!(seq.get(new), Some(&"new"));
    }

    #[test]
    fn test_pop_both_ends() {
        let mut seq: LinkedSeq<i32> = (1..=3).collect();
        assert_eq!(seq.pop_front(), Some(1));
        assert_eq!(seq.pop_back(), Some(3));
        assert_eq!(seq.pop_back(), Some(2));
        assert_eq!(seq.pop_front(), None);
        assert_eq!(seq.front_handle(), None);
        assert_eq!(seq.back_handle(), None);
    }

    #[test]
    fn test_get_mut() {
        let mut seq = LinkedSeq::new();
        let node = seq.push_back(10);
        if let Some(value) = seq.get_mut(node) {
            *value += 5;
        }
        assert_eq!(seq.front(), Some(&15));
    }

    #[test]
    fn test_clear_invalidates_handles() {
        let mut seq = LinkedSeq::new();
        let a = seq.push_back(1);
        let b = seq.push_back(2);
        seq.clear();

        assert!(seq.is_empty());
        assert!(!seq.contains(a));
        assert!(!seq.contains(b));

        let c = seq.push_back(3);
        assert_eq!(values(&seq), vec![3]);
        assert!(seq.contains(c));
        assert!(!seq.contains(a));
        assert_links(&seq);
    }

    #[test]
    fn test_retain() {
        let mut seq: LinkedSeq<i32> = (1..=10).collect();
        seq.retain(|v| v % 3 == 0);
        assert_eq!(values(&seq), vec![3, 6, 9]);
        assert_links(&seq);
    }

    #[test]
    fn test_with_config() -> Result<()> {
        let seq: LinkedSeq<u8> = LinkedSeq::with_config(&SeqConfig {
            linked_initial_capacity: 64,
            ..SeqConfig::default()
        })?;
        assert!(seq.capacity() >= 64);
        assert!(seq.is_empty());
        Ok(())
    }

    #[test]
    fn test_with_config_rejects_invalid_config() {
        use crate::config::MAX_INITIAL_CAPACITY;

        let zero = SeqConfig::with_initial_capacity(0);
        assert!(matches!(
            LinkedSeq::<u8>::with_config(&zero),
            Err(OrdSeqError::Configuration { .. })
        ));

        let oversized = SeqConfig {
            linked_initial_capacity: MAX_INITIAL_CAPACITY + 1,
            ..SeqConfig::default()
        };
        assert!(matches!(
            LinkedSeq::<u8>::with_config(&oversized),
            Err(OrdSeqError::Configuration { .. })
        ));
    }

    #[test]
    fn test_exhausted_slot_is_retired_on_remove() {
        let mut seq = LinkedSeq::new();
        let first = seq.push_back(1);
        seq.slots[first.index() as usize].generation = RETIRED_GENERATION - 1;
        let last_issue = seq.handle_at(first.index());

        assert_eq!(seq.remove(last_issue), 1);
        assert_eq!(seq.free_head, INVALID_NODE);

        let next = seq.push_back(2);
        assert_ne!(next.index(), last_issue.index());
        assert!(!seq.contains(last_issue));
        assert!(seq.try_remove(last_issue).is_err());
        assert_eq!(values(&seq), vec![2]);
        assert_links(&seq);
    }

    #[test]
    fn test_exhausted_slot_is_retired_on_clear() {
        let mut seq = LinkedSeq::new();
        let a = seq.push_back('a');
        seq.push_back('b');
        seq.slots[a.index() as usize].generation = RETIRED_GENERATION - 1;
        let last_issue = seq.handle_at(a.index());
        seq.clear();

        // Only the 'b' slot is recycled; the retired one stays vacant
        let c = seq.push_back('c');
        let d = seq.push_back('d');
        assert_ne!(c.index(), last_issue.index());
        assert_ne!(d.index(), last_issue.index());
        assert!(!seq.contains(last_issue));
        assert_eq!(values(&seq), vec!['c', 'd']);
        assert_links(&seq);
    }

    #[test]
    fn test_debug_and_len() {
        let seq: LinkedSeq<i32> = vec![1, 2].into_iter().collect();
        assert_eq!(format!("{:?}", seq), "[1, 2]");
        assert_eq!(seq.iter().len(), 2);
        assert_eq!((&seq).into_iter().count(), 2);
    }
}
