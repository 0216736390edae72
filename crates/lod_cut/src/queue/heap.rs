//! IndexedHeap - binary max-heap with a reverse index for direct removal.
//!
//! One implementation serves all five action queues. Every movement of an
//! entry goes through [`IndexedHeap::swap`], which keeps the array and the
//! [`SlotMap`] in lockstep:
//!
//! ```text
//! slots:  [ e0 | e1 | e2 | e3 | ... ]      e.key() = k
//! index:  k -> { i | slots[i].key() == k }
//! ```
//!
//! The index is a bijection: every slot is recorded exactly once, under the
//! key of the entry it holds.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt::Debug;

use super::SlotMap;

/// Entry that can live in an [`IndexedHeap`].
pub trait HeapEntry {
  /// Identity used by the reverse index. Not unique per entry.
  type Key: Ord + Copy + Debug;

  fn key(&self) -> Self::Key;

  /// Larger = closer to the front.
  fn priority(&self) -> f64;
}

/// Max-heap over `T::priority()` with a key -> slots reverse index.
#[derive(Clone, Debug)]
pub struct IndexedHeap<T: HeapEntry> {
  slots: Vec<T>,
  index: SlotMap<T::Key>,
}

impl<T: HeapEntry> IndexedHeap<T> {
  pub fn new() -> Self {
    Self::with_capacity(0)
  }

  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      slots: Vec::with_capacity(capacity),
      index: SlotMap::new(),
    }
  }

  pub fn len(&self) -> usize {
    self.slots.len()
  }

  pub fn is_empty(&self) -> bool {
    self.slots.is_empty()
  }

  /// Entry at `slot`.
  pub fn get(&self, slot: usize) -> Option<&T> {
    self.slots.get(slot)
  }

  /// Entries in heap (array) order.
  pub fn iter(&self) -> impl Iterator<Item = &T> {
    self.slots.iter()
  }

  /// Slots currently holding entries with `key`.
  pub fn slots_for(&self, key: &T::Key) -> Option<&BTreeSet<usize>> {
    self.index.slots(key)
  }

  /// Number of distinct keys present.
  pub fn key_count(&self) -> usize {
    self.index.key_count()
  }

  /// Insert an entry and restore heap order. Returns its final slot.
  pub fn push(&mut self, entry: T) -> usize {
    let slot = self.slots.len();
    self.index.insert(entry.key(), slot);
    self.slots.push(entry);
    self.sift_up(slot)
  }

  /// Highest-priority entry.
  pub fn peek_front(&self) -> Option<&T> {
    self.slots.first()
  }

  /// Last array entry (a leaf). Carries no priority meaning.
  pub fn peek_back(&self) -> Option<&T> {
    self.slots.last()
  }

  /// Remove the highest-priority entry.
  pub fn pop_front(&mut self) -> Option<T> {
    self.remove_at(0)
  }

  /// Remove the last array entry. No reordering needed.
  pub fn pop_back(&mut self) -> Option<T> {
    let entry = self.slots.pop()?;
    let removed = self.index.remove(entry.key(), self.slots.len());
    debug_assert!(removed, "back slot was not indexed");
    Some(entry)
  }

  /// Remove the entry at an arbitrary slot.
  ///
  /// The last entry is swapped into the hole, then moved up or down until
  /// the heap order holds again.
  pub fn remove_at(&mut self, slot: usize) -> Option<T> {
    if slot >= self.slots.len() {
      return None;
    }
    let last = self.slots.len() - 1;
    self.swap(slot, last);
    let entry = self.slots.pop()?;
    let removed = self.index.remove(entry.key(), last);
    debug_assert!(removed, "removed slot was not indexed");

    if slot < self.slots.len() && self.sift_up(slot) == slot {
      self.sift_down(slot);
    }
    Some(entry)
  }

  /// Remove every entry with `key` accepted by `pred`.
  ///
  /// Each round re-reads the live bucket and takes its highest matching
  /// slot, because restoring the heap after a removal may move other
  /// entries of the same key.
  pub fn remove_matching<F>(&mut self, key: T::Key, mut pred: F) -> Vec<T>
  where
    F: FnMut(&T) -> bool,
  {
    let mut removed = Vec::new();
    loop {
      let target = self.index.slots(&key).and_then(|bucket| {
        bucket
          .iter()
          .rev()
          .copied()
          .find(|&slot| pred(&self.slots[slot]))
      });
      let Some(slot) = target else {
        break;
      };
      if let Some(entry) = self.remove_at(slot) {
        removed.push(entry);
      }
    }
    removed
  }

  /// Keep only entries accepted by `pred`, rebuilding the heap. Returns the
  /// number of removed entries.
  pub fn retain<F>(&mut self, mut pred: F) -> usize
  where
    F: FnMut(&T) -> bool,
  {
    let before = self.slots.len();
    let entries = std::mem::take(&mut self.slots);
    self.index.clear();
    for entry in entries.into_iter().filter(|e| pred(e)) {
      self.push(entry);
    }
    before - self.slots.len()
  }

  pub fn clear(&mut self) {
    self.slots.clear();
    self.index.clear();
  }

  /// Exchange two slots, updating both reverse-index records with the array.
  pub fn swap(&mut self, a: usize, b: usize) {
    if a == b {
      return;
    }
    let key_a = self.slots[a].key();
    let key_b = self.slots[b].key();
    if key_a != key_b {
      self.index.relocate(key_a, a, b);
      self.index.relocate(key_b, b, a);
    }
    self.slots.swap(a, b);
  }

  /// True if every parent ranks at least as high as its children.
  pub fn is_heap(&self) -> bool {
    (1..self.slots.len()).all(|slot| !self.outranks(slot, (slot - 1) / 2))
  }

  /// True if the reverse index records exactly the occupied slots, each under
  /// the key of the entry it holds.
  pub fn is_index_consistent(&self) -> bool {
    self.index.slot_count() == self.slots.len()
      && self
        .slots
        .iter()
        .enumerate()
        .all(|(slot, entry)| self.index.contains(&entry.key(), slot))
  }

  #[inline]
  fn outranks(&self, a: usize, b: usize) -> bool {
    self.slots[a].priority().total_cmp(&self.slots[b].priority()) == Ordering::Greater
  }

  fn sift_up(&mut self, mut slot: usize) -> usize {
    while slot > 0 {
      let parent = (slot - 1) / 2;
      if !self.outranks(slot, parent) {
        break;
      }
      self.swap(slot, parent);
      slot = parent;
    }
    slot
  }

  fn sift_down(&mut self, mut slot: usize) -> usize {
    let len = self.slots.len();
    loop {
      let left = slot * 2 + 1;
      let right = left + 1;
      let mut best = slot;
      if left < len && self.outranks(left, best) {
        best = left;
      }
      if right < len && self.outranks(right, best) {
        best = right;
      }
      if best == slot {
        return slot;
      }
      self.swap(slot, best);
      slot = best;
    }
  }
}

impl<T: HeapEntry> Default for IndexedHeap<T> {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
#[path = "heap_test.rs"]
mod heap_test;
