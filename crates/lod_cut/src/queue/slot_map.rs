//! SlotMap - reverse index from entry key to heap slot positions.
//!
//! Several live entries may share a key (one per viewer), so each key maps
//! to a set of slots. Empty buckets are dropped immediately.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

/// Key -> occupied slots.
#[derive(Clone, Debug)]
pub struct SlotMap<K: Ord> {
  buckets: BTreeMap<K, BTreeSet<usize>>,
}

impl<K: Ord + Copy> SlotMap<K> {
  pub fn new() -> Self {
    Self {
      buckets: BTreeMap::new(),
    }
  }

  /// Record that `slot` now holds an entry with `key`.
  pub fn insert(&mut self, key: K, slot: usize) -> bool {
    self.buckets.entry(key).or_default().insert(slot)
  }

  /// Forget `slot` for `key`, dropping the bucket once it is empty.
  pub fn remove(&mut self, key: K, slot: usize) -> bool {
    let Entry::Occupied(mut bucket) = self.buckets.entry(key) else {
      return false;
    };
    let removed = bucket.get_mut().remove(&slot);
    if bucket.get().is_empty() {
      bucket.remove();
    }
    removed
  }

  /// Move the record for `key` from slot `from` to slot `to`.
  pub fn relocate(&mut self, key: K, from: usize, to: usize) {
    let moved = self.remove(key, from);
    debug_assert!(moved, "slot {} was not indexed", from);
    self.insert(key, to);
  }

  /// Slots holding `key`, if any.
  pub fn slots(&self, key: &K) -> Option<&BTreeSet<usize>> {
    self.buckets.get(key)
  }

  /// True if `slot` is recorded for `key`.
  pub fn contains(&self, key: &K, slot: usize) -> bool {
    self
      .buckets
      .get(key)
      .is_some_and(|bucket| bucket.contains(&slot))
  }

  /// Number of keys with at least one slot.
  pub fn key_count(&self) -> usize {
    self.buckets.len()
  }

  /// Total number of recorded slots across all keys.
  pub fn slot_count(&self) -> usize {
    self.buckets.values().map(BTreeSet::len).sum()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&K, &BTreeSet<usize>)> {
    self.buckets.iter()
  }

  pub fn clear(&mut self) {
    self.buckets.clear();
  }
}

impl<K: Ord + Copy> Default for SlotMap<K> {
  fn default() -> Self {
    Self::new()
  }
}
