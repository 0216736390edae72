//! StagingQueue - unsorted bulk-load path.
//!
//! During a cold load many actions arrive before any is read. They are
//! collected here (O(log n) each, no reverse index) and later drained
//! highest-first into the indexed heaps, where each push then lands at the
//! end of the array without sifting.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::HeapEntry;

/// Orders entries by priority for `BinaryHeap`.
#[derive(Clone, Debug)]
struct ByPriority<T>(T);

impl<T: HeapEntry> PartialEq for ByPriority<T> {
  fn eq(&self, other: &Self) -> bool {
    self.cmp(other) == Ordering::Equal
  }
}

impl<T: HeapEntry> Eq for ByPriority<T> {}

impl<T: HeapEntry> PartialOrd for ByPriority<T> {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl<T: HeapEntry> Ord for ByPriority<T> {
  fn cmp(&self, other: &Self) -> Ordering {
    self.0.priority().total_cmp(&other.0.priority())
  }
}

/// Entries waiting for [`drain_sorted`](StagingQueue::drain_sorted).
#[derive(Clone, Debug)]
pub struct StagingQueue<T: HeapEntry> {
  heap: BinaryHeap<ByPriority<T>>,
}

impl<T: HeapEntry> StagingQueue<T> {
  pub fn new() -> Self {
    Self {
      heap: BinaryHeap::new(),
    }
  }

  pub fn push(&mut self, entry: T) {
    self.heap.push(ByPriority(entry));
  }

  pub fn len(&self) -> usize {
    self.heap.len()
  }

  pub fn is_empty(&self) -> bool {
    self.heap.is_empty()
  }

  /// Pop everything, highest priority first.
  pub fn drain_sorted(&mut self) -> impl Iterator<Item = T> + '_ {
    std::iter::from_fn(move || self.heap.pop().map(|staged| staged.0))
  }

  /// Keep only entries accepted by `pred`. Returns the number removed.
  pub fn retain<F>(&mut self, mut pred: F) -> usize
  where
    F: FnMut(&T) -> bool,
  {
    let before = self.heap.len();
    self.heap.retain(|staged| pred(&staged.0));
    before - self.heap.len()
  }

  pub fn clear(&mut self) {
    self.heap.clear();
  }
}

impl<T: HeapEntry> Default for StagingQueue<T> {
  fn default() -> Self {
    Self::new()
  }
}
