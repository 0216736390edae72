//! ActionQueues - one indexed heap per action kind plus the staging queue.

use crate::types::{Action, ActionKind, ModelId, NodeId, ViewerId};

use super::{HeapEntry, IndexedHeap, StagingQueue};

impl HeapEntry for Action {
  /// The kind is implied by the queue an action lives in.
  type Key = (ModelId, NodeId);

  fn key(&self) -> Self::Key {
    (self.model, self.node)
  }

  fn priority(&self) -> f64 {
    self.priority
  }
}

/// The five action queues and the unsorted staging queue.
#[derive(Clone, Debug)]
pub struct ActionQueues {
  queues: [IndexedHeap<Action>; ActionKind::COUNT],
  staging: StagingQueue<Action>,
}

impl ActionQueues {
  pub fn new() -> Self {
    Self::with_capacity(0)
  }

  /// Pre-allocate `capacity` slots per queue.
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      queues: std::array::from_fn(|_| IndexedHeap::with_capacity(capacity)),
      staging: StagingQueue::new(),
    }
  }

  /// Queue holding actions of `kind`.
  #[inline]
  pub fn queue(&self, kind: ActionKind) -> &IndexedHeap<Action> {
    &self.queues[kind.index()]
  }

  #[inline]
  pub fn queue_mut(&mut self, kind: ActionKind) -> &mut IndexedHeap<Action> {
    &mut self.queues[kind.index()]
  }

  /// Add an action to its queue (`sorted`) or to the staging queue.
  pub fn push(&mut self, action: Action, sorted: bool) {
    if sorted {
      self.queues[action.kind.index()].push(action);
    } else {
      self.staging.push(action);
    }
  }

  /// Move every staged action into its queue. Returns how many moved.
  pub fn sort(&mut self) -> usize {
    let mut moved = 0;
    for action in self.staging.drain_sorted() {
      self.queues[action.kind.index()].push(action);
      moved += 1;
    }
    moved
  }

  /// Drop every pending action of `viewer` for `(model, node)`, staged ones
  /// included. Returns how many were removed.
  pub fn cancel(&mut self, viewer: ViewerId, model: ModelId, node: NodeId) -> usize {
    let queued: usize = self
      .queues
      .iter_mut()
      .map(|queue| {
        queue
          .remove_matching((model, node), |action| action.viewer == viewer)
          .len()
      })
      .sum();
    let staged = self.staging.retain(|action| {
      !(action.viewer == viewer && action.model == model && action.node == node)
    });
    queued + staged
  }

  /// Drop every action whose viewer is not below `viewer_count`.
  pub fn retain_viewers(&mut self, viewer_count: u32) -> usize {
    let keep = |action: &Action| action.viewer.raw() < viewer_count;
    let queued: usize = self.queues.iter_mut().map(|queue| queue.retain(keep)).sum();
    queued + self.staging.retain(keep)
  }

  /// Number of sorted actions across all queues.
  pub fn len(&self) -> usize {
    self.queues.iter().map(IndexedHeap::len).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0 && self.staging.is_empty()
  }

  /// Number of actions waiting in the staging queue.
  pub fn staged(&self) -> usize {
    self.staging.len()
  }

  /// Check heap order and reverse-index bijection for every queue, and that
  /// every action sits in the queue of its kind.
  pub fn verify(&self) -> Result<(), String> {
    for kind in ActionKind::ALL {
      let queue = self.queue(kind);
      if !queue.is_heap() {
        return Err(format!("{} queue is not heap-ordered", kind));
      }
      if !queue.is_index_consistent() {
        return Err(format!("{} queue reverse index is out of sync", kind));
      }
      if let Some(stray) = queue.iter().find(|action| action.kind != kind) {
        return Err(format!("{} action found in the {} queue", stray.kind, kind));
      }
    }
    Ok(())
  }

  pub fn clear(&mut self) {
    self.queues.iter_mut().for_each(IndexedHeap::clear);
    self.staging.clear();
  }
}

impl Default for ActionQueues {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
#[path = "actions_test.rs"]
mod actions_test;
