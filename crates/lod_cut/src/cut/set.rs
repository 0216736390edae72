//! Cut - the resident frontier of one (viewer, model) pair.
//!
//! Like an implicit octree's leaf set, the cut IS the state: no ancestor or
//! descendant of a resident node is ever resident at the same time.

use std::collections::BTreeSet;

use crate::tree::ModelDescriptor;
use crate::types::NodeId;

/// Antichain of tree nodes, ordered by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cut {
  nodes: BTreeSet<NodeId>,
}

impl Cut {
  /// Create an empty cut.
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of resident nodes.
  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// Check if a node is resident.
  pub fn contains(&self, node: NodeId) -> bool {
    self.nodes.contains(&node)
  }

  /// Iterate resident nodes in id order.
  pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
    self.nodes.iter().copied()
  }

  pub fn to_vec(&self) -> Vec<NodeId> {
    self.iter().collect()
  }

  /// Resident ids as plain integers, in order.
  pub fn raw_ids(&self) -> Vec<u32> {
    self.iter().map(|node| node.raw()).collect()
  }

  /// True if no resident node is an ancestor of another.
  pub fn is_antichain(&self, descriptor: &ModelDescriptor) -> bool {
    self.nodes.iter().all(|&node| {
      descriptor
        .ancestors(node)
        .all(|ancestor| !self.nodes.contains(&ancestor))
    })
  }

  /// Make `node` resident, evicting every resident ancestor and descendant.
  ///
  /// Returns the number of evicted nodes.
  pub(crate) fn commit(&mut self, node: NodeId, descriptor: &ModelDescriptor) -> usize {
    let mut evicted = 0;

    for ancestor in descriptor.ancestors(node) {
      if self.nodes.remove(&ancestor) {
        evicted += 1;
      }
    }

    for level in descriptor.descendant_ranges(node) {
      // Nothing resident at or past this level: deeper levels are empty too.
      if self.nodes.range(*level.start()..).next().is_none() {
        break;
      }
      let doomed: Vec<NodeId> = self.nodes.range(level).copied().collect();
      for descendant in doomed {
        self.nodes.remove(&descendant);
        evicted += 1;
      }
    }

    self.nodes.insert(node);
    evicted
  }

  /// Commit several nodes (e.g. a full sibling set).
  pub(crate) fn commit_all(&mut self, nodes: &[NodeId], descriptor: &ModelDescriptor) -> usize {
    nodes
      .iter()
      .map(|&node| self.commit(node, descriptor))
      .sum()
  }

  /// Drop a node without touching its relatives.
  pub(crate) fn remove(&mut self, node: NodeId) -> bool {
    self.nodes.remove(&node)
  }

  pub(crate) fn clear(&mut self) {
    self.nodes.clear();
  }
}

#[cfg(test)]
#[path = "set_test.rs"]
mod set_test;
