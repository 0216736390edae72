//! ModelDescriptor - shape of one model's implicit fan-out tree.
//!
//! No explicit tree nodes are stored. Parent/child relationships are computed
//! on demand from the fan-out factor:
//!
//! ```text
//! child(n, i) = n * fan_out + 1 + i      (i < fan_out, result < node_count)
//! parent(n)   = (n - 1) / fan_out        (n > 0)
//! ```

use std::ops::RangeInclusive;

use smallvec::SmallVec;

use crate::types::NodeId;

/// Children of one node. Inline up to an octree's fan-out.
pub type NodeList = SmallVec<[NodeId; 8]>;

/// Immutable per-model facts supplied by the model registry.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ModelDescriptor {
  fan_out: u32,
  node_count: u32,
}

impl ModelDescriptor {
  /// Create a descriptor. Returns None for `fan_out == 0`, which cannot
  /// describe a tree.
  pub fn new(fan_out: u32, node_count: u32) -> Option<Self> {
    if fan_out == 0 {
      return None;
    }
    Some(Self {
      fan_out,
      node_count,
    })
  }

  /// Fixed number of children per internal node.
  #[inline]
  pub fn fan_out(&self) -> u32 {
    self.fan_out
  }

  /// Total number of nodes in the tree.
  #[inline]
  pub fn node_count(&self) -> u32 {
    self.node_count
  }

  /// Validate a raw id against this tree.
  #[inline]
  pub fn node(&self, raw: u32) -> Option<NodeId> {
    (raw < self.node_count).then_some(NodeId::from_raw(raw))
  }

  /// Root node, absent for an empty tree.
  #[inline]
  pub fn root(&self) -> Option<NodeId> {
    self.node(0)
  }

  /// True if `node` was issued for a tree at least this large.
  #[inline]
  pub fn contains(&self, node: NodeId) -> bool {
    node.raw() < self.node_count
  }

  /// Get child `index` of `node` (finer detail).
  ///
  /// Returns None if `index >= fan_out` or the child lies past the last node.
  pub fn child(&self, node: NodeId, index: u32) -> Option<NodeId> {
    if index >= self.fan_out {
      return None;
    }
    let id = node.raw() as u64 * self.fan_out as u64 + 1 + index as u64;
    if id < self.node_count as u64 {
      Some(NodeId::from_raw(id as u32))
    } else {
      None
    }
  }

  /// All in-range children of `node`, in id order.
  ///
  /// Child ids are consecutive, so the first out-of-range child ends the list.
  pub fn children(&self, node: NodeId) -> NodeList {
    (0..self.fan_out)
      .map_while(|index| self.child(node, index))
      .collect()
  }

  /// Get parent node (coarser). Returns None for the root.
  #[inline]
  pub fn parent(&self, node: NodeId) -> Option<NodeId> {
    match node.raw() {
      0 => None,
      raw => Some(NodeId::from_raw((raw - 1) / self.fan_out)),
    }
  }

  /// All children of `node`'s parent, `node` included. Empty for the root.
  pub fn siblings(&self, node: NodeId) -> NodeList {
    self
      .parent(node)
      .map(|parent| self.children(parent))
      .unwrap_or_default()
  }

  /// Ancestors from the parent up to the root.
  pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    std::iter::successors(self.parent(node), move |&n| self.parent(n))
  }

  /// True if `ancestor` lies strictly above `node`.
  pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
    // Ancestors always have smaller ids.
    ancestor < node && self.ancestors(node).any(|n| n == ancestor)
  }

  /// Distance from the root (root = 0).
  pub fn depth(&self, node: NodeId) -> usize {
    self.ancestors(node).count()
  }

  /// True if `node` has no in-range children.
  #[inline]
  pub fn is_leaf(&self, node: NodeId) -> bool {
    self.child(node, 0).is_none()
  }

  /// Descendants of `node`, one contiguous id range per level.
  ///
  /// Each level's descendants occupy `[lo * f + 1, hi * f + f]` where
  /// `[lo, hi]` is the level above, clipped to the last node.
  pub(crate) fn descendant_ranges(
    &self,
    node: NodeId,
  ) -> impl Iterator<Item = RangeInclusive<NodeId>> {
    let fan_out = self.fan_out as u64;
    let node_count = self.node_count as u64;
    let mut lo = node.raw() as u64;
    let mut hi = lo;
    std::iter::from_fn(move || {
      lo = lo.saturating_mul(fan_out).saturating_add(1);
      hi = hi.saturating_mul(fan_out).saturating_add(fan_out);
      if lo >= node_count {
        return None;
      }
      let last = hi.min(node_count - 1);
      Some(NodeId::from_raw(lo as u32)..=NodeId::from_raw(last as u32))
    })
  }
}

#[cfg(test)]
#[path = "descriptor_test.rs"]
mod descriptor_test;
