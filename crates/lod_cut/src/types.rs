//! Core identifiers and action records.

use std::fmt;

/// Viewer (camera/user) identifier.
///
/// Valid ids are `0..num_viewers` of the active policy generation.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ViewerId(u32);

impl ViewerId {
  pub const fn new(raw: u32) -> Self {
    Self(raw)
  }

  /// Get the raw ID value.
  pub const fn raw(&self) -> u32 {
    self.0
  }

  pub(crate) fn index(&self) -> usize {
    self.0 as usize
  }
}

impl fmt::Display for ViewerId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "v{}", self.0)
  }
}

/// Model identifier, dense in `0..num_models`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ModelId(u32);

impl ModelId {
  pub const fn new(raw: u32) -> Self {
    Self(raw)
  }

  /// Get the raw ID value.
  pub const fn raw(&self) -> u32 {
    self.0
  }

  pub(crate) fn index(&self) -> usize {
    self.0 as usize
  }
}

impl fmt::Display for ModelId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "m{}", self.0)
  }
}

/// Node in the implicit fan-out tree of one model.
///
/// Only a [`ModelDescriptor`](crate::tree::ModelDescriptor) hands these out,
/// so every `NodeId` is below the `node_count` of the descriptor that created
/// it. Root = 0, child `i` of `n` = `n * fan_out + 1 + i`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(u32);

impl NodeId {
  pub(crate) const fn from_raw(raw: u32) -> Self {
    Self(raw)
  }

  /// Get the raw ID value.
  pub const fn raw(&self) -> u32 {
    self.0
  }
}

impl fmt::Display for NodeId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Kind of pending cut transition. Each kind owns one priority queue.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ActionKind {
  /// Node stays resident as-is.
  Keep,
  /// Node is replaced by all of its children (refine).
  MustSplit,
  /// Children are replaced by the node (coarsen), unconditionally.
  MustCollapse,
  /// Same effect as `MustCollapse`, realized only under resource pressure.
  CollapseOnNeed,
  /// Speculative, reversible coarsen. Lowest confidence.
  MaybeCollapse,
}

impl ActionKind {
  /// Number of queues.
  pub const COUNT: usize = 5;

  /// All kinds in queue order.
  pub const ALL: [ActionKind; Self::COUNT] = [
    ActionKind::Keep,
    ActionKind::MustSplit,
    ActionKind::MustCollapse,
    ActionKind::CollapseOnNeed,
    ActionKind::MaybeCollapse,
  ];

  /// Queue slot of this kind.
  #[inline]
  pub const fn index(self) -> usize {
    match self {
      ActionKind::Keep => 0,
      ActionKind::MustSplit => 1,
      ActionKind::MustCollapse => 2,
      ActionKind::CollapseOnNeed => 3,
      ActionKind::MaybeCollapse => 4,
    }
  }

  /// True for the three coarsening kinds, which share one tree effect.
  #[inline]
  pub const fn is_collapse(self) -> bool {
    matches!(
      self,
      ActionKind::MustCollapse | ActionKind::CollapseOnNeed | ActionKind::MaybeCollapse
    )
  }
}

impl fmt::Display for ActionKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      ActionKind::Keep => "keep",
      ActionKind::MustSplit => "must-split",
      ActionKind::MustCollapse => "must-collapse",
      ActionKind::CollapseOnNeed => "collapse-on-need",
      ActionKind::MaybeCollapse => "maybe-collapse",
    };
    f.write_str(name)
  }
}

/// Outcome chosen for an action by the decision layer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Decision {
  Approve,
  Reject,
}

impl fmt::Display for Decision {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Decision::Approve => f.write_str("approve"),
      Decision::Reject => f.write_str("reject"),
    }
  }
}

/// Pending request to move one node of one viewer's cut.
///
/// Identity inside a queue is `(kind, model, node)`. The priority is fixed for
/// the lifetime of the record; re-prioritizing means cancel + push.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Action {
  pub viewer: ViewerId,
  pub model: ModelId,
  pub node: NodeId,
  pub kind: ActionKind,
  /// Larger = more urgent.
  pub priority: f64,
}

impl Action {
  pub fn new(kind: ActionKind, viewer: ViewerId, model: ModelId, node: NodeId, priority: f64) -> Self {
    Self {
      viewer,
      model,
      node,
      kind,
      priority,
    }
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
