//! Error type for the cut-update index.
//!
//! Precondition violations at the public boundary (unknown ids, out-of-range
//! nodes, decisions the effect table does not define) surface as `CutError`.
//! Internal invariants are guarded separately with `debug_assert!`.

use thiserror::Error;

use crate::types::{ActionKind, Decision, ModelId, ViewerId};

/// Errors returned by [`CutUpdateIndex`](crate::CutUpdateIndex) and the
/// model table.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum CutError {
  /// Model id is not part of the active policy generation.
  #[error("unknown model {0}")]
  UnknownModel(ModelId),

  /// Viewer id was never registered through `update_policy`.
  #[error("unknown viewer {0}")]
  UnknownViewer(ViewerId),

  /// Raw node id does not address a node of the model.
  #[error("node {node} is out of range for model {model} ({node_count} nodes)")]
  NodeOutOfRange {
    model: ModelId,
    node: u32,
    node_count: u32,
  },

  /// Descriptor supplied by the model source cannot describe a tree.
  #[error("invalid descriptor for model {model}: {reason}")]
  InvalidDescriptor { model: ModelId, reason: &'static str },

  /// Priorities must be comparable; NaN would break the heap order.
  #[error("action priority must not be NaN")]
  InvalidPriority,

  /// The effect table defines no outcome for this decision.
  #[error("{decision} is not defined for {kind} actions")]
  InvalidDecision { kind: ActionKind, decision: Decision },

  /// Node has no in-range children to refine into or keep refined.
  #[error("node {node} of model {model} has no children")]
  NoChildren { model: ModelId, node: u32 },

  /// Internal bookkeeping check failed (heap order, reverse index or
  /// antichain).
  #[error("invariant violated: {0}")]
  InvariantViolated(String),
}
