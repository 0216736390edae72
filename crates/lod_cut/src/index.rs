//! CutUpdateIndex - the shared bookkeeping core.
//!
//! Producers push prioritized [`Action`]s, a decision loop approves or
//! rejects them against the *next* cut, and [`CutUpdateIndex::swap_cuts`]
//! publishes the whole pass at once.
//!
//! # Locking
//!
//! All state sits behind one `parking_lot::Mutex`. Every public method holds
//! it for its full duration and never blocks on anything else, so hold times
//! are bounded by heap depth or bucket size. Consumers that need several
//! decisions to appear together run a full pass and then swap once.
//!
//! # Effects
//!
//! | Kind | Approve | Reject |
//! |---|---|---|
//! | Keep | node | error |
//! | MustSplit | children | node |
//! | MustCollapse / CollapseOnNeed / MaybeCollapse | node | children |
//!
//! Every insert evicts resident ancestors and descendants, so cuts stay
//! antichains.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::config::IndexConfig;
use crate::cut::{Cut, CutBuffers, CutFront};
use crate::error::CutError;
use crate::metrics::IndexMetrics;
use crate::queue::ActionQueues;
use crate::tree::{ModelDescriptor, ModelSource, ModelTable, NodeList};
use crate::types::{Action, ActionKind, Decision, ModelId, NodeId, ViewerId};

/// What `update_policy` did to existing state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyChange {
  /// Models changed: queues, staging and every cut were discarded.
  ColdReset,
  /// New viewers got empty cuts; existing cuts kept.
  ViewersAdded,
  /// Retired viewers' cuts and pending actions were dropped.
  ViewersRemoved {
    /// Pending actions purged with the retired viewers.
    purged: usize,
  },
  /// Same viewers, same models.
  Unchanged,
}

/// Which part of the tree a decision makes resident.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Effect {
  Node,
  Children,
}

impl Effect {
  fn of(kind: ActionKind, decision: Decision) -> Result<Self, CutError> {
    match (kind, decision) {
      (ActionKind::Keep, Decision::Approve) => Ok(Effect::Node),
      (ActionKind::Keep, Decision::Reject) => Err(CutError::InvalidDecision { kind, decision }),
      (ActionKind::MustSplit, Decision::Approve) => Ok(Effect::Children),
      (ActionKind::MustSplit, Decision::Reject) => Ok(Effect::Node),
      (_, Decision::Approve) => Ok(Effect::Node),
      (_, Decision::Reject) => Ok(Effect::Children),
    }
  }
}

#[derive(Debug)]
struct IndexState {
  models: ModelTable,
  viewers: u32,
  queues: ActionQueues,
  cuts: CutBuffers,
  metrics: IndexMetrics,
}

impl IndexState {
  fn check_viewer(&self, viewer: ViewerId) -> Result<(), CutError> {
    if viewer.raw() < self.viewers {
      Ok(())
    } else {
      Err(CutError::UnknownViewer(viewer))
    }
  }

  fn check_pair(&self, viewer: ViewerId, model: ModelId) -> Result<&ModelDescriptor, CutError> {
    self.check_viewer(viewer)?;
    self.models.get(model)
  }

  fn check_action(&self, action: &Action) -> Result<ModelDescriptor, CutError> {
    if action.priority.is_nan() {
      return Err(CutError::InvalidPriority);
    }
    self.check_viewer(action.viewer)?;
    self.models.check(action.model, action.node).copied()
  }

  fn apply(&mut self, action: &Action, decision: Decision) -> Result<(), CutError> {
    let descriptor = self.check_action(action)?;
    let nodes: NodeList = match Effect::of(action.kind, decision)? {
      Effect::Node => NodeList::from_slice(&[action.node]),
      Effect::Children => {
        let children = descriptor.children(action.node);
        if children.is_empty() {
          return Err(CutError::NoChildren {
            model: action.model,
            node: action.node.raw(),
          });
        }
        children
      }
    };

    let cut = self
      .cuts
      .next_mut(action.viewer, action.model)
      .ok_or_else(|| CutError::InvariantViolated(format!("no cut for {}/{}", action.viewer, action.model)))?;
    let evicted = cut.commit_all(&nodes, &descriptor);

    self.metrics.record_decision(decision);
    trace!(
      viewer = %action.viewer,
      model = %action.model,
      node = %action.node,
      kind = %action.kind,
      %decision,
      inserted = nodes.len(),
      evicted,
      "decision applied"
    );
    Ok(())
  }

  fn cut_in(&self, front: Front, viewer: ViewerId, model: ModelId) -> Result<Arc<Cut>, CutError> {
    self.check_pair(viewer, model)?;
    let cut = match front {
      Front::Current => self.cuts.current(viewer, model),
      Front::Previous => self.cuts.previous(viewer, model),
      Front::Next => self.cuts.next(viewer, model),
    };
    cut
      .cloned()
      .ok_or_else(|| CutError::InvariantViolated(format!("no cut for {}/{}", viewer, model)))
  }
}

#[derive(Clone, Copy)]
enum Front {
  Current,
  Previous,
  Next,
}

/// Thread-safe cut-update index for every `(viewer, model)` pair.
///
/// Share it by reference or `Arc` between producer threads and the
/// renderer.
#[derive(Debug)]
pub struct CutUpdateIndex {
  config: IndexConfig,
  state: Mutex<IndexState>,
}

impl CutUpdateIndex {
  /// Empty index: no viewers, no models. Call [`update_policy`](Self::update_policy)
  /// before pushing actions.
  pub fn new(config: IndexConfig) -> Self {
    Self {
      config,
      state: Mutex::new(IndexState {
        models: ModelTable::default(),
        viewers: 0,
        queues: ActionQueues::with_capacity(config.queue_capacity),
        cuts: CutBuffers::new(0, 0, config.carry_forward),
        metrics: IndexMetrics::new(),
      }),
    }
  }

  /// Index with an initial policy already applied.
  pub fn with_policy<S: ModelSource + ?Sized>(
    viewer_count: u32,
    source: &S,
    config: IndexConfig,
  ) -> Result<Self, CutError> {
    let index = Self::new(config);
    index.update_policy(viewer_count, source)?;
    Ok(index)
  }

  pub fn config(&self) -> IndexConfig {
    self.config
  }

  // ===========================================================================
  // Policy
  // ===========================================================================

  /// Replace the viewer set and the model table.
  ///
  /// Any change to the model table (count or a single descriptor) is a cold
  /// reset. Otherwise only the viewer dimension of the cut tables changes.
  #[cfg_attr(feature = "spans", tracing::instrument(skip_all, name = "index::update_policy"))]
  pub fn update_policy<S: ModelSource + ?Sized>(
    &self,
    viewer_count: u32,
    source: &S,
  ) -> Result<PolicyChange, CutError> {
    let models = ModelTable::from_source(source)?;
    let mut state = self.state.lock();
    let state = &mut *state;

    let change = if models != state.models {
      state.queues.clear();
      state.cuts.resize(viewer_count as usize, models.len());
      state.models = models;
      state.metrics.record_cold_reset();
      PolicyChange::ColdReset
    } else if viewer_count > state.viewers {
      state.cuts.set_viewer_count(viewer_count as usize);
      PolicyChange::ViewersAdded
    } else if viewer_count < state.viewers {
      let purged = state.queues.retain_viewers(viewer_count);
      state.cuts.set_viewer_count(viewer_count as usize);
      PolicyChange::ViewersRemoved { purged }
    } else {
      PolicyChange::Unchanged
    };
    state.viewers = viewer_count;

    debug!(
      viewers = viewer_count,
      models = state.models.len(),
      ?change,
      "policy updated"
    );
    Ok(change)
  }

  // ===========================================================================
  // Facts and navigation
  // ===========================================================================

  pub fn num_viewers(&self) -> u32 {
    self.state.lock().viewers
  }

  pub fn num_models(&self) -> usize {
    self.state.lock().models.len()
  }

  /// Registered viewers, `0..num_viewers`.
  pub fn viewer_ids(&self) -> impl Iterator<Item = ViewerId> {
    (0..self.num_viewers()).map(ViewerId::new)
  }

  pub fn descriptor(&self, model: ModelId) -> Result<ModelDescriptor, CutError> {
    self.state.lock().models.get(model).copied()
  }

  pub fn node_count(&self, model: ModelId) -> Result<u32, CutError> {
    Ok(self.descriptor(model)?.node_count())
  }

  pub fn fan_out(&self, model: ModelId) -> Result<u32, CutError> {
    Ok(self.descriptor(model)?.fan_out())
  }

  /// Validate a raw id against the model's node count.
  pub fn node(&self, model: ModelId, raw: u32) -> Result<NodeId, CutError> {
    self.state.lock().models.resolve(model, raw)
  }

  /// Child `index` of `node`, or `None` past the end of the tree.
  pub fn child_id(&self, model: ModelId, node: NodeId, index: u32) -> Result<Option<NodeId>, CutError> {
    let state = self.state.lock();
    Ok(state.models.check(model, node)?.child(node, index))
  }

  /// Parent of `node`; `None` for the root.
  pub fn parent_id(&self, model: ModelId, node: NodeId) -> Result<Option<NodeId>, CutError> {
    let state = self.state.lock();
    Ok(state.models.check(model, node)?.parent(node))
  }

  pub fn children(&self, model: ModelId, node: NodeId) -> Result<NodeList, CutError> {
    let state = self.state.lock();
    Ok(state.models.check(model, node)?.children(node))
  }

  /// Every child of `node`'s parent, `node` included.
  pub fn siblings(&self, model: ModelId, node: NodeId) -> Result<NodeList, CutError> {
    let state = self.state.lock();
    Ok(state.models.check(model, node)?.siblings(node))
  }

  /// Pending actions in the queue of `kind`.
  pub fn num_actions(&self, kind: ActionKind) -> usize {
    self.state.lock().queues.queue(kind).len()
  }

  /// Actions waiting for [`sort`](Self::sort).
  pub fn num_staged(&self) -> usize {
    self.state.lock().queues.staged()
  }

  // ===========================================================================
  // Queues
  // ===========================================================================

  /// Queue an action. `sorted = false` defers heap insertion to `sort`.
  pub fn push_action(&self, action: Action, sorted: bool) -> Result<(), CutError> {
    let mut state = self.state.lock();
    state.check_action(&action)?;
    state.queues.push(action, sorted);
    state.metrics.record_push(sorted);
    trace!(
      viewer = %action.viewer,
      model = %action.model,
      node = %action.node,
      kind = %action.kind,
      priority = action.priority,
      sorted,
      "action pushed"
    );
    Ok(())
  }

  /// Move all staged actions into their queues.
  #[cfg_attr(feature = "spans", tracing::instrument(skip_all, name = "index::sort"))]
  pub fn sort(&self) -> usize {
    let mut state = self.state.lock();
    let moved = state.queues.sort();
    state.metrics.record_sort(moved);
    debug!(moved, "staged actions sorted");
    moved
  }

  /// Highest-priority action of `kind`.
  pub fn front_action(&self, kind: ActionKind) -> Option<Action> {
    self.state.lock().queues.queue(kind).peek_front().copied()
  }

  /// Last heap slot of `kind`. Not the lowest priority in general.
  pub fn back_action(&self, kind: ActionKind) -> Option<Action> {
    self.state.lock().queues.queue(kind).peek_back().copied()
  }

  pub fn pop_front_action(&self, kind: ActionKind) -> Option<Action> {
    let mut state = self.state.lock();
    let action = state.queues.queue_mut(kind).pop_front()?;
    state.metrics.record_pop();
    Some(action)
  }

  pub fn pop_back_action(&self, kind: ActionKind) -> Option<Action> {
    let mut state = self.state.lock();
    let action = state.queues.queue_mut(kind).pop_back()?;
    state.metrics.record_pop();
    Some(action)
  }

  // ===========================================================================
  // Decisions
  // ===========================================================================

  /// Apply the approve effect of `action` to its next cut.
  ///
  /// The action stays queued; pop it separately.
  pub fn approve_action(&self, action: &Action) -> Result<(), CutError> {
    self.state.lock().apply(action, Decision::Approve)
  }

  /// Apply the reject effect of `action` to its next cut.
  ///
  /// Fails with [`CutError::InvalidDecision`] for `Keep`.
  pub fn reject_action(&self, action: &Action) -> Result<(), CutError> {
    self.state.lock().apply(action, Decision::Reject)
  }

  /// Undo everything pending for one viewer's node.
  ///
  /// Drops `node` from the viewer's next cut and removes every action of
  /// that viewer for `(model, node)` from all five queues and from staging.
  /// Returns the number of actions removed.
  #[cfg_attr(feature = "spans", tracing::instrument(skip_all, name = "index::cancel_action"))]
  pub fn cancel_action(&self, viewer: ViewerId, model: ModelId, node: NodeId) -> Result<usize, CutError> {
    let mut state = self.state.lock();
    let state = &mut *state;
    state.check_viewer(viewer)?;
    state.models.check(model, node)?;

    let resident = state
      .cuts
      .next(viewer, model)
      .is_some_and(|cut| cut.contains(node));
    if resident {
      if let Some(cut) = state.cuts.next_mut(viewer, model) {
        cut.remove(node);
      }
    }

    let removed = state.queues.cancel(viewer, model, node);
    state.metrics.record_cancel(removed);
    trace!(%viewer, %model, %node, removed, resident, "action cancelled");
    Ok(removed)
  }

  // ===========================================================================
  // Cut front
  // ===========================================================================

  /// Publish every next cut at once.
  pub fn swap_cuts(&self) {
    let mut state = self.state.lock();
    state.cuts.swap();
    state.metrics.record_swap();
    debug!(front = ?state.cuts.current_front(), "cuts swapped");
  }

  /// Published cut. The snapshot stays valid across later swaps.
  pub fn current_cut(&self, viewer: ViewerId, model: ModelId) -> Result<Arc<Cut>, CutError> {
    self.state.lock().cut_in(Front::Current, viewer, model)
  }

  /// Cut that was published before the last swap.
  pub fn previous_cut(&self, viewer: ViewerId, model: ModelId) -> Result<Arc<Cut>, CutError> {
    self.state.lock().cut_in(Front::Previous, viewer, model)
  }

  /// Cut being built by the running pass.
  pub fn next_cut(&self, viewer: ViewerId, model: ModelId) -> Result<Arc<Cut>, CutError> {
    self.state.lock().cut_in(Front::Next, viewer, model)
  }

  pub fn current_front(&self) -> CutFront {
    self.state.lock().cuts.current_front()
  }

  /// Clear the published cut of one pair (viewer starts fresh).
  pub fn reset_cut(&self, viewer: ViewerId, model: ModelId) -> Result<(), CutError> {
    let mut state = self.state.lock();
    state.check_pair(viewer, model)?;
    state.cuts.reset_current(viewer, model);
    Ok(())
  }

  /// Clear the next cut of one pair so the pass rebuilds it.
  pub fn reset_next_cut(&self, viewer: ViewerId, model: ModelId) -> Result<(), CutError> {
    let mut state = self.state.lock();
    state.check_pair(viewer, model)?;
    state.cuts.reset_next(viewer, model);
    Ok(())
  }

  // ===========================================================================
  // Diagnostics
  // ===========================================================================

  /// Check heap order, reverse-index bijection and the antichain property of
  /// every cut in both fronts.
  pub fn verify(&self) -> Result<(), CutError> {
    let state = self.state.lock();
    state.queues.verify().map_err(CutError::InvariantViolated)?;

    for front in [CutFront::A, CutFront::B] {
      for (viewer, model, cut) in state.cuts.iter_front(front) {
        let descriptor = state.models.get(model)?;
        if let Some(stray) = cut.iter().find(|&node| !descriptor.contains(node)) {
          return Err(CutError::InvariantViolated(format!(
            "node {} in cut {}/{} is out of range",
            stray, viewer, model
          )));
        }
        if !cut.is_antichain(descriptor) {
          return Err(CutError::InvariantViolated(format!(
            "cut {}/{} in front {:?} is not an antichain",
            viewer, model, front
          )));
        }
      }
    }
    Ok(())
  }

  /// Counter snapshot. All zero unless built with `metrics`.
  pub fn metrics(&self) -> IndexMetrics {
    self.state.lock().metrics.clone()
  }
}

#[cfg(test)]
#[path = "index_test.rs"]
mod index_test;
