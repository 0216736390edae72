//! Reference decision pass.
//!
//! Drains all five queues of a [`CutUpdateIndex`], decides every action
//! against a [`DecisionBudget`], and publishes the result with one swap.
//!
//! # Phases
//!
//! 1. **Must-collapse**: always approved
//! 2. **Collapse-on-need**: approved only under resource pressure
//! 3. **Maybe-collapse**: approved while the collapse budget lasts
//! 4. **Must-split**: approved while the split budget lasts, most urgent first
//! 5. **Keep**: always approved
//! 6. **Swap**: the pass becomes visible at once
//!
//! Collapses run first to shed load before new detail is admitted.
//! Anything not approved is rejected, which keeps the current level of
//! detail for that node.

use tracing::debug;

use crate::config::DecisionBudget;
use crate::error::CutError;
use crate::index::CutUpdateIndex;
use crate::types::{Action, ActionKind, Decision};

/// Statistics from one decision pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassStats {
  /// Approved splits.
  pub splits_performed: usize,
  /// Approved collapses of all three kinds.
  pub collapses_performed: usize,
  /// Approved keeps.
  pub keeps_performed: usize,
  /// Rejected actions whose reject effect was applied.
  pub rejected: usize,
  /// Actions with no applicable effect (split or reject-collapse of a leaf).
  pub skipped: usize,
}

impl PassStats {
  /// Total number of actions taken off the queues.
  #[inline]
  pub fn total_actions(&self) -> usize {
    self.splits_performed + self.collapses_performed + self.keeps_performed + self.rejected + self.skipped
  }

  /// Approved transitions that change the level of detail.
  #[inline]
  pub fn total_transitions(&self) -> usize {
    self.splits_performed + self.collapses_performed
  }
}

/// Apply one decision. `Ok(false)` means the action had nothing to apply.
fn apply(
  index: &CutUpdateIndex,
  action: &Action,
  decision: Decision,
  stats: &mut PassStats,
) -> Result<bool, CutError> {
  let result = match decision {
    Decision::Approve => index.approve_action(action),
    Decision::Reject => index.reject_action(action),
  };
  match result {
    Ok(()) => {
      if decision == Decision::Reject {
        stats.rejected += 1;
      }
      Ok(true)
    }
    Err(CutError::NoChildren { .. }) => {
      stats.skipped += 1;
      Ok(false)
    }
    Err(err) => Err(err),
  }
}

fn verdict(approve: bool) -> Decision {
  if approve {
    Decision::Approve
  } else {
    Decision::Reject
  }
}

/// Run one complete decision pass and swap the cuts.
///
/// Queues are empty afterwards. Staged actions are sorted in first.
#[cfg_attr(feature = "spans", tracing::instrument(skip_all, name = "pass::run_decision_pass"))]
pub fn run_decision_pass(index: &CutUpdateIndex, budget: DecisionBudget) -> Result<PassStats, CutError> {
  let mut stats = PassStats::default();
  let mut speculative_collapses = 0;

  index.sort();

  // Phases 1-3: collapses (shed load)
  for kind in [
    ActionKind::MustCollapse,
    ActionKind::CollapseOnNeed,
    ActionKind::MaybeCollapse,
  ] {
    while let Some(action) = index.pop_front_action(kind) {
      let approve = match kind {
        ActionKind::MustCollapse => true,
        ActionKind::CollapseOnNeed => budget.under_pressure,
        _ => budget.can_collapse(speculative_collapses),
      };
      let decision = verdict(approve);
      if apply(index, &action, decision, &mut stats)? && approve {
        stats.collapses_performed += 1;
        if kind == ActionKind::MaybeCollapse {
          speculative_collapses += 1;
        }
      }
    }
  }

  // Phase 4: splits, most urgent first
  while let Some(action) = index.pop_front_action(ActionKind::MustSplit) {
    let approve = budget.can_split(stats.splits_performed);
    if apply(index, &action, verdict(approve), &mut stats)? && approve {
      stats.splits_performed += 1;
    }
  }

  // Phase 5: keeps
  while let Some(action) = index.pop_front_action(ActionKind::Keep) {
    if apply(index, &action, Decision::Approve, &mut stats)? {
      stats.keeps_performed += 1;
    }
  }

  // Phase 6: publish
  index.swap_cuts();

  debug!(
    splits = stats.splits_performed,
    collapses = stats.collapses_performed,
    keeps = stats.keeps_performed,
    rejected = stats.rejected,
    skipped = stats.skipped,
    "decision pass complete"
  );
  Ok(stats)
}

#[cfg(test)]
#[path = "pass_test.rs"]
mod pass_test;
