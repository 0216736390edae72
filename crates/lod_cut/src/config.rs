//! Configuration for the cut-update index and the decision pass.

/// Behavior of the cut store and queue allocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexConfig {
  /// Seed each new next cut with the cut that just became current.
  ///
  /// On: a pass only records transitions (Keep actions optional).
  /// Off: a pass rebuilds every cut from scratch, so every resident node
  /// needs a Keep, split or collapse decision each pass.
  pub carry_forward: bool,
  /// Slots pre-allocated per action queue.
  pub queue_capacity: usize,
}

impl IndexConfig {
  /// Incremental passes.
  pub const DEFAULT: Self = Self {
    carry_forward: true,
    queue_capacity: 256,
  };

  /// Full rebuild every pass.
  pub const REBUILD: Self = Self {
    carry_forward: false,
    queue_capacity: 256,
  };
}

impl Default for IndexConfig {
  fn default() -> Self {
    Self::DEFAULT
  }
}

/// Rate limiting for one decision pass.
///
/// Prevents load spikes from unbounded refinement by limiting the number of
/// approved splits and speculative collapses per pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecisionBudget {
  /// Maximum approved splits per pass (0 = unlimited).
  pub max_splits: usize,
  /// Maximum approved speculative collapses per pass (0 = unlimited).
  /// Must-collapse actions are never limited.
  pub max_collapses: usize,
  /// Resource pressure: collapse-on-need actions are approved only when set.
  pub under_pressure: bool,
}

impl DecisionBudget {
  /// Default budget with reasonable limits.
  pub const DEFAULT: Self = Self {
    max_splits: 64,
    max_collapses: 64,
    under_pressure: false,
  };

  /// Unlimited budget for testing or cold loads.
  pub const UNLIMITED: Self = Self {
    max_splits: 0,
    max_collapses: 0,
    under_pressure: false,
  };

  /// Same limits, with resource pressure reported.
  #[inline]
  pub const fn with_pressure(self) -> Self {
    Self {
      under_pressure: true,
      ..self
    }
  }

  /// Check if more splits can be approved.
  #[inline]
  pub fn can_split(&self, performed: usize) -> bool {
    self.max_splits == 0 || performed < self.max_splits
  }

  /// Check if more speculative collapses can be approved.
  #[inline]
  pub fn can_collapse(&self, performed: usize) -> bool {
    self.max_collapses == 0 || performed < self.max_collapses
  }
}

impl Default for DecisionBudget {
  fn default() -> Self {
    Self::DEFAULT
  }
}
