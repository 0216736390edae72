//! Engine-agnostic counters for cut-update activity.
//!
//! Feature-gated and runtime-toggled to ensure zero overhead when disabled.
//!
//! # Usage
//!
//! ```ignore
//! use lod_cut::metrics::COLLECT_METRICS;
//!
//! // Compile with --features metrics
//! // Runtime toggle:
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! // Snapshot after a pass:
//! let metrics = index.metrics();
//! println!("{} approvals", metrics.approved);
//! ```

use std::collections::VecDeque;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;
use std::sync::atomic::AtomicBool;

use crate::types::Decision;

/// Runtime toggle for metrics collection.
/// Set to false to disable metrics gathering at runtime.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Check if metrics collection is enabled (both compile-time and runtime).
#[inline]
pub fn is_enabled() -> bool {
    #[cfg(feature = "metrics")]
    {
        COLLECT_METRICS.load(Ordering::Relaxed)
    }
    #[cfg(not(feature = "metrics"))]
    {
        false
    }
}

/// Rolling window for storing recent values (e.g., decisions per pass).
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
    buffer: VecDeque<T>,
    capacity: usize,
}

impl<T> RollingWindow<T> {
    /// Create a new rolling window with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a new value, evicting the oldest if at capacity.
    pub fn push(&mut self, value: T) {
        if self.buffer.len() >= self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(value);
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Iterate over values (oldest to newest).
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buffer.iter()
    }

    /// Get the most recent value.
    pub fn last(&self) -> Option<&T> {
        self.buffer.back()
    }
}

impl RollingWindow<u64> {
    /// Compute the average of all values.
    pub fn average(&self) -> f64 {
        if self.buffer.is_empty() {
            0.0
        } else {
            self.buffer.iter().sum::<u64>() as f64 / self.buffer.len() as f64
        }
    }

    /// Get min and max values.
    pub fn min_max(&self) -> Option<(u64, u64)> {
        let min = self.buffer.iter().min()?;
        let max = self.buffer.iter().max()?;
        Some((*min, *max))
    }
}

impl Default for RollingWindow<u64> {
    fn default() -> Self {
        Self::new(128) // ~2 seconds of passes at 60fps
    }
}

/// Cumulative counters of one index, plus decisions per swap.
#[derive(Debug, Clone, Default)]
pub struct IndexMetrics {
    /// Actions pushed straight into a queue.
    pub pushed: u64,
    /// Actions pushed into the staging queue.
    pub staged: u64,
    /// Staged actions moved into queues by `sort`.
    pub sorted: u64,
    /// Actions popped from the front or back of a queue.
    pub popped: u64,
    /// Approved actions.
    pub approved: u64,
    /// Rejected actions.
    pub rejected: u64,
    /// Calls to `cancel_action`.
    pub cancellations: u64,
    /// Pending actions removed by cancellations.
    pub cancelled_actions: u64,
    /// Calls to `swap_cuts`.
    pub swaps: u64,
    /// Policy updates that discarded all state.
    pub cold_resets: u64,
    /// Decisions recorded between consecutive swaps.
    pub decisions_per_swap: RollingWindow<u64>,
    decisions_since_swap: u64,
}

impl IndexMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_push(&mut self, sorted: bool) {
        if is_enabled() {
            if sorted {
                self.pushed += 1;
            } else {
                self.staged += 1;
            }
        }
    }

    pub fn record_sort(&mut self, moved: usize) {
        if is_enabled() {
            self.sorted += moved as u64;
        }
    }

    pub fn record_pop(&mut self) {
        if is_enabled() {
            self.popped += 1;
        }
    }

    pub fn record_decision(&mut self, decision: Decision) {
        if !is_enabled() {
            return;
        }
        match decision {
            Decision::Approve => self.approved += 1,
            Decision::Reject => self.rejected += 1,
        }
        self.decisions_since_swap += 1;
    }

    pub fn record_cancel(&mut self, removed: usize) {
        if is_enabled() {
            self.cancellations += 1;
            self.cancelled_actions += removed as u64;
        }
    }

    pub fn record_swap(&mut self) {
        if is_enabled() {
            self.swaps += 1;
            self.decisions_per_swap.push(self.decisions_since_swap);
            self.decisions_since_swap = 0;
        }
    }

    pub fn record_cold_reset(&mut self) {
        if is_enabled() {
            self.cold_resets += 1;
        }
    }

    /// Approved + rejected.
    pub fn total_decisions(&self) -> u64 {
        self.approved + self.rejected
    }
}

#[cfg(all(test, feature = "metrics"))]
mod tests {
    use super::*;

    #[test]
    fn test_rolling_window() {
        let mut window = RollingWindow::new(3);
        assert!(window.is_empty());

        window.push(10u64);
        window.push(20);
        window.push(30);
        assert_eq!(window.average(), 20.0);

        // Push one more, oldest should be evicted
        window.push(40);
        assert_eq!(window.len(), 3);
        assert_eq!(window.average(), 30.0);
        assert_eq!(window.min_max(), Some((20, 40)));
        assert_eq!(window.last(), Some(&40));
    }

    #[test]
    fn test_decisions_per_swap() {
        let mut metrics = IndexMetrics::new();
        metrics.record_decision(Decision::Approve);
        metrics.record_decision(Decision::Reject);
        metrics.record_decision(Decision::Approve);
        metrics.record_swap();
        metrics.record_swap();

        assert_eq!(metrics.approved, 2);
        assert_eq!(metrics.rejected, 1);
        assert_eq!(metrics.total_decisions(), 3);
        assert_eq!(metrics.swaps, 2);
        let per_swap: Vec<u64> = metrics.decisions_per_swap.iter().copied().collect();
        assert_eq!(per_swap, vec![3, 0]);
    }

    #[test]
    fn test_push_counters() {
        let mut metrics = IndexMetrics::new();
        metrics.record_push(true);
        metrics.record_push(false);
        metrics.record_push(false);
        metrics.record_sort(2);
        metrics.record_cancel(4);
        assert_eq!(metrics.pushed, 1);
        assert_eq!(metrics.staged, 2);
        assert_eq!(metrics.sorted, 2);
        assert_eq!(metrics.cancelled_actions, 4);
    }
}
