//! lod_cut - Cut-update bookkeeping for out-of-core multi-resolution rendering
//!
//! For every `(viewer, model)` pair this crate tracks which nodes of a
//! fixed fan-out level-of-detail tree are resident (the *cut*), which
//! transitions are pending, and in what order they should be decided. It
//! never touches geometry, distances or GPU memory: priorities come from the
//! caller and node ids are opaque.
//!
//! # Features
//!
//! - **Five prioritized queues**: keep, must-split, must-collapse,
//!   collapse-on-need, maybe-collapse
//! - **O(log n) cancellation**: every queue carries a reverse index from
//!   `(model, node)` to heap slots
//! - **Staged bulk loads**: unsorted pushes are sorted in one step
//! - **Double-buffered cuts**: decisions build the next cut; one swap
//!   publishes a whole pass
//! - **Typed node ids**: ids are validated against the owning model's
//!   descriptor, so out-of-range nodes cannot be constructed
//!
//! # Example
//!
//! ```ignore
//! use lod_cut::{run_decision_pass, Action, ActionKind, CutUpdateIndex, DecisionBudget,
//!   IndexConfig, ModelDescriptor, ModelId, ViewerId};
//!
//! let models = vec![ModelDescriptor::new(4, 21).unwrap()];
//! let index = CutUpdateIndex::with_policy(1, &models, IndexConfig::default())?;
//!
//! let (viewer, model) = (ViewerId::new(0), ModelId::new(0));
//! let root = index.node(model, 0)?;
//! index.push_action(Action::new(ActionKind::MustSplit, viewer, model, root, 1.0), true)?;
//!
//! run_decision_pass(&index, DecisionBudget::default())?;
//! assert_eq!(index.current_cut(viewer, model)?.raw_ids(), vec![1, 2, 3, 4]);
//! ```

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used items
pub use config::{DecisionBudget, IndexConfig};
pub use error::CutError;
pub use types::{Action, ActionKind, Decision, ModelId, NodeId, ViewerId};

// Model descriptors and tree navigation
pub mod tree;
pub use tree::{ModelDescriptor, ModelSource, NodeList};

// Action queues with reverse index
pub mod queue;

// Resident cuts and the double buffer
pub mod cut;
pub use cut::{Cut, CutFront};

// Thread-safe orchestrator
pub mod index;
pub use index::{CutUpdateIndex, PolicyChange};

// Reference decision pass
pub mod pass;
pub use pass::{run_decision_pass, PassStats};

// Engine-agnostic counters
pub mod metrics;
pub use metrics::IndexMetrics;
