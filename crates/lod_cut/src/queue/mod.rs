//! Priority queues of pending cut transitions.
//!
//! # Module Structure
//!
//! - [`heap`]: `IndexedHeap` - binary max-heap with a reverse index, shared
//!   by all queues
//! - [`slot_map`]: `SlotMap` - key -> heap slots
//! - [`staging`]: `StagingQueue` - unsorted bulk-load collection
//! - [`actions`]: `ActionQueues` - five heaps (one per `ActionKind`) plus
//!   staging

pub mod actions;
pub mod heap;
pub mod slot_map;
pub mod staging;

// Re-exports
pub use actions::ActionQueues;
pub use heap::{HeapEntry, IndexedHeap};
pub use slot_map::SlotMap;
pub use staging::StagingQueue;
