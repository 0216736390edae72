//! Cut state: the resident frontier per (viewer, model) and its double
//! buffer.
//!
//! # Module Structure
//!
//! - [`set`]: `Cut` - antichain of resident nodes
//! - [`front`]: `CutBuffers` / `CutFront` - current and next tables

pub mod front;
pub mod set;

// Re-exports
pub use front::{CutBuffers, CutFront};
pub use set::Cut;
