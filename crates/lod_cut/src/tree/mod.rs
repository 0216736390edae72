//! Model descriptor table and implicit tree navigation.
//!
//! Models are hierarchies of fixed fan-out whose nodes are addressed by dense
//! integer ids. The geometry behind a node is not visible here; only the
//! shape of the tree (fan-out, node count) matters.
//!
//! # Module Structure
//!
//! - [`descriptor`]: `ModelDescriptor` - per-model tree shape and navigation
//! - [`table`]: `ModelSource` (injected registry) and `ModelTable` (snapshot
//!   for one policy generation)

pub mod descriptor;
pub mod table;

// Re-exports
pub use descriptor::{ModelDescriptor, NodeList};
pub use table::{ModelSource, ModelTable};
