//! Model registry seam and the per-generation descriptor table.

use crate::error::CutError;
use crate::types::{ModelId, NodeId};

use super::ModelDescriptor;

/// Supplies per-model tree shapes at policy-update time.
///
/// Implemented by whatever owns the loaded models. The index only reads it
/// while `update_policy` runs and never keeps a reference.
pub trait ModelSource {
  /// Number of models; valid ids are `0..model_count()`.
  fn model_count(&self) -> usize;

  /// Shape of one model.
  fn descriptor(&self, model: ModelId) -> Option<ModelDescriptor>;
}

impl ModelSource for [ModelDescriptor] {
  fn model_count(&self) -> usize {
    self.len()
  }

  fn descriptor(&self, model: ModelId) -> Option<ModelDescriptor> {
    self.get(model.index()).copied()
  }
}

impl ModelSource for Vec<ModelDescriptor> {
  fn model_count(&self) -> usize {
    self.len()
  }

  fn descriptor(&self, model: ModelId) -> Option<ModelDescriptor> {
    self.as_slice().descriptor(model)
  }
}

/// Descriptor snapshot for one policy generation. Replaced wholesale.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModelTable {
  descriptors: Vec<ModelDescriptor>,
}

impl ModelTable {
  /// Copy every descriptor out of `source`.
  pub fn from_source<S: ModelSource + ?Sized>(source: &S) -> Result<Self, CutError> {
    let descriptors = (0..source.model_count())
      .map(|index| {
        let model = ModelId::new(index as u32);
        source.descriptor(model).ok_or(CutError::InvalidDescriptor {
          model,
          reason: "model source has no descriptor for this id",
        })
      })
      .collect::<Result<Vec<_>, _>>()?;
    Ok(Self { descriptors })
  }

  /// Number of models.
  pub fn len(&self) -> usize {
    self.descriptors.len()
  }

  pub fn is_empty(&self) -> bool {
    self.descriptors.is_empty()
  }

  /// Descriptor of `model`.
  pub fn get(&self, model: ModelId) -> Result<&ModelDescriptor, CutError> {
    self
      .descriptors
      .get(model.index())
      .ok_or(CutError::UnknownModel(model))
  }

  /// Validate a raw node id for `model`.
  pub fn resolve(&self, model: ModelId, raw: u32) -> Result<NodeId, CutError> {
    let descriptor = self.get(model)?;
    descriptor.node(raw).ok_or(CutError::NodeOutOfRange {
      model,
      node: raw,
      node_count: descriptor.node_count(),
    })
  }

  /// Check that `node` still addresses a node of `model`.
  ///
  /// Node ids outlive policy generations, so ids issued before an update are
  /// re-validated on every entry point.
  pub fn check(&self, model: ModelId, node: NodeId) -> Result<&ModelDescriptor, CutError> {
    let descriptor = self.get(model)?;
    if descriptor.contains(node) {
      Ok(descriptor)
    } else {
      Err(CutError::NodeOutOfRange {
        model,
        node: node.raw(),
        node_count: descriptor.node_count(),
      })
    }
  }

  /// Iterate `(model, descriptor)` pairs.
  pub fn iter(&self) -> impl Iterator<Item = (ModelId, &ModelDescriptor)> {
    self
      .descriptors
      .iter()
      .enumerate()
      .map(|(index, descriptor)| (ModelId::new(index as u32), descriptor))
  }
}

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;
