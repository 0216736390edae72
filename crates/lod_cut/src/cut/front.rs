//! CutBuffers - double-buffered cut tables.
//!
//! Two physical tables of `[viewer][model] -> Cut` exist. One is *current*
//! (read by the renderer), the other is *next* (written by decisions).
//! Swapping flips the selector; no cut is copied. A third table keeps the
//! cuts that were current before the last swap.
//!
//! Cuts are held in `Arc`s. Readers get a cheap snapshot; writers go through
//! `Arc::make_mut`, so a snapshot handed out earlier never changes under its
//! reader.

use std::sync::Arc;

use super::Cut;
use crate::types::{ModelId, ViewerId};

/// Which physical table is current.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum CutFront {
  #[default]
  A,
  B,
}

impl CutFront {
  /// The other table.
  #[inline]
  pub fn other(self) -> Self {
    match self {
      CutFront::A => CutFront::B,
      CutFront::B => CutFront::A,
    }
  }

  #[inline]
  fn slot(self) -> usize {
    match self {
      CutFront::A => 0,
      CutFront::B => 1,
    }
  }
}

/// `[viewer][model]` table of shared cuts.
type CutTable = Vec<Vec<Arc<Cut>>>;

fn empty_table(viewers: usize, models: usize) -> CutTable {
  (0..viewers).map(|_| empty_row(models)).collect()
}

fn empty_row(models: usize) -> Vec<Arc<Cut>> {
  (0..models).map(|_| Arc::default()).collect()
}

/// Start a cut over from nothing without disturbing outstanding snapshots.
fn clear_shared(cut: &mut Arc<Cut>) {
  match Arc::get_mut(cut) {
    Some(owned) => owned.clear(),
    None => *cut = Arc::default(),
  }
}

/// Front A / front B cut tables plus the current-front selector.
#[derive(Clone, Debug)]
pub struct CutBuffers {
  fronts: [CutTable; 2],
  retired: CutTable,
  current: CutFront,
  models: usize,
  carry_forward: bool,
}

impl CutBuffers {
  /// Empty cuts for every `(viewer, model)` pair in both fronts.
  ///
  /// With `carry_forward`, each swap seeds the new next table with the cuts
  /// that just became current, so a decision pass only records changes.
  /// Without it, the next table starts empty and every pass rebuilds it.
  pub fn new(viewers: usize, models: usize, carry_forward: bool) -> Self {
    Self {
      fronts: [empty_table(viewers, models), empty_table(viewers, models)],
      retired: empty_table(viewers, models),
      current: CutFront::default(),
      models,
      carry_forward,
    }
  }

  pub fn current_front(&self) -> CutFront {
    self.current
  }

  pub fn viewer_count(&self) -> usize {
    self.fronts[0].len()
  }

  pub fn model_count(&self) -> usize {
    self.models
  }

  fn cell(&self, front: CutFront, viewer: ViewerId, model: ModelId) -> Option<&Arc<Cut>> {
    self.fronts[front.slot()]
      .get(viewer.index())?
      .get(model.index())
  }

  fn cell_mut(&mut self, front: CutFront, viewer: ViewerId, model: ModelId) -> Option<&mut Arc<Cut>> {
    self.fronts[front.slot()]
      .get_mut(viewer.index())?
      .get_mut(model.index())
  }

  /// Cut visible to consumers.
  pub fn current(&self, viewer: ViewerId, model: ModelId) -> Option<&Arc<Cut>> {
    self.cell(self.current, viewer, model)
  }

  /// Cut that was current before the last swap.
  pub fn previous(&self, viewer: ViewerId, model: ModelId) -> Option<&Arc<Cut>> {
    self.retired.get(viewer.index())?.get(model.index())
  }

  /// Cut being built by the running decision pass.
  pub fn next(&self, viewer: ViewerId, model: ModelId) -> Option<&Arc<Cut>> {
    self.cell(self.current.other(), viewer, model)
  }

  /// Writable next cut. Clones the set only if a snapshot is outstanding.
  pub fn next_mut(&mut self, viewer: ViewerId, model: ModelId) -> Option<&mut Cut> {
    let next = self.current.other();
    self.cell_mut(next, viewer, model).map(Arc::make_mut)
  }

  /// Clear the current cut of one pair.
  pub fn reset_current(&mut self, viewer: ViewerId, model: ModelId) -> bool {
    let current = self.current;
    self.cell_mut(current, viewer, model).map(clear_shared).is_some()
  }

  /// Clear the next cut of one pair.
  pub fn reset_next(&mut self, viewer: ViewerId, model: ModelId) -> bool {
    let next = self.current.other();
    self.cell_mut(next, viewer, model).map(clear_shared).is_some()
  }

  /// Publish the next table and prepare a fresh one.
  pub fn swap(&mut self) {
    for (retired_row, current_row) in self.retired.iter_mut().zip(&self.fronts[self.current.slot()]) {
      retired_row.clone_from_slice(current_row);
    }

    self.current = self.current.other();
    let carry_forward = self.carry_forward;

    let [front_a, front_b] = &mut self.fronts;
    let (published, next) = match self.current {
      CutFront::A => (&*front_a, front_b),
      CutFront::B => (&*front_b, front_a),
    };

    for (published_row, next_row) in published.iter().zip(next.iter_mut()) {
      for (published_cut, next_cut) in published_row.iter().zip(next_row.iter_mut()) {
        if carry_forward {
          *next_cut = Arc::clone(published_cut);
        } else {
          clear_shared(next_cut);
        }
      }
    }
  }

  /// Cold reset: both fronts become empty `viewers x models` tables.
  pub fn resize(&mut self, viewers: usize, models: usize) {
    self.fronts = [empty_table(viewers, models), empty_table(viewers, models)];
    self.retired = empty_table(viewers, models);
    self.models = models;
  }

  /// Grow or shrink the viewer dimension, keeping surviving viewers' cuts.
  pub fn set_viewer_count(&mut self, viewers: usize) {
    let models = self.models;
    for table in self.fronts.iter_mut().chain([&mut self.retired]) {
      table.resize_with(viewers, || empty_row(models));
    }
  }

  /// Every cut of one front as `(viewer, model, cut)`.
  pub fn iter_front(&self, front: CutFront) -> impl Iterator<Item = (ViewerId, ModelId, &Cut)> {
    self.fronts[front.slot()]
      .iter()
      .enumerate()
      .flat_map(|(viewer, row)| {
        row.iter().enumerate().map(move |(model, cut)| {
          (
            ViewerId::new(viewer as u32),
            ModelId::new(model as u32),
            cut.as_ref(),
          )
        })
      })
  }
}

#[cfg(test)]
#[path = "front_test.rs"]
mod front_test;
