use super::*;
use crate::tree::ModelDescriptor;

fn quad21() -> ModelDescriptor {
  ModelDescriptor::new(4, 21).unwrap()
}

const V0: ViewerId = ViewerId::new(0);
const M0: ModelId = ModelId::new(0);

fn write_next(buffers: &mut CutBuffers, raw: &[u32]) {
  let desc = quad21();
  let cut = buffers.next_mut(V0, M0).unwrap();
  for &id in raw {
    cut.commit(desc.node(id).unwrap(), &desc);
  }
}

// =========================================================================
// Batch 1: Front selection
// =========================================================================

#[test]
fn test_front_flip() {
  assert_eq!(CutFront::A.other(), CutFront::B);
  assert_eq!(CutFront::B.other(), CutFront::A);
  assert_eq!(CutFront::default(), CutFront::A);
}

/// Writes to next are invisible until swap.
#[test]
fn test_next_hidden_until_swap() {
  let mut buffers = CutBuffers::new(1, 1, true);
  write_next(&mut buffers, &[1, 2]);
  assert!(buffers.current(V0, M0).unwrap().is_empty());
  assert_eq!(buffers.next(V0, M0).unwrap().raw_ids(), vec![1, 2]);

  buffers.swap();
  assert_eq!(buffers.current_front(), CutFront::B);
  assert_eq!(buffers.current(V0, M0).unwrap().raw_ids(), vec![1, 2]);
}

/// Out-of-range pairs are absent.
#[test]
fn test_unknown_pair() {
  let mut buffers = CutBuffers::new(1, 1, true);
  assert!(buffers.current(ViewerId::new(1), M0).is_none());
  assert!(buffers.next_mut(V0, ModelId::new(1)).is_none());
  assert!(!buffers.reset_current(ViewerId::new(3), M0));
}

// =========================================================================
// Batch 2: Carry forward vs rebuild
// =========================================================================

/// With carry forward the new next cut starts as the published one.
#[test]
fn test_carry_forward_seeds_next() {
  let mut buffers = CutBuffers::new(1, 1, true);
  write_next(&mut buffers, &[1, 2, 3, 4]);
  buffers.swap();
  assert_eq!(buffers.next(V0, M0).unwrap().raw_ids(), vec![1, 2, 3, 4]);

  // Editing next does not leak into current.
  write_next(&mut buffers, &[0]);
  assert_eq!(buffers.current(V0, M0).unwrap().raw_ids(), vec![1, 2, 3, 4]);
  assert_eq!(buffers.next(V0, M0).unwrap().raw_ids(), vec![0]);
}

/// Without carry forward the next cut starts empty.
#[test]
fn test_rebuild_starts_empty() {
  let mut buffers = CutBuffers::new(1, 1, false);
  write_next(&mut buffers, &[1, 2, 3, 4]);
  buffers.swap();
  assert!(buffers.next(V0, M0).unwrap().is_empty());
  assert_eq!(buffers.current(V0, M0).unwrap().len(), 4);
}

/// previous() is the cut that was current before the last swap.
#[test]
fn test_previous_cut() {
  for carry_forward in [true, false] {
    let mut buffers = CutBuffers::new(1, 1, carry_forward);
    write_next(&mut buffers, &[0]);
    buffers.swap();
    if !carry_forward {
      write_next(&mut buffers, &[0]);
    }
    write_next(&mut buffers, &[1, 2, 3, 4]);
    buffers.swap();
    assert_eq!(buffers.previous(V0, M0).unwrap().raw_ids(), vec![0]);
    assert_eq!(buffers.current(V0, M0).unwrap().raw_ids(), vec![1, 2, 3, 4]);
  }
}

// =========================================================================
// Batch 3: Snapshots and resets
// =========================================================================

/// A snapshot taken before a reset keeps its content.
#[test]
fn test_snapshot_survives_reset() {
  let mut buffers = CutBuffers::new(1, 1, true);
  write_next(&mut buffers, &[1, 2]);
  buffers.swap();
  let snapshot = Arc::clone(buffers.current(V0, M0).unwrap());
  assert!(buffers.reset_current(V0, M0));
  assert!(buffers.current(V0, M0).unwrap().is_empty());
  assert_eq!(snapshot.raw_ids(), vec![1, 2]);
}

#[test]
fn test_reset_next() {
  let mut buffers = CutBuffers::new(1, 1, true);
  write_next(&mut buffers, &[3]);
  assert!(buffers.reset_next(V0, M0));
  assert!(buffers.next(V0, M0).unwrap().is_empty());
}

/// Growing viewers keeps existing cuts; cold resize drops them.
#[test]
fn test_viewer_growth_and_resize() {
  let mut buffers = CutBuffers::new(1, 2, true);
  write_next(&mut buffers, &[2]);
  buffers.swap();

  buffers.set_viewer_count(3);
  assert_eq!(buffers.viewer_count(), 3);
  assert_eq!(buffers.current(V0, M0).unwrap().raw_ids(), vec![2]);
  assert!(buffers.current(ViewerId::new(2), ModelId::new(1)).unwrap().is_empty());
  assert!(buffers.previous(ViewerId::new(2), M0).is_some());

  buffers.set_viewer_count(1);
  assert!(buffers.current(ViewerId::new(1), M0).is_none());

  buffers.resize(2, 1);
  assert_eq!(buffers.model_count(), 1);
  assert!(buffers.current(V0, M0).unwrap().is_empty());
  assert_eq!(buffers.iter_front(CutFront::A).count(), 2);
}
