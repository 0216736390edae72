use super::*;

fn quad21() -> ModelDescriptor {
  ModelDescriptor::new(4, 21).unwrap()
}

fn cut_of(desc: &ModelDescriptor, raw: &[u32]) -> Cut {
  let mut cut = Cut::new();
  for &id in raw {
    cut.commit(desc.node(id).unwrap(), desc);
  }
  cut
}

// =========================================================================
// Batch 1: Basic set behavior
// =========================================================================

/// Empty cut has no residents.
#[test]
fn test_empty_cut() {
  let cut = Cut::new();
  assert!(cut.is_empty());
  assert_eq!(cut.len(), 0);
  assert!(cut.raw_ids().is_empty());
}

/// Disjoint nodes coexist; ids come back ordered.
#[test]
fn test_commit_disjoint() {
  let desc = quad21();
  let cut = cut_of(&desc, &[4, 2, 3, 1]);
  assert_eq!(cut.raw_ids(), vec![1, 2, 3, 4]);
  assert!(cut.is_antichain(&desc));
}

/// Re-committing a resident node is a no-op.
#[test]
fn test_commit_idempotent() {
  let desc = quad21();
  let mut cut = cut_of(&desc, &[1, 2, 3, 4]);
  let evicted = cut.commit(desc.node(2).unwrap(), &desc);
  assert_eq!(evicted, 0);
  assert_eq!(cut.raw_ids(), vec![1, 2, 3, 4]);
}

// =========================================================================
// Batch 2: Antichain enforcement (subdivide / merge effects)
// =========================================================================

/// Committing children evicts their parent (subdivide).
#[test]
fn test_children_evict_parent() {
  let desc = quad21();
  let mut cut = cut_of(&desc, &[0]);
  let root = desc.root().unwrap();
  let evicted = cut.commit_all(&desc.children(root), &desc);
  assert_eq!(evicted, 1);
  assert_eq!(cut.raw_ids(), vec![1, 2, 3, 4]);
}

/// Committing a parent evicts all resident descendants (merge).
#[test]
fn test_parent_evicts_children() {
  let desc = quad21();
  let mut cut = cut_of(&desc, &[1, 9, 10, 11, 12, 3, 4]);
  let evicted = cut.commit(desc.node(2).unwrap(), &desc);
  assert_eq!(evicted, 4);
  assert_eq!(cut.raw_ids(), vec![1, 2, 3, 4]);
}

/// Committing the root collapses everything.
#[test]
fn test_root_evicts_whole_tree() {
  let desc = quad21();
  let mut cut = cut_of(&desc, &[1, 2, 3, 17, 18, 19, 20]);
  cut.commit(desc.root().unwrap(), &desc);
  assert_eq!(cut.raw_ids(), vec![0]);
}

/// Deep descendant and far ancestor are both evicted.
#[test]
fn test_commit_evicts_across_levels() {
  let desc = ModelDescriptor::new(2, 31).unwrap();
  // 0 -> 1 -> 3 -> 7 -> 15
  let mut cut = cut_of(&desc, &[15, 16, 2]);
  cut.commit(desc.node(3).unwrap(), &desc);
  assert_eq!(cut.raw_ids(), vec![2, 3]);
  cut.commit(desc.node(0).unwrap(), &desc);
  assert_eq!(cut.raw_ids(), vec![0]);
}

/// is_antichain detects an ancestor/descendant pair.
#[test]
fn test_is_antichain_detects_violation() {
  let desc = quad21();
  let mut cut = Cut::new();
  cut.nodes.insert(desc.node(2).unwrap());
  cut.nodes.insert(desc.node(10).unwrap());
  assert!(!cut.is_antichain(&desc));
}

/// remove drops one node and leaves siblings alone.
#[test]
fn test_remove_single() {
  let desc = quad21();
  let mut cut = cut_of(&desc, &[1, 2, 3, 4]);
  assert!(cut.remove(desc.node(3).unwrap()));
  assert!(!cut.remove(desc.node(3).unwrap()));
  assert_eq!(cut.raw_ids(), vec![1, 2, 4]);
}
