use super::*;

/// Quadtree with two full levels below the root: 1 + 4 + 16 = 21 nodes.
fn quad21() -> ModelDescriptor {
  ModelDescriptor::new(4, 21).unwrap()
}

fn ids(nodes: &[NodeId]) -> Vec<u32> {
  nodes.iter().map(|n| n.raw()).collect()
}

// =========================================================================
// Batch 1: Construction and validation
// =========================================================================

/// A tree needs at least one child slot per node.
#[test]
fn test_zero_fan_out_is_rejected() {
  assert!(ModelDescriptor::new(0, 10).is_none());
  assert!(ModelDescriptor::new(1, 10).is_some());
}

/// Raw ids validate against node_count.
#[test]
fn test_node_validates_range() {
  let desc = quad21();
  assert_eq!(desc.node(0).map(|n| n.raw()), Some(0));
  assert_eq!(desc.node(20).map(|n| n.raw()), Some(20));
  assert!(desc.node(21).is_none());
  assert!(desc.node(u32::MAX).is_none());
}

/// Empty tree has no root.
#[test]
fn test_empty_tree_has_no_root() {
  let desc = ModelDescriptor::new(2, 0).unwrap();
  assert!(desc.root().is_none());
}

// =========================================================================
// Batch 2: Children
// =========================================================================

/// Root's children are 1..=fan_out.
#[test]
fn test_root_children() {
  let desc = quad21();
  let root = desc.root().unwrap();
  assert_eq!(ids(&desc.children(root)), vec![1, 2, 3, 4]);
}

/// child(n, i) = n * fan_out + 1 + i.
#[test]
fn test_child_formula() {
  let desc = quad21();
  let node = desc.node(2).unwrap();
  for i in 0..4 {
    assert_eq!(desc.child(node, i).unwrap().raw(), 2 * 4 + 1 + i);
  }
  assert!(desc.child(node, 4).is_none(), "index past fan_out");
}

/// Last level has no children.
#[test]
fn test_leaves_have_no_children() {
  let desc = quad21();
  for raw in 5..21 {
    let node = desc.node(raw).unwrap();
    assert!(desc.children(node).is_empty(), "node {} should be a leaf", raw);
    assert!(desc.is_leaf(node));
  }
  assert!(!desc.is_leaf(desc.root().unwrap()));
}

/// Incomplete last level yields only the in-range children.
#[test]
fn test_partial_children() {
  let desc = ModelDescriptor::new(4, 7).unwrap();
  let node = desc.node(1).unwrap();
  assert_eq!(ids(&desc.children(node)), vec![5, 6]);
}

/// Child arithmetic does not overflow for ids near u32::MAX.
#[test]
fn test_child_of_large_id_does_not_overflow() {
  let desc = ModelDescriptor::new(16, u32::MAX).unwrap();
  let node = desc.node(u32::MAX - 1).unwrap();
  assert!(desc.child(node, 15).is_none());
}

// =========================================================================
// Batch 3: Parents, siblings, ancestry
// =========================================================================

/// Root has no parent; parent inverts child.
#[test]
fn test_parent_inverts_child() {
  let desc = quad21();
  assert!(desc.parent(desc.root().unwrap()).is_none());
  for raw in 0..5 {
    let node = desc.node(raw).unwrap();
    for child in desc.children(node) {
      assert_eq!(desc.parent(child), Some(node));
    }
  }
}

/// Siblings include the node itself; root has none.
#[test]
fn test_siblings() {
  let desc = quad21();
  let node = desc.node(10).unwrap();
  assert_eq!(ids(&desc.siblings(node)), vec![9, 10, 11, 12]);
  assert!(desc.siblings(desc.root().unwrap()).is_empty());
}

/// Ancestors walk up to the root.
#[test]
fn test_ancestors_and_depth() {
  let desc = quad21();
  let node = desc.node(14).unwrap();
  let chain: Vec<u32> = desc.ancestors(node).map(|n| n.raw()).collect();
  assert_eq!(chain, vec![3, 0]);
  assert_eq!(desc.depth(node), 2);
  assert_eq!(desc.depth(desc.root().unwrap()), 0);
}

/// is_ancestor is strict and follows the tree, not id order.
#[test]
fn test_is_ancestor() {
  let desc = quad21();
  let n = |raw| desc.node(raw).unwrap();
  assert!(desc.is_ancestor(n(0), n(14)));
  assert!(desc.is_ancestor(n(3), n(14)));
  assert!(!desc.is_ancestor(n(2), n(14)), "2 is a smaller id but not above 14");
  assert!(!desc.is_ancestor(n(14), n(14)));
  assert!(!desc.is_ancestor(n(14), n(3)));
}

/// Fan-out 1 degenerates into a chain.
#[test]
fn test_chain_tree() {
  let desc = ModelDescriptor::new(1, 5).unwrap();
  let last = desc.node(4).unwrap();
  assert_eq!(desc.depth(last), 4);
  assert_eq!(ids(&desc.children(desc.node(3).unwrap())), vec![4]);
}

// =========================================================================
// Batch 4: Descendant ranges
// =========================================================================

/// One contiguous range per level, clipped to the tree.
#[test]
fn test_descendant_ranges_of_root() {
  let desc = quad21();
  let ranges: Vec<(u32, u32)> = desc
    .descendant_ranges(desc.root().unwrap())
    .map(|r| (r.start().raw(), r.end().raw()))
    .collect();
  assert_eq!(ranges, vec![(1, 4), (5, 20)]);
}

/// Ranges of an interior node cover exactly its subtree.
#[test]
fn test_descendant_ranges_match_subtree() {
  let desc = ModelDescriptor::new(3, 40).unwrap();
  let node = desc.node(2).unwrap();
  let from_ranges: Vec<u32> = desc
    .descendant_ranges(node)
    .flat_map(|r| r.start().raw()..=r.end().raw())
    .collect();
  let from_walk: Vec<u32> = (0..40)
    .filter(|&raw| desc.is_ancestor(node, desc.node(raw).unwrap()))
    .collect();
  assert_eq!(from_ranges, from_walk);
}

/// Leaves have no descendants.
#[test]
fn test_leaf_has_no_descendant_ranges() {
  let desc = quad21();
  assert_eq!(desc.descendant_ranges(desc.node(20).unwrap()).count(), 0);
}
