use super::*;
use crate::tree::Cbt;

/// Builds an irregular tree large enough to cross the parallel threshold.
fn irregular_tree(max_depth: u32) -> Cbt {
  let mut tree = Cbt::create_at_depth(max_depth, 4).unwrap();
  let mut id = 16u64;
  while Node::from_id(id).depth() < max_depth {
    tree.split_node(Node::from_id(id));
    tree.split_node(Node::from_id(id ^ 1));
    id = id * 2 + 1;
  }
  tree.compute_sum_reduction();
  tree
}

#[test]
fn test_parallel_matches_sequential() {
  let mut sequential = irregular_tree(16);
  let mut parallel = irregular_tree(16);

  // Reduce again from the same flags both ways.
  sequential.compute_sum_reduction();
  parallel.compute_sum_reduction_parallel();
  assert_eq!(sequential.heap_words(), parallel.heap_words());
}

/// Every internal field equals the sum of its children after a reduction.
#[test]
fn test_internal_fields_are_child_sums() {
  let tree = irregular_tree(10);
  for id in 1..(1u64 << 10) {
    let node = Node::from_id(id);
    assert_eq!(
      tree.heap_read(node),
      tree.heap_read(node.left_child()) + tree.heap_read(node.right_child()),
      "node {}",
      id
    );
  }
}

/// A single reduced level only depends on the level below it.
#[test]
fn test_level_by_level_reaches_root() {
  let mut tree = Cbt::create_at_depth(6, 6).unwrap();
  tree.mutate(|view| {
    for depth in (0..6).rev() {
      reduce_level(view, depth);
      let first = Node::from_id(1 << depth);
      assert_eq!(view.heap_read(first), 1 << (6 - depth));
    }
  });
  assert_eq!(tree.node_count(), 64);
}

/// Stale fields are overwritten, not accumulated.
#[test]
fn test_reduction_is_idempotent() {
  let mut tree = irregular_tree(8);
  let before = tree.heap_words();
  tree.compute_sum_reduction();
  tree.compute_sum_reduction_parallel();
  assert_eq!(tree.heap_words(), before);
}
