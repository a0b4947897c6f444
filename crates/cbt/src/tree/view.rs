//! TreeView - shared handle through which passes read and mutate the heap.
//!
//! Every split/merge/decode primitive lives here exactly once. Both executors
//! hand the same view type to their callbacks; they differ only in how they
//! enumerate leaves and where they place barriers.
//!
//! Mutation through a shared reference is sound because the heap words are
//! atomics. A view is only obtainable while the owning [`Cbt`](super::Cbt) is
//! mutably borrowed, so readers outside a pass never observe one in flight.

use tracing::trace;

use crate::heap::BitHeap;
use crate::node::Node;

/// Shared, randomly-accessible view of a tree's packed heap.
#[derive(Clone, Copy)]
pub struct TreeView<'a> {
  heap: &'a BitHeap,
}

impl<'a> TreeView<'a> {
  pub(crate) fn new(heap: &'a BitHeap) -> Self {
    Self { heap }
  }

  #[inline]
  pub fn max_depth(&self) -> u32 {
    self.heap.max_depth()
  }

  /// Leaf count recorded at the root by the last reduction.
  #[inline]
  pub fn node_count(&self) -> u64 {
    self.heap.get_field(Node::ROOT)
  }

  /// Raw field of a node: its subtree leaf count (or flag at max depth).
  #[inline]
  pub fn heap_read(&self, node: Node) -> u64 {
    self.heap.get_field(node)
  }

  /// A node whose subtree holds exactly one leaf flag.
  ///
  /// For a node reached by [`decode_node`](Self::decode_node) this means the
  /// node is itself the leaf.
  #[inline]
  pub fn is_leaf(&self, node: Node) -> bool {
    self.heap_read(node) == 1
  }

  /// Node at the maximum depth; it cannot be split.
  #[inline]
  pub fn is_ceil(&self, node: Node) -> bool {
    node.depth() == self.max_depth()
  }

  /// Heap index of the `leaf_rank`-th leaf, counting left to right.
  ///
  /// Requires a reduction since the last structural change above the pass's
  /// own flags; `leaf_rank` must be below [`node_count`](Self::node_count).
  pub fn decode_node(&self, leaf_rank: u64) -> Node {
    debug_assert!(
      leaf_rank < self.node_count(),
      "leaf rank {} out of {} leaves",
      leaf_rank,
      self.node_count()
    );
    let mut node = Node::ROOT;
    let mut rank = leaf_rank;

    while self.heap_read(node) > 1 {
      let left_count = self.heap_read(node.left_child());
      let bit = u64::from(rank >= left_count);
      node = node.child(bit);
      rank -= left_count * bit;
    }

    node
  }

  /// Leaf rank of `node`; inverse of [`decode_node`](Self::decode_node).
  pub fn encode_node(&self, node: Node) -> u64 {
    let mut rank = 0;
    let mut current = node;

    while current.id() > 1 {
      if current.is_right_child() {
        rank += self.heap_read(current.left_sibling());
      }
      current = current.parent();
    }

    rank
  }

  /// Turn `node` into an internal node with two leaf children.
  ///
  /// The left child shares the node's flag, so only the right child's flag is
  /// set. Idempotent. No-op at max depth.
  #[inline]
  pub fn split_node(&self, node: Node) {
    if self.is_ceil(node) {
      trace!(node = node.id(), "split rejected at max depth");
      return;
    }
    self
      .heap
      .set_flag(node.right_child().ceil(self.max_depth()), true);
  }

  /// Collapse `node` and its sibling into their parent.
  ///
  /// Clears the right sibling's flag. No-op for the root, or unless both
  /// siblings are leaves.
  #[inline]
  pub fn merge_node(&self, node: Node) {
    if node.is_root() {
      trace!("merge rejected at root");
      return;
    }
    if !self.is_leaf(node) || !self.is_leaf(node.sibling()) {
      trace!(node = node.id(), "merge rejected, sibling pair is not two leaves");
      return;
    }
    self
      .heap
      .set_flag(node.right_sibling().ceil(self.max_depth()), false);
  }

  /// Recompute one internal field from its children.
  #[inline]
  pub(crate) fn reduce_node(&self, node: Node) {
    let sum = self.heap_read(node.left_child()) + self.heap_read(node.right_child());
    self.heap.set_field(node, sum);
  }
}
