//! Cbt - concurrent binary tree over a packed bit heap.
//!
//! The tree owns its heap exclusively. Leaves are recorded as flags at the
//! maximum depth; a sum reduction turns those flags into subtree leaf counts,
//! which is what makes rank/select leaf decoding `O(D)`.
//!
//! # Lifecycle
//!
//! ```text
//! create_at_depth ─► [pass: split/merge via TreeView] ─► compute_sum_reduction
//!        ▲                         │                           │
//!        └──── reset_to_depth ◄────┴───────────────────────────┘
//! ```
//!
//! Leaf decoding is only valid after a reduction. External mirrors export the
//! heap via [`Cbt::heap_bytes`] and write back through
//! [`Cbt::load_heap_bytes`].

pub mod reduction;
pub mod view;

use tracing::debug;

use crate::error::{CbtError, Result};
use crate::heap::{check_depth, BitHeap};
use crate::node::Node;

pub use view::TreeView;

/// Concurrent binary tree.
pub struct Cbt {
  heap: BitHeap,
}

impl Cbt {
  /// Tree of `max_depth` holding only the root as a leaf.
  pub fn new(max_depth: u32) -> Result<Self> {
    Self::create_at_depth(max_depth, 0)
  }

  /// Tree of `max_depth` uniformly subdivided to `init_depth`.
  pub fn create_at_depth(max_depth: u32, init_depth: u32) -> Result<Self> {
    check_depth(max_depth)?;
    if init_depth > max_depth {
      return Err(CbtError::InvalidDepth {
        init_depth,
        max_depth,
      });
    }

    let mut tree = Self {
      heap: BitHeap::new(max_depth)?,
    };
    tree.reset_to_depth(init_depth)?;

    debug!(
      max_depth,
      init_depth,
      heap_bytes = tree.heap_byte_size(),
      "created concurrent binary tree"
    );
    Ok(tree)
  }

  /// Rebuild a tree from a mirrored heap buffer.
  ///
  /// The maximum depth is recovered from the buffer's marker bit. The buffer
  /// is trusted to be reduction-consistent.
  pub fn from_heap_bytes(bytes: &[u8]) -> Result<Self> {
    let heap = BitHeap::from_bytes(bytes)?;
    debug!(
      max_depth = heap.max_depth(),
      bytes = bytes.len(),
      "loaded tree from heap bytes"
    );
    Ok(Self { heap })
  }

  /// Restore the uniform state at `depth` in place.
  pub fn reset_to_depth(&mut self, depth: u32) -> Result<()> {
    let max_depth = self.max_depth();
    if depth > max_depth {
      return Err(CbtError::InvalidDepth {
        init_depth: depth,
        max_depth,
      });
    }

    self.heap.clear();
    for id in (1u64 << depth)..(2u64 << depth) {
      self.heap.set_flag(Node::from_id(id).ceil(max_depth), true);
    }
    self.compute_sum_reduction();

    debug!(depth, leaves = self.node_count(), "reset tree");
    Ok(())
  }

  /// Shared view for one mutation pass.
  #[inline]
  pub(crate) fn view(&self) -> TreeView<'_> {
    TreeView::new(&self.heap)
  }

  /// Run `edit` with a mutating view. The exclusive borrow keeps readers out
  /// for the duration; callers reduce afterwards.
  pub fn mutate<R>(&mut self, edit: impl FnOnce(&TreeView<'_>) -> R) -> R {
    edit(&self.view())
  }

  #[inline]
  pub fn max_depth(&self) -> u32 {
    self.heap.max_depth()
  }

  /// Number of leaves at the last reduction.
  #[inline]
  pub fn node_count(&self) -> u64 {
    self.view().node_count()
  }

  #[inline]
  pub fn heap_read(&self, node: Node) -> u64 {
    self.view().heap_read(node)
  }

  #[inline]
  pub fn is_leaf(&self, node: Node) -> bool {
    self.view().is_leaf(node)
  }

  #[inline]
  pub fn is_ceil(&self, node: Node) -> bool {
    self.view().is_ceil(node)
  }

  /// Heap index of the `leaf_rank`-th leaf.
  #[inline]
  pub fn decode_node(&self, leaf_rank: u64) -> Node {
    self.view().decode_node(leaf_rank)
  }

  /// Leaf rank of a leaf node.
  #[inline]
  pub fn encode_node(&self, node: Node) -> u64 {
    self.view().encode_node(node)
  }

  /// Current leaves, left to right.
  pub fn leaves(&self) -> impl Iterator<Item = Node> + '_ {
    let view = self.view();
    (0..view.node_count()).map(move |rank| view.decode_node(rank))
  }

  /// Split a node. Takes effect on the next reduction.
  pub fn split_node(&mut self, node: Node) {
    self.view().split_node(node);
  }

  /// Merge a node with its sibling. Takes effect on the next reduction.
  pub fn merge_node(&mut self, node: Node) {
    self.view().merge_node(node);
  }

  /// Recompute every internal field on the calling thread.
  pub fn compute_sum_reduction(&mut self) {
    reduction::compute_sum_reduction(&self.view());
  }

  /// Recompute every internal field on the rayon pool.
  pub fn compute_sum_reduction_parallel(&mut self) {
    reduction::compute_sum_reduction_parallel(&self.view());
  }

  /// Leaf flags set at max depth, counted without the reduction.
  pub fn count_leaf_flags(&self) -> u64 {
    self.heap.count_flags()
  }

  #[inline]
  pub fn heap_byte_size(&self) -> usize {
    self.heap.byte_size()
  }

  /// Byte-for-byte image of the packed heap.
  pub fn heap_bytes(&self) -> Vec<u8> {
    self.heap.to_bytes()
  }

  /// Raw heap words.
  pub fn heap_words(&self) -> Vec<u64> {
    self.heap.snapshot()
  }

  /// Overwrite the heap with a mirror of the same depth.
  pub fn load_heap_bytes(&mut self, bytes: &[u8]) -> Result<()> {
    self.heap.copy_from_bytes(bytes)?;
    debug!(bytes = bytes.len(), "synchronised heap from mirror");
    Ok(())
  }
}

impl std::fmt::Debug for Cbt {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Cbt")
      .field("max_depth", &self.max_depth())
      .field("node_count", &self.node_count())
      .field("heap_bytes", &self.heap_byte_size())
      .finish()
  }
}
