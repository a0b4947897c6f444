//! Node - immutable value type identifying a position in the tree.
//!
//! A node is its heap index: the leading 1 bit marks the root and every bit
//! below it is one left (0) / right (1) step. Depth is cached alongside the
//! index so the hot paths never recompute `log2`.

/// Tree node, identified by its heap index.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Node {
  id: u64,
  depth: u32,
}

impl Node {
  /// Index 0, used for "no neighbour".
  pub const NULL: Self = Self { id: 0, depth: 0 };

  /// The root, covering the whole domain.
  pub const ROOT: Self = Self { id: 1, depth: 0 };

  /// Build a node from its heap index.
  #[inline]
  pub const fn from_id(id: u64) -> Self {
    let depth = if id == 0 { 0 } else { 63 - id.leading_zeros() };
    Self { id, depth }
  }

  /// Heap index.
  #[inline]
  pub const fn id(self) -> u64 {
    self.id
  }

  /// Depth below the root (`floor(log2(id))`).
  #[inline]
  pub const fn depth(self) -> u32 {
    self.depth
  }

  #[inline]
  pub const fn is_null(self) -> bool {
    self.id == 0
  }

  #[inline]
  pub const fn is_root(self) -> bool {
    self.id == 1
  }

  /// Whether this node is the right (1) child of its parent.
  #[inline]
  pub const fn is_right_child(self) -> bool {
    self.id & 1 == 1
  }

  /// Parent node. The root's parent is [`Node::NULL`].
  #[inline]
  pub const fn parent(self) -> Self {
    Self {
      id: self.id >> 1,
      depth: self.depth.saturating_sub(1),
    }
  }

  /// Child selected by `bit` (0 = left, 1 = right).
  #[inline]
  pub const fn child(self, bit: u64) -> Self {
    Self {
      id: (self.id << 1) | (bit & 1),
      depth: self.depth + 1,
    }
  }

  #[inline]
  pub const fn left_child(self) -> Self {
    self.child(0)
  }

  #[inline]
  pub const fn right_child(self) -> Self {
    self.child(1)
  }

  /// The other child of this node's parent.
  #[inline]
  pub const fn sibling(self) -> Self {
    Self {
      id: self.id ^ 1,
      depth: self.depth,
    }
  }

  /// Left node of the sibling pair this node belongs to.
  #[inline]
  pub const fn left_sibling(self) -> Self {
    Self {
      id: self.id & !1,
      depth: self.depth,
    }
  }

  /// Right node of the sibling pair this node belongs to.
  #[inline]
  pub const fn right_sibling(self) -> Self {
    Self {
      id: self.id | 1,
      depth: self.depth,
    }
  }

  /// Leftmost descendant at `max_depth`; carries this node's leaf flag.
  #[inline]
  pub const fn ceil(self, max_depth: u32) -> Self {
    let shift = max_depth - self.depth;
    Self {
      id: self.id << shift,
      depth: max_depth,
    }
  }

  /// Path bit at `bit_id` (bit 0 is the last step taken).
  #[inline]
  pub const fn path_bit(self, bit_id: u32) -> u64 {
    (self.id >> bit_id) & 1
  }
}

impl Default for Node {
  fn default() -> Self {
    Self::ROOT
  }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
