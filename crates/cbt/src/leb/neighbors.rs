//! Same-depth neighbours and diamond parents.
//!
//! A node's three edges each border at most one node of the same depth. The
//! ids are refined one path bit at a time from the coarsest mesh, where the
//! square's two halves see each other across the diagonal. Id 0 marks a
//! boundary edge.

use super::Domain;
use crate::node::Node;

/// Neighbour ids of `node` at its own depth.
///
/// `left` and `right` border the two legs meeting at the apex; `edge` borders
/// the hypotenuse `v0 v2`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NeighborIds {
  pub left: u64,
  pub right: u64,
  pub edge: u64,
  pub node: u64,
}

impl NeighborIds {
  /// Neighbour ids one level down, following path bit `bit`.
  #[inline]
  fn split(self, bit: u64) -> Self {
    let Self {
      left,
      right,
      edge,
      node,
    } = self;
    if bit == 0 {
      Self {
        left: (node << 1) | 1,
        right: (edge << 1) | u64::from(edge != 0),
        edge: (right << 1) | u64::from(right != 0),
        node: node << 1,
      }
    } else {
      Self {
        left: edge << 1,
        right: node << 1,
        edge: left << 1,
        node: (node << 1) | 1,
      }
    }
  }
}

/// Same-depth neighbours of `node`.
pub fn decode_neighbors(domain: Domain, node: Node) -> NeighborIds {
  let depth = node.depth();
  let (mut ids, first_split_bit) = match domain {
    Domain::Square if depth >= 1 => {
      let b = node.path_bit(depth - 1);
      (
        NeighborIds {
          left: 0,
          right: 0,
          edge: 3 - b,
          node: 2 + b,
        },
        depth - 1,
      )
    }
    _ => (
      NeighborIds {
        node: 1,
        ..NeighborIds::default()
      },
      depth,
    ),
  };

  for bit_id in (0..first_split_bit).rev() {
    ids = ids.split(node.path_bit(bit_id));
  }
  ids
}

/// Node across the hypotenuse of `node`; [`Node::NULL`] on a boundary.
#[inline]
pub fn edge_neighbor(domain: Domain, node: Node) -> Node {
  Node::from_id(decode_neighbors(domain, node).edge)
}

/// The two triangles that merge together with a node and its sibling.
///
/// `base` is the node's parent; `top` shares the base's hypotenuse, or is the
/// base itself on a boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DiamondParent {
  pub base: Node,
  pub top: Node,
}

impl DiamondParent {
  /// A diamond cut by the domain boundary has only one half.
  #[inline]
  pub fn is_boundary(&self) -> bool {
    self.base == self.top
  }
}

pub fn decode_diamond_parent(domain: Domain, node: Node) -> DiamondParent {
  let base = node.parent();
  let top = edge_neighbor(domain, base);
  DiamondParent {
    base,
    top: if top.is_null() { base } else { top },
  }
}

#[cfg(test)]
#[path = "neighbors_test.rs"]
mod neighbors_test;
