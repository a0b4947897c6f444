use glam::Vec2;

use super::*;
use crate::leb::decode_triangle;

const EPSILON: f32 = 1e-6;

fn ids(left: u64, right: u64, edge: u64, node: u64) -> NeighborIds {
  NeighborIds {
    left,
    right,
    edge,
    node,
  }
}

fn shares_edge(a: [Vec2; 2], b: [Vec2; 3]) -> bool {
  a.iter()
    .all(|p| b.iter().any(|q| p.abs_diff_eq(*q, EPSILON)))
}

// =========================================================================
// Decoded ids
// =========================================================================

#[test]
fn test_square_base_neighbors() {
  assert_eq!(decode_neighbors(Domain::Square, Node::from_id(2)), ids(0, 0, 3, 2));
  assert_eq!(decode_neighbors(Domain::Square, Node::from_id(3)), ids(0, 0, 2, 3));
}

#[test]
fn test_square_depth_two_neighbors() {
  assert_eq!(decode_neighbors(Domain::Square, Node::from_id(4)), ids(5, 7, 0, 4));
  assert_eq!(decode_neighbors(Domain::Square, Node::from_id(5)), ids(6, 4, 0, 5));
  assert_eq!(edge_neighbor(Domain::Square, Node::from_id(7)), Node::NULL);
}

#[test]
fn test_triangle_root_has_no_neighbors() {
  assert_eq!(decode_neighbors(Domain::Triangle, Node::ROOT), ids(0, 0, 0, 1));
  assert_eq!(decode_neighbors(Domain::Triangle, Node::from_id(2)), ids(3, 0, 0, 2));
}

/// Decoding always reproduces the node itself in the `node` slot.
#[test]
fn test_node_slot_is_identity() {
  for id in 2..1024u64 {
    assert_eq!(decode_neighbors(Domain::Square, Node::from_id(id)).node, id);
    assert_eq!(decode_neighbors(Domain::Triangle, Node::from_id(id)).node, id);
  }
}

/// Hypotenuse neighbours see each other.
#[test]
fn test_edge_neighbor_is_symmetric() {
  for domain in [Domain::Square, Domain::Triangle] {
    for id in domain.min_node_id()..1 << 11 {
      let node = Node::from_id(id);
      let edge = edge_neighbor(domain, node);
      if !edge.is_null() {
        assert_eq!(edge.depth(), node.depth());
        assert_eq!(edge_neighbor(domain, edge), node, "{domain:?} node {id}");
      }
    }
  }
}

/// Every non-boundary id names a triangle that shares the matching edge.
#[test]
fn test_neighbors_share_geometric_edges() {
  for id in 2..512u64 {
    let node = Node::from_id(id);
    let [v0, v1, v2] = decode_triangle(Domain::Square, node).vertices;
    let neighbors = decode_neighbors(Domain::Square, node);

    if neighbors.edge != 0 {
      let other = decode_triangle(Domain::Square, Node::from_id(neighbors.edge));
      assert!(shares_edge([v0, v2], other.vertices), "node {id}");
    }
    for leg in [neighbors.left, neighbors.right] {
      if leg != 0 {
        let other = decode_triangle(Domain::Square, Node::from_id(leg)).vertices;
        let shared = shares_edge([v0, v1], other) || shares_edge([v1, v2], other);
        assert!(shared, "node {id} / {leg}");
      }
    }
  }
}

// =========================================================================
// Diamond parents
// =========================================================================

#[test]
fn test_interior_diamond() {
  let diamond = decode_diamond_parent(Domain::Square, Node::from_id(4));
  assert_eq!(diamond.base, Node::from_id(2));
  assert_eq!(diamond.top, Node::from_id(3));
  assert!(!diamond.is_boundary());
}

/// A parent on the boundary is its own top.
#[test]
fn test_boundary_diamond() {
  let diamond = decode_diamond_parent(Domain::Square, Node::from_id(14));
  assert_eq!(diamond.base, Node::from_id(7));
  assert_eq!(diamond.top, Node::from_id(7));
  assert!(diamond.is_boundary());

  let diamond = decode_diamond_parent(Domain::Triangle, Node::from_id(3));
  assert_eq!(diamond.base, Node::ROOT);
  assert!(diamond.is_boundary());
}

/// Siblings share a diamond.
#[test]
fn test_siblings_share_diamond() {
  for id in (4..512u64).step_by(2) {
    let left = decode_diamond_parent(Domain::Square, Node::from_id(id));
    let right = decode_diamond_parent(Domain::Square, Node::from_id(id + 1));
    assert_eq!(left, right);
  }
}
