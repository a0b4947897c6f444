//! Longest-edge bisection: tree nodes as triangles.
//!
//! Each split bit of a heap index bisects the current triangle across its
//! longest edge (the hypotenuse). Decoding a node composes one 3x3 matrix per
//! path bit; the matrix acts on per-vertex attribute vectors, so the same
//! transform yields positions, texture coordinates or any other attribute.
//!
//! # Domains
//!
//! - [`Domain::Square`]: node 1 is the unit square, nodes 2 and 3 are the two
//!   triangles sharing its diagonal. Depth 1 is the coarsest mesh.
//! - [`Domain::Triangle`]: node 1 is the reference right triangle.
//!
//! # Module Structure
//!
//! - [`matrix`]: quad, bisection and winding matrices
//! - [`geometry`]: triangle decode, attribute decode, point location
//! - [`neighbors`]: same-depth neighbour ids and diamond parents
//! - [`subdivision`]: conforming split and merge against a tree

pub mod geometry;
pub mod matrix;
pub mod neighbors;
pub mod subdivision;

pub use geometry::{
  bounding_node, decode_attributes, decode_triangle, Triangle, REFERENCE_X, REFERENCE_Y,
};
pub use matrix::decode_transform;
pub use neighbors::{decode_diamond_parent, decode_neighbors, edge_neighbor, DiamondParent, NeighborIds};
pub use subdivision::{locate_leaf, merge_node, split_node};

use crate::node::Node;

/// Base mesh the bisection scheme subdivides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Domain {
  /// Unit square covered by two triangles (nodes 2 and 3).
  #[default]
  Square,
  /// Single reference triangle (node 1).
  Triangle,
}

impl Domain {
  /// Depth of the coarsest mesh; nodes at this depth never merge.
  #[inline]
  pub const fn min_depth(self) -> u32 {
    match self {
      Domain::Square => 1,
      Domain::Triangle => 0,
    }
  }

  /// Smallest heap index that is part of the mesh.
  #[inline]
  pub const fn min_node_id(self) -> u64 {
    1u64 << self.min_depth()
  }

  /// Nodes of the coarsest mesh.
  pub fn base_nodes(self) -> impl Iterator<Item = Node> {
    let min = self.min_node_id();
    (min..2 * min).map(Node::from_id)
  }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;
