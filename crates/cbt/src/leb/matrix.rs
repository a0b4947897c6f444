//! Bisection matrices.
//!
//! Matrices act on a vector holding one attribute for each of a triangle's
//! three vertices `(v0, v1, v2)`, where `v1` is the apex and `v0 v2` the
//! hypotenuse. Row `j` of a matrix gives new vertex `j` as a mix of the old
//! ones. Composition is by left multiplication, one matrix per path bit.

use glam::{Mat3, Vec3};

use super::Domain;
use crate::node::Node;

/// Matrix from rows (glam stores columns).
#[inline]
fn from_rows(r0: [f32; 3], r1: [f32; 3], r2: [f32; 3]) -> Mat3 {
  Mat3::from_cols(Vec3::from(r0), Vec3::from(r1), Vec3::from(r2)).transpose()
}

/// Picks one of the square's two half triangles.
///
/// Bit 1 rotates the lower-left triangle onto the upper-right one, sending
/// the apex to `v0 + v2`.
pub fn quad_matrix(bit: u64) -> Mat3 {
  let b = bit as f32;
  let c = 1.0 - b;
  from_rows([c, 0.0, b], [b, c, b], [b, 0.0, c])
}

/// Bisects across the hypotenuse; bit selects the child.
///
/// Both children get the hypotenuse midpoint as their new apex.
pub fn bisection_matrix(bit: u64) -> Mat3 {
  let b = bit as f32;
  let c = 1.0 - b;
  from_rows([c, b, 0.0], [0.5, 0.0, 0.5], [0.0, c, b])
}

/// Swaps `v0` and `v2` when `bit` is set.
pub fn winding_matrix(bit: u64) -> Mat3 {
  let b = bit as f32;
  let c = 1.0 - b;
  from_rows([c, 0.0, b], [0.0, 1.0, 0.0], [b, 0.0, c])
}

/// Full transform from the reference triangle to `node`.
///
/// Bisection flips orientation at every level, so a final winding matrix
/// keeps every decoded triangle counter-clockwise.
pub fn decode_transform(domain: Domain, node: Node) -> Mat3 {
  let depth = node.depth();
  let (mut matrix, first_split_bit) = match domain {
    Domain::Square => {
      let quad_bit = node.path_bit(depth.saturating_sub(1));
      (quad_matrix(quad_bit), depth.saturating_sub(1))
    }
    Domain::Triangle => (Mat3::IDENTITY, depth),
  };

  for bit_id in (0..first_split_bit).rev() {
    matrix = bisection_matrix(node.path_bit(bit_id)) * matrix;
  }

  let mirror = match domain {
    Domain::Square => u64::from((depth ^ 1) & 1),
    Domain::Triangle => u64::from(depth & 1),
  };
  winding_matrix(mirror) * matrix
}

#[cfg(test)]
#[path = "matrix_test.rs"]
mod matrix_test;
