//! Triangle decoding and point location.

use glam::{Vec2, Vec3};

use super::{decode_transform, Domain};
use crate::node::Node;

/// X coordinates of the reference triangle's `(v0, v1, v2)`.
pub const REFERENCE_X: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// Y coordinates of the reference triangle's `(v0, v1, v2)`.
///
/// Together with [`REFERENCE_X`]: `v0 = (0, 1)`, apex `v1 = (0, 0)`,
/// `v2 = (1, 0)`.
pub const REFERENCE_Y: Vec3 = Vec3::new(1.0, 0.0, 0.0);

/// Triangle in domain space. `vertices[1]` is the apex; `vertices[0]` and
/// `vertices[2]` span the hypotenuse. Counter-clockwise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
  pub vertices: [Vec2; 3],
}

impl Triangle {
  pub fn new(v0: Vec2, v1: Vec2, v2: Vec2) -> Self {
    Self {
      vertices: [v0, v1, v2],
    }
  }

  /// Inside-or-on-edge test for a counter-clockwise triangle.
  ///
  /// Each edge's wedge product with the point must be non-negative.
  pub fn contains(&self, point: Vec2) -> bool {
    let [a, b, c] = self.vertices;
    let w1 = (b - a).perp_dot(point - a);
    let w2 = (c - b).perp_dot(point - b);
    let w3 = (a - c).perp_dot(point - c);
    w1 >= 0.0 && w2 >= 0.0 && w3 >= 0.0
  }

  pub fn centroid(&self) -> Vec2 {
    (self.vertices[0] + self.vertices[1] + self.vertices[2]) / 3.0
  }

  /// Signed area; positive for counter-clockwise winding.
  pub fn signed_area(&self) -> f32 {
    let [a, b, c] = self.vertices;
    0.5 * (b - a).perp_dot(c - a)
  }

  /// Midpoint of the hypotenuse, where the next bisection places its apex.
  pub fn hypotenuse_midpoint(&self) -> Vec2 {
    (self.vertices[0] + self.vertices[2]) * 0.5
  }
}

/// Transform per-vertex attributes from the reference triangle to `node`.
///
/// Each entry holds one attribute for all three vertices, e.g. every
/// vertex's x coordinate.
pub fn decode_attributes(domain: Domain, node: Node, attributes: &mut [Vec3]) {
  let matrix = decode_transform(domain, node);
  for attribute in attributes.iter_mut() {
    *attribute = matrix * *attribute;
  }
}

/// Domain-space triangle of `node`.
pub fn decode_triangle(domain: Domain, node: Node) -> Triangle {
  let mut attributes = [REFERENCE_X, REFERENCE_Y];
  decode_attributes(domain, node, &mut attributes);
  let [x, y] = attributes;
  Triangle::new(
    Vec2::new(x.x, y.x),
    Vec2::new(x.y, y.y),
    Vec2::new(x.z, y.z),
  )
}

/// Coarsest-mesh node containing `point`, if any.
pub(crate) fn base_node_containing(domain: Domain, point: Vec2) -> Option<Node> {
  domain
    .base_nodes()
    .find(|&node| decode_triangle(domain, node).contains(point))
}

/// Child of `node` whose triangle contains `point`; the right child when the
/// point sits on the shared edge or numerically outside both.
pub(crate) fn child_containing(domain: Domain, node: Node, point: Vec2) -> Node {
  let left = node.left_child();
  if decode_triangle(domain, left).contains(point) {
    left
  } else {
    node.right_child()
  }
}

/// Node at `depth` whose triangle contains `point`, independent of any tree.
///
/// `None` when the point lies outside the domain or `depth` is shallower
/// than the domain's coarsest mesh.
pub fn bounding_node(domain: Domain, point: Vec2, depth: u32) -> Option<Node> {
  if depth < domain.min_depth() {
    return None;
  }
  let mut node = base_node_containing(domain, point)?;
  while node.depth() < depth {
    node = child_containing(domain, node, point);
  }
  Some(node)
}

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;
