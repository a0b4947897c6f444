//! Conforming split and merge.
//!
//! A bisection mesh stays conforming (no T-junctions) when every triangle's
//! hypotenuse neighbour is at most one level coarser. Splitting a node
//! therefore walks the chain of edge neighbours, splitting each in turn until
//! it hits a boundary or a neighbour that already matches. Merging works on
//! diamonds: the four triangles around a shared hypotenuse collapse into
//! their two parents together, or not at all.

use glam::Vec2;
use tracing::trace;

use super::geometry::{base_node_containing, child_containing};
use super::neighbors::{edge_neighbor, DiamondParent};
use super::Domain;
use crate::node::Node;
use crate::tree::TreeView;

/// Split `node` and every node needed to keep the mesh conforming.
///
/// Idempotent on an already-conforming mesh. No-op at max depth.
pub fn split_node(view: &TreeView<'_>, domain: Domain, node: Node) {
  if view.is_ceil(node) {
    trace!(node = node.id(), "conforming split rejected at max depth");
    return;
  }

  let min_id = domain.min_node_id();
  view.split_node(node);
  let mut current = edge_neighbor(domain, node);

  while current.id() >= min_id {
    view.split_node(current);
    current = current.parent();
    if current.id() < min_id {
      break;
    }
    view.split_node(current);
    current = edge_neighbor(domain, current);
  }
}

/// Merge the diamond around `node`, given its [`DiamondParent`].
///
/// The node, its sibling and both children of `diamond.top` must be leaves.
/// Nodes on the coarsest mesh never merge.
pub fn merge_node(view: &TreeView<'_>, domain: Domain, node: Node, diamond: DiamondParent) {
  if node.depth() <= domain.min_depth() {
    trace!(node = node.id(), "conforming merge rejected at base mesh");
    return;
  }
  if !view.is_leaf(node) {
    trace!(node = node.id(), "conforming merge rejected, node is not a leaf");
    return;
  }

  let dual = diamond.top.right_child();
  let mergeable =
    view.is_leaf(node.sibling()) && view.is_leaf(dual) && view.is_leaf(dual.sibling());
  if !mergeable {
    trace!(node = node.id(), dual = dual.id(), "conforming merge rejected, diamond not uniform");
    return;
  }

  view.merge_node(node);
  view.merge_node(dual);
}

/// Leaf whose triangle contains `point`; `None` outside the domain.
///
/// Descends geometrically from the root, so it relies on the counts of the
/// last reduction.
pub fn locate_leaf(view: &TreeView<'_>, domain: Domain, point: Vec2) -> Option<Node> {
  base_node_containing(domain, point)?;

  let mut node = Node::ROOT;
  while view.heap_read(node) > 1 {
    node = child_containing(domain, node, point);
  }
  Some(node)
}

#[cfg(test)]
#[path = "subdivision_test.rs"]
mod subdivision_test;
