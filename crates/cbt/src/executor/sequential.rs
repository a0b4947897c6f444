//! Sequential executor: one leaf at a time on the calling thread.
//!
//! Each leaf is decoded against the counts of the previous reduction and
//! handed to the visitor, which may split or merge through the view straight
//! away. The pass ends with one full reduction.

use tracing::{debug, info_span};
use web_time::Instant;

use super::UpdateReport;
use crate::node::Node;
use crate::tree::{Cbt, TreeView};

/// Visit every current leaf in rank order, then reduce.
pub fn update<F>(tree: &mut Cbt, mut visit: F) -> UpdateReport
where
  F: FnMut(&TreeView<'_>, Node),
{
  let leaf_count = tree.node_count();

  let subdivide_start = Instant::now();
  {
    let _span = info_span!("subdivide", backend = "sequential", leaf_count).entered();
    tree.mutate(|view| {
      for rank in 0..leaf_count {
        let node = view.decode_node(rank);
        visit(view, node);
      }
    });
  }
  let subdivide_us = subdivide_start.elapsed().as_micros() as u64;

  let reduction_start = Instant::now();
  {
    let _span = info_span!("sum_reduction", backend = "sequential").entered();
    tree.compute_sum_reduction();
  }
  let reduction_us = reduction_start.elapsed().as_micros() as u64;

  let report = UpdateReport {
    leaf_count,
    subdivide_us,
    reduction_us,
  };
  debug!(?report, leaves_after = tree.node_count(), "sequential update");
  report
}
