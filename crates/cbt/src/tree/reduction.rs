//! Sum reduction: rebuild every internal field from the leaf flags.
//!
//! Levels run from `D - 1` up to the root. Level `d` reads only level `d + 1`,
//! so a level must be fully written before the next begins. The parallel
//! variant schedules each level as one rayon pass; returning from the pass is
//! the barrier.

use rayon::prelude::*;

use super::TreeView;
use crate::constants::PARALLEL_REDUCTION_THRESHOLD;
use crate::node::Node;

/// Node ids of one depth level.
#[inline]
fn level(depth: u32) -> std::ops::Range<u64> {
  (1u64 << depth)..(2u64 << depth)
}

/// Reduce a single level on the calling thread.
pub fn reduce_level(view: &TreeView<'_>, depth: u32) {
  for id in level(depth) {
    view.reduce_node(Node::from_id(id));
  }
}

/// Reduce a single level across the rayon pool.
///
/// Neighbouring fields may share words; the codec writes only each field's
/// own bits atomically, so per-node work needs no coordination.
pub fn reduce_level_parallel(view: &TreeView<'_>, depth: u32) {
  let nodes = level(depth);
  if nodes.end - nodes.start < PARALLEL_REDUCTION_THRESHOLD {
    reduce_level(view, depth);
    return;
  }
  nodes
    .into_par_iter()
    .for_each(|id| view.reduce_node(Node::from_id(id)));
}

/// Full reduction on the calling thread.
pub fn compute_sum_reduction(view: &TreeView<'_>) {
  let _span = tracing::trace_span!("sum_reduction").entered();
  for depth in (0..view.max_depth()).rev() {
    reduce_level(view, depth);
  }
}

/// Full reduction, one ordered parallel pass per level.
pub fn compute_sum_reduction_parallel(view: &TreeView<'_>) {
  let _span = tracing::trace_span!("sum_reduction_parallel").entered();
  for depth in (0..view.max_depth()).rev() {
    reduce_level_parallel(view, depth);
  }
}

#[cfg(test)]
#[path = "reduction_test.rs"]
mod reduction_test;
