//! Parallel executor: every current leaf as an independent rayon task.
//!
//! # Phases
//!
//! 1. **Dispatch sizing**: read the root count and size the workgroups
//! 2. **Subdivide**: one task per workgroup, each visiting its leaf ranks;
//!    all mutation is atomic flag setting or clearing
//! 3. **Reduction**: one ordered level pass per depth
//!
//! Returning from the rayon scope is the barrier between phases 2 and 3.

use std::ops::Range;

use rayon::prelude::*;
use tracing::{debug, info_span};
use web_time::Instant;

use super::UpdateReport;
use crate::error::{CbtError, Result};
use crate::node::Node;
use crate::tree::{Cbt, TreeView};

/// Workgroup sizing computed from the current leaf count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DispatchArgs {
  pub leaf_count: u64,
  pub workgroup_size: u32,
  pub workgroup_count: u64,
}

impl DispatchArgs {
  /// Size a dispatch covering `leaf_count` leaves.
  pub fn prepare(leaf_count: u64, workgroup_size: u32) -> Result<Self> {
    if workgroup_size == 0 {
      return Err(CbtError::InvalidWorkgroupSize);
    }
    Ok(Self {
      leaf_count,
      workgroup_size,
      workgroup_count: leaf_count.div_ceil(u64::from(workgroup_size)),
    })
  }

  /// Leaf ranks handled by workgroup `group`. The last group may be short.
  #[inline]
  pub fn ranks(&self, group: u64) -> Range<u64> {
    let size = u64::from(self.workgroup_size);
    let start = (group * size).min(self.leaf_count);
    let end = (start + size).min(self.leaf_count);
    start..end
  }
}

/// Visit every current leaf across the rayon pool, then reduce in parallel.
///
/// The visitor runs concurrently and in no particular order.
pub fn update<F>(tree: &mut Cbt, workgroup_size: u32, visit: F) -> Result<UpdateReport>
where
  F: Fn(&TreeView<'_>, Node) + Sync,
{
  let args = DispatchArgs::prepare(tree.node_count(), workgroup_size)?;

  let subdivide_start = Instant::now();
  {
    let _span = info_span!(
      "subdivide",
      backend = "parallel",
      leaf_count = args.leaf_count,
      workgroups = args.workgroup_count
    )
    .entered();
    tree.mutate(|view| {
      (0..args.workgroup_count).into_par_iter().for_each(|group| {
        for rank in args.ranks(group) {
          visit(view, view.decode_node(rank));
        }
      });
    });
  }
  let subdivide_us = subdivide_start.elapsed().as_micros() as u64;

  let reduction_start = Instant::now();
  {
    let _span = info_span!("sum_reduction", backend = "parallel").entered();
    tree.compute_sum_reduction_parallel();
  }
  let reduction_us = reduction_start.elapsed().as_micros() as u64;

  let report = UpdateReport {
    leaf_count: args.leaf_count,
    subdivide_us,
    reduction_us,
  };
  debug!(?report, leaves_after = tree.node_count(), "parallel update");
  Ok(report)
}

#[cfg(test)]
#[path = "parallel_test.rs"]
mod parallel_test;
