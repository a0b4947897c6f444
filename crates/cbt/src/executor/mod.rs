//! Executors - drive split and merge passes over a tree.
//!
//! A pass visits every current leaf once, applies a policy decision through
//! the conforming LEB operations, and finishes with a sum reduction. Passes
//! alternate split, merge, split... so refinement and coarsening never race
//! within one pass.
//!
//! # Module Structure
//!
//! - [`sequential`]: rank-order loop on the calling thread
//! - [`parallel`]: workgroup dispatch on rayon
//! - [`policy`]: split/merge decision policies

pub mod parallel;
pub mod policy;
pub mod sequential;

pub use parallel::DispatchArgs;
pub use policy::{FnPolicy, SubdivisionPolicy, TargetPolicy};

use tracing::debug;

use crate::config::SubdivisionConfig;
use crate::constants::DEFAULT_WORKGROUP_SIZE;
use crate::error::Result;
use crate::leb::{self, decode_diamond_parent, decode_triangle, Domain};
use crate::node::Node;
use crate::tree::{Cbt, TreeView};

/// Which half of the ping-pong a pass performs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Pass {
  #[default]
  Split,
  Merge,
}

impl Pass {
  /// The pass that follows this one.
  #[inline]
  pub const fn next(self) -> Self {
    match self {
      Pass::Split => Pass::Merge,
      Pass::Merge => Pass::Split,
    }
  }
}

/// Where a pass runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Backend {
  Sequential,
  #[default]
  Parallel,
}

/// Timing and size of one executor update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateReport {
  /// Leaves visited (the count before the pass).
  pub leaf_count: u64,
  pub subdivide_us: u64,
  pub reduction_us: u64,
}

/// Outcome of one [`Subdivider::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PassStats {
  pub pass: Pass,
  pub leaves_before: u64,
  pub leaves_after: u64,
  pub subdivide_us: u64,
  pub reduction_us: u64,
}

impl PassStats {
  /// Signed change in leaf count.
  #[inline]
  pub fn leaf_delta(&self) -> i64 {
    self.leaves_after as i64 - self.leaves_before as i64
  }

  #[inline]
  pub fn total_us(&self) -> u64 {
    self.subdivide_us + self.reduction_us
  }
}

/// Apply one pass's decision to a single leaf.
///
/// Shared by both backends so their per-leaf behaviour cannot drift apart.
pub fn visit_leaf<P>(view: &TreeView<'_>, domain: Domain, pass: Pass, policy: &P, node: Node)
where
  P: SubdivisionPolicy + ?Sized,
{
  match pass {
    Pass::Split => {
      if policy.should_split(&decode_triangle(domain, node)) {
        leb::split_node(view, domain, node);
      }
    }
    Pass::Merge => {
      if node.depth() <= domain.min_depth() {
        return;
      }
      let diamond = decode_diamond_parent(domain, node);
      let base = decode_triangle(domain, diamond.base);
      let top = decode_triangle(domain, diamond.top);
      if policy.should_merge(&base, &top) {
        leb::merge_node(view, domain, node, diamond);
      }
    }
  }
}

/// Owns the ping-pong state and runs passes on the configured backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Subdivider {
  pub domain: Domain,
  pub backend: Backend,
  /// Pass the next [`step`](Self::step) performs.
  pub pass: Pass,
  pub workgroup_size: u32,
}

impl Subdivider {
  pub fn new(domain: Domain, backend: Backend) -> Self {
    Self {
      domain,
      backend,
      pass: Pass::Split,
      workgroup_size: DEFAULT_WORKGROUP_SIZE,
    }
  }

  pub fn from_config(config: &SubdivisionConfig) -> Self {
    Self {
      domain: config.domain,
      backend: config.backend,
      pass: Pass::Split,
      workgroup_size: config.workgroup_size,
    }
  }

  /// Run the current pass, then flip to the other one.
  pub fn step<P>(&mut self, tree: &mut Cbt, policy: &P) -> Result<PassStats>
  where
    P: SubdivisionPolicy + ?Sized,
  {
    let stats = self.run_pass(tree, self.pass, policy)?;
    self.pass = self.pass.next();
    Ok(stats)
  }

  /// Run `pass` without touching the ping-pong state.
  pub fn run_pass<P>(&self, tree: &mut Cbt, pass: Pass, policy: &P) -> Result<PassStats>
  where
    P: SubdivisionPolicy + ?Sized,
  {
    let domain = self.domain;
    let report = match self.backend {
      Backend::Sequential => {
        sequential::update(tree, |view, node| visit_leaf(view, domain, pass, policy, node))
      }
      Backend::Parallel => parallel::update(tree, self.workgroup_size, |view, node| {
        visit_leaf(view, domain, pass, policy, node)
      })?,
    };

    let stats = PassStats {
      pass,
      leaves_before: report.leaf_count,
      leaves_after: tree.node_count(),
      subdivide_us: report.subdivide_us,
      reduction_us: report.reduction_us,
    };
    debug!(
      ?pass,
      backend = ?self.backend,
      leaves_before = stats.leaves_before,
      leaves_after = stats.leaves_after,
      "pass complete"
    );
    Ok(stats)
  }
}

impl Default for Subdivider {
  fn default() -> Self {
    Self::from_config(&SubdivisionConfig::default())
  }
}
