//! SubdivisionConfig - tree shape and executor settings in one place.

use crate::constants::{DEFAULT_INIT_DEPTH, DEFAULT_MAX_DEPTH, DEFAULT_WORKGROUP_SIZE};
use crate::error::{CbtError, Result};
use crate::executor::{Backend, Subdivider};
use crate::heap::check_depth;
use crate::leb::Domain;
use crate::tree::Cbt;

/// Configuration for building a tree and driving its passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubdivisionConfig {
  /// Deepest level a leaf may reach. Fixed for the tree's lifetime.
  pub max_depth: u32,

  /// Uniform depth the tree starts at (and resets to).
  pub init_depth: u32,

  /// Base mesh being subdivided.
  pub domain: Domain,

  pub backend: Backend,

  /// Leaves per parallel workgroup.
  pub workgroup_size: u32,
}

impl SubdivisionConfig {
  /// Check every field against the tree and dispatch limits.
  pub fn validate(&self) -> Result<()> {
    check_depth(self.max_depth)?;
    if self.init_depth > self.max_depth {
      return Err(CbtError::InvalidDepth {
        init_depth: self.init_depth,
        max_depth: self.max_depth,
      });
    }
    if self.init_depth < self.domain.min_depth() {
      return Err(CbtError::ShallowInitDepth {
        init_depth: self.init_depth,
        min_depth: self.domain.min_depth(),
      });
    }
    if self.workgroup_size == 0 {
      return Err(CbtError::InvalidWorkgroupSize);
    }
    Ok(())
  }

  /// Validated tree at `init_depth`.
  pub fn create_tree(&self) -> Result<Cbt> {
    self.validate()?;
    Cbt::create_at_depth(self.max_depth, self.init_depth)
  }

  /// Subdivider starting on a split pass.
  pub fn subdivider(&self) -> Subdivider {
    Subdivider::from_config(self)
  }
}

impl Default for SubdivisionConfig {
  fn default() -> Self {
    Self {
      max_depth: DEFAULT_MAX_DEPTH,
      init_depth: DEFAULT_INIT_DEPTH,
      domain: Domain::Square,
      backend: Backend::Parallel,
      workgroup_size: DEFAULT_WORKGROUP_SIZE,
    }
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
