//! Error type for tree construction and heap mirroring.

use thiserror::Error;

use crate::constants::{MAX_SUPPORTED_DEPTH, MIN_SUPPORTED_DEPTH};

/// Errors reported by tree construction, reset and heap loading.
///
/// Rejected split/merge requests are not errors; they leave the tree as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CbtError {
  /// Requested uniform depth is deeper than the tree.
  #[error("initial depth {init_depth} exceeds maximum depth {max_depth}")]
  InvalidDepth { init_depth: u32, max_depth: u32 },

  /// Uniform start depth is shallower than the domain's base mesh.
  #[error("initial depth {init_depth} is shallower than the base mesh depth {min_depth}")]
  ShallowInitDepth { init_depth: u32, min_depth: u32 },

  /// Maximum depth outside the supported index width.
  #[error(
    "maximum depth {max_depth} outside supported range {}..={}",
    MIN_SUPPORTED_DEPTH,
    MAX_SUPPORTED_DEPTH
  )]
  DepthOutOfRange { max_depth: u32 },

  /// Heap storage could not be allocated.
  #[error("failed to allocate {bytes} bytes of heap storage")]
  AllocationFailed { bytes: usize },

  /// A mirrored heap buffer does not match the tree layout.
  #[error("heap buffer is {actual} bytes, expected {expected}")]
  HeapSizeMismatch { expected: usize, actual: usize },

  /// A mirrored heap buffer carries no max-depth marker in its first word.
  #[error("heap buffer has no max-depth marker")]
  MissingDepthMarker,

  /// Parallel dispatch needs at least one leaf per workgroup.
  #[error("workgroup size must be non-zero")]
  InvalidWorkgroupSize,
}

/// Result alias for fallible tree operations.
pub type Result<T> = std::result::Result<T, CbtError>;
