//! cbt - Concurrent binary tree with longest-edge-bisection subdivision
//!
//! A complete binary tree of fixed maximum depth packed into a flat bit heap.
//! Leaves split and merge in passes where every leaf is an independent
//! worker; a sum reduction afterwards turns leaf flags back into subtree
//! counts so leaves can be enumerated by rank in `O(D)`.
//!
//! # Features
//!
//! - **Bit heap**: per-node fields of `D - d + 1` bits, atomically writable
//!   by concurrent workers without clobbering neighbours
//! - **Sum reduction**: level-ordered, sequential or rayon-parallel
//! - **LEB codec**: heap index to triangle, same-depth neighbours, diamond
//!   parents, conforming split and merge
//! - **Executors**: sequential and parallel passes driven by a
//!   [`SubdivisionPolicy`], with explicit split/merge ping-pong state
//!
//! # Example
//!
//! ```ignore
//! use cbt::{Cbt, Subdivider, TargetPolicy, Domain, Backend};
//! use glam::Vec2;
//!
//! let mut tree = Cbt::create_at_depth(16, 1)?;
//! let mut subdivider = Subdivider::new(Domain::Square, Backend::Parallel);
//! let policy = TargetPolicy::new(Vec2::new(0.3, 0.7));
//!
//! for _ in 0..64 {
//!     subdivider.step(&mut tree, &policy)?;
//! }
//!
//! for leaf in tree.leaves() {
//!     let triangle = cbt::leb::decode_triangle(Domain::Square, leaf);
//!     // draw triangle.vertices...
//! }
//! ```

pub mod constants;
pub mod error;
pub mod node;

pub use error::{CbtError, Result};
pub use node::Node;

// Packed storage and field codec
pub mod heap;
pub use heap::BitHeap;

// Tree, shared pass view and sum reduction
pub mod tree;
pub use tree::{Cbt, TreeView};

// Longest-edge bisection codec
pub mod leb;
pub use leb::{DiamondParent, Domain, NeighborIds, Triangle};

// Sequential and parallel executors
pub mod executor;
pub use executor::{
  Backend, DispatchArgs, FnPolicy, Pass, PassStats, Subdivider, SubdivisionPolicy, TargetPolicy,
};

pub mod config;
pub use config::SubdivisionConfig;

// Engine-agnostic subdivision statistics
pub mod metrics;
