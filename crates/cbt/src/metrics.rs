//! Subdivision statistics: leaf distribution, heap size and pass timings.
//!
//! Compiled in with the `metrics` feature and toggled at runtime through
//! [`COLLECT_METRICS`]. Without the feature every recorder is a no-op.
//!
//! # Usage
//!
//! ```ignore
//! use cbt::metrics::{SubdivisionMetrics, COLLECT_METRICS};
//!
//! let stats = subdivider.step(&mut tree, &policy)?;
//! metrics.record_pass(&stats);
//! metrics.update_from_tree(&tree);
//! ```

use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;

use crate::constants::MAX_SUPPORTED_DEPTH;
use crate::executor::{Pass, PassStats};
use crate::tree::Cbt;

/// Runtime switch for metrics collection.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Metrics are compiled in and switched on.
#[inline]
pub fn is_enabled() -> bool {
    #[cfg(feature = "metrics")]
    {
        COLLECT_METRICS.load(Ordering::Relaxed)
    }
    #[cfg(not(feature = "metrics"))]
    {
        false
    }
}

/// Fixed-capacity history of recent samples, oldest first.
#[derive(Debug, Clone)]
pub struct RollingWindow {
    samples: VecDeque<u64>,
    capacity: usize,
}

impl RollingWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, dropping the oldest once full.
    pub fn push(&mut self, sample: u64) {
        if self.capacity == 0 {
            return;
        }
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn last(&self) -> Option<u64> {
        self.samples.back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.samples.iter().copied()
    }

    pub fn sum(&self) -> u64 {
        self.samples.iter().sum()
    }

    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            0.0
        } else {
            self.sum() as f64 / self.samples.len() as f64
        }
    }

    pub fn max(&self) -> Option<u64> {
        self.samples.iter().copied().max()
    }
}

impl Default for RollingWindow {
    fn default() -> Self {
        Self::new(128)
    }
}

const DEPTH_SLOTS: usize = MAX_SUPPORTED_DEPTH as usize + 1;

/// Tree-level statistics refreshed after each pass.
#[derive(Debug, Clone)]
pub struct SubdivisionMetrics {
    /// Leaf count at each depth (index = depth).
    pub leaves_per_depth: [u64; DEPTH_SLOTS],
    /// Size of the packed heap.
    pub heap_bytes: usize,

    /// Subdivide-phase time of recent split passes, in microseconds.
    pub split_timings: RollingWindow,
    /// Subdivide-phase time of recent merge passes, in microseconds.
    pub merge_timings: RollingWindow,
    /// Sum reduction time of recent passes, in microseconds.
    pub reduction_timings: RollingWindow,

    pub last_pass: Option<PassStats>,
    /// Passes recorded this session; survives [`reset`](Self::reset).
    pub total_passes: u64,
}

impl Default for SubdivisionMetrics {
    fn default() -> Self {
        Self {
            leaves_per_depth: [0; DEPTH_SLOTS],
            heap_bytes: 0,
            split_timings: RollingWindow::default(),
            merge_timings: RollingWindow::default(),
            reduction_timings: RollingWindow::default(),
            last_pass: None,
            total_passes: 0,
        }
    }
}

impl SubdivisionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear everything except the cumulative pass count.
    pub fn reset(&mut self) {
        self.leaves_per_depth.fill(0);
        self.heap_bytes = 0;
        self.split_timings.clear();
        self.merge_timings.clear();
        self.reduction_timings.clear();
        self.last_pass = None;
    }

    pub fn record_pass(&mut self, stats: &PassStats) {
        if !is_enabled() {
            return;
        }
        match stats.pass {
            Pass::Split => self.split_timings.push(stats.subdivide_us),
            Pass::Merge => self.merge_timings.push(stats.subdivide_us),
        }
        self.reduction_timings.push(stats.reduction_us);
        self.last_pass = Some(*stats);
        self.total_passes += 1;
    }

    /// Rebuild the depth histogram by walking every leaf.
    pub fn update_from_tree(&mut self, tree: &Cbt) {
        if !is_enabled() {
            return;
        }
        self.leaves_per_depth.fill(0);
        for leaf in tree.leaves() {
            self.leaves_per_depth[leaf.depth() as usize] += 1;
        }
        self.heap_bytes = tree.heap_byte_size();
    }

    pub fn total_leaves(&self) -> u64 {
        self.leaves_per_depth.iter().sum()
    }

    /// Deepest depth holding at least one leaf.
    pub fn deepest_leaf_depth(&self) -> Option<u32> {
        self.leaves_per_depth
            .iter()
            .rposition(|&count| count > 0)
            .map(|depth| depth as u32)
    }

    pub fn avg_pass_us(&self, pass: Pass) -> f64 {
        match pass {
            Pass::Split => self.split_timings.average(),
            Pass::Merge => self.merge_timings.average(),
        }
    }

    pub fn avg_reduction_us(&self) -> f64 {
        self.reduction_timings.average()
    }

    pub fn heap_kib(&self) -> f64 {
        self.heap_bytes as f64 / 1024.0
    }
}
