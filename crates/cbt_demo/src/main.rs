//! Headless subdivision driver.
//!
//! Runs the split/merge ping-pong against a target point the way a frame loop
//! would, without any rendering: each frame performs one pass, logs the leaf
//! count, and optionally exports the packed heap for an external mirror.

mod config;

use anyhow::{Context, Result};
use cbt::metrics::SubdivisionMetrics;
use cbt::{leb, Cbt, Pass, TargetPolicy};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::{BackendName, Config, DomainName};

/// Headless split/merge driver for the concurrent binary tree.
#[derive(Parser, Debug)]
#[command(name = "cbt_demo")]
#[command(about = "Refines a concurrent binary tree toward a target point")]
struct Args {
  /// Path to configuration TOML file.
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Override the maximum depth.
  #[arg(long)]
  max_depth: Option<u32>,

  /// Override the number of passes.
  #[arg(short, long)]
  frames: Option<u32>,

  #[arg(long, value_enum)]
  domain: Option<DomainName>,

  #[arg(long, value_enum)]
  backend: Option<BackendName>,

  /// Override the target point, as `x,y`.
  #[arg(long, value_delimiter = ',', num_args = 2)]
  target: Option<Vec<f32>>,

  /// Write the final packed heap to this file.
  #[arg(long)]
  dump_heap: Option<PathBuf>,

  /// Verbose logging (overridden by RUST_LOG).
  #[arg(short, long)]
  debug: bool,
}

impl Args {
  /// File config (or defaults) with command-line overrides applied.
  fn resolve(&self) -> Result<Config> {
    let mut config = match &self.config {
      Some(path) => Config::load(path)?,
      None => Config::default(),
    };
    if let Some(max_depth) = self.max_depth {
      config.max_depth = max_depth;
    }
    if let Some(frames) = self.frames {
      config.frames = frames;
    }
    if let Some(domain) = self.domain {
      config.domain = domain;
    }
    if let Some(backend) = self.backend {
      config.backend = backend;
    }
    if let Some(target) = &self.target {
      config.target = [target[0], target[1]];
      config.orbit = None;
    }
    if let Some(path) = &self.dump_heap {
      config.dump_heap = Some(path.clone());
    }
    Ok(config)
  }
}

fn main() -> Result<()> {
  let args = Args::parse();

  let log_level = if args.debug { "debug" } else { "info" };
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("cbt_demo={log_level},cbt={log_level}").into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let config = args.resolve()?;
  let core = config.subdivision();
  core.validate().context("Invalid subdivision config")?;

  let mut tree = core.create_tree()?;
  let mut subdivider = core.subdivider();
  let mut metrics = SubdivisionMetrics::new();

  info!(
    max_depth = core.max_depth,
    init_depth = core.init_depth,
    domain = ?core.domain,
    backend = ?core.backend,
    heap_bytes = tree.heap_byte_size(),
    frames = config.frames,
    "Starting subdivision"
  );

  for frame in 0..config.frames {
    if config.resets_at(frame) {
      tree.reset_to_depth(core.init_depth)?;
      subdivider.pass = Pass::Split;
      debug!(frame, "Reset to uniform depth");
    }

    let target = config.target_at(frame);
    let stats = subdivider.step(&mut tree, &TargetPolicy::new(target))?;
    metrics.record_pass(&stats);

    if config.log_every > 0 && frame % config.log_every == 0 {
      info!(
        frame,
        pass = ?stats.pass,
        leaves = stats.leaves_after,
        delta = stats.leaf_delta(),
        pass_us = stats.total_us(),
        target = ?target,
        "Frame"
      );
    }
  }

  metrics.update_from_tree(&tree);
  report(&tree, &config, &metrics);

  if let Some(path) = &config.dump_heap {
    dump_heap(&tree, path)?;
  }

  Ok(())
}

/// Summarise the final tree.
fn report(tree: &Cbt, config: &Config, metrics: &SubdivisionMetrics) {
  let core = config.subdivision();
  let target = config.target_at(config.frames.saturating_sub(1));
  let finest = tree
    .leaves()
    .filter(|&leaf| leb::decode_triangle(core.domain, leaf).contains(target))
    .map(|leaf| leaf.depth())
    .max();

  info!(
    leaves = tree.node_count(),
    finest_at_target = ?finest,
    heap_kib = metrics.heap_kib(),
    "Finished"
  );

  if cbt::metrics::is_enabled() {
    info!(
      passes = metrics.total_passes,
      avg_split_us = metrics.avg_pass_us(Pass::Split),
      avg_merge_us = metrics.avg_pass_us(Pass::Merge),
      avg_reduction_us = metrics.avg_reduction_us(),
      deepest = ?metrics.deepest_leaf_depth(),
      "Timings"
    );
    for (depth, count) in metrics.leaves_per_depth.iter().enumerate() {
      if *count > 0 {
        debug!(depth, count, "Leaves at depth");
      }
    }
  } else {
    warn!("Metrics collection is disabled");
  }
}

/// Export the packed heap and check that it reloads to the same tree.
fn dump_heap(tree: &Cbt, path: &Path) -> Result<()> {
  let bytes = tree.heap_bytes();
  std::fs::write(path, &bytes)
    .with_context(|| format!("Failed to write heap: {}", path.display()))?;

  let mirror = Cbt::from_heap_bytes(&bytes).context("Heap dump does not reload")?;
  anyhow::ensure!(
    mirror.node_count() == tree.node_count(),
    "Reloaded heap holds {} leaves, expected {}",
    mirror.node_count(),
    tree.node_count()
  );

  info!(path = %path.display(), bytes = bytes.len(), "Wrote heap");
  Ok(())
}
