//! Configuration parsing for the headless subdivision driver.

use anyhow::{Context, Result};
use cbt::{Backend, Domain, SubdivisionConfig};
use glam::Vec2;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration for a demo run.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Deepest level a leaf may reach.
  pub max_depth: u32,
  /// Uniform depth the tree starts at.
  pub init_depth: u32,
  pub domain: DomainName,
  pub backend: BackendName,
  /// Leaves per parallel workgroup.
  pub workgroup_size: u32,
  /// Passes to run. Split and merge passes alternate, so two passes make one
  /// full refinement cycle.
  pub frames: u32,
  /// Point the tree refines toward, in unit-square coordinates.
  pub target: [f32; 2],
  /// Optional circular motion of the target.
  pub orbit: Option<OrbitConfig>,
  /// Restore the uniform state every this many frames.
  pub reset_every: Option<u32>,
  /// Log a progress line every this many frames.
  pub log_every: u32,
  /// Write the final packed heap to this file.
  pub dump_heap: Option<PathBuf>,
}

/// Target moving on a circle around `center`.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct OrbitConfig {
  pub center: [f32; 2],
  pub radius: f32,
  /// Radians per frame.
  #[serde(default = "default_speed")]
  pub speed: f32,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DomainName {
  Square,
  Triangle,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendName {
  Sequential,
  Parallel,
}

fn default_speed() -> f32 {
  0.02
}

impl Default for Config {
  fn default() -> Self {
    let core = SubdivisionConfig::default();
    Self {
      max_depth: core.max_depth,
      init_depth: core.init_depth,
      domain: DomainName::Square,
      backend: BackendName::Parallel,
      workgroup_size: core.workgroup_size,
      frames: 128,
      target: [0.2371, 0.7104],
      orbit: None,
      reset_every: None,
      log_every: 16,
      dump_heap: None,
    }
  }
}

impl Config {
  /// Load a TOML file; missing keys keep their defaults.
  pub fn load(path: &Path) -> Result<Self> {
    let text = std::fs::read_to_string(path)
      .with_context(|| format!("Failed to read config: {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Failed to parse config: {}", path.display()))
  }

  /// Tree and executor settings for the core library.
  pub fn subdivision(&self) -> SubdivisionConfig {
    SubdivisionConfig {
      max_depth: self.max_depth,
      init_depth: self.init_depth,
      domain: match self.domain {
        DomainName::Square => Domain::Square,
        DomainName::Triangle => Domain::Triangle,
      },
      backend: match self.backend {
        BackendName::Sequential => Backend::Sequential,
        BackendName::Parallel => Backend::Parallel,
      },
      workgroup_size: self.workgroup_size,
    }
  }

  /// Target position at `frame`.
  pub fn target_at(&self, frame: u32) -> Vec2 {
    match self.orbit {
      Some(orbit) => {
        let angle = orbit.speed * frame as f32;
        Vec2::from(orbit.center) + orbit.radius * Vec2::new(angle.cos(), angle.sin())
      }
      None => Vec2::from(self.target),
    }
  }

  /// Whether the tree is reset before running `frame`.
  pub fn resets_at(&self, frame: u32) -> bool {
    match self.reset_every {
      Some(every) if every > 0 => frame > 0 && frame % every == 0,
      _ => false,
    }
  }
}
