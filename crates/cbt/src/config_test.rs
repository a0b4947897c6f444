use super::*;

// =========================================================================
// Defaults and validation
// =========================================================================

/// Defaults: depth 16 seeded at 1, square domain, parallel, 256-wide groups.
#[test]
fn test_default_config() {
  let config = SubdivisionConfig::default();
  assert_eq!(config.max_depth, 16);
  assert_eq!(config.init_depth, 1);
  assert_eq!(config.domain, Domain::Square);
  assert_eq!(config.backend, Backend::Parallel);
  assert_eq!(config.workgroup_size, 256);
  assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_validate_rejects_unsupported_depth() {
  let config = SubdivisionConfig {
    max_depth: 0,
    init_depth: 0,
    ..Default::default()
  };
  assert_eq!(
    config.validate(),
    Err(CbtError::DepthOutOfRange { max_depth: 0 })
  );
}

#[test]
fn test_validate_rejects_init_beyond_max() {
  let config = SubdivisionConfig {
    max_depth: 6,
    init_depth: 7,
    ..Default::default()
  };
  assert_eq!(
    config.validate(),
    Err(CbtError::InvalidDepth {
      init_depth: 7,
      max_depth: 6,
    })
  );
}

/// The square's base mesh sits at depth 1, so a root-only start is rejected.
#[test]
fn test_validate_rejects_square_root_start() {
  let config = SubdivisionConfig {
    init_depth: 0,
    ..Default::default()
  };
  assert_eq!(
    config.validate(),
    Err(CbtError::ShallowInitDepth {
      init_depth: 0,
      min_depth: 1,
    })
  );

  let triangle = SubdivisionConfig {
    domain: Domain::Triangle,
    ..config
  };
  assert_eq!(triangle.validate(), Ok(()));
}

#[test]
fn test_validate_rejects_empty_workgroups() {
  let config = SubdivisionConfig {
    workgroup_size: 0,
    ..Default::default()
  };
  assert_eq!(config.validate(), Err(CbtError::InvalidWorkgroupSize));
}

// =========================================================================
// Builders
// =========================================================================

#[test]
fn test_create_tree_uses_init_depth() {
  let config = SubdivisionConfig {
    max_depth: 10,
    init_depth: 3,
    ..Default::default()
  };
  let tree = config.create_tree().unwrap();
  assert_eq!(tree.max_depth(), 10);
  assert_eq!(tree.node_count(), 8);
}

#[test]
fn test_subdivider_mirrors_config() {
  let config = SubdivisionConfig {
    domain: Domain::Triangle,
    init_depth: 0,
    backend: Backend::Sequential,
    workgroup_size: 64,
    ..Default::default()
  };
  let subdivider = config.subdivider();
  assert_eq!(subdivider.domain, Domain::Triangle);
  assert_eq!(subdivider.backend, Backend::Sequential);
  assert_eq!(subdivider.workgroup_size, 64);
  assert_eq!(subdivider.pass, crate::executor::Pass::Split);
}
