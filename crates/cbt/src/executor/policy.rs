//! Split/merge decision policies.
//!
//! A policy sees geometry only: the leaf's triangle during a split pass, the
//! diamond's two parent triangles during a merge pass. Policies are shared
//! across rayon workers and must be `Sync`.

use glam::Vec2;

use crate::leb::Triangle;

/// Decides which leaves split and which diamonds merge.
pub trait SubdivisionPolicy: Sync {
  /// Whether the leaf covering `triangle` should be bisected.
  fn should_split(&self, triangle: &Triangle) -> bool;

  /// Whether the diamond formed by `base` and `top` should collapse.
  ///
  /// On a boundary `base` and `top` are the same triangle.
  fn should_merge(&self, base: &Triangle, top: &Triangle) -> bool;
}

impl<P: SubdivisionPolicy + ?Sized> SubdivisionPolicy for &P {
  #[inline]
  fn should_split(&self, triangle: &Triangle) -> bool {
    (**self).should_split(triangle)
  }

  #[inline]
  fn should_merge(&self, base: &Triangle, top: &Triangle) -> bool {
    (**self).should_merge(base, top)
  }
}

/// Refines toward a single point: leaves containing it split, diamonds away
/// from it merge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetPolicy {
  pub target: Vec2,
}

impl TargetPolicy {
  /// Point the demo refines toward when none is configured.
  pub const DEFAULT_TARGET: Vec2 = Vec2::new(0.2371, 0.7104);

  pub fn new(target: Vec2) -> Self {
    Self { target }
  }
}

impl Default for TargetPolicy {
  fn default() -> Self {
    Self::new(Self::DEFAULT_TARGET)
  }
}

impl SubdivisionPolicy for TargetPolicy {
  #[inline]
  fn should_split(&self, triangle: &Triangle) -> bool {
    triangle.contains(self.target)
  }

  #[inline]
  fn should_merge(&self, base: &Triangle, top: &Triangle) -> bool {
    !base.contains(self.target) && !top.contains(self.target)
  }
}

/// Policy built from a pair of closures.
pub struct FnPolicy<S, M> {
  split: S,
  merge: M,
}

impl<S, M> FnPolicy<S, M>
where
  S: Fn(&Triangle) -> bool + Sync,
  M: Fn(&Triangle, &Triangle) -> bool + Sync,
{
  pub fn new(split: S, merge: M) -> Self {
    Self { split, merge }
  }
}

impl<S, M> SubdivisionPolicy for FnPolicy<S, M>
where
  S: Fn(&Triangle) -> bool + Sync,
  M: Fn(&Triangle, &Triangle) -> bool + Sync,
{
  #[inline]
  fn should_split(&self, triangle: &Triangle) -> bool {
    (self.split)(triangle)
  }

  #[inline]
  fn should_merge(&self, base: &Triangle, top: &Triangle) -> bool {
    (self.merge)(base, top)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::leb::{decode_triangle, Domain};
  use crate::node::Node;

  #[test]
  fn test_target_policy_splits_containing_triangle() {
    let policy = TargetPolicy::default();
    let lower = decode_triangle(Domain::Square, Node::from_id(2));
    let upper = decode_triangle(Domain::Square, Node::from_id(3));
    // (0.2371, 0.7104) lies below the diagonal x + y = 1.
    assert!(policy.should_split(&lower));
    assert!(!policy.should_split(&upper));
  }

  #[test]
  fn test_target_policy_merge_is_symmetric() {
    let policy = TargetPolicy::new(Vec2::new(0.9, 0.9));
    let a = decode_triangle(Domain::Square, Node::from_id(4));
    let b = decode_triangle(Domain::Square, Node::from_id(5));
    let c = decode_triangle(Domain::Square, Node::from_id(3));
    assert!(policy.should_merge(&a, &b));
    assert_eq!(policy.should_merge(&a, &c), policy.should_merge(&c, &a));
    assert!(!policy.should_merge(&a, &c));
  }

  #[test]
  fn test_fn_policy_forwards_to_closures() {
    let policy = FnPolicy::new(|t: &Triangle| t.signed_area() > 0.1, |_: &Triangle, _: &Triangle| true);
    let big = decode_triangle(Domain::Square, Node::from_id(2));
    let small = decode_triangle(Domain::Square, Node::from_id(16));
    assert!(policy.should_split(&big));
    assert!(!policy.should_split(&small));
    assert!(policy.should_merge(&big, &small));
  }

  #[test]
  fn test_policy_by_reference() {
    fn takes_policy(policy: impl SubdivisionPolicy) -> bool {
      policy.should_split(&decode_triangle(Domain::Square, Node::from_id(2)))
    }
    let policy = TargetPolicy::default();
    assert!(takes_policy(&policy));
  }
}
