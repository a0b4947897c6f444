use super::*;

#[test]
fn test_domain_minimums() {
  assert_eq!(Domain::Square.min_depth(), 1);
  assert_eq!(Domain::Square.min_node_id(), 2);
  assert_eq!(Domain::Triangle.min_depth(), 0);
  assert_eq!(Domain::Triangle.min_node_id(), 1);
  assert_eq!(Domain::default(), Domain::Square);
}

#[test]
fn test_base_nodes() {
  let square: Vec<u64> = Domain::Square.base_nodes().map(|n| n.id()).collect();
  let triangle: Vec<u64> = Domain::Triangle.base_nodes().map(|n| n.id()).collect();
  assert_eq!(square, vec![2, 3]);
  assert_eq!(triangle, vec![1]);
}
