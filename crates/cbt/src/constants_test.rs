use super::*;

/// Depths of 5 and above match the `2^(D-1)` byte layout exactly.
#[test]
fn test_heap_byte_size_matches_bit_count() {
  for depth in 5..=20 {
    assert_eq!(
      heap_byte_size(depth),
      1usize << (depth - 1),
      "depth {} heap size",
      depth
    );
  }
}

/// Small trees still get one whole word.
#[test]
fn test_small_trees_round_up_to_one_word() {
  for depth in MIN_SUPPORTED_DEPTH..=4 {
    assert_eq!(heap_word_count(depth), 1, "depth {} word count", depth);
    assert_eq!(heap_byte_size(depth), 8);
  }
}

#[test]
fn test_supported_depth_range() {
  assert!(MIN_SUPPORTED_DEPTH <= DEFAULT_INIT_DEPTH);
  assert!(DEFAULT_INIT_DEPTH <= DEFAULT_MAX_DEPTH);
  assert!(DEFAULT_MAX_DEPTH <= MAX_SUPPORTED_DEPTH);
  assert_eq!(heap_word_count(MAX_SUPPORTED_DEPTH), 1usize << 27);
}
