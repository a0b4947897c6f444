use super::*;

/// Every depth's fields tile the heap with no gaps or overlaps.
#[test]
fn test_fields_tile_the_heap() {
  for max_depth in [1u32, 4, 6, 9] {
    let heap = BitHeap::new(max_depth).unwrap();
    let mut expected_offset = 2u64 + u64::from(max_depth) + 1;
    for id in 1..(2u64 << max_depth) {
      let node = Node::from_id(id);
      assert_eq!(
        heap.field_bit_offset(node),
        expected_offset,
        "depth {} node {}",
        max_depth,
        id
      );
      // The first node of each depth starts where the previous depth ended.
      expected_offset += u64::from(heap.field_width(node));
    }
    assert_eq!(expected_offset, 4u64 << max_depth, "heap ends at 2^(D+2)");
  }
}

#[test]
fn test_field_widths_per_depth() {
  let heap = BitHeap::new(4).unwrap();
  assert_eq!(heap.field_width(Node::ROOT), 5);
  assert_eq!(heap.field_width(Node::from_id(2)), 4);
  assert_eq!(heap.field_width(Node::from_id(16)), 1);
}

#[test]
fn test_new_heap_is_empty_except_marker() {
  let heap = BitHeap::new(7).unwrap();
  let words = heap.snapshot();
  assert_eq!(words[0], 1 << 7);
  assert!(words[1..].iter().all(|&w| w == 0));
  assert_eq!(heap.count_flags(), 0);
}

/// Writing every node's field with its maximum value reads back intact.
#[test]
fn test_fields_are_independent() {
  let heap = BitHeap::new(6).unwrap();
  for id in 1..(2u64 << 6) {
    let node = Node::from_id(id);
    let max = codec::low_mask(heap.field_width(node));
    heap.set_field(node, (id * 7) & max);
  }
  for id in 1..(2u64 << 6) {
    let node = Node::from_id(id);
    let max = codec::low_mask(heap.field_width(node));
    assert_eq!(heap.get_field(node), (id * 7) & max, "node {}", id);
  }
  assert_eq!(heap.snapshot()[0] & 0xFF, 1 << 6, "marker survives writes");
}

#[test]
fn test_flags_and_count() {
  let heap = BitHeap::new(5).unwrap();
  heap.set_flag(Node::from_id(32), true);
  heap.set_flag(Node::from_id(47), true);
  heap.set_flag(Node::from_id(63), true);
  assert_eq!(heap.count_flags(), 3);
  assert_eq!(heap.get_field(Node::from_id(47)), 1);

  heap.set_flag(Node::from_id(47), false);
  assert_eq!(heap.count_flags(), 2);
  assert_eq!(heap.get_field(Node::from_id(47)), 0);
}

#[test]
fn test_clear_keeps_marker() {
  let mut heap = BitHeap::new(3).unwrap();
  heap.set_field(Node::ROOT, 9);
  heap.clear();
  assert_eq!(heap.get_field(Node::ROOT), 0);
  assert_eq!(heap.snapshot(), vec![1 << 3]);
}

#[test]
fn test_bytes_roundtrip_recovers_depth() {
  let heap = BitHeap::new(8).unwrap();
  heap.set_field(Node::ROOT, 77);
  heap.set_flag(Node::from_id(300), true);

  let bytes = heap.to_bytes();
  assert_eq!(bytes.len(), heap.byte_size());

  let restored = BitHeap::from_bytes(&bytes).unwrap();
  assert_eq!(restored.max_depth(), 8);
  assert_eq!(restored.snapshot(), heap.snapshot());
}

#[test]
fn test_copy_from_bytes_rejects_wrong_size() {
  let mut heap = BitHeap::new(8).unwrap();
  let short = vec![0u8; heap.byte_size() - 8];
  assert_eq!(
    heap.copy_from_bytes(&short),
    Err(CbtError::HeapSizeMismatch {
      expected: 128,
      actual: 120,
    })
  );
}

#[test]
fn test_copy_from_bytes_rejects_foreign_depth() {
  let mut heap = BitHeap::new(8).unwrap();
  let other = BitHeap::new(7).unwrap();
  let mut bytes = other.to_bytes();
  bytes.resize(heap.byte_size(), 0);
  assert_eq!(
    heap.copy_from_bytes(&bytes),
    Err(CbtError::MissingDepthMarker)
  );
}

#[test]
fn test_from_bytes_requires_marker() {
  assert_eq!(
    BitHeap::from_bytes(&[0u8; 16]).err(),
    Some(CbtError::MissingDepthMarker)
  );
  assert!(matches!(
    BitHeap::from_bytes(&[1, 2, 3]),
    Err(CbtError::HeapSizeMismatch { .. })
  ));
}

#[test]
fn test_depth_range_is_enforced() {
  assert_eq!(
    BitHeap::new(0).err(),
    Some(CbtError::DepthOutOfRange { max_depth: 0 })
  );
  assert_eq!(
    BitHeap::new(32).err(),
    Some(CbtError::DepthOutOfRange { max_depth: 32 })
  );
}
