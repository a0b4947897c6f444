//! BitHeap - packed storage for every node's field.
//!
//! Node `i` at depth `d` of a depth-`D` heap owns `D - d + 1` bits starting at
//! bit `2^(d+1) + i * (D - d + 1)`. Depth-`D` fields are single leaf flags;
//! every shallower field holds the number of flags set beneath it once a sum
//! reduction has run. Word 0 bit `D` is a max-depth marker: no field starts
//! below bit `D + 3`, so the lowest set bit of word 0 recovers `D` from a raw
//! buffer.
//!
//! Storage is a slice of `AtomicU64` so a shared view can be mutated by many
//! workers at once. All accesses use relaxed ordering; pass boundaries (rayon
//! joins, or `&mut` hand-off on one thread) provide the synchronisation.

pub mod codec;

use std::sync::atomic::{AtomicU64, Ordering};

use crate::constants::{
  heap_byte_size, heap_word_count, MAX_SUPPORTED_DEPTH, MIN_SUPPORTED_DEPTH, WORD_BITS,
};
use crate::error::{CbtError, Result};
use crate::node::Node;

pub use codec::FieldSpan;

const ORDER: Ordering = Ordering::Relaxed;

/// Packed per-node bitfields of a complete binary tree.
pub struct BitHeap {
  words: Box<[AtomicU64]>,
  max_depth: u32,
}

impl BitHeap {
  /// Allocate a zeroed heap (plus depth marker) for `max_depth`.
  pub fn new(max_depth: u32) -> Result<Self> {
    check_depth(max_depth)?;
    let word_count = heap_word_count(max_depth);

    let mut words: Vec<AtomicU64> = Vec::new();
    words
      .try_reserve_exact(word_count)
      .map_err(|_| CbtError::AllocationFailed {
        bytes: heap_byte_size(max_depth),
      })?;
    words.resize_with(word_count, || AtomicU64::new(0));

    let mut heap = Self {
      words: words.into_boxed_slice(),
      max_depth,
    };
    heap.clear();
    Ok(heap)
  }

  /// Rebuild a heap from little-endian bytes produced by [`BitHeap::to_bytes`].
  pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
    let first = bytes
      .get(..8)
      .ok_or(CbtError::HeapSizeMismatch {
        expected: 8,
        actual: bytes.len(),
      })?;
    let mut marker = [0u8; 8];
    marker.copy_from_slice(first);
    let marker = u64::from_le_bytes(marker);
    if marker == 0 {
      return Err(CbtError::MissingDepthMarker);
    }

    let mut heap = Self::new(marker.trailing_zeros())?;
    heap.copy_from_bytes(bytes)?;
    Ok(heap)
  }

  #[inline]
  pub fn max_depth(&self) -> u32 {
    self.max_depth
  }

  #[inline]
  pub fn word_count(&self) -> usize {
    self.words.len()
  }

  #[inline]
  pub fn byte_size(&self) -> usize {
    self.words.len() * std::mem::size_of::<u64>()
  }

  /// First bit of a node's field.
  #[inline]
  pub fn field_bit_offset(&self, node: Node) -> u64 {
    let depth = node.depth();
    (2u64 << depth) + node.id() * u64::from(self.field_width(node))
  }

  /// Width of a node's field (`D - d + 1`).
  #[inline]
  pub fn field_width(&self, node: Node) -> u32 {
    self.max_depth - node.depth() + 1
  }

  #[inline]
  fn span(&self, node: Node) -> FieldSpan {
    debug_assert!(
      !node.is_null() && node.depth() <= self.max_depth,
      "heap index {} outside [1, 2^{})",
      node.id(),
      self.max_depth + 1
    );
    FieldSpan::new(
      self.field_bit_offset(node),
      self.field_width(node),
      self.words.len(),
    )
  }

  /// Read a node's field.
  #[inline]
  pub fn get_field(&self, node: Node) -> u64 {
    self.span(node).load(&self.words, ORDER)
  }

  /// Overwrite a node's field, leaving every other bit untouched.
  #[inline]
  pub fn set_field(&self, node: Node, value: u64) {
    self.span(node).store(&self.words, value, ORDER);
  }

  /// Set or clear the single-bit field of a depth-`D` node.
  #[inline]
  pub fn set_flag(&self, node: Node, on: bool) {
    debug_assert_eq!(
      node.depth(),
      self.max_depth,
      "flags only exist at max depth"
    );
    let bit = self.field_bit_offset(node);
    if on {
      codec::set_bit(&self.words, bit, ORDER);
    } else {
      codec::clear_bit(&self.words, bit, ORDER);
    }
  }

  /// Zero every field, keeping the depth marker.
  pub fn clear(&mut self) {
    for word in self.words.iter_mut() {
      *word.get_mut() = 0;
    }
    *self.words[0].get_mut() = 1u64 << self.max_depth;
  }

  /// Number of set leaf flags, counted directly from the depth-`D` bits.
  ///
  /// Independent of the reduction; after one it equals the root's field.
  pub fn count_flags(&self) -> u64 {
    let start = 3u64 << self.max_depth;
    let end = 4u64 << self.max_depth;
    let mut count = 0;
    for (index, word) in self.words.iter().enumerate() {
      let lo = index as u64 * WORD_BITS;
      let hi = lo + WORD_BITS;
      if hi <= start || lo >= end {
        continue;
      }
      let from = start.max(lo) - lo;
      let to = end.min(hi) - lo;
      let mask = codec::low_mask((to - from) as u32) << from;
      count += u64::from((word.load(ORDER) & mask).count_ones());
    }
    count
  }

  /// Copy of the raw words.
  pub fn snapshot(&self) -> Vec<u64> {
    self.words.iter().map(|w| w.load(ORDER)).collect()
  }

  /// Little-endian byte image of the heap, suitable for external mirroring.
  pub fn to_bytes(&self) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(self.byte_size());
    for word in self.words.iter() {
      bytes.extend_from_slice(&word.load(ORDER).to_le_bytes());
    }
    bytes
  }

  /// Overwrite the heap from a mirrored byte image of the same layout.
  pub fn copy_from_bytes(&mut self, bytes: &[u8]) -> Result<()> {
    let expected = self.byte_size();
    if bytes.len() != expected {
      return Err(CbtError::HeapSizeMismatch {
        expected,
        actual: bytes.len(),
      });
    }
    // Word 0 also holds root-level fields; only the marker must agree.
    let mut first = [0u8; 8];
    first.copy_from_slice(&bytes[..8]);
    let marker = u64::from_le_bytes(first);
    if marker == 0 || marker.trailing_zeros() != self.max_depth {
      return Err(CbtError::MissingDepthMarker);
    }

    for (word, chunk) in self.words.iter_mut().zip(bytes.chunks_exact(8)) {
      let mut raw = [0u8; 8];
      raw.copy_from_slice(chunk);
      *word.get_mut() = u64::from_le_bytes(raw);
    }
    Ok(())
  }
}

/// Reject maximum depths outside the supported index width.
pub fn check_depth(max_depth: u32) -> Result<()> {
  if (MIN_SUPPORTED_DEPTH..=MAX_SUPPORTED_DEPTH).contains(&max_depth) {
    Ok(())
  } else {
    Err(CbtError::DepthOutOfRange { max_depth })
  }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;
