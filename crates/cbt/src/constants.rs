//! Tree-wide constants shared by the heap layout, codec and executors.

/// Shallowest maximum depth a tree may be created with.
pub const MIN_SUPPORTED_DEPTH: u32 = 1;

/// Deepest maximum depth a tree may be created with.
///
/// Keeps every heap index below 2^32 and every field within 32 bits.
pub const MAX_SUPPORTED_DEPTH: u32 = 31;

/// Maximum depth used when nothing else is configured.
pub const DEFAULT_MAX_DEPTH: u32 = 16;

/// Uniform depth a fresh tree is subdivided to.
pub const DEFAULT_INIT_DEPTH: u32 = 1;

/// Leaves handled by one parallel workgroup.
pub const DEFAULT_WORKGROUP_SIZE: u32 = 256;

/// Reduction levels with fewer nodes than this are reduced inline instead of
/// being scheduled on rayon.
pub const PARALLEL_REDUCTION_THRESHOLD: u64 = 4096;

/// Bits per heap word.
pub const WORD_BITS: u64 = u64::BITS as u64;

/// Number of `u64` words backing a tree of the given maximum depth.
///
/// The heap spans `2^(D+2)` bits, rounded up to one whole word.
#[inline]
pub const fn heap_word_count(max_depth: u32) -> usize {
  let bits = 1u64 << (max_depth + 2);
  if bits < WORD_BITS {
    1
  } else {
    (bits / WORD_BITS) as usize
  }
}

/// Byte size of the packed heap for the given maximum depth.
#[inline]
pub const fn heap_byte_size(max_depth: u32) -> usize {
  heap_word_count(max_depth) * std::mem::size_of::<u64>()
}

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
