//! Field codec over packed `u64` words.
//!
//! A field is `bit_count` bits starting at global bit `bit_offset`, where bit
//! `k` of word `w` is global bit `64 * w + k`. A field may straddle two
//! words; its low bits then live at the top of the lower word and its high
//! bits at the bottom of the next one.
//!
//! Writes go through atomic read-modify-write on each touched word and only
//! replace the field's own bits, so writers targeting different fields that
//! share a word never clobber each other.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::constants::WORD_BITS;

/// Mask covering the low `count` bits.
#[inline]
pub const fn low_mask(count: u32) -> u64 {
  if count >= u64::BITS {
    u64::MAX
  } else {
    (1u64 << count) - 1
  }
}

/// Read `count` bits of `word` starting at `offset`.
#[inline]
pub const fn extract(word: u64, offset: u32, count: u32) -> u64 {
  (word >> offset) & low_mask(count)
}

/// Replace `count` bits of `word` starting at `offset` with `value`.
#[inline]
pub const fn insert(word: u64, offset: u32, count: u32, value: u64) -> u64 {
  let mask = low_mask(count) << offset;
  (word & !mask) | ((value << offset) & mask)
}

/// Read/write window for one field: a low part in `lsb_word` and an optional
/// high part at the bottom of `msb_word`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpan {
  pub lsb_word: usize,
  pub lsb_offset: u32,
  pub lsb_count: u32,
  pub msb_word: usize,
  pub msb_count: u32,
}

impl FieldSpan {
  /// Locate a field inside a heap of `word_count` words.
  ///
  /// The high word index is clamped to the last word; it is only touched when
  /// `msb_count > 0`, which never happens for the last word of a valid heap.
  #[inline]
  pub fn new(bit_offset: u64, bit_count: u32, word_count: usize) -> Self {
    debug_assert!(bit_count <= u64::BITS);
    let lsb_word = (bit_offset / WORD_BITS) as usize;
    let lsb_offset = (bit_offset % WORD_BITS) as u32;
    let lsb_count = bit_count.min(u64::BITS - lsb_offset);
    let msb_count = bit_count - lsb_count;
    let msb_word = (lsb_word + 1).min(word_count.saturating_sub(1));

    Self {
      lsb_word,
      lsb_offset,
      lsb_count,
      msb_word,
      msb_count,
    }
  }

  /// Total field width.
  #[inline]
  pub fn bit_count(&self) -> u32 {
    self.lsb_count + self.msb_count
  }

  /// Whether the field crosses a word boundary.
  #[inline]
  pub fn straddles(&self) -> bool {
    self.msb_count > 0
  }

  /// Combine the low and high parts read from their words.
  #[inline]
  pub fn decode(&self, lsb: u64, msb: u64) -> u64 {
    let low = extract(lsb, self.lsb_offset, self.lsb_count);
    let high = extract(msb, 0, self.msb_count);
    low | (high << self.lsb_count)
  }

  /// Read the field from plain words.
  #[inline]
  pub fn read(&self, words: &[u64]) -> u64 {
    self.decode(words[self.lsb_word], words[self.msb_word])
  }

  /// Write the field into plain words.
  #[inline]
  pub fn write(&self, words: &mut [u64], value: u64) {
    words[self.lsb_word] = insert(words[self.lsb_word], self.lsb_offset, self.lsb_count, value);
    if self.straddles() {
      words[self.msb_word] = insert(words[self.msb_word], 0, self.msb_count, value >> self.lsb_count);
    }
  }

  /// Read the field from atomic words.
  #[inline]
  pub fn load(&self, words: &[AtomicU64], order: Ordering) -> u64 {
    let lsb = words[self.lsb_word].load(order);
    let msb = if self.straddles() {
      words[self.msb_word].load(order)
    } else {
      0
    };
    self.decode(lsb, msb)
  }

  /// Write the field into atomic words, one read-modify-write per word.
  #[inline]
  pub fn store(&self, words: &[AtomicU64], value: u64, order: Ordering) {
    update_bits(
      &words[self.lsb_word],
      self.lsb_offset,
      self.lsb_count,
      value,
      order,
    );
    if self.straddles() {
      update_bits(
        &words[self.msb_word],
        0,
        self.msb_count,
        value >> self.lsb_count,
        order,
      );
    }
  }
}

/// Atomically replace `count` bits of `word` at `offset`.
#[inline]
fn update_bits(word: &AtomicU64, offset: u32, count: u32, value: u64, order: Ordering) {
  let mask = low_mask(count) << offset;
  let bits = (value << offset) & mask;
  // Closure always returns Some, so the update cannot fail.
  let _ = word.fetch_update(order, Ordering::Relaxed, |current| {
    Some((current & !mask) | bits)
  });
}

/// Atomically set a single bit.
#[inline]
pub fn set_bit(words: &[AtomicU64], bit_offset: u64, order: Ordering) {
  let word = (bit_offset / WORD_BITS) as usize;
  let mask = 1u64 << (bit_offset % WORD_BITS);
  words[word].fetch_or(mask, order);
}

/// Atomically clear a single bit.
#[inline]
pub fn clear_bit(words: &[AtomicU64], bit_offset: u64, order: Ordering) {
  let word = (bit_offset / WORD_BITS) as usize;
  let mask = 1u64 << (bit_offset % WORD_BITS);
  words[word].fetch_and(!mask, order);
}

#[cfg(test)]
#[path = "codec_test.rs"]
mod codec_test;
