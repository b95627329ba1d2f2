/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use core::cmp::Ordering;

use crate::error::CodecError;
use crate::traits::*;
use crate::utils::low_mask;
#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

/// The number of bits preallocated by [`BitBuffer::new`], large enough for
/// every known navigation message format.
pub const DEFAULT_CAPACITY: usize = 900;

/// A growable buffer of bits stored in `u64` words, most significant bit
/// first.
///
/// The buffer keeps track of two lengths: the allocated length
/// ([`len`](BitBuffer::len)) and the number of committed bits
/// ([`bits_used`](BitFieldRead::bits_used)). Appends write at the end of the
/// committed bits and grow the storage transparently; the invariant
/// `bits_used() <= len()` always holds.
///
/// Equality and ordering consider committed bits only. The ordering is the
/// bitwise lexicographic one described in [`Ord`] below, not a numeric
/// ordering.
///
/// # Example
/// ```
/// use nav_bits::prelude::*;
///
/// let mut bits = BitBuffer::new();
/// assert_eq!(bits.len(), DEFAULT_CAPACITY);
/// bits.append_bits(0b1011, 4)?;
/// bits.append_bits(0xFFFF, 12)?;
/// assert_eq!(bits.bits_used(), 16);
/// assert_eq!(bits.read_bits(0, 16)?, 0xBFFF);
///
/// // reads beyond the committed bits fail
/// assert!(bits.read_bits(10, 10).is_err());
///
/// // rewind and append again
/// bits.reset_bits_used(4);
/// bits.append_bits(0, 4)?;
/// assert_eq!(bits.read_bits(0, 8)?, 0xB0);
/// # Ok::<(), CodecError>(())
/// ```
#[derive(Debug)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(into = "crate::utils::RawBits", try_from = "crate::utils::RawBits")
)]
pub struct BitBuffer {
    /// The storage; bit `i` is bit `63 - i % 64` of word `i / 64`.
    words: Vec<u64>,
    /// The allocated length in bits.
    len: usize,
    /// The number of committed bits.
    used: usize,
    policy: BoundsPolicy,
}

impl BitBuffer {
    /// Create an empty buffer with [`DEFAULT_CAPACITY`] preallocated bits.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty buffer with `capacity` preallocated bits.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            words: vec![0; capacity.div_ceil(64)],
            len: capacity,
            used: 0,
            policy: BoundsPolicy::default(),
        }
    }

    /// Set the limit against which range reads are checked.
    #[must_use]
    pub fn with_bounds_policy(mut self, policy: BoundsPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn bounds_policy(&self) -> BoundsPolicy {
        self.policy
    }

    pub fn set_bounds_policy(&mut self, policy: BoundsPolicy) {
        self.policy = policy;
    }

    /// Return the allocated length in bits.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return true if there are no committed bits.
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Drop all storage and committed bits.
    pub fn clear(&mut self) {
        self.words.clear();
        self.len = 0;
        self.used = 0;
    }

    /// Force the number of committed bits to `bits_used` without touching
    /// the content of the storage.
    ///
    /// This makes it possible to back up and append again without
    /// reallocating. It should only be used to shrink the committed bits;
    /// if `bits_used` exceeds the allocated length, the storage grows with
    /// zero bits.
    pub fn reset_bits_used(&mut self, bits_used: usize) {
        self.grow(bits_used);
        self.used = bits_used;
    }

    /// Shrink the storage to exactly the committed bits.
    pub fn truncate_to_used(&mut self) {
        self.len = self.used;
        self.words.truncate(self.len.div_ceil(64));
        self.words.shrink_to_fit();
        self.clear_tail();
    }

    /// Flip every committed bit.
    pub fn invert(&mut self) {
        let full = self.used / 64;
        for word in &mut self.words[..full] {
            *word = !*word;
        }
        let rem = self.used % 64;
        if rem != 0 {
            self.words[full] ^= low_mask(rem) << (64 - rem);
        }
    }

    /// Append all the committed bits of `other`.
    pub fn append_buffer(&mut self, other: &BitBuffer) {
        let mut pos = 0;
        while pos < other.used {
            let n = (other.used - pos).min(64);
            let value = other.get_bits(pos, n);
            self.push_bits(value, n);
            pos += n;
        }
    }

    /// Copy the bits in the inclusive range `[start, end]` from `from`.
    ///
    /// If `end` is `None` the range extends to the last committed bit. Both
    /// buffers must have the same number of committed bits, or
    /// [`CodecError::SizeMismatch`] is returned. A `start` past `end` copies
    /// nothing.
    pub fn copy_bits_from(
        &mut self,
        from: &BitBuffer,
        start: usize,
        end: Option<usize>,
    ) -> Result<(), CodecError> {
        if self.used != from.used {
            return Err(CodecError::SizeMismatch {
                expected: self.used,
                found: from.used,
            });
        }
        let end = match end {
            Some(end) => end,
            None if self.used == 0 => return Ok(()),
            None => self.used - 1,
        };
        if start > end {
            return Ok(());
        }
        if end >= self.used {
            return Err(CodecError::Range {
                start,
                num_bits: (end - start).saturating_add(1),
                limit: self.used,
            });
        }
        let mut pos = start;
        while pos <= end {
            let n = (end + 1 - pos).min(64);
            self.put_bits(pos, from.get_bits(pos, n), n);
            pos += n;
        }
        Ok(())
    }

    /// Return an iterator over the committed bits.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.used).map(move |i| self.get_bit(i))
    }

    /// Return the committed bits as left-justified 32-bit words; the last
    /// word is padded with zeros on the right.
    pub fn to_words32(&self) -> Vec<u32> {
        let mut words = Vec::with_capacity(self.used.div_ceil(32));
        let mut pos = 0;
        while pos < self.used {
            let n = (self.used - pos).min(32);
            words.push((self.get_bits(pos, n) << (32 - n)) as u32);
            pos += n;
        }
        words
    }

    /// Compare the committed bits of two buffers and return the index of the
    /// first difference within `[start, end]`, if any.
    pub(crate) fn first_difference(
        &self,
        other: &BitBuffer,
        start: usize,
        end: usize,
    ) -> Option<usize> {
        let mut pos = start;
        while pos <= end {
            let n = (end + 1 - pos).min(64);
            let diff = self.get_bits(pos, n) ^ other.get_bits(pos, n);
            if diff != 0 {
                // the first bit of the chunk is the most significant one
                return Some(pos + (diff.leading_zeros() as usize - (64 - n)));
            }
            pos += n;
        }
        None
    }

    #[inline(always)]
    fn get_bit(&self, index: usize) -> bool {
        (self.words[index / 64] >> (63 - index % 64)) & 1 != 0
    }

    /// Read `n <= 64` bits at `start`; the range must lie within `len`.
    #[inline]
    fn get_bits(&self, start: usize, n: usize) -> u64 {
        if n == 0 {
            return 0;
        }
        debug_assert!(n <= 64 && start + n <= self.len);
        let word_index = start / 64;
        let in_word_offset = start % 64;

        if in_word_offset + n <= 64 {
            // single word access
            (self.words[word_index] << in_word_offset) >> (64 - n)
        } else {
            // double word access
            let high_word = self.words[word_index];
            let low_word = self.words[word_index + 1];
            let shamt1 = 64 - n;
            let shamt2 = 128 - in_word_offset - n;
            ((high_word << in_word_offset) >> shamt1) | (low_word >> shamt2)
        }
    }

    /// Write the lowest `n <= 64` bits of `value` at `start`; the range must
    /// lie within `len`.
    #[inline]
    fn put_bits(&mut self, start: usize, value: u64, n: usize) {
        if n == 0 {
            return;
        }
        debug_assert!(n <= 64 && start + n <= self.len);
        let value = value & low_mask(n);
        let word_index = start / 64;
        let in_word_offset = start % 64;

        if in_word_offset + n <= 64 {
            let shift = 64 - in_word_offset - n;
            let mask = low_mask(n) << shift;
            let word = &mut self.words[word_index];
            *word = (*word & !mask) | (value << shift);
        } else {
            let high_bits = 64 - in_word_offset;
            let low_bits = n - high_bits;
            let high_word = &mut self.words[word_index];
            *high_word = (*high_word & !low_mask(high_bits)) | (value >> low_bits);
            let low_shift = 64 - low_bits;
            let low_word = &mut self.words[word_index + 1];
            *low_word = (*low_word & !(low_mask(low_bits) << low_shift)) | (value << low_shift);
        }
    }

    /// Append without width checks.
    #[inline]
    fn push_bits(&mut self, value: u64, n: usize) {
        let start = self.used;
        self.grow(start + n);
        self.put_bits(start, value, n);
        self.used += n;
    }

    /// Make sure at least `len` bits are allocated.
    fn grow(&mut self, len: usize) {
        if len > self.len {
            self.len = len;
            self.words.resize(len.div_ceil(64), 0);
        }
    }

    /// Zero the bits of the last word beyond the allocated length.
    fn clear_tail(&mut self) {
        let rem = self.len % 64;
        if rem != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= !low_mask(64 - rem);
            }
        }
    }

    fn limit(&self) -> usize {
        match self.policy {
            BoundsPolicy::Committed => self.used,
            BoundsPolicy::Allocated => self.len,
        }
    }
}

impl Default for BitBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl BitFieldRead for BitBuffer {
    #[inline(always)]
    fn bits_used(&self) -> usize {
        self.used
    }

    #[inline]
    fn read_bit(&self, index: usize) -> Result<bool, CodecError> {
        check_range(index, 1, self.len)?;
        Ok(self.get_bit(index))
    }

    #[inline]
    fn read_bits(&self, start: usize, num_bits: usize) -> Result<u64, CodecError> {
        check_width(num_bits)?;
        check_range(start, num_bits, self.limit())?;
        Ok(self.get_bits(start, num_bits))
    }
}

impl BitFieldWrite for BitBuffer {
    #[inline]
    fn append_bits(&mut self, value: u64, num_bits: usize) -> Result<usize, CodecError> {
        check_width(num_bits)?;
        self.push_bits(value, num_bits);
        Ok(num_bits)
    }

    fn insert_bits(
        &mut self,
        value: u64,
        start: usize,
        num_bits: usize,
    ) -> Result<(), CodecError> {
        check_width(num_bits)?;
        check_range(start, num_bits, self.used)?;
        if value > low_mask(num_bits) {
            return Err(CodecError::out_of_range(value, num_bits));
        }
        self.put_bits(start, value, num_bits);
        Ok(())
    }
}

/// Cloning copies the committed bits only: the allocated length of the clone
/// is equal to the number of committed bits.
impl Clone for BitBuffer {
    fn clone(&self) -> Self {
        let mut words = self.words[..self.used.div_ceil(64)].to_vec();
        let rem = self.used % 64;
        if rem != 0 {
            if let Some(last) = words.last_mut() {
                *last &= !low_mask(64 - rem);
            }
        }
        Self {
            words,
            len: self.used,
            used: self.used,
            policy: self.policy,
        }
    }
}

impl PartialEq for BitBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.used == other.used
            && (self.used == 0 || self.first_difference(other, 0, self.used - 1).is_none())
    }
}

impl Eq for BitBuffer {}

/// Buffers are ordered first by number of committed bits (the shorter one is
/// smaller), then by the first index at which they differ: the buffer with a
/// zero at that index is smaller.
///
/// This is a bitwise order used for filtering and deduplication; it is not
/// the numeric order of the contents.
impl Ord for BitBuffer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.used.cmp(&other.used).then_with(|| {
            if self.used == 0 {
                return Ordering::Equal;
            }
            match self.first_difference(other, 0, self.used - 1) {
                Some(index) if self.get_bit(index) => Ordering::Greater,
                Some(_) => Ordering::Less,
                None => Ordering::Equal,
            }
        })
    }
}

impl PartialOrd for BitBuffer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromIterator<bool> for BitBuffer {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut buffer = Self::with_capacity(iter.size_hint().0);
        for bit in iter {
            buffer.push_bits(bit as u64, 1);
        }
        buffer
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn bits(s: &str) -> BitBuffer {
        s.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn test_append_read_against_model() -> Result<(), CodecError> {
        let mut r = SmallRng::seed_from_u64(0);
        let mut buffer = BitBuffer::with_capacity(7);
        let mut model = Vec::new();
        for _ in 0..2000 {
            let n = r.random_range(0..=64);
            let value: u64 = r.random();
            buffer.append_bits(value, n)?;
            for i in (0..n).rev() {
                model.push((value >> i) & 1 == 1);
            }
        }
        assert_eq!(buffer.bits_used(), model.len());
        assert!(buffer.iter().eq(model.iter().copied()));

        for _ in 0..2000 {
            let n = r.random_range(0..=64);
            let start = r.random_range(0..=model.len() - n);
            let expected = model[start..start + n]
                .iter()
                .fold(0_u64, |acc, &b| (acc << 1) | b as u64);
            assert_eq!(buffer.read_bits(start, n)?, expected);
        }
        Ok(())
    }

    #[test]
    fn test_bounds() {
        let mut buffer = BitBuffer::new();
        buffer.append_bits(0xABC, 12).unwrap();
        assert_eq!(
            buffer.read_bits(7, 10),
            Err(CodecError::Range {
                start: 7,
                num_bits: 10,
                limit: 12
            })
        );
        assert_eq!(
            buffer.read_bits(0, 65),
            Err(CodecError::FieldTooWide { num_bits: 65 })
        );
        assert_eq!(
            buffer.append_bits(0, 65),
            Err(CodecError::FieldTooWide { num_bits: 65 })
        );
        assert!(buffer.read_bits(usize::MAX, 2).is_err());

        // the allocated length is the limit for single bits and lenient reads
        assert_eq!(buffer.read_bit(899), Ok(false));
        assert!(buffer.read_bit(900).is_err());
        let lenient = buffer.clone().with_bounds_policy(BoundsPolicy::Allocated);
        assert!(lenient.read_bits(7, 10).is_err());
        buffer.set_bounds_policy(BoundsPolicy::Allocated);
        assert_eq!(buffer.read_bits(8, 8), Ok(0xC0));
    }

    #[test]
    fn test_growth() -> Result<(), CodecError> {
        let mut buffer = BitBuffer::with_capacity(0);
        for i in 0..100 {
            buffer.append_bits(i, 10)?;
        }
        assert_eq!(buffer.bits_used(), 1000);
        assert!(buffer.len() >= 1000);
        for i in 0..100 {
            assert_eq!(buffer.read_bits(i * 10, 10)?, i as u64);
        }
        Ok(())
    }

    #[test]
    fn test_insert() -> Result<(), CodecError> {
        let mut buffer = BitBuffer::new();
        buffer.append_bits(0, 70)?;
        buffer.insert_bits(0b101, 62, 3)?;
        assert_eq!(buffer.bits_used(), 70);
        assert_eq!(buffer.read_bits(60, 8)?, 0b0010_1000);
        assert!(buffer.insert_bits(8, 62, 3).is_err());
        assert!(buffer.insert_bits(1, 68, 3).is_err());
        assert_eq!(buffer.read_bits(60, 8)?, 0b0010_1000);
        Ok(())
    }

    #[test]
    fn test_invert() -> Result<(), CodecError> {
        let mut buffer = BitBuffer::new();
        buffer.append_bits(0xF0F0_F0F0_F0F0_F0F0, 64)?;
        buffer.append_bits(0b01, 2)?;
        buffer.invert();
        assert_eq!(buffer.read_bits(0, 64)?, 0x0F0F_0F0F_0F0F_0F0F);
        assert_eq!(buffer.read_bits(64, 2)?, 0b10);
        // bits beyond the committed ones are untouched
        buffer.set_bounds_policy(BoundsPolicy::Allocated);
        assert_eq!(buffer.read_bits(66, 10)?, 0);
        Ok(())
    }

    #[test]
    fn test_reset_and_truncate() -> Result<(), CodecError> {
        let mut buffer = BitBuffer::new();
        buffer.append_bits(0xFFFF, 16)?;
        buffer.reset_bits_used(8);
        assert_eq!(buffer.bits_used(), 8);
        assert_eq!(buffer.len(), DEFAULT_CAPACITY);
        buffer.append_bits(0, 4)?;
        assert_eq!(buffer.read_bits(0, 12)?, 0xFF0);
        buffer.truncate_to_used();
        assert_eq!(buffer.len(), 12);
        assert!(buffer.read_bit(12).is_err());
        buffer.reset_bits_used(20);
        assert_eq!(buffer.len(), 20);
        assert_eq!(buffer.read_bits(12, 8)?, 0);
        Ok(())
    }

    #[test]
    fn test_clone_copies_committed_bits() -> Result<(), CodecError> {
        let mut buffer = BitBuffer::new();
        buffer.append_bits(0x1234, 16)?;
        let copy = buffer.clone();
        assert_eq!(copy.len(), 16);
        assert_eq!(copy, buffer);
        buffer.insert_bits(0, 0, 16)?;
        assert_eq!(copy.read_bits(0, 16)?, 0x1234);
        Ok(())
    }

    #[test]
    fn test_copy_bits_from() -> Result<(), CodecError> {
        let from = bits("1111111111");
        let mut to = bits("0000000000");
        to.copy_bits_from(&from, 2, Some(4))?;
        assert_eq!(to, bits("0011100000"));
        to.copy_bits_from(&from, 7, None)?;
        assert_eq!(to, bits("0011100111"));
        to.copy_bits_from(&from, 5, Some(4))?;
        assert_eq!(to, bits("0011100111"));
        assert!(to.copy_bits_from(&from, 0, Some(10)).is_err());
        assert_eq!(
            bits("000").copy_bits_from(&bits("111"), 0, Some(usize::MAX)),
            Err(CodecError::Range {
                start: 0,
                num_bits: usize::MAX,
                limit: 3
            })
        );
        assert!(bits("000")
            .copy_bits_from(&bits("111"), 1, Some(usize::MAX))
            .is_err());
        assert_eq!(
            to.copy_bits_from(&bits("11"), 0, None),
            Err(CodecError::SizeMismatch {
                expected: 10,
                found: 2
            })
        );
        Ok(())
    }

    #[test]
    fn test_append_buffer() -> Result<(), CodecError> {
        let mut a = bits("101");
        let mut b = BitBuffer::new();
        b.append_bits(u64::MAX, 64)?;
        b.append_bits(0, 6)?;
        a.append_buffer(&b);
        assert_eq!(a.bits_used(), 73);
        assert_eq!(a.read_bits(0, 3)?, 0b101);
        assert_eq!(a.read_bits(3, 64)?, u64::MAX);
        assert_eq!(a.read_bits(67, 6)?, 0);
        Ok(())
    }

    #[test]
    fn test_ordering() {
        assert!(bits("011") < bits("100"));
        assert!(bits("100") > bits("011"));
        assert!(bits("11") < bits("000"));
        assert_eq!(bits("0101").cmp(&bits("0101")), Ordering::Equal);
        assert!(!(bits("0101") < bits("0101")));
        let mut long = BitBuffer::new();
        long.append_bits(0, 63).unwrap();
        long.append_bits(1, 2).unwrap();
        let mut other = long.clone();
        other.insert_bits(0b11, 63, 2).unwrap();
        assert!(long < other);
    }

    #[test]
    fn test_equality_ignores_capacity_and_stale_bits() -> Result<(), CodecError> {
        let mut a = BitBuffer::with_capacity(10);
        a.append_bits(0b1111, 4)?;
        a.reset_bits_used(2);
        let b = bits("11");
        assert_eq!(a, b);
        assert_ne!(a, bits("111"));
        Ok(())
    }

    #[test]
    fn test_words32() -> Result<(), CodecError> {
        let mut buffer = BitBuffer::new();
        buffer.append_bits(0xDEAD_BEEF, 32)?;
        buffer.append_bits(0b101, 3)?;
        assert_eq!(buffer.to_words32(), vec![0xDEAD_BEEF, 0xA000_0000]);
        assert!(BitBuffer::new().to_words32().is_empty());
        Ok(())
    }
}
