/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::CodecError;
#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

/// The maximum width of a single field, in bits.
pub const MAX_FIELD_BITS: usize = 64;

/// Random-access reads of bit fields.
///
/// Bits are addressed from index 0, and a field is read most significant bit
/// first: the first bit of the range ends up in the highest position of the
/// result.
///
/// This trait specifies the basic operations over which the codecs in
/// [`crate::codes`] are implemented.
pub trait BitFieldRead {
    /// Return the number of committed bits, that is, the bits that have been
    /// appended (or loaded) and are meaningful.
    fn bits_used(&self) -> usize;

    /// Return the bit at position `index`.
    ///
    /// The index is checked against the allocated storage only.
    fn read_bit(&self, index: usize) -> Result<bool, CodecError>;

    /// Read `num_bits` bits starting at `start` and return them in the lowest
    /// bits of the result.
    ///
    /// Fails with [`CodecError::FieldTooWide`] if `num_bits` is greater than
    /// 64, and with [`CodecError::Range`] if the range exceeds the limit set by
    /// the [`BoundsPolicy`] of the implementor.
    fn read_bits(&self, start: usize, num_bits: usize) -> Result<u64, CodecError>;
}

/// Appending and in-place writes of bit fields.
pub trait BitFieldWrite: BitFieldRead {
    /// Append the lowest `num_bits` bits of `value`, most significant bit
    /// first, and return the number of bits written, that is, `num_bits`.
    ///
    /// The other bits of `value` are ignored. Storage grows as needed, so the
    /// only possible failure is [`CodecError::FieldTooWide`].
    fn append_bits(&mut self, value: u64, num_bits: usize) -> Result<usize, CodecError>;

    /// Overwrite `num_bits` committed bits starting at `start` with the lowest
    /// bits of `value`, without changing the number of committed bits.
    ///
    /// Fails with [`CodecError::Range`] if `start + num_bits` exceeds the
    /// committed bits, and with [`CodecError::ValueOutOfRange`] if `value`
    /// needs more than `num_bits` bits.
    fn insert_bits(&mut self, value: u64, start: usize, num_bits: usize)
    -> Result<(), CodecError>;
}

/// The limit against which range reads are checked.
///
/// Reading past the committed bits is almost always a mistake, so the default
/// is [`BoundsPolicy::Committed`]. [`BoundsPolicy::Allocated`] accepts any
/// range within the allocated storage: bits that were never written read as
/// zero, and bits left over by
/// [`reset_bits_used`](crate::impls::BitBuffer::reset_bits_used) keep their
/// previous value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "mem_dbg", mem_size(rec))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundsPolicy {
    /// Ranges must lie within the committed bits.
    #[default]
    Committed,
    /// Ranges must lie within the allocated storage.
    Allocated,
}

/// A contiguous range of bits, used to describe the pieces of a field
/// transmitted as several disjoint ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BitRange {
    /// The index of the first (most significant) bit.
    pub start: usize,
    /// The number of bits.
    pub len: usize,
}

impl BitRange {
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }
}

impl From<(usize, usize)> for BitRange {
    fn from((start, len): (usize, usize)) -> Self {
        Self::new(start, len)
    }
}

/// Check that a single field is at most 64 bits wide.
#[inline(always)]
pub(crate) fn check_width(num_bits: usize) -> Result<(), CodecError> {
    if num_bits > MAX_FIELD_BITS {
        return Err(CodecError::FieldTooWide { num_bits });
    }
    Ok(())
}

/// Check that `[start, start + num_bits)` lies within `limit` bits.
#[inline(always)]
pub(crate) fn check_range(start: usize, num_bits: usize, limit: usize) -> Result<(), CodecError> {
    match start.checked_add(num_bits) {
        Some(stop) if stop <= limit => Ok(()),
        _ => Err(CodecError::Range {
            start,
            num_bits,
            limit,
        }),
    }
}
