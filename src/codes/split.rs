/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Split fields.
//!
//! Some messages transmit a single logical field as several disjoint bit
//! ranges (e.g., the GPS LNAV issue of data or the Galileo I/NAV words split
//! across pages). The ranges are concatenated most significant first, in the
//! order in which they are given. For signed fields only the first range is
//! sign extended.

use core::f64::consts::PI;

use super::int::read_sign_extended;
use crate::error::CodecError;
use crate::traits::*;
use crate::utils::{from_bits, pow2, to_bits};

/// Trait for reading split fields.
///
/// An empty list of ranges reads as zero.
pub trait SplitRead: BitFieldRead {
    /// Read an unsigned split field and multiply it by `scale`.
    fn read_split_unsigned(&self, ranges: &[BitRange], scale: u64) -> Result<u64, CodecError> {
        let Some((first, rest)) = ranges.split_first() else {
            return Ok(0);
        };
        let acc = self.read_bits(first.start, first.len)?;
        Ok(accumulate(self, acc, first.len, rest)?.wrapping_mul(scale))
    }

    /// Read a two's complement split field and multiply it by `scale`.
    fn read_split_signed(&self, ranges: &[BitRange], scale: i64) -> Result<i64, CodecError> {
        let Some((first, rest)) = ranges.split_first() else {
            return Ok(0);
        };
        let acc = to_bits(read_sign_extended(self, first.start, first.len)?);
        Ok(from_bits(accumulate(self, acc, first.len, rest)?).wrapping_mul(scale))
    }

    /// Read an unsigned split field and multiply it by `2^power2`.
    #[inline]
    fn read_split_unsigned_real(&self, ranges: &[BitRange], power2: i32) -> Result<f64, CodecError> {
        Ok(self.read_split_unsigned(ranges, 1)? as f64 * pow2(power2))
    }

    /// Read a two's complement split field and multiply it by `2^power2`.
    #[inline]
    fn read_split_signed_real(&self, ranges: &[BitRange], power2: i32) -> Result<f64, CodecError> {
        Ok(self.read_split_signed(ranges, 1)? as f64 * pow2(power2))
    }

    /// Read a two's complement split field in semicircles of scale factor
    /// `2^power2` and return its value in radians.
    #[inline]
    fn read_split_semicircles(&self, ranges: &[BitRange], power2: i32) -> Result<f64, CodecError> {
        Ok(self.read_split_signed_real(ranges, power2)? * PI)
    }
}

impl<B: BitFieldRead + ?Sized> SplitRead for B {}

/// Shift in the ranges after the first one.
fn accumulate<B: BitFieldRead + ?Sized>(
    backend: &B,
    mut acc: u64,
    mut total: usize,
    ranges: &[BitRange],
) -> Result<u64, CodecError> {
    for range in ranges {
        total = total.saturating_add(range.len);
        if total > MAX_FIELD_BITS {
            log::debug!("Split field of {} bits or more is too wide", total);
            return Err(CodecError::FieldTooWide { num_bits: total });
        }
        let bits = backend.read_bits(range.start, range.len)?;
        acc = acc.checked_shl(range.len as u32).unwrap_or(0) | bits;
    }
    Ok(acc)
}
