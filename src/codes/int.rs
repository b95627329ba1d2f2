/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Unsigned and two's complement integers.
//!
//! A field stores `value / scale`; reading multiplies the stored value by
//! `scale` again. The scale is the least significant unit of the field.

use crate::error::CodecError;
use crate::traits::*;
use crate::utils::{max_unsigned, sign_extend, signed_bounds, to_bits};

/// Trait for reading integer fields.
///
/// This is the trait you should usually pull in scope to read integers.
pub trait IntRead: BitFieldRead {
    /// Read an unsigned field and multiply it by `scale`.
    ///
    /// The multiplication wraps on overflow.
    #[inline]
    fn read_unsigned(&self, start: usize, num_bits: usize, scale: u64) -> Result<u64, CodecError> {
        Ok(self.read_bits(start, num_bits)?.wrapping_mul(scale))
    }

    /// Read a two's complement field, extend its sign and multiply it by
    /// `scale`.
    ///
    /// The multiplication wraps on overflow.
    #[inline]
    fn read_signed(&self, start: usize, num_bits: usize, scale: i64) -> Result<i64, CodecError> {
        Ok(read_sign_extended(self, start, num_bits)?.wrapping_mul(scale))
    }
}

/// Trait for writing integer fields.
///
/// This is the trait you should usually pull in scope to write integers.
pub trait IntWrite: BitFieldWrite {
    /// Append `value / scale` (integer division) as an unsigned field of
    /// `num_bits` bits and return the number of bits written.
    #[inline]
    fn append_unsigned(
        &mut self,
        value: u64,
        num_bits: usize,
        scale: u64,
    ) -> Result<usize, CodecError> {
        let out = scale_unsigned(value, num_bits, scale)?;
        self.append_bits(out, num_bits)
    }

    /// Append `value / scale` (integer division, truncating toward zero) as a
    /// two's complement field of `num_bits` bits and return the number of
    /// bits written.
    #[inline]
    fn append_signed(
        &mut self,
        value: i64,
        num_bits: usize,
        scale: i64,
    ) -> Result<usize, CodecError> {
        check_width(num_bits)?;
        let out = value
            .checked_div(scale)
            .ok_or_else(|| CodecError::out_of_range(value, num_bits))?;
        self.append_bits(to_bits(check_signed(out, num_bits)?), num_bits)
    }

    /// Overwrite `num_bits` committed bits at `start` with `value / scale`.
    ///
    /// The number of committed bits does not change. This is not the way
    /// messages are usually built, but it is handy to patch a single field of
    /// an existing message.
    fn insert_unsigned(
        &mut self,
        value: u64,
        start: usize,
        num_bits: usize,
        scale: u64,
    ) -> Result<(), CodecError> {
        check_range(start, num_bits, self.bits_used())?;
        let out = scale_unsigned(value, num_bits, scale)?;
        self.insert_bits(out, start, num_bits)
    }
}

impl<B: BitFieldRead + ?Sized> IntRead for B {}
impl<B: BitFieldWrite + ?Sized> IntWrite for B {}

#[inline(always)]
pub(crate) fn read_sign_extended<B: BitFieldRead + ?Sized>(
    backend: &B,
    start: usize,
    num_bits: usize,
) -> Result<i64, CodecError> {
    Ok(sign_extend(backend.read_bits(start, num_bits)?, num_bits))
}

#[inline(always)]
fn scale_unsigned(value: u64, num_bits: usize, scale: u64) -> Result<u64, CodecError> {
    check_width(num_bits)?;
    let out = value
        .checked_div(scale)
        .ok_or_else(|| CodecError::out_of_range(value, num_bits))?;
    check_unsigned(out, num_bits)
}

/// Check that `value` fits an unsigned field of `num_bits` bits.
#[inline(always)]
pub(crate) fn check_unsigned(value: u64, num_bits: usize) -> Result<u64, CodecError> {
    if value > max_unsigned(num_bits) {
        log::debug!("{} does not fit {} unsigned bits", value, num_bits);
        return Err(CodecError::out_of_range(value, num_bits));
    }
    Ok(value)
}

/// Check that `value` fits a two's complement field of `num_bits` bits.
#[inline(always)]
pub(crate) fn check_signed(value: i64, num_bits: usize) -> Result<i64, CodecError> {
    let (min, max) = signed_bounds(num_bits);
    if value < min || value > max {
        log::debug!("{} does not fit {} signed bits", value, num_bits);
        return Err(CodecError::out_of_range(value, num_bits));
    }
    Ok(value)
}
