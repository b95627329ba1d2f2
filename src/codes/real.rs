/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Real values scaled by a power of two.
//!
//! A real field of scale factor `2^power2` stores the integer nearest to
//! `value / 2^power2`, with ties rounded away from zero. Angles are usually
//! transmitted in semicircles (half turns), so that a field of scale factor
//! `2^-31` semicircles covers `[-π, π)` radians; the `semicircles` methods
//! take and return radians.

use core::f64::consts::PI;

use super::int::{check_signed, check_unsigned, read_sign_extended};
use crate::error::CodecError;
use crate::traits::*;
use crate::utils::{pow2, scale_to_i64, scale_to_u64, to_bits};

/// Trait for reading real fields.
///
/// This is the trait you should usually pull in scope to read reals.
pub trait RealRead: BitFieldRead {
    /// Read an unsigned field and multiply it by `2^power2`.
    #[inline]
    fn read_unsigned_real(
        &self,
        start: usize,
        num_bits: usize,
        power2: i32,
    ) -> Result<f64, CodecError> {
        Ok(self.read_bits(start, num_bits)? as f64 * pow2(power2))
    }

    /// Read a two's complement field and multiply it by `2^power2`.
    #[inline]
    fn read_signed_real(
        &self,
        start: usize,
        num_bits: usize,
        power2: i32,
    ) -> Result<f64, CodecError> {
        Ok(read_sign_extended(self, start, num_bits)? as f64 * pow2(power2))
    }

    /// Read a two's complement field in semicircles of scale factor
    /// `2^power2` and return its value in radians.
    #[inline]
    fn read_semicircles(
        &self,
        start: usize,
        num_bits: usize,
        power2: i32,
    ) -> Result<f64, CodecError> {
        Ok(self.read_signed_real(start, num_bits, power2)? * PI)
    }
}

/// Trait for writing real fields.
///
/// This is the trait you should usually pull in scope to write reals.
pub trait RealWrite: BitFieldWrite {
    /// Append `value` as an unsigned field of scale factor `2^power2` and
    /// return the number of bits written.
    #[inline]
    fn append_unsigned_real(
        &mut self,
        value: f64,
        num_bits: usize,
        power2: i32,
    ) -> Result<usize, CodecError> {
        check_width(num_bits)?;
        let out = scale_to_u64(value, power2).ok_or_else(|| {
            log::debug!("{} cannot be scaled by 2^{} into an unsigned field", value, power2);
            CodecError::out_of_range(value, num_bits)
        })?;
        self.append_bits(check_unsigned(out, num_bits)?, num_bits)
    }

    /// Append `value` as a two's complement field of scale factor `2^power2`
    /// and return the number of bits written.
    #[inline]
    fn append_signed_real(
        &mut self,
        value: f64,
        num_bits: usize,
        power2: i32,
    ) -> Result<usize, CodecError> {
        check_width(num_bits)?;
        let out = scale_to_i64(value, power2).ok_or_else(|| {
            log::debug!("{} cannot be scaled by 2^{} into a signed field", value, power2);
            CodecError::out_of_range(value, num_bits)
        })?;
        self.append_bits(to_bits(check_signed(out, num_bits)?), num_bits)
    }

    /// Append an angle in `radians` as a two's complement field in
    /// semicircles of scale factor `2^power2` and return the number of bits
    /// written.
    #[inline]
    fn append_semicircles(
        &mut self,
        radians: f64,
        num_bits: usize,
        power2: i32,
    ) -> Result<usize, CodecError> {
        self.append_signed_real(radians / PI, num_bits, power2)
    }
}

impl<B: BitFieldRead + ?Sized> RealRead for B {}
impl<B: BitFieldWrite + ?Sized> RealWrite for B {}
