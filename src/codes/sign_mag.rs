/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Sign-magnitude fields.
//!
//! The first bit of the field is the sign (one means negative) and the
//! remaining bits are the magnitude. Some formats (e.g., GLONASS) use this
//! representation instead of two's complement.

use core::f64::consts::PI;

use super::int::check_unsigned;
use crate::error::CodecError;
use crate::traits::*;
use crate::utils::{from_bits, low_mask, pow2, scale_to_i64};

/// Trait for reading sign-magnitude fields.
pub trait SignMagRead: BitFieldRead {
    /// Read a sign-magnitude field and multiply its magnitude by `scale`.
    ///
    /// The multiplication wraps on overflow. A zero-width field reads as zero.
    fn read_sign_mag(&self, start: usize, num_bits: usize, scale: u64) -> Result<i64, CodecError> {
        let raw = self.read_bits(start, num_bits)?;
        if num_bits == 0 {
            return Ok(0);
        }
        let negative = (raw >> (num_bits - 1)) & 1 != 0;
        let magnitude = from_bits((raw & low_mask(num_bits - 1)).wrapping_mul(scale));
        Ok(if negative {
            magnitude.wrapping_neg()
        } else {
            magnitude
        })
    }

    /// Read a sign-magnitude field and multiply it by `2^power2`.
    #[inline]
    fn read_sign_mag_real(
        &self,
        start: usize,
        num_bits: usize,
        power2: i32,
    ) -> Result<f64, CodecError> {
        Ok(self.read_sign_mag(start, num_bits, 1)? as f64 * pow2(power2))
    }

    /// Read a sign-magnitude field in semicircles of scale factor `2^power2`
    /// and return its value in radians.
    #[inline]
    fn read_sign_mag_semicircles(
        &self,
        start: usize,
        num_bits: usize,
        power2: i32,
    ) -> Result<f64, CodecError> {
        Ok(self.read_sign_mag_real(start, num_bits, power2)? * PI)
    }
}

/// Trait for writing sign-magnitude fields.
pub trait SignMagWrite: BitFieldWrite {
    /// Append `value` as a sign-magnitude field whose magnitude is
    /// `|value| / scale`, and return the number of bits written.
    ///
    /// The magnitude must fit in `num_bits - 1` bits. Zero is always written
    /// with a positive sign.
    fn append_sign_mag(
        &mut self,
        value: i64,
        num_bits: usize,
        scale: u64,
    ) -> Result<usize, CodecError> {
        check_width(num_bits)?;
        let magnitude = value
            .unsigned_abs()
            .checked_div(scale)
            .ok_or_else(|| CodecError::out_of_range(value, num_bits))?;
        let magnitude_bits = num_bits.saturating_sub(1);
        check_unsigned(magnitude, magnitude_bits)
            .map_err(|_| CodecError::out_of_range(value, num_bits))?;
        let sign = (value < 0 && magnitude != 0) as u64;
        self.append_bits((sign << magnitude_bits) | magnitude, num_bits)
    }

    /// Append `value` as a sign-magnitude field of scale factor `2^power2`,
    /// rounding to the nearest integer with ties away from zero, and return
    /// the number of bits written.
    fn append_sign_mag_real(
        &mut self,
        value: f64,
        num_bits: usize,
        power2: i32,
    ) -> Result<usize, CodecError> {
        let scaled =
            scale_to_i64(value, power2).ok_or_else(|| CodecError::out_of_range(value, num_bits))?;
        self.append_sign_mag(scaled, num_bits, 1)
            .map_err(|_| CodecError::out_of_range(value, num_bits))
    }

    /// Append an angle in `radians` as a sign-magnitude field in semicircles
    /// of scale factor `2^power2`, and return the number of bits written.
    #[inline]
    fn append_sign_mag_semicircles(
        &mut self,
        radians: f64,
        num_bits: usize,
        power2: i32,
    ) -> Result<usize, CodecError> {
        self.append_sign_mag_real(radians / PI, num_bits, power2)
    }
}

impl<B: BitFieldRead + ?Sized> SignMagRead for B {}
impl<B: BitFieldWrite + ?Sized> SignMagWrite for B {}
