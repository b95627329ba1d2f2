/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Two's complement helpers.
//!
//! All conversions between signed values and their bit patterns go through
//! [`to_bits`] and [`from_bits`]; no other code in the crate casts between
//! `i64` and `u64`.

use num_traits::ToPrimitive;

/// Return the two's complement bit pattern of `value`.
#[inline(always)]
#[must_use]
pub const fn to_bits(value: i64) -> u64 {
    value as u64
}

/// Return the signed value whose two's complement bit pattern is `bits`.
#[inline(always)]
#[must_use]
pub const fn from_bits(bits: u64) -> i64 {
    bits as i64
}

/// Return a mask with the lowest `num_bits` bits set.
#[inline(always)]
#[must_use]
pub const fn low_mask(num_bits: usize) -> u64 {
    if num_bits >= 64 {
        u64::MAX
    } else {
        (1 << num_bits) - 1
    }
}

/// Interpret the lowest `num_bits` bits of `value` as a two's complement
/// number and extend its sign to 64 bits.
///
/// A width of zero yields zero.
#[inline]
#[must_use]
pub const fn sign_extend(value: u64, num_bits: usize) -> i64 {
    if num_bits == 0 {
        return 0;
    }
    if num_bits >= 64 {
        return from_bits(value);
    }
    let shift = 64 - num_bits as u32;
    from_bits(value << shift) >> shift
}

/// Return the largest unsigned value representable in `num_bits` bits.
#[inline(always)]
#[must_use]
pub const fn max_unsigned(num_bits: usize) -> u64 {
    low_mask(num_bits)
}

/// Return the inclusive range of two's complement values representable in
/// `num_bits` bits. A width of zero represents only zero.
#[inline]
#[must_use]
pub const fn signed_bounds(num_bits: usize) -> (i64, i64) {
    match num_bits {
        0 => (0, 0),
        n if n >= 64 => (i64::MIN, i64::MAX),
        n => {
            let max = (1_i64 << (n - 1)) - 1;
            (-max - 1, max)
        }
    }
}

/// Return `2^power2`.
#[inline(always)]
#[must_use]
pub fn pow2(power2: i32) -> f64 {
    2.0_f64.powi(power2)
}

/// Divide `value` by `2^power2` and round to the nearest integer, with ties
/// rounded away from zero.
///
/// Returns `None` if the result is not finite or does not fit an `i64`.
#[must_use]
pub fn scale_to_i64(value: f64, power2: i32) -> Option<i64> {
    round_half_away(value / pow2(power2)).to_i64()
}

/// Like [`scale_to_i64`], but for unsigned results.
///
/// Returns `None` if the rounded result is negative, not finite, or does not
/// fit a `u64`.
#[must_use]
pub fn scale_to_u64(value: f64, power2: i32) -> Option<u64> {
    round_half_away(value / pow2(power2)).to_u64()
}

#[inline(always)]
fn round_half_away(value: f64) -> f64 {
    if value >= 0.0 {
        (value + 0.5).trunc()
    } else {
        (value - 0.5).trunc()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_bit_patterns() {
        assert_eq!(to_bits(-1), u64::MAX);
        assert_eq!(to_bits(i64::MIN), 0x8000_0000_0000_0000);
        assert_eq!(from_bits(0xFFFF_FFFF_FFFF_FFFE), -2);
        assert_eq!(from_bits(0x7FFF_FFFF_FFFF_FFFF), i64::MAX);
        for value in [0, 1, -1, 12345, -98765, i64::MIN, i64::MAX] {
            assert_eq!(from_bits(to_bits(value)), value);
        }
    }

    #[test]
    fn test_sign_extend() {
        assert_eq!(sign_extend(0b111, 3), -1);
        assert_eq!(sign_extend(0b100, 3), -4);
        assert_eq!(sign_extend(0b011, 3), 3);
        assert_eq!(sign_extend(0x80, 8), -128);
        assert_eq!(sign_extend(0x7F, 8), 127);
        assert_eq!(sign_extend(1, 1), -1);
        assert_eq!(sign_extend(u64::MAX, 64), -1);
        assert_eq!(sign_extend(u64::MAX, 0), 0);
    }

    #[test]
    fn test_bounds() {
        assert_eq!(max_unsigned(0), 0);
        assert_eq!(max_unsigned(8), 255);
        assert_eq!(max_unsigned(64), u64::MAX);
        assert_eq!(signed_bounds(0), (0, 0));
        assert_eq!(signed_bounds(1), (-1, 0));
        assert_eq!(signed_bounds(8), (-128, 127));
        assert_eq!(signed_bounds(64), (i64::MIN, i64::MAX));
    }

    #[test]
    fn test_rounding() {
        assert_eq!(scale_to_i64(2.5, 0), Some(3));
        assert_eq!(scale_to_i64(-2.5, 0), Some(-3));
        assert_eq!(scale_to_i64(2.49, 0), Some(2));
        assert_eq!(scale_to_i64(-2.49, 0), Some(-2));
        assert_eq!(scale_to_i64(0.75, -2), Some(3));
        assert_eq!(scale_to_i64(f64::NAN, 0), None);
        assert_eq!(scale_to_i64(f64::INFINITY, 0), None);
        assert_eq!(scale_to_u64(-0.3, 0), Some(0));
        assert_eq!(scale_to_u64(-0.7, 0), None);
        assert_eq!(scale_to_u64(1e30, 0), None);
    }
}
