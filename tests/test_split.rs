/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use nav_bits::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_adjacent() -> Result<()> {
    let mut bits = BitBuffer::new();
    bits.append_unsigned(0xAB, 8, 1)?;
    bits.append_unsigned(0xCD, 8, 1)?;
    let ranges = [BitRange::new(0, 8), BitRange::new(8, 8)];
    assert_eq!(bits.read_split_unsigned(&ranges, 1)?, 0xABCD);
    assert_eq!(bits.read_split_signed(&ranges, 1)?, 0xABCD_u64 as i16 as i64);
    Ok(())
}

#[test]
fn test_random_split() -> Result<()> {
    let mut r = SmallRng::seed_from_u64(0);
    for _ in 0..1_000 {
        let num_bits = r.random_range(2..=64);
        let (min, max) = signed_bounds(num_bits);
        let value = r.random_range(min..=max);
        let high_bits = r.random_range(1..num_bits);
        let low_bits = num_bits - high_bits;
        let raw = to_bits(value) & low_mask(num_bits);

        // low part first, with a gap between the pieces
        let gap = r.random_range(0..20);
        let mut bits = BitBuffer::new();
        bits.append_bits(raw & low_mask(low_bits), low_bits)?;
        bits.append_bits(0, gap)?;
        bits.append_bits(raw >> low_bits, high_bits)?;

        let ranges: [BitRange; 2] = [
            (low_bits + gap, high_bits).into(),
            (0, low_bits).into(),
        ];
        assert_eq!(bits.read_split_signed(&ranges, 1)?, value);
        assert_eq!(bits.read_split_unsigned(&ranges, 1)?, raw);
        assert_eq!(
            bits.read_split_signed_real(&ranges, -5)?,
            value as f64 * pow2(-5)
        );
    }
    Ok(())
}

#[test]
fn test_split_errors() -> Result<()> {
    let mut bits = BitBuffer::new();
    bits.append_bits(u64::MAX, 64)?;
    bits.append_bits(u64::MAX, 64)?;
    let too_wide = [BitRange::new(0, 40), BitRange::new(40, 40)];
    assert!(matches!(
        bits.read_split_unsigned(&too_wide, 1),
        Err(CodecError::FieldTooWide { num_bits: 80 })
    ));
    let past_end = [BitRange::new(0, 8), BitRange::new(125, 8)];
    assert!(matches!(
        bits.read_split_unsigned(&past_end, 1),
        Err(CodecError::Range { .. })
    ));
    assert_eq!(bits.read_split_unsigned(&[], 1)?, 0);
    Ok(())
}
