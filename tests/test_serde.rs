/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![cfg(feature = "serde")]

use anyhow::Result;
use nav_bits::prelude::*;

#[test]
fn test_nav_bits() -> Result<()> {
    let mut msg = NavBits::new(
        "E11".parse()?,
        "EC1B".parse()?,
        TransmitTime::new(2300, 12.5),
    )
    .with_rx_id("station");
    msg.set_parity(ParityStatus::Passed);
    msg.append_unsigned(0x2A, 6, 1)?;
    msg.append_text("E11", 3)?;
    msg.append_signed(-7, 33, 1)?;

    let json = serde_json::to_string(&msg)?;
    let back: NavBits = serde_json::from_str(&json)?;
    assert_eq!(back, msg);
    assert_eq!(back.parity(), ParityStatus::Passed);
    assert_eq!(back.read_signed(30, 33, 1)?, -7);
    Ok(())
}

#[test]
fn test_bit_buffer() -> Result<()> {
    let bits: BitBuffer = "40 0x12345678 0x9A000000".parse()?;
    let json = serde_json::to_string(&bits)?;
    assert_eq!(json, r#"{"bits_used":40,"words":[305419896,2583691264]}"#);
    assert_eq!(serde_json::from_str::<BitBuffer>(&json)?, bits);

    // a word count that does not match the bit count is rejected
    assert!(serde_json::from_str::<BitBuffer>(r#"{"bits_used":40,"words":[1]}"#).is_err());
    Ok(())
}
