/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use nav_bits::prelude::*;

/// A GPS LNAV subframe header: preamble, TLM message, TOW count, flags and
/// subframe id.
fn lnav_header(tow: u64, subframe: u64) -> Result<NavBits> {
    let mut msg = NavBits::new(
        "G14".parse()?,
        "C1C".parse()?,
        TransmitTime::new(2200, (tow * 6) as f64),
    )
    .with_rx_id("ABCD");
    msg.append_unsigned(0x8B, 8, 1)?;
    msg.append_unsigned(0x1234, 14, 1)?;
    msg.append_unsigned(0, 2, 1)?;
    msg.append_unsigned(tow * 6, 17, 6)?;
    msg.append_unsigned(0, 2, 1)?;
    msg.append_unsigned(subframe, 3, 1)?;
    msg.append_unsigned(0, 2, 1)?;
    Ok(msg)
}

#[test]
fn test_header() -> Result<()> {
    let msg = lnav_header(1000, 3)?;
    assert_eq!(msg.num_bits(), 48);
    assert_eq!(msg.read_unsigned(24, 17, 6)?, 6000);
    assert_eq!(msg.read_unsigned(43, 3, 1)?, 3);
    Ok(())
}

#[test]
fn test_time_tolerance() -> Result<()> {
    let a = lnav_header(1000, 3)?;
    let mut b = a.clone();
    b.set_transmit_time(TransmitTime::new(2200, 6000.0005));
    assert_eq!(a, b);
    b.set_transmit_time(TransmitTime::new(2200, 6000.01));
    assert_ne!(a, b);
    assert!(a.matches(&b, 0, None, MatchFlags::ALL - MatchFlags::TIME));
    Ok(())
}

#[test]
fn test_dedup() -> Result<()> {
    let mut messages = vec![
        lnav_header(1001, 4)?,
        lnav_header(1000, 3)?,
        lnav_header(1001, 4)?,
        lnav_header(1000, 3)?,
        lnav_header(1002, 5)?,
    ];
    messages.sort_by(|a, b| {
        if a.bits_lt(b) {
            std::cmp::Ordering::Less
        } else if b.bits_lt(a) {
            std::cmp::Ordering::Greater
        } else {
            std::cmp::Ordering::Equal
        }
    });
    messages.dedup();
    assert_eq!(messages.len(), 3);
    let tows: Vec<u64> = messages
        .iter()
        .map(|msg| msg.read_unsigned(24, 17, 6))
        .collect::<Result<_, _>>()?;
    assert_eq!(tows, vec![6000, 6006, 6012]);
    Ok(())
}

#[test]
fn test_patch_field() -> Result<()> {
    let mut msg = lnav_header(1000, 3)?;
    let orig = msg.clone();
    msg.insert_unsigned(6006, 24, 17, 6)?;
    assert_eq!(msg.read_unsigned(24, 17, 6)?, 6006);
    assert!(msg.match_bits(&orig, 0, Some(23)));
    assert!(msg.match_bits(&orig, 41, None));
    assert!(!msg.match_bits(&orig, 24, Some(40)));

    assert!(msg.insert_unsigned(1 << 17, 24, 17, 1).is_err());
    assert!(msg.insert_unsigned(0, 40, 17, 1).is_err());

    msg.copy_bits_from(&orig, 24, Some(40))?;
    assert_eq!(msg, orig);

    let mut short = orig.clone();
    short.reset_bits_used(40);
    assert!(matches!(
        msg.copy_bits_from(&short, 0, None),
        Err(CodecError::SizeMismatch {
            expected: 48,
            found: 40
        })
    ));
    Ok(())
}

#[test]
fn test_rewind() -> Result<()> {
    let mut msg = lnav_header(1000, 3)?;
    let mut count = CountBitWrite::<_>::new(msg.bits().clone());
    count.append_unsigned(0x3FF, 10, 1)?;
    count.append_text("NAV", 3)?;
    assert_eq!(count.bits_written, 34);

    msg.reset_bits_used(41);
    msg.append_unsigned(5, 3, 1)?;
    msg.append_unsigned(0, 4, 1)?;
    assert_eq!(msg.num_bits(), 48);
    assert_eq!(msg.read_unsigned(41, 3, 1)?, 5);

    msg.invert();
    assert_eq!(msg.read_unsigned(0, 8, 1)?, 0x74);
    assert_eq!(msg.read_unsigned(41, 3, 1)?, 2);
    Ok(())
}
