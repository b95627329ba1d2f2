/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::prelude::*;
use arbitrary::Arbitrary;

const DEBUG: bool = false;

macro_rules! debug {
    ($($arg:tt)*) => {
        if DEBUG {
            print!($($arg)*);
        }
    };
}

macro_rules! debugln {
    ($($arg:tt)*) => {
        if DEBUG {
            println!($($arg)*);
        }
    };
}

#[derive(Arbitrary, Debug, Clone)]
pub struct FuzzCase {
    capacity: u16,
    commands: Vec<RandomCommand>,
}

#[derive(Arbitrary, Debug, Clone)]
enum RandomCommand {
    Bits(u64, usize),
    Unsigned(u64, usize),
    Signed(i64, usize),
    SignMag(i64, usize),
    Text(String, usize),
    Insert(u64, usize, usize),
    Reset(usize),
    Invert,
    Truncate,
}

fn push_model(model: &mut Vec<bool>, value: u64, n_bits: usize) {
    for i in (0..n_bits).rev() {
        model.push((value >> i) & 1 == 1);
    }
}

fn read_model(model: &[bool], start: usize, n_bits: usize) -> u64 {
    model[start..start + n_bits]
        .iter()
        .fold(0, |acc, &bit| (acc << 1) | u64::from(bit))
}

/// Run a sequence of random writes on a [`BitBuffer`] and check the result
/// against a vector of booleans.
pub fn harness(data: FuzzCase) {
    let mut data = data;
    for command in &mut data.commands {
        match command {
            RandomCommand::Bits(value, n_bits) => {
                *n_bits %= MAX_FIELD_BITS + 1;
                *value &= low_mask(*n_bits);
            }
            RandomCommand::Unsigned(_, n_bits)
            | RandomCommand::Signed(_, n_bits)
            | RandomCommand::SignMag(_, n_bits)
            | RandomCommand::Insert(_, _, n_bits) => {
                *n_bits %= MAX_FIELD_BITS + 1;
            }
            RandomCommand::Text(_, num_chars) => {
                *num_chars %= 16;
            }
            _ => {}
        };
    }
    debugln!("{:#?}", data);

    let mut buffer = BitBuffer::with_capacity(data.capacity as usize % 1024);
    let mut model: Vec<bool> = vec![];

    for command in &data.commands {
        debug!("{:?} ", command);
        match command {
            RandomCommand::Bits(value, n_bits) => {
                assert_eq!(buffer.append_bits(*value, *n_bits).ok(), Some(*n_bits));
                push_model(&mut model, *value, *n_bits);
            }
            RandomCommand::Unsigned(value, n_bits) => {
                let fits = *value <= max_unsigned(*n_bits);
                assert_eq!(buffer.append_unsigned(*value, *n_bits, 1).is_ok(), fits);
                if fits {
                    push_model(&mut model, *value, *n_bits);
                }
            }
            RandomCommand::Signed(value, n_bits) => {
                let (min, max) = signed_bounds(*n_bits);
                let fits = (min..=max).contains(value);
                assert_eq!(buffer.append_signed(*value, *n_bits, 1).is_ok(), fits);
                if fits {
                    push_model(&mut model, to_bits(*value) & low_mask(*n_bits), *n_bits);
                }
            }
            RandomCommand::SignMag(value, n_bits) => {
                let magnitude = value.unsigned_abs();
                let magnitude_bits = n_bits.saturating_sub(1);
                let fits = magnitude <= max_unsigned(magnitude_bits);
                assert_eq!(buffer.append_sign_mag(*value, *n_bits, 1).is_ok(), fits);
                if fits {
                    let sign = u64::from(*value < 0);
                    push_model(&mut model, (sign << magnitude_bits) | magnitude, *n_bits);
                }
            }
            RandomCommand::Text(text, num_chars) => {
                let valid = text.chars().take(*num_chars).all(is_nav_char);
                assert_eq!(buffer.append_text(text, *num_chars).is_ok(), valid);
                if valid {
                    for ch in text.chars().chain(core::iter::repeat(' ')).take(*num_chars) {
                        push_model(&mut model, u64::from(ch), CHAR_BITS);
                    }
                }
            }
            RandomCommand::Insert(value, start, n_bits) => {
                let fits = *start <= model.len()
                    && *n_bits <= model.len() - *start
                    && *value <= low_mask(*n_bits);
                assert_eq!(buffer.insert_bits(*value, *start, *n_bits).is_ok(), fits);
                if fits {
                    for i in 0..*n_bits {
                        model[*start + i] = (*value >> (*n_bits - 1 - i)) & 1 == 1;
                    }
                }
            }
            RandomCommand::Reset(bits_used) => {
                let bits_used = *bits_used % (model.len() + 1);
                buffer.reset_bits_used(bits_used);
                model.truncate(bits_used);
            }
            RandomCommand::Invert => {
                buffer.invert();
                model.iter_mut().for_each(|bit| *bit = !*bit);
            }
            RandomCommand::Truncate => {
                buffer.truncate_to_used();
                assert_eq!(buffer.len(), model.len());
            }
        };
        debugln!("-> {}", model.len());
        assert_eq!(buffer.bits_used(), model.len());
    }

    assert!(buffer.iter().eq(model.iter().copied()));
    let mut start = 0;
    while start < model.len() {
        let n_bits = (model.len() - start).min(MAX_FIELD_BITS);
        assert_eq!(
            buffer.read_bits(start, n_bits).ok(),
            Some(read_model(&model, start, n_bits))
        );
        assert_eq!(buffer.read_bit(start).ok(), Some(model[start]));
        start += 7;
    }
    assert!(buffer.read_bits(model.len(), 1).is_err());

    let text = buffer.raw_record(4, ',').to_string();
    let parsed = BitBuffer::from_raw_text(&text);
    assert_eq!(parsed.as_ref().ok(), Some(&buffer), "{}", text);
}
