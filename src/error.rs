/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The error type shared by all bit-field operations.

/// Errors raised by the bit buffer and the codecs.
///
/// All errors are raised before the buffer is modified: a failed append or
/// insert leaves the buffer exactly as it was.
#[derive(Debug, Clone, PartialEq)]
pub enum CodecError {
    /// The bit range `[start, start + num_bits)` exceeds `limit`, which is
    /// either the number of committed bits or the allocated length, depending
    /// on the [`BoundsPolicy`](crate::traits::BoundsPolicy).
    Range {
        start: usize,
        num_bits: usize,
        limit: usize,
    },
    /// A single field wider than 64 bits was requested.
    FieldTooWide { num_bits: usize },
    /// The value, after scaling, does not fit the requested bit width.
    ValueOutOfRange { value: String, num_bits: usize },
    /// A character outside the navigation message character set.
    InvalidCharacter { ch: char, position: usize },
    /// The operands of a range copy have different lengths.
    SizeMismatch { expected: usize, found: usize },
    /// Malformed textual input.
    Parse {
        expected: &'static str,
        found: Option<String>,
    },
}

impl CodecError {
    pub(crate) fn out_of_range(value: impl core::fmt::Display, num_bits: usize) -> Self {
        CodecError::ValueOutOfRange {
            value: value.to_string(),
            num_bits,
        }
    }

    pub(crate) fn parse(expected: &'static str, found: Option<&str>) -> Self {
        CodecError::Parse {
            expected,
            found: found.map(str::to_owned),
        }
    }
}

impl core::error::Error for CodecError {}

impl core::fmt::Display for CodecError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CodecError::Range {
                start,
                num_bits,
                limit,
            } => write!(
                f,
                "Requested bits [{}, {}) not present: only {} bits available",
                start,
                start.saturating_add(*num_bits),
                limit
            ),
            CodecError::FieldTooWide { num_bits } => {
                write!(f, "Field of {} bits is wider than 64 bits", num_bits)
            }
            CodecError::ValueOutOfRange { value, num_bits } => write!(
                f,
                "Scaled value {} too large for specified bit length {}",
                value, num_bits
            ),
            CodecError::InvalidCharacter { ch, position } => write!(
                f,
                "Invalid character {:?} at position {} in text string",
                ch, position
            ),
            CodecError::SizeMismatch { expected, found } => write!(
                f,
                "Bit copy requires the same number of packed bits ({} != {})",
                expected, found
            ),
            CodecError::Parse { expected, found } => match found {
                Some(token) => write!(f, "Expected {}, found {:?}", expected, token),
                None => write!(f, "Expected {}, found end of input", expected),
            },
        }
    }
}
