/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Hex-word textual interchange.
//!
//! A record is a decimal bit count followed by `ceil(count / 32)` words, each
//! written as `0x` (or `0X`) and eight hex digits, most significant bit
//! first. Tokens are separated by whitespace or commas, so that CSV files can
//! be read directly. The last word may contain padding bits, which are
//! discarded:
//! ```text
//! 300 0x22C3550C 0x0D2A3A9C 0x...
//! ```

use core::fmt;
use core::str::FromStr;

use crate::error::CodecError;
use crate::impls::{BitBuffer, DEFAULT_CAPACITY};
use crate::traits::*;

/// Bits per word in the textual format.
pub const WORD_BITS: usize = 32;

/// The raw content of a buffer: the number of committed bits and the
/// committed bits as left-justified 32-bit words.
///
/// This is the serialized form of [`BitBuffer`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawBits {
    pub bits_used: usize,
    pub words: Vec<u32>,
}

impl From<BitBuffer> for RawBits {
    fn from(bits: BitBuffer) -> Self {
        RawBits {
            bits_used: bits.bits_used(),
            words: bits.to_words32(),
        }
    }
}

impl TryFrom<RawBits> for BitBuffer {
    type Error = CodecError;

    fn try_from(raw: RawBits) -> Result<Self, Self::Error> {
        BitBuffer::from_words32(&raw.words, raw.bits_used)
    }
}

impl BitBuffer {
    /// Build a buffer with `bits_used` committed bits out of left-justified
    /// 32-bit words.
    ///
    /// Exactly `ceil(bits_used / 32)` words must be provided; padding bits
    /// in the last word are ignored.
    pub fn from_words32(words: &[u32], bits_used: usize) -> Result<Self, CodecError> {
        let expected = bits_used.div_ceil(WORD_BITS);
        if words.len() != expected {
            return Err(CodecError::SizeMismatch {
                expected,
                found: words.len(),
            });
        }
        let mut bits = BitBuffer::with_capacity(bits_used.max(DEFAULT_CAPACITY));
        for &word in words {
            bits.append_bits(u64::from(word), WORD_BITS)?;
        }
        bits.reset_bits_used(bits_used);
        Ok(bits)
    }

    /// Parse a record in the hex-word textual format.
    ///
    /// Tokens after the expected words are ignored.
    ///
    /// # Example
    /// ```
    /// use nav_bits::prelude::*;
    ///
    /// let bits = BitBuffer::from_raw_text("40, 0x8B000000, 0xFF000000")?;
    /// assert_eq!(bits.bits_used(), 40);
    /// assert_eq!(bits.read_bits(32, 8)?, 0xFF);
    /// assert!(BitBuffer::from_raw_text("40 0x8B000000").is_err());
    /// # Ok::<(), CodecError>(())
    /// ```
    pub fn from_raw_text(text: &str) -> Result<Self, CodecError> {
        let mut tokens = text
            .split(|c: char| c.is_ascii_whitespace() || c == ',')
            .filter(|token| !token.is_empty());

        let count = tokens
            .next()
            .ok_or_else(|| CodecError::parse("bit count", None))?;
        let bits_used = count
            .parse::<usize>()
            .map_err(|_| CodecError::parse("bit count", Some(count)))?;
        log::trace!("Reading {} bits", bits_used);

        let num_words = bits_used.div_ceil(WORD_BITS);
        let mut words = Vec::new();
        for _ in 0..num_words {
            let token = tokens
                .next()
                .ok_or_else(|| CodecError::parse("hex word", None))?;
            let word = parse_hex_word(token)?;
            log::trace!("Word {}: {:#010X}", words.len(), word);
            words.push(word);
        }
        BitBuffer::from_words32(&words, bits_used)
    }

    /// Return a [`Display`](fmt::Display) adapter rendering the committed
    /// bits as hex words, `words_per_line` words per line, each preceded by
    /// `delimiter` and a space.
    ///
    /// A line break is emitted only if more words follow. If
    /// `words_per_line` is zero all words are on a single line.
    pub fn raw_text(&self, words_per_line: usize, delimiter: char) -> RawText<'_> {
        RawText {
            bits: self,
            words_per_line,
            delimiter,
            with_count: false,
        }
    }

    /// Like [`raw_text`](BitBuffer::raw_text), but prefixes the number of
    /// committed bits, so that the output can be parsed back by
    /// [`from_raw_text`](BitBuffer::from_raw_text).
    pub fn raw_record(&self, words_per_line: usize, delimiter: char) -> RawText<'_> {
        RawText {
            with_count: true,
            ..self.raw_text(words_per_line, delimiter)
        }
    }
}

impl FromStr for BitBuffer {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BitBuffer::from_raw_text(s)
    }
}

fn parse_hex_word(token: &str) -> Result<u32, CodecError> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .filter(|digits| digits.len() == 8 && digits.bytes().all(|b| b.is_ascii_hexdigit()))
        .ok_or_else(|| {
            log::debug!("Malformed hex word {:?}", token);
            CodecError::parse("hex word", Some(token))
        })?;
    u32::from_str_radix(digits, 16).map_err(|_| CodecError::parse("hex word", Some(token)))
}

/// A [`Display`](fmt::Display) adapter returned by
/// [`BitBuffer::raw_text`] and [`BitBuffer::raw_record`].
#[derive(Debug, Clone, Copy)]
pub struct RawText<'a> {
    bits: &'a BitBuffer,
    words_per_line: usize,
    delimiter: char,
    with_count: bool,
}

impl fmt::Display for RawText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.with_count {
            write!(f, "{}", self.bits.bits_used())?;
        }
        for (i, word) in self.bits.to_words32().into_iter().enumerate() {
            if i > 0 && self.words_per_line != 0 && i % self.words_per_line == 0 {
                writeln!(f)?;
            }
            write!(f, "{} 0x{:08X}", self.delimiter, word)?;
        }
        Ok(())
    }
}
