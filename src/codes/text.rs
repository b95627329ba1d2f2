/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Fixed-length text fields.
//!
//! Each character occupies eight bits. Only a restricted set of characters
//! can be transmitted: see [`is_nav_char`]. Strings shorter than the field
//! are padded with spaces, and longer strings are truncated.

use crate::error::CodecError;
use crate::traits::*;

/// Bits per character of a text field.
pub const CHAR_BITS: usize = 8;

/// Return whether `ch` can be transmitted in a text field.
///
/// The allowed characters are the uppercase letters, the digits, `:`,
/// space, `"`, `'`, `+`, the range `-` to `/`, and `ø` (code 0xF8).
#[inline]
pub const fn is_nav_char(ch: char) -> bool {
    matches!(
        ch,
        'A'..='Z' | '0'..=':' | ' ' | '"' | '\'' | '+' | '-'..='/' | '\u{F8}'
    )
}

/// Trait for reading text fields.
pub trait TextRead: BitFieldRead {
    /// Read `num_chars` characters starting at bit `start`.
    ///
    /// Every byte is significant: there is no terminator, and bytes are
    /// mapped to the characters with the same code point.
    fn read_text(&self, start: usize, num_chars: usize) -> Result<String, CodecError> {
        (0..num_chars)
            .map(|i| -> Result<char, CodecError> {
                let byte = self.read_bits(start + i * CHAR_BITS, CHAR_BITS)?;
                Ok(char::from(byte as u8))
            })
            .collect()
    }
}

/// Trait for writing text fields.
pub trait TextWrite: BitFieldWrite {
    /// Append `text` as a field of `num_chars` characters and return the
    /// number of bits written.
    ///
    /// Characters past `num_chars` are ignored; missing characters are
    /// replaced by spaces. If a character to be written is not allowed the
    /// buffer is left unchanged.
    fn append_text(&mut self, text: &str, num_chars: usize) -> Result<usize, CodecError> {
        if let Some((position, ch)) = text
            .chars()
            .take(num_chars)
            .enumerate()
            .find(|&(_, ch)| !is_nav_char(ch))
        {
            log::debug!("Character {:?} at position {} cannot be transmitted", ch, position);
            return Err(CodecError::InvalidCharacter { ch, position });
        }
        let padding = core::iter::repeat(' ');
        for ch in text.chars().chain(padding).take(num_chars) {
            self.append_bits(u64::from(ch), CHAR_BITS)?;
        }
        Ok(num_chars * CHAR_BITS)
    }
}

impl<B: BitFieldRead + ?Sized> TextRead for B {}
impl<B: BitFieldWrite + ?Sized> TextWrite for B {}

#[cfg(test)]
mod test {
    use super::*;
    use crate::codes::IntRead;
    use crate::impls::BitBuffer;

    #[test]
    fn test_padding() -> Result<(), CodecError> {
        let mut buffer = BitBuffer::new();
        assert_eq!(buffer.append_text("AB", 4)?, 32);
        assert_eq!(buffer.read_text(0, 4)?, "AB  ");
        assert_eq!(buffer.read_unsigned(0, 32, 1)?, 0x4142_2020);
        Ok(())
    }

    #[test]
    fn test_truncation() -> Result<(), CodecError> {
        let mut buffer = BitBuffer::new();
        buffer.append_text("ABCDE", 3)?;
        assert_eq!(buffer.bits_used(), 24);
        assert_eq!(buffer.read_text(0, 3)?, "ABC");
        // truncated characters are not checked
        buffer.append_text("XYz", 2)?;
        assert_eq!(buffer.read_text(24, 2)?, "XY");
        Ok(())
    }

    #[test]
    fn test_invalid() -> Result<(), CodecError> {
        let mut buffer = BitBuffer::new();
        buffer.append_text("OK", 2)?;
        assert_eq!(
            buffer.append_text("ABa", 3),
            Err(CodecError::InvalidCharacter { ch: 'a', position: 2 })
        );
        assert_eq!(buffer.bits_used(), 16);
        assert!(buffer.append_text("!", 1).is_err());
        assert!(buffer.append_text("\u{100}", 1).is_err());
        assert_eq!(buffer.bits_used(), 16);
        Ok(())
    }

    #[test]
    fn test_charset() -> Result<(), CodecError> {
        let allowed = "ABCXYZ0189: \"'+-./\u{F8}";
        assert!(allowed.chars().all(is_nav_char));
        assert!("abz!#*,;<=>?@[]_~\t".chars().all(|ch| !is_nav_char(ch)));

        let mut buffer = BitBuffer::new();
        buffer.append_text(allowed, allowed.chars().count())?;
        assert_eq!(buffer.read_text(0, allowed.chars().count())?, allowed);
        Ok(())
    }

    #[test]
    fn test_read_bounds() -> Result<(), CodecError> {
        let mut buffer = BitBuffer::new();
        buffer.append_text("GPS", 3)?;
        assert!(buffer.read_text(8, 3).is_err());
        assert_eq!(buffer.read_text(8, 2)?, "PS");
        assert_eq!(buffer.read_text(24, 0)?, "");
        Ok(())
    }
}
