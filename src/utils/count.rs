/*
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::error::CodecError;
use crate::traits::*;

/// Wrapping struct that keep tracks of written bits. Optionally,
/// prints to standard error information about methods called.
///
/// Since all codes are implemented on top of [`BitFieldWrite`], wrapping a
/// buffer makes it possible to follow the fields appended by a message
/// packer, one call at a time.
#[derive(Debug, Clone)]
pub struct CountBitWrite<B: BitFieldWrite, const PRINT: bool = false> {
    bit_write: B,
    /// The number of bits appended or inserted so far on the underlying
    /// [`BitFieldWrite`].
    pub bits_written: usize,
}

impl<B: BitFieldWrite, const PRINT: bool> CountBitWrite<B, PRINT> {
    pub fn new(bit_write: B) -> Self {
        Self {
            bit_write,
            bits_written: 0,
        }
    }

    /// Return a reference to the wrapped buffer.
    pub fn as_inner(&self) -> &B {
        &self.bit_write
    }

    /// Return the wrapped buffer.
    pub fn into_inner(self) -> B {
        self.bit_write
    }
}

impl<B: BitFieldWrite, const PRINT: bool> BitFieldRead for CountBitWrite<B, PRINT> {
    #[inline(always)]
    fn bits_used(&self) -> usize {
        self.bit_write.bits_used()
    }

    #[inline(always)]
    fn read_bit(&self, index: usize) -> Result<bool, CodecError> {
        self.bit_write.read_bit(index)
    }

    #[inline(always)]
    fn read_bits(&self, start: usize, num_bits: usize) -> Result<u64, CodecError> {
        self.bit_write.read_bits(start, num_bits)
    }
}

impl<B: BitFieldWrite, const PRINT: bool> BitFieldWrite for CountBitWrite<B, PRINT> {
    fn append_bits(&mut self, value: u64, num_bits: usize) -> Result<usize, CodecError> {
        self.bit_write.append_bits(value, num_bits).map(|x| {
            self.bits_written += x;
            if PRINT {
                eprintln!(
                    "append_bits({:#016x}, {}) = {} (total = {})",
                    value, num_bits, x, self.bits_written
                );
            }
            x
        })
    }

    fn insert_bits(&mut self, value: u64, start: usize, num_bits: usize) -> Result<(), CodecError> {
        self.bit_write.insert_bits(value, start, num_bits).map(|()| {
            self.bits_written += num_bits;
            if PRINT {
                eprintln!(
                    "insert_bits({:#016x}, {}, {}) (total = {})",
                    value, start, num_bits, self.bits_written
                );
            }
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::codes::*;
    use crate::impls::BitBuffer;

    #[test]
    fn test_count() -> Result<(), CodecError> {
        let mut count = CountBitWrite::<_, true>::new(BitBuffer::new());
        count.append_unsigned(5, 3, 1)?;
        count.append_signed_real(-1.5, 10, -2)?;
        count.append_text("GAL", 3)?;
        assert_eq!(count.bits_written, 37);
        assert!(count.append_unsigned(8, 3, 1).is_err());
        assert_eq!(count.bits_written, 37);
        count.insert_unsigned(7, 0, 3, 1)?;
        assert_eq!(count.bits_written, 40);
        assert_eq!(count.read_unsigned(0, 3, 1)?, 7);

        let buffer = count.into_inner();
        assert_eq!(buffer.bits_used(), 37);
        assert_eq!(buffer.read_text(13, 3)?, "GAL");
        Ok(())
    }
}
