/*
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Helpers, textual formats and debug tools.

The functions in [`twos`] perform the reinterpretation of two's complement
bit patterns, sign extension, range limits and the rounding of scaled reals;
they are the building blocks of the [codes](crate::codes).

[`raw_text`] implements the hex-word textual interchange format of bit
buffers, and `dump` the diagnostic report of navigation messages.

[`CountBitWrite`] keeps track of the number of bits written to a
[`BitFieldWrite`](crate::traits::BitFieldWrite), optionally printing on
standard error the operations performed on it.

*/

pub mod twos;
pub use twos::*;

pub mod raw_text;
pub use raw_text::{RawBits, RawText, WORD_BITS};

mod dump;
pub use dump::DUMP_WORDS_PER_LINE;

mod count;
pub use count::*;
