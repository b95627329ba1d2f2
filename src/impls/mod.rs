/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Implementations of bit buffers and navigation messages.

[`BitBuffer`] stores bits in memory, most significant bit first, and
implements [`BitFieldRead`](crate::traits::BitFieldRead) and
[`BitFieldWrite`](crate::traits::BitFieldWrite), so that all
[codes](crate::codes) can be used on it. It keeps track separately of the
allocated bits and of the committed bits: range reads are checked against
the committed bits, unless a different [`BoundsPolicy`](crate::traits::BoundsPolicy)
is selected.

[`NavBits`] couples a buffer with the metadata of a navigation message;
messages can be compared field by field using [`MatchFlags`].

*/

mod bit_buffer;
pub use bit_buffer::{BitBuffer, DEFAULT_CAPACITY};

mod nav_bits;
pub use nav_bits::{NavBits, ParityStatus};

mod matching;
pub use matching::{MatchFlags, TIME_EPSILON};
