/*
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Traits for reading and writing the field encodings of navigation messages.

Each encoding is implemented as a pair of traits for reading and writing
(e.g., [`IntRead`] and [`IntWrite`]). The traits for reading depend on
[`BitFieldRead`](crate::traits::BitFieldRead), whereas the traits for writing
depend on [`BitFieldWrite`](crate::traits::BitFieldWrite); all methods are
provided, and blanket implementations make them available on every bit
buffer.

Fields are addressed by a start bit and a width. Reads may happen in any
order; writes always append at the end of the committed bits, the only
exception being [`IntWrite::insert_unsigned`].

| Encoding | Read | Write |
|---|---|---|
| unsigned integer, integer scale | [`IntRead::read_unsigned`] | [`IntWrite::append_unsigned`] |
| two's complement, integer scale | [`IntRead::read_signed`] | [`IntWrite::append_signed`] |
| unsigned, scaled by `2^power2` | [`RealRead::read_unsigned_real`] | [`RealWrite::append_unsigned_real`] |
| two's complement, scaled by `2^power2` | [`RealRead::read_signed_real`] | [`RealWrite::append_signed_real`] |
| as above, in semicircles | [`RealRead::read_semicircles`] | [`RealWrite::append_semicircles`] |
| sign-magnitude | [`SignMagRead`] | [`SignMagWrite`] |
| text | [`TextRead::read_text`] | [`TextWrite::append_text`] |
| split fields | [`SplitRead`] | |

Every write checks that the value, once scaled, fits the field before
modifying the buffer.

*/

pub mod int;
pub use int::{IntRead, IntWrite};

pub mod real;
pub use real::{RealRead, RealWrite};

pub mod sign_mag;
pub use sign_mag::{SignMagRead, SignMagWrite};

pub mod text;
pub use text::{CHAR_BITS, TextRead, TextWrite, is_nav_char};

pub mod split;
pub use split::SplitRead;
