/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Comparison of navigation messages.
//!
//! Filters that remove duplicate or inconsistent messages need to compare
//! messages on part of their metadata and on part of their bits. Metadata
//! fields are selected by [`MatchFlags`], and bits by an inclusive range.

use core::cmp::Ordering;

use super::NavBits;

bitflags::bitflags! {
    /// The metadata compared by [`NavBits::match_metadata`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MatchFlags: u32 {
        /// Transmit times differ by at most [`TIME_EPSILON`].
        const TIME = 0x01;
        const SAT  = 0x02;
        /// Signal identities are equal (with wildcards).
        const OBS  = 0x04;
        const RX   = 0x08;
        /// Message formats are equal.
        const NAV  = 0x10;
        const ALL  = Self::TIME.bits() | Self::SAT.bits() | Self::OBS.bits()
            | Self::RX.bits() | Self::NAV.bits();
    }
}

impl Default for MatchFlags {
    fn default() -> Self {
        MatchFlags::ALL
    }
}

/// The tolerance, in seconds, of the comparison of transmit times.
///
/// Some systems (e.g., BeiDou) time-tag messages with a resolution of a
/// tenth of a second.
pub const TIME_EPSILON: f64 = 0.001;

impl NavBits {
    /// Compare the metadata selected by `flags`.
    pub fn match_metadata(&self, other: &NavBits, flags: MatchFlags) -> bool {
        if flags.contains(MatchFlags::TIME)
            && (other.transmit_time() - self.transmit_time()).abs() > TIME_EPSILON
        {
            return false;
        }
        if flags.contains(MatchFlags::SAT) && self.sat_id() != other.sat_id() {
            return false;
        }
        if flags.contains(MatchFlags::OBS) && self.obs_id() != other.obs_id() {
            return false;
        }
        if flags.contains(MatchFlags::RX) && self.rx_id() != other.rx_id() {
            return false;
        }
        if flags.contains(MatchFlags::NAV) && self.nav_id().nav_type != other.nav_id().nav_type {
            return false;
        }
        true
    }

    /// Compare the committed bits in the inclusive range `[start, end]`.
    ///
    /// Messages with a different number of committed bits never match. The
    /// range is clamped to the committed bits: an `end` of `None` or past the
    /// last bit means the last bit, and a `start` past the last bit means the
    /// last bit. An empty range matches.
    pub fn match_bits(&self, other: &NavBits, start: usize, end: Option<usize>) -> bool {
        let used = self.num_bits();
        if used != other.num_bits() {
            return false;
        }
        if used == 0 {
            return true;
        }
        let last = used - 1;
        let end = end.map_or(last, |end| end.min(last));
        let start = start.min(last);
        if start > end {
            return true;
        }
        self.bits().first_difference(other.bits(), start, end).is_none()
    }

    /// Compare the metadata selected by `flags` and the committed bits in
    /// the inclusive range `[start, end]`.
    pub fn matches(
        &self,
        other: &NavBits,
        start: usize,
        end: Option<usize>,
        flags: MatchFlags,
    ) -> bool {
        self.match_metadata(other, flags) && self.match_bits(other, start, end)
    }

    /// Return true if the bits of this message precede those of `other` in
    /// the bitwise lexicographic order of [`BitBuffer`](super::BitBuffer).
    ///
    /// Metadata is ignored.
    pub fn bits_lt(&self, other: &NavBits) -> bool {
        self.bits().cmp(other.bits()) == Ordering::Less
    }
}

/// Messages are equal if all their metadata and all their committed bits
/// match.
impl PartialEq for NavBits {
    fn eq(&self, other: &Self) -> bool {
        self.matches(other, 0, None, MatchFlags::ALL)
    }
}
