/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::BitBuffer;
use crate::error::CodecError;
use crate::ids::*;
use crate::traits::*;
#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

/// The outcome of the parity check of a message, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "mem_dbg", mem_size(rec))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParityStatus {
    #[default]
    Unknown,
    Passed,
    Failed,
}

/// A navigation message: a [`BitBuffer`] together with the identity of the
/// transmitting satellite, the signal it was received on, its format, the
/// receiver and the transmit time.
///
/// All codes are available directly on a message, since it implements
/// [`BitFieldRead`] and [`BitFieldWrite`] by delegating to its buffer.
///
/// # Example
/// ```
/// use nav_bits::prelude::*;
///
/// let mut msg = NavBits::new("G07".parse()?, "C1C".parse()?, TransmitTime::new(2200, 36.0))
///     .with_rx_id("rx-1");
/// assert_eq!(msg.nav_id().nav_type, NavType::GpsLnav);
///
/// // preamble, then a 14-bit TOW count
/// msg.append_unsigned(0x8B, 8, 1)?;
/// msg.append_unsigned(36, 14, 6)?;
/// assert_eq!(msg.num_bits(), 22);
/// assert_eq!(msg.read_unsigned(8, 14, 6)?, 36);
/// # Ok::<(), CodecError>(())
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "mem_dbg", mem_size(rec))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavBits {
    sat_id: SatId,
    obs_id: ObsId,
    nav_id: NavId,
    rx_id: String,
    transmit_time: TransmitTime,
    time_coerced: bool,
    parity: ParityStatus,
    bits: BitBuffer,
}

impl NavBits {
    /// Create an empty message; the format is derived from the satellite
    /// and the signal by [`NavId::from_signal`].
    pub fn new(sat_id: SatId, obs_id: ObsId, transmit_time: TransmitTime) -> Self {
        Self {
            sat_id,
            obs_id,
            nav_id: NavId::from_signal(sat_id, obs_id),
            transmit_time,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_nav_id(mut self, nav_id: NavId) -> Self {
        self.nav_id = nav_id;
        self
    }

    #[must_use]
    pub fn with_rx_id(mut self, rx_id: impl Into<String>) -> Self {
        self.rx_id = rx_id.into();
        self
    }

    pub fn sat_id(&self) -> SatId {
        self.sat_id
    }

    pub fn set_sat_id(&mut self, sat_id: SatId) {
        self.sat_id = sat_id;
    }

    pub fn obs_id(&self) -> ObsId {
        self.obs_id
    }

    pub fn set_obs_id(&mut self, obs_id: ObsId) {
        self.obs_id = obs_id;
    }

    pub fn nav_id(&self) -> NavId {
        self.nav_id
    }

    pub fn set_nav_id(&mut self, nav_id: NavId) {
        self.nav_id = nav_id;
    }

    /// Return the receiver identifier; empty if unknown.
    pub fn rx_id(&self) -> &str {
        &self.rx_id
    }

    pub fn set_rx_id(&mut self, rx_id: impl Into<String>) {
        self.rx_id = rx_id.into();
    }

    pub fn transmit_time(&self) -> TransmitTime {
        self.transmit_time
    }

    pub fn set_transmit_time(&mut self, transmit_time: TransmitTime) {
        self.transmit_time = transmit_time;
    }

    /// Return true if the transmit time was not received, but adjusted
    /// (e.g., to the start of the message) by the producer.
    pub fn is_time_coerced(&self) -> bool {
        self.time_coerced
    }

    pub fn set_time_coerced(&mut self, coerced: bool) {
        self.time_coerced = coerced;
    }

    pub fn parity(&self) -> ParityStatus {
        self.parity
    }

    pub fn set_parity(&mut self, parity: ParityStatus) {
        self.parity = parity;
    }

    pub fn bits(&self) -> &BitBuffer {
        &self.bits
    }

    pub fn bits_mut(&mut self) -> &mut BitBuffer {
        &mut self.bits
    }

    /// Return the number of committed bits.
    pub fn num_bits(&self) -> usize {
        self.bits.bits_used()
    }

    pub fn set_bounds_policy(&mut self, policy: BoundsPolicy) {
        self.bits.set_bounds_policy(policy);
    }

    /// Drop all bits, keeping the metadata.
    pub fn clear_bits(&mut self) {
        self.bits.clear();
    }

    /// Append the committed bits of `other`, ignoring its metadata.
    pub fn append_nav_bits(&mut self, other: &NavBits) {
        self.bits.append_buffer(&other.bits);
    }

    /// Copy the bits in the inclusive range `[start, end]` from `from`,
    /// ignoring its metadata.
    ///
    /// See [`BitBuffer::copy_bits_from`].
    pub fn copy_bits_from(
        &mut self,
        from: &NavBits,
        start: usize,
        end: Option<usize>,
    ) -> Result<(), CodecError> {
        self.bits.copy_bits_from(&from.bits, start, end)
    }

    /// See [`BitBuffer::reset_bits_used`].
    pub fn reset_bits_used(&mut self, bits_used: usize) {
        self.bits.reset_bits_used(bits_used);
    }

    pub fn truncate_to_used(&mut self) {
        self.bits.truncate_to_used();
    }

    /// Flip every committed bit.
    pub fn invert(&mut self) {
        self.bits.invert();
    }

    /// Replace the bits with those of a record in the hex-word textual
    /// format (see [`BitBuffer::from_raw_text`]).
    ///
    /// On error the message is left unchanged.
    pub fn load_raw_text(&mut self, text: &str) -> Result<(), CodecError> {
        let mut bits = BitBuffer::from_raw_text(text)?;
        bits.set_bounds_policy(self.bits.bounds_policy());
        self.bits = bits;
        Ok(())
    }
}

impl BitFieldRead for NavBits {
    #[inline(always)]
    fn bits_used(&self) -> usize {
        self.bits.bits_used()
    }

    #[inline(always)]
    fn read_bit(&self, index: usize) -> Result<bool, CodecError> {
        self.bits.read_bit(index)
    }

    #[inline(always)]
    fn read_bits(&self, start: usize, num_bits: usize) -> Result<u64, CodecError> {
        self.bits.read_bits(start, num_bits)
    }
}

impl BitFieldWrite for NavBits {
    #[inline(always)]
    fn append_bits(&mut self, value: u64, num_bits: usize) -> Result<usize, CodecError> {
        self.bits.append_bits(value, num_bits)
    }

    #[inline(always)]
    fn insert_bits(&mut self, value: u64, start: usize, num_bits: usize) -> Result<(), CodecError> {
        self.bits.insert_bits(value, start, num_bits)
    }
}
