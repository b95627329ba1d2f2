/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use core::fmt;
use core::str::FromStr;

use crate::error::CodecError;
#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

/// A satellite navigation system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "mem_dbg", mem_size(rec))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SatelliteSystem {
    Gps,
    Glonass,
    Galileo,
    Geosync,
    Qzss,
    BeiDou,
    Irnss,
    Leo,
    Transit,
    Mixed,
    #[default]
    Unknown,
}

impl SatelliteSystem {
    pub const ALL: [SatelliteSystem; 11] = [
        SatelliteSystem::Gps,
        SatelliteSystem::Glonass,
        SatelliteSystem::Galileo,
        SatelliteSystem::Geosync,
        SatelliteSystem::Qzss,
        SatelliteSystem::BeiDou,
        SatelliteSystem::Irnss,
        SatelliteSystem::Leo,
        SatelliteSystem::Transit,
        SatelliteSystem::Mixed,
        SatelliteSystem::Unknown,
    ];

    /// Return the RINEX character of the system.
    pub const fn to_char(self) -> char {
        match self {
            SatelliteSystem::Gps => 'G',
            SatelliteSystem::Glonass => 'R',
            SatelliteSystem::Galileo => 'E',
            SatelliteSystem::Geosync => 'S',
            SatelliteSystem::Qzss => 'J',
            SatelliteSystem::BeiDou => 'C',
            SatelliteSystem::Irnss => 'I',
            SatelliteSystem::Leo => 'L',
            SatelliteSystem::Transit => 'T',
            SatelliteSystem::Mixed => 'M',
            SatelliteSystem::Unknown => '?',
        }
    }

    /// Return the system of a RINEX character.
    pub fn from_char(ch: char) -> Option<Self> {
        Self::ALL.into_iter().find(|system| system.to_char() == ch)
    }

    pub const fn name(self) -> &'static str {
        match self {
            SatelliteSystem::Gps => "GPS",
            SatelliteSystem::Glonass => "GLONASS",
            SatelliteSystem::Galileo => "Galileo",
            SatelliteSystem::Geosync => "Geosync",
            SatelliteSystem::Qzss => "QZSS",
            SatelliteSystem::BeiDou => "BeiDou",
            SatelliteSystem::Irnss => "IRNSS",
            SatelliteSystem::Leo => "LEO",
            SatelliteSystem::Transit => "Transit",
            SatelliteSystem::Mixed => "Mixed",
            SatelliteSystem::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for SatelliteSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The identity of a satellite: a system and a number within the system
/// (PRN, slot, etc.).
///
/// Satellites are ordered by system, then by number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "mem_dbg", mem_size(rec))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SatId {
    pub system: SatelliteSystem,
    pub id: u16,
}

impl SatId {
    pub const fn new(system: SatelliteSystem, id: u16) -> Self {
        Self { system, id }
    }
}

impl fmt::Display for SatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.system, self.id)
    }
}

/// Parse the RINEX form of a satellite identity (e.g., `G14`, `E 5`). A
/// missing system character means GPS.
impl FromStr for SatId {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (system, number) = match s.chars().next() {
            Some(ch) if ch.is_ascii_digit() => (SatelliteSystem::Gps, s),
            Some(ch) => (
                SatelliteSystem::from_char(ch)
                    .ok_or_else(|| CodecError::parse("satellite system", Some(s)))?,
                &s[ch.len_utf8()..],
            ),
            None => return Err(CodecError::parse("satellite identifier", None)),
        };
        let id = number
            .trim_start()
            .parse()
            .map_err(|_| CodecError::parse("satellite number", Some(s)))?;
        Ok(SatId { system, id })
    }
}
