/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use core::fmt;

use super::{CarrierBand, ObsId, SatId, SatelliteSystem, TrackingCode};
#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

/// The format of a navigation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "mem_dbg", mem_size(rec))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NavType {
    #[default]
    Unknown,
    GpsLnav,
    GpsCnavL2,
    GpsCnavL5,
    GpsCnav2,
    GalINav,
    GalFNav,
    GloCivilF,
    BeiDouD1,
    BeiDouD2,
}

impl fmt::Display for NavType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NavType::Unknown => "Unknown",
            NavType::GpsLnav => "GPS LNAV",
            NavType::GpsCnavL2 => "GPS CNAV, L2",
            NavType::GpsCnavL5 => "GPS CNAV, L5",
            NavType::GpsCnav2 => "GPS CNAV-2",
            NavType::GalINav => "Galileo I/NAV",
            NavType::GalFNav => "Galileo F/NAV",
            NavType::GloCivilF => "GLONASS Civil F",
            NavType::BeiDouD1 => "BeiDou D1",
            NavType::BeiDouD2 => "BeiDou D2",
        })
    }
}

/// The identity of a navigation message format.
///
/// Message matching compares the [`NavType`] only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "mem_dbg", mem_size(rec))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavId {
    pub nav_type: NavType,
}

impl NavId {
    pub const fn new(nav_type: NavType) -> Self {
        Self { nav_type }
    }

    /// Derive the message format carried by a signal of a satellite.
    ///
    /// BeiDou satellites 1 to 5 and 59 onwards are geostationary and
    /// transmit D2 messages; the others transmit D1 messages.
    pub fn from_signal(sat: SatId, obs: ObsId) -> Self {
        use CarrierBand as Cb;
        use TrackingCode as Tc;
        let nav_type = match (sat.system, obs.band, obs.code) {
            (SatelliteSystem::Gps, Cb::L1 | Cb::L2, Tc::CA | Tc::P | Tc::Y | Tc::W | Tc::N) => {
                NavType::GpsLnav
            }
            (SatelliteSystem::Gps, Cb::L2, Tc::C2M | Tc::C2L | Tc::C2LM) => NavType::GpsCnavL2,
            (SatelliteSystem::Gps, Cb::L5, Tc::I5 | Tc::Q5 | Tc::IQ5) => NavType::GpsCnavL5,
            (SatelliteSystem::Gps, Cb::L1, Tc::G1D | Tc::G1P | Tc::G1X) => NavType::GpsCnav2,
            (SatelliteSystem::Galileo, Cb::L1 | Cb::E5b, _) => NavType::GalINav,
            (SatelliteSystem::Galileo, Cb::L5, _) => NavType::GalFNav,
            (SatelliteSystem::Glonass, Cb::L1 | Cb::L2, _) => NavType::GloCivilF,
            (SatelliteSystem::BeiDou, _, _) if sat.id <= 5 || sat.id >= 59 => NavType::BeiDouD2,
            (SatelliteSystem::BeiDou, _, _) => NavType::BeiDouD1,
            _ => NavType::Unknown,
        };
        Self { nav_type }
    }
}

impl From<NavType> for NavId {
    fn from(nav_type: NavType) -> Self {
        Self { nav_type }
    }
}

impl fmt::Display for NavId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.nav_type, f)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::CodecError;

    fn nav_type(sat: &str, obs: &str) -> Result<NavType, CodecError> {
        Ok(NavId::from_signal(sat.parse()?, obs.parse()?).nav_type)
    }

    #[test]
    fn test_from_signal() -> Result<(), CodecError> {
        assert_eq!(nav_type("G01", "C1C")?, NavType::GpsLnav);
        assert_eq!(nav_type("G01", "C2W")?, NavType::GpsLnav);
        assert_eq!(nav_type("G01", "C2L")?, NavType::GpsCnavL2);
        assert_eq!(nav_type("G01", "C5X")?, NavType::GpsCnavL5);
        assert_eq!(nav_type("G01", "C1L")?, NavType::GpsCnav2);
        assert_eq!(nav_type("E11", "EC1B")?, NavType::GalINav);
        assert_eq!(nav_type("E11", "EC7Q")?, NavType::GalINav);
        assert_eq!(nav_type("E11", "EC5I")?, NavType::GalFNav);
        assert_eq!(nav_type("R03", "RC1C")?, NavType::GloCivilF);
        assert_eq!(nav_type("C03", "CC2I")?, NavType::BeiDouD2);
        assert_eq!(nav_type("C30", "CC2I")?, NavType::BeiDouD1);
        assert_eq!(nav_type("J01", "JC1C")?, NavType::Unknown);
        Ok(())
    }

    #[test]
    fn test_display() {
        assert_eq!(NavId::new(NavType::GalINav).to_string(), "Galileo I/NAV");
        assert_eq!(NavId::default().to_string(), "Unknown");
    }
}
