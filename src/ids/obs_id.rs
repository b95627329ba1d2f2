/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Signal identities.
//!
//! An [`ObsId`] describes what was observed: the observation type, the
//! carrier band and the tracking code. Identities are parsed from their
//! RINEX form (e.g., `C1C`, or `EL5Q` with a system prefix) through an
//! [`ObsIdRegistry`], which holds the character maps and the descriptions
//! used in diagnostic output.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use core::fmt;
use core::str::FromStr;

use super::SatelliteSystem;
use crate::error::CodecError;
#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

/// The kind of observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "mem_dbg", mem_size(rec))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObservationType {
    #[default]
    Unknown,
    /// Matches any observation type.
    Any,
    Range,
    Phase,
    Doppler,
    Snr,
    Channel,
    Iono,
    NavMsg,
}

/// The carrier band of a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "mem_dbg", mem_size(rec))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CarrierBand {
    #[default]
    Unknown,
    /// Matches any band.
    Any,
    /// GPS L1, Galileo E1, QZSS L1.
    L1,
    L2,
    /// GPS L5, Galileo E5a.
    L5,
    E6,
    E5b,
    /// Galileo E5a+b.
    E5ab,
}

/// The tracking code of a signal.
///
/// Some RINEX characters denote different codes on different systems and
/// bands; the system-specific codes are obtained by
/// [`ObsIdRegistry::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "mem_dbg", mem_size(rec))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackingCode {
    #[default]
    Unknown,
    /// Matches any code.
    Any,
    CA,
    P,
    Y,
    W,
    N,
    D,
    M,
    C2M,
    C2L,
    C2LM,
    I5,
    Q5,
    IQ5,
    /// GPS L1C data.
    G1D,
    /// GPS L1C pilot.
    G1P,
    /// GPS L1C data and pilot.
    G1X,
    A,
    B,
    C,
    BC,
    ABC,
    IE5a,
    QE5a,
    IQE5a,
    IE5b,
    QE5b,
    IQE5b,
    IE5,
    QE5,
    IQE5,
}

/// A signal identity.
///
/// Equality treats the `Any` variant of each field as a wildcard, so it is
/// not transitive and [`ObsId`] does not implement
/// [`Eq`].
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "mem_dbg", mem_size(rec))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObsId {
    pub obs_type: ObservationType,
    pub band: CarrierBand,
    pub code: TrackingCode,
}

impl ObsId {
    /// An identity matching every other identity.
    pub const ANY: ObsId = ObsId::new(ObservationType::Any, CarrierBand::Any, TrackingCode::Any);

    pub const fn new(obs_type: ObservationType, band: CarrierBand, code: TrackingCode) -> Self {
        Self {
            obs_type,
            band,
            code,
        }
    }
}

impl PartialEq for ObsId {
    fn eq(&self, other: &Self) -> bool {
        let obs_type = self.obs_type == ObservationType::Any
            || other.obs_type == ObservationType::Any
            || self.obs_type == other.obs_type;
        let band = self.band == CarrierBand::Any
            || other.band == CarrierBand::Any
            || self.band == other.band;
        let code = self.code == TrackingCode::Any
            || other.code == TrackingCode::Any
            || self.code == other.code;
        obs_type && band && code
    }
}

/// Uses the descriptions of [`ObsIdRegistry::standard`].
impl fmt::Display for ObsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = ObsIdRegistry::standard();
        write!(
            f,
            "{} {} {}",
            registry.band_description(self.band),
            registry.code_description(self.code),
            registry.type_description(self.obs_type)
        )
    }
}

/// Parse with [`ObsIdRegistry::standard`].
impl FromStr for ObsId {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObsIdRegistry::standard().parse(s)
    }
}

const TYPES: &[(char, ObservationType, &str)] = &[
    (' ', ObservationType::Unknown, "UnknownType"),
    ('*', ObservationType::Any, "AnyType"),
    ('C', ObservationType::Range, "pseudorange"),
    ('L', ObservationType::Phase, "phase"),
    ('D', ObservationType::Doppler, "doppler"),
    ('S', ObservationType::Snr, "snr"),
    ('X', ObservationType::Channel, "channel"),
    ('I', ObservationType::Iono, "iono"),
    ('N', ObservationType::NavMsg, "navmsg"),
];

const BANDS: &[(char, CarrierBand, &str)] = &[
    (' ', CarrierBand::Unknown, "UnknownBand"),
    ('*', CarrierBand::Any, "AnyBand"),
    ('1', CarrierBand::L1, "L1"),
    ('2', CarrierBand::L2, "L2"),
    ('5', CarrierBand::L5, "L5"),
    ('6', CarrierBand::E6, "E6"),
    ('7', CarrierBand::E5b, "E5b"),
    ('8', CarrierBand::E5ab, "L5a+b"),
];

const CODES: &[(char, TrackingCode, &str)] = &[
    (' ', TrackingCode::Unknown, "UnknownCode"),
    ('*', TrackingCode::Any, "AnyCode"),
    ('C', TrackingCode::CA, "C/A"),
    ('P', TrackingCode::P, "P"),
    ('Y', TrackingCode::Y, "Y"),
    ('W', TrackingCode::W, "W"),
    ('N', TrackingCode::N, "N"),
    ('D', TrackingCode::D, "D"),
    ('M', TrackingCode::M, "M"),
    ('S', TrackingCode::C2M, "C2M"),
    ('L', TrackingCode::C2L, "C2L"),
    ('X', TrackingCode::C2LM, "C2L+M"),
    ('I', TrackingCode::I5, "I5"),
    ('Q', TrackingCode::Q5, "Q5"),
    ('A', TrackingCode::A, "GALA"),
    ('B', TrackingCode::B, "GALB"),
    ('Z', TrackingCode::ABC, "GALA+B+C"),
];

/// Descriptions of the codes that have no character of their own.
const SYSTEM_CODES: &[(TrackingCode, &str)] = &[
    (TrackingCode::IQ5, "I+Q5"),
    (TrackingCode::G1D, "L1CD"),
    (TrackingCode::G1P, "L1CP"),
    (TrackingCode::G1X, "L1C"),
    (TrackingCode::C, "GALC"),
    (TrackingCode::BC, "GALB+C"),
    (TrackingCode::IE5a, "GALI5a"),
    (TrackingCode::QE5a, "GALQ5a"),
    (TrackingCode::IQE5a, "GALI+Q5a"),
    (TrackingCode::IE5b, "GALI5b"),
    (TrackingCode::QE5b, "GALQ5b"),
    (TrackingCode::IQE5b, "GALI+Q5b"),
    (TrackingCode::IE5, "GALI5"),
    (TrackingCode::QE5, "GALQ5"),
    (TrackingCode::IQE5, "GALI+Q5"),
];

/// The character maps and descriptions of signal identities.
///
/// A registry is immutable once built. [`ObsIdRegistry::standard`] returns a
/// process-wide instance, which is built the first time it is needed.
#[derive(Debug, Clone)]
pub struct ObsIdRegistry {
    char_to_type: BTreeMap<char, ObservationType>,
    char_to_band: BTreeMap<char, CarrierBand>,
    char_to_code: BTreeMap<char, TrackingCode>,
    type_desc: BTreeMap<ObservationType, &'static str>,
    band_desc: BTreeMap<CarrierBand, &'static str>,
    code_desc: BTreeMap<TrackingCode, &'static str>,
}

impl Default for ObsIdRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ObsIdRegistry {
    /// Build a registry with the RINEX 3 identities.
    pub fn new() -> Self {
        Self {
            char_to_type: TYPES.iter().map(|&(ch, t, _)| (ch, t)).collect(),
            char_to_band: BANDS.iter().map(|&(ch, b, _)| (ch, b)).collect(),
            char_to_code: CODES.iter().map(|&(ch, c, _)| (ch, c)).collect(),
            type_desc: TYPES.iter().map(|&(_, t, desc)| (t, desc)).collect(),
            band_desc: BANDS.iter().map(|&(_, b, desc)| (b, desc)).collect(),
            code_desc: CODES
                .iter()
                .map(|&(_, c, desc)| (c, desc))
                .chain(SYSTEM_CODES.iter().copied())
                .collect(),
        }
    }

    /// Return the process-wide registry.
    pub fn standard() -> &'static ObsIdRegistry {
        static STANDARD: OnceLock<ObsIdRegistry> = OnceLock::new();
        STANDARD.get_or_init(ObsIdRegistry::new)
    }

    pub fn type_description(&self, obs_type: ObservationType) -> &'static str {
        self.type_desc.get(&obs_type).copied().unwrap_or("UnknownType")
    }

    pub fn band_description(&self, band: CarrierBand) -> &'static str {
        self.band_desc.get(&band).copied().unwrap_or("UnknownBand")
    }

    pub fn code_description(&self, code: TrackingCode) -> &'static str {
        self.code_desc.get(&code).copied().unwrap_or("UnknownCode")
    }

    /// Parse a three-character RINEX identity (type, band, code), optionally
    /// preceded by a system character. A missing system means GPS.
    ///
    /// The tracking code is adjusted for the system and band: for example,
    /// `X` on GPS L5 is [`TrackingCode::IQ5`], and `Q` on Galileo E5b is
    /// [`TrackingCode::QE5b`].
    ///
    /// # Example
    /// ```
    /// use nav_bits::prelude::*;
    ///
    /// let registry = ObsIdRegistry::standard();
    /// let obs = registry.parse("C1C")?;
    /// assert_eq!(obs.code, TrackingCode::CA);
    /// let obs = registry.parse("EC1C")?;
    /// assert_eq!(obs.code, TrackingCode::C);
    /// assert!(registry.parse("C1").is_err());
    /// # Ok::<(), CodecError>(())
    /// ```
    pub fn parse(&self, id: &str) -> Result<ObsId, CodecError> {
        let chars: Vec<char> = id.chars().collect();
        let (system, [ot, cb, tc]) = match chars.as_slice() {
            &[ot, cb, tc] => (SatelliteSystem::Gps, [ot, cb, tc]),
            &[sys, ot, cb, tc] => (
                SatelliteSystem::from_char(sys)
                    .ok_or_else(|| CodecError::parse("satellite system", Some(id)))?,
                [ot, cb, tc],
            ),
            _ => {
                log::debug!("Signal identifier {:?} is not 3 or 4 characters long", id);
                return Err(CodecError::parse("3 or 4 character signal identifier", Some(id)));
            }
        };
        let obs_type = *self
            .char_to_type
            .get(&ot)
            .ok_or_else(|| CodecError::parse("observation type", Some(id)))?;
        let band = *self
            .char_to_band
            .get(&cb)
            .ok_or_else(|| CodecError::parse("carrier band", Some(id)))?;
        let code = *self
            .char_to_code
            .get(&tc)
            .ok_or_else(|| CodecError::parse("tracking code", Some(id)))?;
        Ok(ObsId::new(obs_type, band, system_code(system, band, tc, code)))
    }
}

/// Adjust a tracking code for the system and band.
fn system_code(
    system: SatelliteSystem,
    band: CarrierBand,
    ch: char,
    code: TrackingCode,
) -> TrackingCode {
    use CarrierBand as Cb;
    use TrackingCode as Tc;
    match system {
        SatelliteSystem::Gps => match (band, ch) {
            (Cb::L5, 'X') => Tc::IQ5,
            (Cb::L1, 'X') => Tc::G1X,
            (Cb::L1, 'S') => Tc::G1D,
            (Cb::L1, 'L') => Tc::G1P,
            _ => code,
        },
        SatelliteSystem::Galileo => match (band, code) {
            (Cb::L1 | Cb::E6, Tc::CA) => Tc::C,
            (Cb::L1 | Cb::E6, Tc::C2LM) => Tc::BC,
            (Cb::L5, Tc::I5) => Tc::IE5a,
            (Cb::L5, Tc::Q5) => Tc::QE5a,
            (Cb::L5, Tc::C2LM) => Tc::IQE5a,
            (Cb::E5b, Tc::I5) => Tc::IE5b,
            (Cb::E5b, Tc::Q5) => Tc::QE5b,
            (Cb::E5b, Tc::C2LM) => Tc::IQE5b,
            (Cb::E5ab, Tc::I5) => Tc::IE5,
            (Cb::E5ab, Tc::Q5) => Tc::QE5,
            (Cb::E5ab, Tc::C2LM) => Tc::IQE5,
            _ => code,
        },
        _ => code,
    }
}
