/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use core::fmt;
use core::ops::Sub;

use hifitime::{Duration, Epoch, TimeScale};
#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const SECONDS_PER_WEEK: f64 = 604_800.0;

/// A transmit time as a full GPS week and seconds of week.
///
/// Calendar conversions and differences go through the GPST [`Epoch`]
/// returned by [`TransmitTime::epoch`]. Subtracting two times yields their
/// difference in seconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
#[cfg_attr(feature = "mem_dbg", mem_size(rec))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransmitTime {
    pub week: u32,
    pub sow: f64,
}

impl TransmitTime {
    pub const fn new(week: u32, sow: f64) -> Self {
        Self { week, sow }
    }

    /// Seconds since the GPS epoch.
    pub fn seconds(&self) -> f64 {
        f64::from(self.week) * SECONDS_PER_WEEK + self.sow
    }

    /// The epoch of this time in the GPS time scale.
    pub fn epoch(&self) -> Epoch {
        Epoch::from_time_of_week(self.week, 0, TimeScale::GPST) + Duration::from_seconds(self.sow)
    }

    /// Return the civil date (year, month, day), the day of year, and the
    /// seconds of day, all in GPS time.
    pub fn civil(&self) -> ((i32, u8, u8), u32, f64) {
        let epoch = self.epoch();
        let (year, month, day, hour, minute, second, nanos) = epoch.to_gregorian(TimeScale::GPST);
        let new_year = Epoch::from_gregorian(year, 1, 1, 0, 0, 0, 0, TimeScale::GPST);
        let doy = ((epoch - new_year).to_seconds() / SECONDS_PER_DAY).floor() as u32 + 1;
        let sod = f64::from(u32::from(hour) * 3600 + u32::from(minute) * 60 + u32::from(second))
            + f64::from(nanos) * 1e-9;
        ((year, month, day), doy, sod)
    }
}

impl From<TransmitTime> for Epoch {
    fn from(time: TransmitTime) -> Self {
        time.epoch()
    }
}

impl Sub for TransmitTime {
    type Output = f64;

    fn sub(self, rhs: TransmitTime) -> f64 {
        (self.epoch() - rhs.epoch()).to_seconds()
    }
}

/// Renders full week, week modulo 1024, seconds of week, day of year,
/// seconds of day, date and time.
impl fmt::Display for TransmitTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ((year, month, day), doy, sod) = self.civil();
        let secs = sod.floor() as u32;
        write!(
            f,
            "{:4}({:4}) {:6.0}      {:3}   {:5.0}  {:02}/{:02}/{:04}   {:02}:{:02}:{:02}",
            self.week,
            self.week % 1024,
            self.sow,
            doy,
            sod,
            month,
            day,
            year,
            secs / 3600,
            secs / 60 % 60,
            secs % 60
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_epoch() {
        assert_eq!(
            TransmitTime::new(0, 0.0).epoch(),
            Epoch::from_gregorian(1980, 1, 6, 0, 0, 0, 0, TimeScale::GPST)
        );
        assert_eq!(
            Epoch::from(TransmitTime::new(2094, 6.0 * 86_400.0 + 3_661.0)),
            Epoch::from_gregorian(2020, 2, 29, 1, 1, 1, 0, TimeScale::GPST)
        );
    }

    #[test]
    fn test_civil() {
        let ((year, month, day), doy, sod) = TransmitTime::new(0, 0.0).civil();
        assert_eq!((year, month, day, doy, sod), (1980, 1, 6, 6, 0.0));
        let ((year, month, day), doy, sod) =
            TransmitTime::new(2094, 6.0 * 86_400.0 + 3_661.5).civil();
        assert_eq!((year, month, day, doy), (2020, 2, 29, 60));
        assert_eq!(sod, 3_661.5);
    }

    #[test]
    fn test_display() {
        let time = TransmitTime::new(2094, 6.0 * 86_400.0 + 3_661.0);
        assert_eq!(
            time.to_string(),
            "2094(  46) 522061       60    3661  02/29/2020   01:01:01"
        );
    }

    #[test]
    fn test_sub() {
        let a = TransmitTime::new(2000, 10.0);
        let b = TransmitTime::new(1999, SECONDS_PER_WEEK - 0.1);
        assert!((a - b - 10.1).abs() < 1e-6);
        assert!((b - a + 10.1).abs() < 1e-6);
        assert_eq!(a - a, 0.0);
    }
}
