/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use core::fmt;

use crate::ids::ObsIdRegistry;
use crate::impls::NavBits;

/// Hex words per line in dumps.
pub const DUMP_WORDS_PER_LINE: usize = 5;

impl NavBits {
    /// Write a human-readable report of the message.
    ///
    /// The report contains the metadata, the number of bits, the transmit
    /// time and the committed bits as left-justified 32-bit hex words. Band
    /// and code descriptions are taken from `registry`. The format is meant
    /// for logs and tests, and it is not stable.
    pub fn dump(&self, w: &mut impl fmt::Write, registry: &ObsIdRegistry) -> fmt::Result {
        writeln!(w, "{}", "*".repeat(76))?;
        writeln!(w, "Packed Nav Bits")?;
        writeln!(w)?;
        writeln!(w, "SatID: {}", self.sat_id())?;
        writeln!(w)?;
        writeln!(
            w,
            "Carrier: {}      Code: {}      NavID: {}",
            registry.band_description(self.obs_id().band),
            registry.code_description(self.obs_id().code),
            self.nav_id()
        )?;
        if !self.rx_id().is_empty() {
            writeln!(w, " RxID: {}", self.rx_id())?;
        }
        writeln!(w)?;
        writeln!(w, "Number Of Bits: {}", self.num_bits())?;
        writeln!(w)?;
        writeln!(
            w,
            "              Week(10bt)     SOW      UTD     SOD  MM/DD/YYYY   HH:MM:SS"
        )?;
        writeln!(w, "  Xmit Time:  {}", self.transmit_time())?;
        writeln!(w)?;
        writeln!(w, "Packed Bits, Left Justified, 32 Bits Long:")?;
        writeln!(w, "{}", self.bits().raw_text(DUMP_WORDS_PER_LINE, ' '))
    }
}

/// Dumps the message using [`ObsIdRegistry::standard`].
impl fmt::Display for NavBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.dump(f, ObsIdRegistry::standard())
    }
}

#[cfg(test)]
mod test {
    use crate::codes::*;
    use crate::error::CodecError;
    use crate::ids::*;
    use crate::impls::NavBits;

    #[test]
    fn test_dump() -> Result<(), CodecError> {
        let mut msg = NavBits::new(
            "G07".parse()?,
            "C1C".parse()?,
            TransmitTime::new(2094, 6.0 * 86_400.0 + 3_661.0),
        )
        .with_rx_id("rx-1");
        for i in 0..6_u64 {
            msg.append_unsigned(i, 32, 1)?;
        }
        msg.append_unsigned(1, 1, 1)?;

        let dump = msg.to_string();
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines[0], "*".repeat(76));
        assert_eq!(lines[1], "Packed Nav Bits");
        assert_eq!(lines[3], "SatID: GPS 7");
        assert_eq!(lines[5], "Carrier: L1      Code: C/A      NavID: GPS LNAV");
        assert_eq!(lines[6], " RxID: rx-1");
        assert_eq!(lines[8], "Number Of Bits: 193");
        assert_eq!(
            lines[11],
            "  Xmit Time:  2094(  46) 522061       60    3661  02/29/2020   01:01:01"
        );
        assert_eq!(lines[13], "Packed Bits, Left Justified, 32 Bits Long:");
        assert_eq!(
            lines[14],
            "  0x00000000  0x00000001  0x00000002  0x00000003  0x00000004"
        );
        assert_eq!(lines[15], "  0x00000005  0x80000000");
        assert_eq!(lines.len(), 16);
        Ok(())
    }

    #[test]
    fn test_dump_without_rx() -> Result<(), Box<dyn std::error::Error>> {
        let msg = NavBits::default();
        let mut dump = String::new();
        msg.dump(&mut dump, &ObsIdRegistry::new())?;
        assert!(!dump.contains("RxID"));
        assert!(dump.contains("Carrier: UnknownBand      Code: UnknownCode      NavID: Unknown"));
        assert!(dump.contains("Number Of Bits: 0\n"));
        Ok(())
    }
}
