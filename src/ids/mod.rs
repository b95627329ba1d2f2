/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Identities attached to a navigation message.

A [`NavBits`](crate::impls::NavBits) message records the satellite that
transmitted it ([`SatId`]), the signal it was received on ([`ObsId`]), its
format ([`NavId`]) and its [`TransmitTime`]. These are plain value types:
they are compared when matching messages and rendered in diagnostic dumps.

*/

mod sat_id;
pub use sat_id::{SatId, SatelliteSystem};

mod obs_id;
pub use obs_id::{CarrierBand, ObsId, ObsIdRegistry, ObservationType, TrackingCode};

mod nav_id;
pub use nav_id::{NavId, NavType};

mod time;
pub use time::{TransmitTime, SECONDS_PER_DAY, SECONDS_PER_WEEK};
