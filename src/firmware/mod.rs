// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Firmware versions.
//!
//! Selecting a device version on a [`VersionEntry`] row leaves it pending;
//! [`DeviceVersionResolver`] then fetches the [`OtaVersion`] through a
//! [`FirmwareLookup`] within a bounded time and copies its firmware file into
//! the row.

mod lookup;
mod resolver;

#[cfg(feature = "http")]
pub use lookup::HttpFirmwareLookup;
pub use lookup::{FirmwareLookup, OtaVersion};
pub use resolver::{DeviceVersionResolver, ResolutionState, VersionEntry};
