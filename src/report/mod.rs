// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Timeseries report support.
//!
//! The report lets a user pick one device by name while submitting its IMEI
//! number. The backend serves `"<name> <imei>"` entries
//! ([`format_device_entries`]); the selector splits them back
//! ([`DeviceFilter`]) when the report loads
//! ([`ReportDeviceFilterPopulator`]).

mod device_filter;
mod filters;
mod listing;
mod source;

pub use device_filter::{
    DeviceFilter, FilterLoad, FilterOption, NO_DATA_NOTICE, ReportDeviceFilterPopulator,
    split_entry,
};
pub use filters::ReportFilters;
pub use listing::{DeviceSummary, format_device_entries};
pub use source::DeviceListSource;
#[cfg(feature = "http")]
pub use source::HttpDeviceListSource;

/// Pseudo-entry selecting every device.
pub const ALL_DEVICES: &str = "ALL";
