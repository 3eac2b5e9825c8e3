// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Backend side of the report's device list.

use std::collections::BTreeSet;

use super::ALL_DEVICES;

/// Name and IMEI number of a registered device.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, serde::Deserialize)]
pub struct DeviceSummary {
    /// Display name.
    #[serde(rename = "name1")]
    pub name: String,
    /// IMEI number.
    pub imei_number: String,
}

impl DeviceSummary {
    /// Creates a summary.
    #[must_use]
    pub fn new(name: impl Into<String>, imei_number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            imei_number: imei_number.into(),
        }
    }
}

/// Formats the entries served to the report's device selector.
///
/// Keeps distinct devices with a non-empty name and IMEI whose name starts
/// with a digit, sorts them by name and prepends the `ALL` entry.
///
/// # Examples
///
/// ```
/// use beetwin_iot::report::{DeviceSummary, format_device_entries};
///
/// let entries = format_device_entries(&[
///     DeviceSummary::new("202 Tank", "8600002"),
///     DeviceSummary::new("Lab Unit", "8600003"),
///     DeviceSummary::new("101 Pump", "8600001"),
/// ]);
/// assert_eq!(entries, ["ALL", "101 Pump 8600001", "202 Tank 8600002"]);
/// ```
#[must_use]
pub fn format_device_entries(devices: &[DeviceSummary]) -> Vec<String> {
    let kept: BTreeSet<&DeviceSummary> = devices
        .iter()
        .filter(|d| !d.name.is_empty() && !d.imei_number.is_empty())
        .filter(|d| d.name.starts_with(|c: char| c.is_ascii_digit()))
        .collect();

    std::iter::once(ALL_DEVICES.to_string())
        .chain(kept.into_iter().map(|d| format!("{} {}", d.name, d.imei_number)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_all_only() {
        assert_eq!(format_device_entries(&[]), ["ALL"]);
    }

    #[test]
    fn drops_blank_and_duplicate_devices() {
        let entries = format_device_entries(&[
            DeviceSummary::new("101 Pump", "8600001"),
            DeviceSummary::new("101 Pump", "8600001"),
            DeviceSummary::new("102 Pump", ""),
            DeviceSummary::new("", "8600004"),
        ]);
        assert_eq!(entries, ["ALL", "101 Pump 8600001"]);
    }

    #[test]
    fn same_name_different_imei_both_kept() {
        let entries = format_device_entries(&[
            DeviceSummary::new("101 Pump", "8600009"),
            DeviceSummary::new("101 Pump", "8600001"),
        ]);
        assert_eq!(entries, ["ALL", "101 Pump 8600001", "101 Pump 8600009"]);
    }

    #[test]
    fn formatted_entries_parse_back() {
        let entries = format_device_entries(&[DeviceSummary::new("101 Water Pump", "8600001")]);
        let filter = crate::report::DeviceFilter::from_entries(&entries);
        assert_eq!(filter.identifier_for("101 Water Pump"), Some("8600001"));
    }
}
