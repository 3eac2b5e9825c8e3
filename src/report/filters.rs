// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Filter values submitted with the timeseries report.

use chrono::NaiveDate;

use crate::error::ValueError;

/// Filters of the timeseries report.
///
/// # Examples
///
/// ```
/// use beetwin_iot::report::ReportFilters;
/// use chrono::NaiveDate;
///
/// let filters = ReportFilters::new("8600001")
///     .with_from_date(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
///     .with_to_date(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
/// assert!(filters.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReportFilters {
    /// Selected device identifier.
    #[serde(rename = "device_data")]
    pub device: String,
    /// First day of the range.
    #[serde(default)]
    pub from_date: Option<NaiveDate>,
    /// Last day of the range.
    #[serde(default)]
    pub to_date: Option<NaiveDate>,
}

impl ReportFilters {
    /// Creates filters for a device with an open date range.
    #[must_use]
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            from_date: None,
            to_date: None,
        }
    }

    /// Sets the first day of the range.
    #[must_use]
    pub fn with_from_date(mut self, date: NaiveDate) -> Self {
        self.from_date = Some(date);
        self
    }

    /// Sets the last day of the range.
    #[must_use]
    pub fn with_to_date(mut self, date: NaiveDate) -> Self {
        self.to_date = Some(date);
        self
    }

    /// Checks the device is selected and the range is not inverted.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::Required` for an empty device and
    /// `ValueError::InvalidDateRange` when `from_date` is after `to_date`.
    pub fn validate(&self) -> Result<(), ValueError> {
        if self.device.trim().is_empty() {
            return Err(ValueError::Required("device"));
        }
        if let (Some(from), Some(to)) = (self.from_date, self.to_date)
            && from > to
        {
            return Err(ValueError::InvalidDateRange { from, to });
        }
        Ok(())
    }
}
