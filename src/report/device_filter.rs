// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device selector of the timeseries report.

use std::collections::BTreeMap;

use super::{ALL_DEVICES, DeviceListSource};

/// Notice shown when no devices could be loaded.
pub const NO_DATA_NOTICE: &str = "No device data found.";

/// One selectable option: shown by name, submitted by identifier.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FilterOption {
    /// Display name of the device.
    pub label: String,
    /// Device identifier (IMEI number).
    pub value: String,
}

/// Splits a `"<name> <identifier>"` entry.
///
/// The identifier is the last whitespace-separated token; the name is the
/// remaining tokens joined by single spaces and may be empty. Blank entries
/// yield `None`.
///
/// # Examples
///
/// ```
/// use beetwin_iot::report::split_entry;
///
/// assert_eq!(
///     split_entry("101 Water Pump 860000000000001"),
///     Some(("101 Water Pump".to_string(), "860000000000001".to_string()))
/// );
/// assert_eq!(split_entry("   "), None);
/// ```
#[must_use]
pub fn split_entry(entry: &str) -> Option<(String, String)> {
    let mut tokens: Vec<&str> = entry.split_whitespace().collect();
    let identifier = tokens.pop()?;
    Some((tokens.join(" "), identifier.to_string()))
}

/// Options and name lookup for the report's device selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceFilter {
    options: Vec<FilterOption>,
    lookup: BTreeMap<String, String>,
}

impl DeviceFilter {
    /// Builds the filter from backend entries.
    ///
    /// Entries whose name or identifier equals `ALL` (ignoring case) are
    /// dropped. Options keep the backend order; in the lookup a repeated name
    /// maps to its last identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use beetwin_iot::report::DeviceFilter;
    ///
    /// let filter = DeviceFilter::from_entries(["ALL", "101 Pump 8600001"]);
    /// assert_eq!(filter.options().len(), 1);
    /// assert_eq!(filter.identifier_for("101 Pump"), Some("8600001"));
    /// ```
    #[must_use]
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::default();
        for entry in entries {
            let Some((name, identifier)) = split_entry(entry.as_ref()) else {
                continue;
            };
            if name.eq_ignore_ascii_case(ALL_DEVICES) || identifier.eq_ignore_ascii_case(ALL_DEVICES)
            {
                continue;
            }
            filter.lookup.insert(name.clone(), identifier.clone());
            filter.options.push(FilterOption {
                label: name,
                value: identifier,
            });
        }
        filter
    }

    /// Returns the selectable options.
    #[must_use]
    pub fn options(&self) -> &[FilterOption] {
        &self.options
    }

    /// Returns the identifier for a device name.
    #[must_use]
    pub fn identifier_for(&self, name: &str) -> Option<&str> {
        self.lookup.get(name).map(String::as_str)
    }

    /// Returns the name to identifier lookup.
    #[must_use]
    pub fn lookup(&self) -> &BTreeMap<String, String> {
        &self.lookup
    }

    /// Returns `true` if there is nothing to select.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// Result of loading the device selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterLoad {
    /// Options were fetched.
    Loaded(DeviceFilter),
    /// Nothing was fetched; the notice is shown to the user and the selector stays empty.
    NoData {
        /// User-visible notice.
        notice: &'static str,
    },
}

impl FilterLoad {
    /// Returns the filter; empty when no data was loaded.
    #[must_use]
    pub fn into_filter(self) -> DeviceFilter {
        match self {
            Self::Loaded(filter) => filter,
            Self::NoData { .. } => DeviceFilter::default(),
        }
    }

    /// Returns the notice to show, if any.
    #[must_use]
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Self::Loaded(_) => None,
            Self::NoData { notice } => Some(*notice),
        }
    }
}

/// Populates the report's device selector when the report loads.
///
/// # Examples
///
/// ```no_run
/// use beetwin_iot::protocol::HttpConfig;
/// use beetwin_iot::report::{HttpDeviceListSource, ReportDeviceFilterPopulator};
///
/// # async fn example() -> beetwin_iot::Result<()> {
/// let client = HttpConfig::new("iot.example.com").into_client()?;
/// let populator = ReportDeviceFilterPopulator::new(HttpDeviceListSource::new(client));
///
/// let filter = populator.populate().await.into_filter();
/// for option in filter.options() {
///     println!("{} -> {}", option.label, option.value);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReportDeviceFilterPopulator<S> {
    source: S,
}

impl<S: DeviceListSource> ReportDeviceFilterPopulator<S> {
    /// Creates a populator reading from `source`.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetches the device list and builds the selector.
    ///
    /// An empty or failed fetch degrades to [`FilterLoad::NoData`].
    pub async fn populate(&self) -> FilterLoad {
        match self.source.fetch_device_entries().await {
            Ok(entries) if !entries.is_empty() => {
                let filter = DeviceFilter::from_entries(&entries);
                tracing::debug!(
                    fetched = entries.len(),
                    options = filter.options().len(),
                    "Loaded report device filter"
                );
                FilterLoad::Loaded(filter)
            }
            Ok(_) => FilterLoad::NoData {
                notice: NO_DATA_NOTICE,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch report devices");
                FilterLoad::NoData {
                    notice: NO_DATA_NOTICE,
                }
            }
        }
    }
}
