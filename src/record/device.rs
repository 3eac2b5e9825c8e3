// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device record.

use crate::types::DeviceKey;

/// A registered device.
///
/// `is_set_keys` asks the device to (re)provision its credentials and `ack`
/// records whether the device confirmed them.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeviceRecord {
    /// Display name of the device.
    #[serde(rename = "name1")]
    pub name: String,
    /// IMEI number of the device modem.
    pub imei_number: String,
    /// Optional device category.
    #[serde(default)]
    pub device_category: Option<String>,
    /// Optional device group used for access scoping.
    #[serde(default)]
    pub device_group: Option<String>,
    /// Key the device presents when polling.
    #[serde(default)]
    pub device_key: Option<DeviceKey>,
    /// API key issued to the device.
    #[serde(default)]
    pub api_key: Option<String>,
    /// API secret issued to the device.
    #[serde(default)]
    pub api_secret: Option<String>,
    /// Credentials need (re)provisioning.
    #[serde(default, deserialize_with = "crate::record::deserialize_check")]
    pub is_set_keys: bool,
    /// The device confirmed its credentials.
    #[serde(default, deserialize_with = "crate::record::deserialize_check")]
    pub ack: bool,
    #[serde(skip)]
    is_new: bool,
}

impl DeviceRecord {
    /// Creates a device that has not been persisted yet.
    #[must_use]
    pub fn new(name: impl Into<String>, imei_number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            imei_number: imei_number.into(),
            device_category: None,
            device_group: None,
            device_key: None,
            api_key: None,
            api_secret: None,
            is_set_keys: false,
            ack: false,
            is_new: true,
        }
    }

    /// Returns `true` until the record has been persisted once.
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// Marks the record as persisted.
    pub fn mark_persisted(&mut self) {
        self.is_new = false;
    }
}
