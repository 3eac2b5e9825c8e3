// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sync requests sent by devices.

use serde::Deserialize;

use crate::record::deserialize_check;

/// A device polling for pending changes and acknowledging applied ones.
///
/// Devices send their flags as `0`/`1`, sometimes as strings or booleans.
/// A flag is set only when it equals one; anything else, including a missing
/// field or `null`, reads as unset.
///
/// # Examples
///
/// ```
/// use beetwin_iot::ack::AckRequest;
///
/// let request: AckRequest = serde_json::from_str(
///     r#"{"device_key": "LSPL_8f3k2", "is_config": "1", "CACK": 1, "OACK": null}"#,
/// ).unwrap();
///
/// assert!(request.is_config);
/// assert!(request.config_ack);
/// assert!(!request.ota_ack);
/// assert!(!request.is_ota);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AckRequest {
    /// Key the device authenticates with.
    #[serde(default)]
    pub device_key: Option<String>,
    /// The device wants pending configuration values.
    #[serde(default, deserialize_with = "deserialize_check")]
    pub is_config: bool,
    /// The device wants pending firmware details.
    #[serde(default, deserialize_with = "deserialize_check")]
    pub is_ota: bool,
    /// The device asks for a receipt.
    #[serde(default, rename = "ACK", deserialize_with = "deserialize_check")]
    pub ack: bool,
    /// The device applied the pending configuration.
    #[serde(default, rename = "CACK", deserialize_with = "deserialize_check")]
    pub config_ack: bool,
    /// The device applied the pending firmware update.
    #[serde(default, rename = "OACK", deserialize_with = "deserialize_check")]
    pub ota_ack: bool,
}

impl AckRequest {
    /// Creates a request for `device_key` with every flag unset.
    #[must_use]
    pub fn new(device_key: impl Into<String>) -> Self {
        Self {
            device_key: Some(device_key.into()),
            ..Self::default()
        }
    }

    /// Asks for pending configuration values.
    #[must_use]
    pub fn with_config(mut self) -> Self {
        self.is_config = true;
        self
    }

    /// Asks for pending firmware details.
    #[must_use]
    pub fn with_ota(mut self) -> Self {
        self.is_ota = true;
        self
    }

    /// Asks for a receipt.
    #[must_use]
    pub fn with_ack(mut self) -> Self {
        self.ack = true;
        self
    }

    /// Acknowledges the pending configuration.
    #[must_use]
    pub fn with_config_ack(mut self) -> Self {
        self.config_ack = true;
        self
    }

    /// Acknowledges the pending firmware update.
    #[must_use]
    pub fn with_ota_ack(mut self) -> Self {
        self.ota_ack = true;
        self
    }
}
