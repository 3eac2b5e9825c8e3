// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sync replies sent back to devices.

use std::collections::BTreeMap;

use serde::Serialize;

/// Shown when an OTA update is pending but no firmware file is attached.
pub const NO_OTA_FILE_MESSAGE: &str = "No OTA file is attached to this device.";

/// Receipt text returned when the device sets `ACK`.
pub const ACKNOWLEDGMENT_MESSAGE: &str = "Acknowledgment received for the device.";

/// Configuration values of a device, keyed by parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigValues {
    /// Parameter key to value.
    pub values: BTreeMap<String, String>,
}

/// Reply to an [`AckRequest`](super::AckRequest).
///
/// Absent fields are omitted; the reply to a device with nothing pending
/// serializes to `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncResponse {
    /// The key the device sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_key: Option<String>,
    /// Device id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Pending configuration values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<ConfigValues>>,
    /// Public URL of the pending firmware file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ota_file_url: Option<String>,
    /// Set instead of `ota_file_url` when no file is attached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ota_message: Option<String>,
    /// Label of the pending firmware version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_version: Option<String>,
    /// Receipt text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acknowledgment: Option<String>,
}

impl SyncResponse {
    /// Returns `true` for the empty reply.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_reply_serializes_to_empty_object() {
        let json = serde_json::to_value(SyncResponse::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn config_values_nest_under_values() {
        let response = SyncResponse {
            device_key: Some("LSPL_8f3k2".into()),
            name: Some("8f3k2".into()),
            data: Some(vec![ConfigValues {
                values: BTreeMap::from([("SR".to_string(), "20".to_string())]),
            }]),
            ..SyncResponse::default()
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({
                "device_key": "LSPL_8f3k2",
                "name": "8f3k2",
                "data": [{"values": {"SR": "20"}}]
            })
        );
        assert!(!response.is_empty());
    }
}
