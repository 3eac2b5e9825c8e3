// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Workflow flags carried by a device configuration record.

use serde::{Deserialize, Deserializer};

/// The four booleans a device agent polls to decide whether to re-sync.
///
/// `is_new_config` and `is_new_ota` announce pending work. The two
/// acknowledgment flags are reset by the change tracker and set only when the
/// device confirms it applied the change.
///
/// # Examples
///
/// ```
/// use beetwin_iot::record::WorkflowFlags;
///
/// let mut flags = WorkflowFlags::default();
/// assert!(!flags.has_pending());
///
/// flags.acknowledge_ota();
/// assert!(flags.ota_acknowledge);
/// assert!(!flags.is_new_ota);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WorkflowFlags {
    /// A configuration change waits to be pulled by the device.
    #[serde(deserialize_with = "deserialize_check")]
    pub is_new_config: bool,
    /// The device confirmed the last configuration change.
    #[serde(deserialize_with = "deserialize_check")]
    pub acknowledge: bool,
    /// A firmware update waits to be pulled by the device.
    #[serde(deserialize_with = "deserialize_check")]
    pub is_new_ota: bool,
    /// The device confirmed the last firmware update.
    #[serde(
        rename = "otaacknowledge",
        alias = "ota_acknowledge",
        deserialize_with = "deserialize_check"
    )]
    pub ota_acknowledge: bool,
}

impl WorkflowFlags {
    /// Returns `true` if a configuration or firmware change is pending.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.is_new_config || self.is_new_ota
    }

    /// Records that the device applied the pending configuration.
    pub fn acknowledge_config(&mut self) {
        self.is_new_config = false;
        self.acknowledge = true;
    }

    /// Records that the device applied the pending firmware update.
    pub fn acknowledge_ota(&mut self) {
        self.is_new_ota = false;
        self.ota_acknowledge = true;
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CheckValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

/// Reads a check field the way the backend and devices send it.
///
/// `1`, `"1"`, `1.0` and `true` are set; anything else, including `null`,
/// is unset.
pub(crate) fn deserialize_check<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<CheckValue>::deserialize(deserializer)?;
    Ok(match value {
        None => false,
        Some(CheckValue::Bool(b)) => b,
        Some(CheckValue::Int(n)) => n == 1,
        Some(CheckValue::Float(f)) => (f - 1.0).abs() < f64::EPSILON,
        Some(CheckValue::Text(s)) => s.trim().parse::<i64>().is_ok_and(|n| n == 1),
    })
}
