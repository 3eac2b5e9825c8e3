// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device configuration record and its parameter rows.

use std::collections::BTreeMap;

use crate::types::RowId;

use super::WorkflowFlags;

/// One key/value row of a device configuration.
///
/// Rows created during an editing session are *newly added* until the record
/// is persisted. Rows deserialized from storage never are.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParameterRow {
    id: RowId,
    key: String,
    value: String,
    #[serde(skip)]
    is_newly_added: bool,
}

impl ParameterRow {
    /// Creates a row that was added during the current editing session.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: RowId::new(),
            key: key.into(),
            value: value.into(),
            is_newly_added: true,
        }
    }

    /// Creates a row that already exists in storage.
    #[must_use]
    pub fn persisted(id: RowId, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id,
            key: key.into(),
            value: value.into(),
            is_newly_added: false,
        }
    }

    /// Returns the row identity.
    #[must_use]
    pub fn id(&self) -> RowId {
        self.id
    }

    /// Returns the parameter name.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the current value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns `true` if the row has not been persisted yet.
    #[must_use]
    pub fn is_newly_added(&self) -> bool {
        self.is_newly_added
    }

    /// Replaces the value.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub(crate) fn mark_persisted(&mut self) {
        self.is_newly_added = false;
    }
}

/// A device configuration as stored by the persistence layer.
///
/// The workflow flags are only writable from inside the crate (by the change
/// tracker) and through the two acknowledgment methods used by the device
/// agent channel.
///
/// # Examples
///
/// ```
/// use beetwin_iot::record::{DeviceConfigRecord, ParameterRow};
///
/// let mut record = DeviceConfigRecord::new("8f3k2");
/// record.push_parameter(ParameterRow::new("SR", "10"));
/// record.attach_firmware("/files/fw_v2.bin");
///
/// assert_eq!(record.parameters().len(), 1);
/// assert_eq!(record.firmware_attachment(), Some("/files/fw_v2.bin"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeviceConfigRecord {
    device_id: String,
    #[serde(default, rename = "device_config_parameters")]
    parameters: Vec<ParameterRow>,
    #[serde(default, rename = "attach_yybs")]
    firmware_attachment: Option<String>,
    #[serde(default)]
    device_version: Option<String>,
    #[serde(flatten)]
    flags: WorkflowFlags,
}

impl DeviceConfigRecord {
    /// Creates an empty configuration for a device.
    #[must_use]
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            parameters: Vec::new(),
            firmware_attachment: None,
            device_version: None,
            flags: WorkflowFlags::default(),
        }
    }

    /// Sets the initial parameter rows.
    #[must_use]
    pub fn with_parameters(mut self, parameters: Vec<ParameterRow>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Sets the initial workflow flags.
    #[must_use]
    pub fn with_flags(mut self, flags: WorkflowFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the OTA version the attachment belongs to.
    #[must_use]
    pub fn with_device_version(mut self, version: impl Into<String>) -> Self {
        self.device_version = Some(version.into());
        self
    }

    /// Returns the device id.
    #[must_use]
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Returns the parameter rows in order.
    #[must_use]
    pub fn parameters(&self) -> &[ParameterRow] {
        &self.parameters
    }

    /// Returns the parameter rows for editing.
    pub fn parameters_mut(&mut self) -> &mut [ParameterRow] {
        &mut self.parameters
    }

    /// Appends a row.
    pub fn push_parameter(&mut self, row: ParameterRow) {
        self.parameters.push(row);
    }

    /// Removes a row by id, returning it if present.
    pub fn remove_parameter(&mut self, id: RowId) -> Option<ParameterRow> {
        let idx = self.parameters.iter().position(|row| row.id() == id)?;
        Some(self.parameters.remove(idx))
    }

    /// Sets the value of the row with the given id.
    ///
    /// Returns `false` if no such row exists.
    pub fn set_parameter_value(&mut self, id: RowId, value: impl Into<String>) -> bool {
        match self.parameters.iter_mut().find(|row| row.id() == id) {
            Some(row) => {
                row.set_value(value);
                true
            }
            None => false,
        }
    }

    /// Returns the parameters as a key/value map.
    ///
    /// When a key repeats, the later row wins.
    #[must_use]
    pub fn parameter_values(&self) -> BTreeMap<String, String> {
        self.parameters
            .iter()
            .map(|row| (row.key().to_string(), row.value().to_string()))
            .collect()
    }

    /// Returns the firmware attachment reference.
    #[must_use]
    pub fn firmware_attachment(&self) -> Option<&str> {
        self.firmware_attachment.as_deref()
    }

    /// Attaches a firmware file.
    pub fn attach_firmware(&mut self, reference: impl Into<String>) {
        self.firmware_attachment = Some(reference.into());
    }

    /// Removes the firmware attachment.
    pub fn clear_firmware(&mut self) {
        self.firmware_attachment = None;
    }

    /// Returns the OTA version name.
    #[must_use]
    pub fn device_version(&self) -> Option<&str> {
        self.device_version.as_deref()
    }

    /// Sets or clears the OTA version name.
    pub fn set_device_version(&mut self, version: Option<String>) {
        self.device_version = version;
    }

    /// Returns the workflow flags.
    #[must_use]
    pub fn flags(&self) -> WorkflowFlags {
        self.flags
    }

    /// Records that the device applied the pending configuration.
    pub fn acknowledge_config(&mut self) {
        self.flags.acknowledge_config();
    }

    /// Records that the device applied the pending firmware update.
    pub fn acknowledge_ota(&mut self) {
        self.flags.acknowledge_ota();
    }

    pub(crate) fn flags_mut(&mut self) -> &mut WorkflowFlags {
        &mut self.flags
    }

    pub(crate) fn mark_persisted(&mut self) {
        for row in &mut self.parameters {
            row.mark_persisted();
        }
    }
}
