// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session-scoped memory of previously observed values.

use std::collections::HashMap;

use crate::record::DeviceConfigRecord;
use crate::types::RowId;

/// Last observed values of one record within one editing session.
///
/// Never persisted. The framework does not keep previous row values, so the
/// tracker compares against what this session saw at load or at the last save.
///
/// # Examples
///
/// ```
/// use beetwin_iot::record::{DeviceConfigRecord, ParameterRow};
/// use beetwin_iot::tracker::ShadowState;
///
/// let row = ParameterRow::new("SR", "10");
/// let id = row.id();
/// let record = DeviceConfigRecord::new("dev").with_parameters(vec![row]);
///
/// let shadow = ShadowState::from_record(&record);
/// assert_eq!(shadow.last_value(id), Some("10"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShadowState {
    last_firmware_attachment: Option<String>,
    last_parameter_values: HashMap<RowId, String>,
}

impl ShadowState {
    /// Creates an empty shadow: nothing has been observed yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a shadow seeded with everything the record currently holds.
    #[must_use]
    pub fn from_record(record: &DeviceConfigRecord) -> Self {
        let mut shadow = Self::new();
        shadow.observe(record);
        shadow
    }

    /// Returns the last observed value of a row.
    #[must_use]
    pub fn last_value(&self, id: RowId) -> Option<&str> {
        self.last_parameter_values.get(&id).map(String::as_str)
    }

    /// Returns the last observed firmware attachment.
    #[must_use]
    pub fn last_firmware_attachment(&self) -> Option<&str> {
        self.last_firmware_attachment.as_deref()
    }

    /// Returns the number of rows with an observed value.
    #[must_use]
    pub fn observed_rows(&self) -> usize {
        self.last_parameter_values.len()
    }

    /// Returns `true` if nothing has been observed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.last_firmware_attachment.is_none() && self.last_parameter_values.is_empty()
    }

    /// Records the current firmware attachment and every row value.
    ///
    /// Rows that disappeared from the record keep their entry; they can no
    /// longer be compared so the entry is inert.
    pub fn observe(&mut self, record: &DeviceConfigRecord) {
        self.last_firmware_attachment = record.firmware_attachment().map(str::to_string);
        for row in record.parameters() {
            self.last_parameter_values
                .insert(row.id(), row.value().to_string());
        }
    }

    /// Forgets everything observed so far.
    pub fn clear(&mut self) {
        self.last_firmware_attachment = None;
        self.last_parameter_values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ParameterRow;

    #[test]
    fn new_is_empty() {
        let shadow = ShadowState::new();
        assert!(shadow.is_empty());
        assert_eq!(shadow.observed_rows(), 0);
        assert!(shadow.last_firmware_attachment().is_none());
    }

    #[test]
    fn observe_overwrites_values() {
        let row = ParameterRow::new("SR", "10");
        let id = row.id();
        let mut record = DeviceConfigRecord::new("dev").with_parameters(vec![row]);
        let mut shadow = ShadowState::from_record(&record);

        record.set_parameter_value(id, "20");
        record.attach_firmware("fw.bin");
        shadow.observe(&record);

        assert_eq!(shadow.last_value(id), Some("20"));
        assert_eq!(shadow.last_firmware_attachment(), Some("fw.bin"));
    }

    #[test]
    fn observe_tracks_firmware_removal() {
        let mut record = DeviceConfigRecord::new("dev");
        record.attach_firmware("fw.bin");
        let mut shadow = ShadowState::from_record(&record);

        record.clear_firmware();
        shadow.observe(&record);
        assert!(shadow.last_firmware_attachment().is_none());
    }

    #[test]
    fn clear_forgets_everything() {
        let record =
            DeviceConfigRecord::new("dev").with_parameters(vec![ParameterRow::new("SR", "1")]);
        let mut shadow = ShadowState::from_record(&record);
        assert!(!shadow.is_empty());

        shadow.clear();
        assert!(shadow.is_empty());
    }
}
