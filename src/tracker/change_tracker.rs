// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pre-save change detection and flag policy.

use crate::record::{DeviceConfigRecord, WorkflowFlags};

use super::ShadowState;

/// What changed since the shadow last observed the record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// A persisted row holds a value different from its observed one.
    pub config_params_changed: bool,
    /// A firmware attachment is present and differs from the observed one.
    pub firmware_changed: bool,
}

impl ChangeSet {
    /// Returns `true` if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.config_params_changed && !self.firmware_changed
    }
}

/// What the tracker did to `is_new_config` and `acknowledge`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigDecision {
    /// `is_new_config` set and `acknowledge` reset.
    Raised,
    /// `is_new_config` cleared, `acknowledge` untouched.
    Cleared,
    /// A firmware change in the same save took precedence; both flags untouched.
    Suppressed,
}

/// What the tracker did to `is_new_ota` and `ota_acknowledge`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtaDecision {
    /// `is_new_ota` set and `ota_acknowledge` reset.
    Raised,
    /// `is_new_ota` cleared, `ota_acknowledge` untouched.
    Cleared,
}

/// Result of one pre-save evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOutcome {
    /// Detected changes.
    pub changes: ChangeSet,
    /// Decision for the configuration flags.
    pub config: ConfigDecision,
    /// Decision for the OTA flags.
    pub ota: OtaDecision,
    /// Flags before the evaluation.
    pub before: WorkflowFlags,
    /// Flags after the evaluation.
    pub after: WorkflowFlags,
}

impl SaveOutcome {
    /// Returns `true` if the save announces a new configuration to the device.
    #[must_use]
    pub fn config_pending(&self) -> bool {
        self.config == ConfigDecision::Raised
    }

    /// Returns `true` if the save announces a firmware update to the device.
    #[must_use]
    pub fn ota_pending(&self) -> bool {
        self.ota == OtaDecision::Raised
    }

    /// Applies this outcome's decisions on top of the currently stored flags.
    ///
    /// Flags the tracker left untouched keep their stored value, so an
    /// acknowledgment written while the record was being edited survives
    /// the save.
    #[must_use]
    pub fn reconcile(&self, stored: WorkflowFlags) -> WorkflowFlags {
        let mut flags = stored;
        match self.config {
            ConfigDecision::Raised => {
                flags.is_new_config = true;
                flags.acknowledge = false;
            }
            ConfigDecision::Cleared => flags.is_new_config = false,
            ConfigDecision::Suppressed => {}
        }
        match self.ota {
            OtaDecision::Raised => {
                flags.is_new_ota = true;
                flags.ota_acknowledge = false;
            }
            OtaDecision::Cleared => flags.is_new_ota = false,
        }
        flags
    }
}

/// Decides, right before a record is persisted, whether its configuration or
/// firmware changed and updates the workflow flags accordingly.
///
/// The tracker holds no state of its own. Everything it remembers between
/// saves lives in the [`ShadowState`] passed to [`before_save`](Self::before_save).
///
/// # Examples
///
/// ```
/// use beetwin_iot::record::{DeviceConfigRecord, ParameterRow};
/// use beetwin_iot::tracker::{ConfigChangeTracker, ShadowState};
/// use beetwin_iot::types::RowId;
///
/// let id = RowId::new();
/// let mut record = DeviceConfigRecord::new("dev")
///     .with_parameters(vec![ParameterRow::persisted(id, "SR", "10")]);
/// let mut shadow = ShadowState::from_record(&record);
///
/// record.set_parameter_value(id, "20");
/// let outcome = ConfigChangeTracker::new().before_save(&mut record, &mut shadow);
///
/// assert!(outcome.config_pending());
/// assert!(record.flags().is_new_config);
/// assert!(!record.flags().acknowledge);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigChangeTracker;

impl ConfigChangeTracker {
    /// Creates a tracker.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Compares the record against the shadow without touching either.
    #[must_use]
    pub fn detect(&self, record: &DeviceConfigRecord, shadow: &ShadowState) -> ChangeSet {
        // Rows without an observed value were never seen and do not count.
        let config_params_changed = record
            .parameters()
            .iter()
            .filter(|row| !row.is_newly_added())
            .any(|row| {
                shadow
                    .last_value(row.id())
                    .is_some_and(|last| last != row.value())
            });

        let firmware_changed = match record.firmware_attachment() {
            Some(current) => shadow.last_firmware_attachment() != Some(current),
            None => false,
        };

        ChangeSet {
            config_params_changed,
            firmware_changed,
        }
    }

    /// Runs the pre-save hook: updates the record's flags, then the shadow.
    ///
    /// The shadow is always updated last, so a value that does not change
    /// between two consecutive saves is never flagged twice.
    pub fn before_save(
        &self,
        record: &mut DeviceConfigRecord,
        shadow: &mut ShadowState,
    ) -> SaveOutcome {
        let changes = self.detect(record, shadow);
        let before = record.flags();
        let flags = record.flags_mut();

        let config = match (changes.config_params_changed, changes.firmware_changed) {
            (true, false) => {
                flags.is_new_config = true;
                flags.acknowledge = false;
                ConfigDecision::Raised
            }
            (false, _) => {
                flags.is_new_config = false;
                ConfigDecision::Cleared
            }
            (true, true) => ConfigDecision::Suppressed,
        };

        let ota = if changes.firmware_changed {
            flags.is_new_ota = true;
            flags.ota_acknowledge = false;
            OtaDecision::Raised
        } else {
            flags.is_new_ota = false;
            OtaDecision::Cleared
        };

        let after = *flags;
        shadow.observe(record);

        tracing::debug!(
            device_id = %record.device_id(),
            config_params_changed = changes.config_params_changed,
            firmware_changed = changes.firmware_changed,
            config = ?config,
            ota = ?ota,
            "Evaluated device config before save"
        );

        SaveOutcome {
            changes,
            config,
            ota,
            before,
            after,
        }
    }
}
