// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Editing session for one device configuration.

use crate::error::Result;
use crate::event::{EventBus, SyncEvent};
use crate::record::DeviceConfigRecord;
use crate::store::ConfigStore;

use super::{ConfigChangeTracker, SaveOutcome, ShadowState};

/// One open editing session of a device configuration.
///
/// The session owns the record being edited and the shadow state the
/// tracker compares against. Opening (or reloading) a record seeds the
/// shadow with everything the record holds at that moment, so only edits
/// made during the session count as changes.
///
/// # Examples
///
/// ```
/// use beetwin_iot::record::{DeviceConfigRecord, ParameterRow};
/// use beetwin_iot::store::MemoryConfigStore;
/// use beetwin_iot::tracker::EditingSession;
/// use beetwin_iot::types::RowId;
///
/// # async fn example() -> beetwin_iot::Result<()> {
/// let id = RowId::new();
/// let loaded = DeviceConfigRecord::new("8f3k2")
///     .with_parameters(vec![ParameterRow::persisted(id, "SR", "10")]);
///
/// let store = MemoryConfigStore::new();
/// let mut session = EditingSession::open(loaded);
/// session.record_mut().set_parameter_value(id, "20");
///
/// let outcome = session.save(&store).await?;
/// assert!(outcome.config_pending());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct EditingSession {
    record: DeviceConfigRecord,
    shadow: ShadowState,
    tracker: ConfigChangeTracker,
    events: Option<EventBus>,
}

impl EditingSession {
    /// Opens a session on a freshly loaded record.
    #[must_use]
    pub fn open(record: DeviceConfigRecord) -> Self {
        let shadow = ShadowState::from_record(&record);
        Self {
            record,
            shadow,
            tracker: ConfigChangeTracker::new(),
            events: None,
        }
    }

    /// Publishes pending events on `bus` after successful saves.
    #[must_use]
    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    /// Returns the record being edited.
    #[must_use]
    pub fn record(&self) -> &DeviceConfigRecord {
        &self.record
    }

    /// Returns the record for editing.
    pub fn record_mut(&mut self) -> &mut DeviceConfigRecord {
        &mut self.record
    }

    /// Returns the session's shadow state.
    #[must_use]
    pub fn shadow(&self) -> &ShadowState {
        &self.shadow
    }

    /// Runs the pre-save hook without persisting.
    pub fn before_save(&mut self) -> SaveOutcome {
        self.tracker.before_save(&mut self.record, &mut self.shadow)
    }

    /// Runs the pre-save hook and persists the record.
    ///
    /// The flags written are the tracker's decisions applied to the flags
    /// currently in the store. Acknowledgments a device sent while the
    /// session was open are kept.
    ///
    /// If reading or writing the store fails, the flags and the shadow are
    /// rolled back so that saving again detects the same changes.
    ///
    /// # Errors
    ///
    /// Returns `Error::Store` if the store cannot be read or rejects the write.
    pub async fn save<S: ConfigStore>(&mut self, store: &S) -> Result<SaveOutcome> {
        let shadow_before = self.shadow.clone();
        let mut outcome = self.before_save();

        let persisted = match store.find(self.record.device_id()).await {
            Ok(stored) => {
                if let Some(stored) = stored {
                    outcome.after = outcome.reconcile(stored.flags());
                    *self.record.flags_mut() = outcome.after;
                }
                store.save(&self.record).await
            }
            Err(e) => Err(e),
        };

        if let Err(e) = persisted {
            tracing::warn!(
                device_id = %self.record.device_id(),
                error = %e,
                "Device config save failed, restoring tracked state"
            );
            *self.record.flags_mut() = outcome.before;
            self.shadow = shadow_before;
            return Err(e.into());
        }

        self.record.mark_persisted();
        self.publish(&outcome);

        tracing::info!(
            device_id = %self.record.device_id(),
            is_new_config = outcome.after.is_new_config,
            is_new_ota = outcome.after.is_new_ota,
            "Device config saved"
        );

        Ok(outcome)
    }

    /// Replaces the record with a freshly loaded one and reseeds the shadow.
    pub fn reload(&mut self, record: DeviceConfigRecord) {
        self.shadow = ShadowState::from_record(&record);
        self.record = record;
    }

    /// Closes the session, returning the record.
    #[must_use]
    pub fn into_record(self) -> DeviceConfigRecord {
        self.record
    }

    fn publish(&self, outcome: &SaveOutcome) {
        let Some(bus) = &self.events else {
            return;
        };
        let device_id = self.record.device_id();
        if outcome.config_pending() {
            bus.publish(SyncEvent::config_pending(device_id));
        }
        if outcome.ota_pending() {
            let firmware = self.record.firmware_attachment().unwrap_or_default();
            bus.publish(SyncEvent::ota_pending(device_id, firmware));
        }
    }
}
