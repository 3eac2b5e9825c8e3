// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory configuration store.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::StoreError;
use crate::record::DeviceConfigRecord;

use super::ConfigStore;

/// Thread-safe in-memory [`ConfigStore`].
///
/// Cloning is cheap and clones share the same records.
///
/// # Examples
///
/// ```
/// use beetwin_iot::record::DeviceConfigRecord;
/// use beetwin_iot::store::MemoryConfigStore;
///
/// let store = MemoryConfigStore::new();
/// store.insert(DeviceConfigRecord::new("8f3k2"));
/// assert!(store.get("8f3k2").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigStore {
    records: Arc<RwLock<HashMap<String, DeviceConfigRecord>>>,
}

impl MemoryConfigStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a record without going through the async API.
    pub fn insert(&self, mut record: DeviceConfigRecord) {
        record.mark_persisted();
        self.records
            .write()
            .insert(record.device_id().to_string(), record);
    }

    /// Returns a copy of the stored record.
    #[must_use]
    pub fn get(&self, device_id: &str) -> Option<DeviceConfigRecord> {
        self.records.read().get(device_id).cloned()
    }

    /// Returns the number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Returns `true` if no records are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl ConfigStore for MemoryConfigStore {
    async fn find(&self, device_id: &str) -> Result<Option<DeviceConfigRecord>, StoreError> {
        Ok(self.get(device_id))
    }

    async fn save(&self, record: &DeviceConfigRecord) -> Result<(), StoreError> {
        tracing::debug!(device_id = %record.device_id(), "Storing device config");
        self.insert(record.clone());
        Ok(())
    }
}
