// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Persistence boundary for device configuration records.
//!
//! The workflow never talks to a database directly. It loads and writes
//! records through [`ConfigStore`]; [`MemoryConfigStore`] is the in-process
//! implementation used by tests and embedded deployments.

mod memory;

pub use memory::MemoryConfigStore;

use crate::error::StoreError;
use crate::record::DeviceConfigRecord;

/// Loads and persists [`DeviceConfigRecord`]s keyed by device id.
#[allow(async_fn_in_trait)]
pub trait ConfigStore {
    /// Returns the configuration of a device, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    async fn find(&self, device_id: &str) -> Result<Option<DeviceConfigRecord>, StoreError>;

    /// Writes the record, replacing any previous version.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write is rejected.
    async fn save(&self, record: &DeviceConfigRecord) -> Result<(), StoreError>;
}
