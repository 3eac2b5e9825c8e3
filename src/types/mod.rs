// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Identifier types shared across the workflow.
//!
//! - [`RowId`] - Stable identity of a child-table row
//! - [`DeviceKey`] - Credential a device presents when polling

mod device_key;
mod row_id;

pub use device_key::DeviceKey;
pub(crate) use device_key::random_alphanumeric;
pub use row_id::RowId;
