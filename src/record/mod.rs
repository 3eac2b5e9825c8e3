// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Records owned by the persistence layer.
//!
//! A [`DeviceConfigRecord`] holds the parameters and firmware attachment a
//! device pulls, together with the [`WorkflowFlags`] that tell the device
//! whether anything is pending. A [`DeviceRecord`] is the registered device
//! itself.

mod device;
mod device_config;
mod flags;

pub use device::DeviceRecord;
pub use device_config::{DeviceConfigRecord, ParameterRow};
pub use flags::WorkflowFlags;
pub(crate) use flags::deserialize_check;
