// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Acknowledgment channel.
//!
//! Devices poll with an [`AckRequest`], receive pending configuration values
//! and firmware details in a [`SyncResponse`], and confirm what they applied
//! on their next request. Confirming clears the matching pending flag.

mod handler;
mod request;
mod response;

pub use handler::{AckHandlerConfig, AcknowledgmentHandler};
pub use request::AckRequest;
pub use response::{ACKNOWLEDGMENT_MESSAGE, ConfigValues, NO_OTA_FILE_MESSAGE, SyncResponse};
