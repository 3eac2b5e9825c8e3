// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport to the application backend.
//!
//! [`HttpClient`] is shared by the HTTP implementations of
//! [`DeviceListSource`](crate::report::DeviceListSource) and
//! [`FirmwareLookup`](crate::firmware::FirmwareLookup).

mod http;

pub use http::{HttpClient, HttpConfig};
