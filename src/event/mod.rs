// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Workflow events.
//!
//! Editing sessions and the acknowledgment handler publish [`SyncEvent`]s on
//! an [`EventBus`] when they are given one. The bus wraps tokio's broadcast
//! channel so several listeners can follow the workflow.
//!
//! # Examples
//!
//! ```
//! use beetwin_iot::event::{EventBus, SyncEvent};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//! bus.publish(SyncEvent::ota_acknowledged("8f3k2"));
//! ```

mod event_bus;
mod sync_event;

pub use event_bus::EventBus;
pub use sync_event::SyncEvent;
