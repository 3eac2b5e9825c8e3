// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Change tracking for device configurations.
//!
//! Before a [`DeviceConfigRecord`](crate::record::DeviceConfigRecord) is
//! persisted, the [`ConfigChangeTracker`] compares it with the
//! [`ShadowState`] of the current editing session and derives two independent
//! signals:
//!
//! - **configuration changed**: a row that existed before the session holds a
//!   new value
//! - **firmware changed**: a firmware attachment is present and differs from
//!   the last observed one
//!
//! Each signal drives a pending flag and resets its acknowledgment flag. A
//! firmware change takes precedence: when both happen in the same save, the
//! configuration flags are left exactly as they were.
//!
//! [`EditingSession`] bundles a record with its shadow and persists through a
//! [`ConfigStore`](crate::store::ConfigStore).

mod change_tracker;
mod session;
mod shadow;

pub use change_tracker::{ChangeSet, ConfigChangeTracker, ConfigDecision, OtaDecision, SaveOutcome};
pub use session::EditingSession;
pub use shadow::ShadowState;
