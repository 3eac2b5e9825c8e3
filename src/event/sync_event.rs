// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Workflow event types.

/// Events emitted as configurations move through the sync workflow.
///
/// Pending events are published after a save that raised a flag has been
/// persisted; acknowledged events after a device confirmation was persisted.
///
/// # Examples
///
/// ```
/// use beetwin_iot::event::SyncEvent;
///
/// let event = SyncEvent::config_pending("8f3k2");
/// assert_eq!(event.device_id(), "8f3k2");
/// assert!(event.is_pending());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SyncEvent {
    /// A configuration change waits for the device.
    ConfigPending {
        /// The device the configuration belongs to.
        device_id: String,
    },

    /// A firmware update waits for the device.
    OtaPending {
        /// The device the configuration belongs to.
        device_id: String,
        /// The attached firmware reference.
        firmware: String,
    },

    /// The device applied the configuration.
    ConfigAcknowledged {
        /// The acknowledging device.
        device_id: String,
    },

    /// The device applied the firmware update.
    OtaAcknowledged {
        /// The acknowledging device.
        device_id: String,
    },
}

impl SyncEvent {
    /// Returns the device id associated with this event.
    #[must_use]
    pub fn device_id(&self) -> &str {
        match self {
            Self::ConfigPending { device_id }
            | Self::OtaPending { device_id, .. }
            | Self::ConfigAcknowledged { device_id }
            | Self::OtaAcknowledged { device_id } => device_id,
        }
    }

    /// Returns `true` if this event announces pending work.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::ConfigPending { .. } | Self::OtaPending { .. })
    }

    /// Returns `true` if this event records a device confirmation.
    #[must_use]
    pub fn is_acknowledgment(&self) -> bool {
        matches!(
            self,
            Self::ConfigAcknowledged { .. } | Self::OtaAcknowledged { .. }
        )
    }

    /// Creates a configuration pending event.
    #[must_use]
    pub fn config_pending(device_id: impl Into<String>) -> Self {
        Self::ConfigPending {
            device_id: device_id.into(),
        }
    }

    /// Creates a firmware pending event.
    #[must_use]
    pub fn ota_pending(device_id: impl Into<String>, firmware: impl Into<String>) -> Self {
        Self::OtaPending {
            device_id: device_id.into(),
            firmware: firmware.into(),
        }
    }

    /// Creates a configuration acknowledged event.
    #[must_use]
    pub fn config_acknowledged(device_id: impl Into<String>) -> Self {
        Self::ConfigAcknowledged {
            device_id: device_id.into(),
        }
    }

    /// Creates a firmware acknowledged event.
    #[must_use]
    pub fn ota_acknowledged(device_id: impl Into<String>) -> Self {
        Self::OtaAcknowledged {
            device_id: device_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_id_extraction() {
        assert_eq!(SyncEvent::ota_pending("a", "fw.bin").device_id(), "a");
        assert_eq!(SyncEvent::config_acknowledged("b").device_id(), "b");
        assert_eq!(SyncEvent::ota_acknowledged("c").device_id(), "c");
    }

    #[test]
    fn classification() {
        assert!(SyncEvent::ota_pending("a", "fw.bin").is_pending());
        assert!(!SyncEvent::ota_pending("a", "fw.bin").is_acknowledgment());
        assert!(SyncEvent::config_acknowledged("a").is_acknowledgment());
    }

    #[test]
    fn serializes_with_tag() {
        let json = serde_json::to_value(SyncEvent::ota_pending("a", "fw.bin")).unwrap();
        assert_eq!(json["event"], "ota_pending");
        assert_eq!(json["firmware"], "fw.bin");
    }
}
