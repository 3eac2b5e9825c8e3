// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device-side half of the change workflow.

use crate::error::{Error, Result, ValueError};
use crate::event::{EventBus, SyncEvent};
use crate::firmware::FirmwareLookup;
use crate::record::DeviceConfigRecord;
use crate::store::ConfigStore;
use crate::types::DeviceKey;

use super::{
    ACKNOWLEDGMENT_MESSAGE, AckRequest, ConfigValues, NO_OTA_FILE_MESSAGE, SyncResponse,
};

/// Settings for [`AcknowledgmentHandler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AckHandlerConfig {
    public_base_url: String,
}

impl AckHandlerConfig {
    /// Creates a configuration serving firmware files from `public_base_url`.
    #[must_use]
    pub fn new(public_base_url: impl Into<String>) -> Self {
        let mut public_base_url = public_base_url.into();
        while public_base_url.ends_with('/') {
            public_base_url.pop();
        }
        Self { public_base_url }
    }

    /// Returns the public base URL.
    #[must_use]
    pub fn public_base_url(&self) -> &str {
        &self.public_base_url
    }

    /// Returns the URL a device downloads an attached firmware file from.
    ///
    /// The attachment path is kept as stored, so private files stay under
    /// `/private/files`. Absolute URLs are returned unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use beetwin_iot::ack::AckHandlerConfig;
    ///
    /// let config = AckHandlerConfig::new("https://iot.example.io/");
    /// assert_eq!(
    ///     config.firmware_url("/private/files/fw_v2.bin"),
    ///     "https://iot.example.io/private/files/fw_v2.bin"
    /// );
    /// assert_eq!(
    ///     config.firmware_url("https://cdn.example.io/fw_v2.bin"),
    ///     "https://cdn.example.io/fw_v2.bin"
    /// );
    /// ```
    #[must_use]
    pub fn firmware_url(&self, attachment: &str) -> String {
        if attachment.starts_with("http://") || attachment.starts_with("https://") {
            return attachment.to_string();
        }
        format!(
            "{}/{}",
            self.public_base_url,
            attachment.trim_start_matches('/')
        )
    }
}

/// Answers device sync requests.
///
/// A request first applies the acknowledgments it carries (`CACK`, `OACK`)
/// and persists them. The tracker does not run on this path. The reply then
/// describes whatever is still pending.
///
/// # Examples
///
/// ```no_run
/// use beetwin_iot::ack::{AckHandlerConfig, AckRequest, AcknowledgmentHandler};
/// use beetwin_iot::firmware::HttpFirmwareLookup;
/// use beetwin_iot::protocol::HttpConfig;
/// use beetwin_iot::store::MemoryConfigStore;
///
/// # async fn example() -> beetwin_iot::Result<()> {
/// let client = HttpConfig::new("iot.example.com").into_client()?;
/// let handler = AcknowledgmentHandler::new(
///     MemoryConfigStore::new(),
///     HttpFirmwareLookup::new(client),
///     AckHandlerConfig::new("https://iot.example.io"),
/// );
///
/// let reply = handler
///     .handle(&AckRequest::new("LSPL_8f3k2").with_config().with_ota())
///     .await?;
/// println!("{}", serde_json::to_string(&reply).unwrap_or_default());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AcknowledgmentHandler<S, L> {
    store: S,
    lookup: L,
    config: AckHandlerConfig,
    events: Option<EventBus>,
}

impl<S: ConfigStore, L: FirmwareLookup> AcknowledgmentHandler<S, L> {
    /// Creates a handler.
    #[must_use]
    pub fn new(store: S, lookup: L, config: AckHandlerConfig) -> Self {
        Self {
            store,
            lookup,
            config,
            events: None,
        }
    }

    /// Publishes acknowledgment events on `bus`.
    #[must_use]
    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    /// Returns the store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handles one sync request.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::Required` without a device key,
    /// `Error::DeviceNotFound` for an unknown device and `Error::Store` if
    /// the acknowledgment cannot be persisted.
    pub async fn handle(&self, request: &AckRequest) -> Result<SyncResponse> {
        let device_key = request
            .device_key
            .as_deref()
            .map(DeviceKey::new)
            .ok_or(ValueError::Required("device_key"))?;
        let device_id = device_key.device_id();

        let mut record = self
            .store
            .find(device_id)
            .await?
            .ok_or_else(|| Error::DeviceNotFound(device_id.to_string()))?;

        self.apply_acknowledgments(request, &mut record).await?;

        let flags = record.flags();
        if !flags.has_pending() {
            tracing::debug!(device_id = %device_id, "Nothing pending for device");
            return Ok(SyncResponse::default());
        }

        let mut response = SyncResponse {
            device_key: Some(device_key.as_str().to_string()),
            name: Some(device_id.to_string()),
            ..SyncResponse::default()
        };

        if request.is_config && flags.is_new_config {
            response.data = Some(vec![ConfigValues {
                values: record.parameter_values(),
            }]);
        }

        if request.is_ota && flags.is_new_ota {
            match record.firmware_attachment() {
                Some(attachment) => {
                    response.ota_file_url = Some(self.config.firmware_url(attachment));
                    if let Some(version) = record.device_version() {
                        response.device_version = Some(self.version_label(version).await);
                    }
                }
                None => response.ota_message = Some(NO_OTA_FILE_MESSAGE.to_string()),
            }
        }

        if request.ack {
            response.acknowledgment = Some(ACKNOWLEDGMENT_MESSAGE.to_string());
        }

        tracing::info!(
            device_id = %device_id,
            config = response.data.is_some(),
            ota = response.ota_file_url.is_some() || response.ota_message.is_some(),
            "Answered device sync request"
        );
        Ok(response)
    }

    async fn apply_acknowledgments(
        &self,
        request: &AckRequest,
        record: &mut DeviceConfigRecord,
    ) -> Result<()> {
        if !request.config_ack && !request.ota_ack {
            return Ok(());
        }

        if request.config_ack {
            record.acknowledge_config();
        }
        if request.ota_ack {
            record.acknowledge_ota();
        }
        self.store.save(record).await?;

        let device_id = record.device_id();
        tracing::info!(
            device_id = %device_id,
            config = request.config_ack,
            ota = request.ota_ack,
            "Device acknowledged changes"
        );
        if let Some(bus) = &self.events {
            if request.config_ack {
                bus.publish(SyncEvent::config_acknowledged(device_id));
            }
            if request.ota_ack {
                bus.publish(SyncEvent::ota_acknowledged(device_id));
            }
        }
        Ok(())
    }

    async fn version_label(&self, version: &str) -> String {
        match self.lookup.fetch_ota_version(version).await {
            Ok(ota) => ota.display_label().to_string(),
            Err(e) => {
                tracing::warn!(version = %version, error = %e, "OTA version label lookup failed");
                version.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_trims_trailing_slashes() {
        let config = AckHandlerConfig::new("https://iot.example.io//");
        assert_eq!(config.public_base_url(), "https://iot.example.io");
    }

    #[test]
    fn firmware_url_keeps_attachment_path() {
        let config = AckHandlerConfig::new("https://iot.example.io");
        assert_eq!(
            config.firmware_url("/private/files/fw_v2.bin"),
            "https://iot.example.io/private/files/fw_v2.bin"
        );
        assert_eq!(
            config.firmware_url("/files/fw_v2.bin"),
            "https://iot.example.io/files/fw_v2.bin"
        );
        assert_eq!(config.firmware_url("fw.bin"), "https://iot.example.io/fw.bin");
    }

    #[test]
    fn absolute_firmware_url_is_unchanged() {
        let config = AckHandlerConfig::new("https://iot.example.io");
        assert_eq!(
            config.firmware_url("http://files.example.io/fw.bin"),
            "http://files.example.io/fw.bin"
        );
    }
}
