// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Copies the firmware file of a selected device version into its row.

use std::time::Duration;

use crate::error::{ProtocolError, Result};
use crate::types::RowId;

use super::FirmwareLookup;

/// Progress of a row's firmware file resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionState {
    /// No version selected.
    Idle,
    /// A version was selected and its firmware file is being looked up.
    Pending {
        /// The selected version.
        version: String,
    },
    /// The firmware file was copied from the version.
    Resolved {
        /// The resolved version.
        version: String,
    },
    /// The lookup failed; the row's firmware file was left as it was.
    Failed {
        /// The version that failed to resolve.
        version: String,
        /// Why it failed.
        reason: String,
    },
}

impl ResolutionState {
    /// Returns `true` while a lookup is outstanding.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    /// Returns `true` if the last lookup failed.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// A device version row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionEntry {
    id: RowId,
    device_version: Option<String>,
    firmware_file: Option<String>,
    state: ResolutionState,
}

impl VersionEntry {
    /// Creates an empty row.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: RowId::new(),
            device_version: None,
            firmware_file: None,
            state: ResolutionState::Idle,
        }
    }

    /// Returns the row identity.
    #[must_use]
    pub fn id(&self) -> RowId {
        self.id
    }

    /// Returns the selected version.
    #[must_use]
    pub fn device_version(&self) -> Option<&str> {
        self.device_version.as_deref()
    }

    /// Returns the firmware file reference.
    #[must_use]
    pub fn firmware_file(&self) -> Option<&str> {
        self.firmware_file.as_deref()
    }

    /// Returns the resolution state.
    #[must_use]
    pub fn state(&self) -> &ResolutionState {
        &self.state
    }

    /// Selects a version; the row stays pending until resolved.
    pub fn select_version(&mut self, version: impl Into<String>) {
        let version = version.into();
        self.state = ResolutionState::Pending {
            version: version.clone(),
        };
        self.device_version = Some(version);
    }

    /// Clears the selected version. The firmware file is kept.
    pub fn clear_version(&mut self) {
        self.device_version = None;
        self.state = ResolutionState::Idle;
    }
}

impl Default for VersionEntry {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves a row's device version into its firmware file.
///
/// The copy is a plain denormalization: whatever the version record holds
/// is written into the row, without consistency checks.
///
/// # Examples
///
/// ```no_run
/// use beetwin_iot::firmware::{DeviceVersionResolver, HttpFirmwareLookup, VersionEntry};
/// use beetwin_iot::protocol::HttpConfig;
///
/// # async fn example() -> beetwin_iot::Result<()> {
/// let client = HttpConfig::new("iot.example.com").into_client()?;
/// let resolver = DeviceVersionResolver::new(HttpFirmwareLookup::new(client));
///
/// let mut entry = VersionEntry::new();
/// entry.select_version("v2");
/// resolver.resolve(&mut entry).await?;
/// println!("firmware: {:?}", entry.firmware_file());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DeviceVersionResolver<L> {
    lookup: L,
    timeout: Duration,
}

impl<L: FirmwareLookup> DeviceVersionResolver<L> {
    /// Default time allowed for one lookup.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a resolver with the default timeout.
    #[must_use]
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the time allowed for one lookup.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the lookup timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Looks up the selected version and copies its firmware file into the row.
    ///
    /// Returns the copied firmware file, or `None` if no version is selected.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Timeout` if the lookup takes longer than the
    /// timeout, or the lookup's own error. The row is left in
    /// [`ResolutionState::Failed`] with its firmware file unchanged.
    pub async fn resolve(&self, entry: &mut VersionEntry) -> Result<Option<String>> {
        let Some(version) = entry.device_version.clone() else {
            entry.state = ResolutionState::Idle;
            return Ok(None);
        };
        entry.state = ResolutionState::Pending {
            version: version.clone(),
        };

        let result = match tokio::time::timeout(
            self.timeout,
            self.lookup.fetch_ota_version(&version),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(ProtocolError::Timeout(
                u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            )
            .into()),
        };

        match result {
            Ok(ota) => {
                tracing::debug!(
                    version = %version,
                    firmware_file = ?ota.firmware_file,
                    "Resolved device version"
                );
                entry.firmware_file.clone_from(&ota.firmware_file);
                entry.state = ResolutionState::Resolved { version };
                Ok(ota.firmware_file)
            }
            Err(e) => {
                tracing::warn!(version = %version, error = %e, "Device version lookup failed");
                entry.state = ResolutionState::Failed {
                    version,
                    reason: e.to_string(),
                };
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::firmware::OtaVersion;

    struct StaticLookup;

    impl FirmwareLookup for StaticLookup {
        async fn fetch_ota_version(&self, version: &str) -> Result<OtaVersion> {
            match version {
                "v2" => Ok(OtaVersion {
                    name: "v2".into(),
                    firmware_file: Some("/files/fw_v2.bin".into()),
                    ota_label: None,
                }),
                "bare" => Ok(OtaVersion {
                    name: "bare".into(),
                    firmware_file: None,
                    ota_label: None,
                }),
                other => Err(ProtocolError::NotFound(other.to_string()).into()),
            }
        }
    }

    struct SlowLookup;

    impl FirmwareLookup for SlowLookup {
        async fn fetch_ota_version(&self, version: &str) -> Result<OtaVersion> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            StaticLookup.fetch_ota_version(version).await
        }
    }

    #[test]
    fn select_version_marks_pending() {
        let mut entry = VersionEntry::new();
        entry.select_version("v2");
        assert!(entry.state().is_pending());
        assert_eq!(entry.device_version(), Some("v2"));
    }

    #[tokio::test]
    async fn resolve_copies_firmware_file() {
        let resolver = DeviceVersionResolver::new(StaticLookup);
        let mut entry = VersionEntry::new();
        entry.select_version("v2");

        let file = resolver.resolve(&mut entry).await.unwrap();
        assert_eq!(file.as_deref(), Some("/files/fw_v2.bin"));
        assert_eq!(entry.firmware_file(), Some("/files/fw_v2.bin"));
        assert_eq!(
            entry.state(),
            &ResolutionState::Resolved {
                version: "v2".into()
            }
        );
    }

    #[tokio::test]
    async fn resolve_copies_missing_file_verbatim() {
        let resolver = DeviceVersionResolver::new(StaticLookup);
        let mut entry = VersionEntry::new();
        entry.select_version("v2");
        resolver.resolve(&mut entry).await.unwrap();

        entry.select_version("bare");
        resolver.resolve(&mut entry).await.unwrap();
        assert!(entry.firmware_file().is_none());
    }

    #[tokio::test]
    async fn resolve_without_version_is_idle() {
        let resolver = DeviceVersionResolver::new(StaticLookup);
        let mut entry = VersionEntry::new();
        assert!(resolver.resolve(&mut entry).await.unwrap().is_none());
        assert_eq!(entry.state(), &ResolutionState::Idle);
    }

    #[tokio::test]
    async fn unknown_version_fails_and_keeps_file() {
        let resolver = DeviceVersionResolver::new(StaticLookup);
        let mut entry = VersionEntry::new();
        entry.select_version("v2");
        resolver.resolve(&mut entry).await.unwrap();

        entry.select_version("v9");
        let err = resolver.resolve(&mut entry).await.unwrap_err();
        assert!(matches!(err, Error::Protocol(ProtocolError::NotFound(_))));
        assert!(entry.state().is_failed());
        assert_eq!(entry.firmware_file(), Some("/files/fw_v2.bin"));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_lookup_times_out() {
        let resolver =
            DeviceVersionResolver::new(SlowLookup).with_timeout(Duration::from_millis(500));
        let mut entry = VersionEntry::new();
        entry.select_version("v2");

        let err = resolver.resolve(&mut entry).await.unwrap_err();
        assert!(matches!(err, Error::Protocol(ProtocolError::Timeout(500))));
        assert!(entry.firmware_file().is_none());
        assert!(entry.state().is_failed());
    }

    #[test]
    fn clear_version_keeps_file() {
        let mut entry = VersionEntry::new();
        entry.firmware_file = Some("/files/fw.bin".into());
        entry.select_version("v2");
        entry.clear_version();
        assert_eq!(entry.state(), &ResolutionState::Idle);
        assert_eq!(entry.firmware_file(), Some("/files/fw.bin"));
    }
}
