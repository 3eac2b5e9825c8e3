// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Defaults applied when a device is saved.
//!
//! A device created for the first time must provision its credentials and
//! has not acknowledged them yet. Missing credentials are generated on every
//! save; the API secret is handed back once so it can be shown to the user.

use crate::record::DeviceRecord;
use crate::types::{DeviceKey, random_alphanumeric};

/// Lengths of generated credentials.
///
/// # Examples
///
/// ```
/// use beetwin_iot::provisioning::CredentialPolicy;
///
/// let policy = CredentialPolicy::new().with_api_secret_len(32);
/// assert_eq!(policy.api_key_len(), CredentialPolicy::DEFAULT_API_KEY_LEN);
/// assert_eq!(policy.api_secret_len(), 32);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialPolicy {
    api_key_len: usize,
    api_secret_len: usize,
    device_key_suffix_len: usize,
}

impl CredentialPolicy {
    /// Default API key length.
    pub const DEFAULT_API_KEY_LEN: usize = 15;
    /// Default API secret length.
    pub const DEFAULT_API_SECRET_LEN: usize = 15;
    /// Default number of random characters after the device key prefix.
    pub const DEFAULT_DEVICE_KEY_SUFFIX_LEN: usize = 20;

    /// Creates the default policy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            api_key_len: Self::DEFAULT_API_KEY_LEN,
            api_secret_len: Self::DEFAULT_API_SECRET_LEN,
            device_key_suffix_len: Self::DEFAULT_DEVICE_KEY_SUFFIX_LEN,
        }
    }

    /// Sets the API key length.
    #[must_use]
    pub fn with_api_key_len(mut self, len: usize) -> Self {
        self.api_key_len = len;
        self
    }

    /// Sets the API secret length.
    #[must_use]
    pub fn with_api_secret_len(mut self, len: usize) -> Self {
        self.api_secret_len = len;
        self
    }

    /// Sets the device key suffix length.
    #[must_use]
    pub fn with_device_key_suffix_len(mut self, len: usize) -> Self {
        self.device_key_suffix_len = len;
        self
    }

    /// Returns the API key length.
    #[must_use]
    pub fn api_key_len(&self) -> usize {
        self.api_key_len
    }

    /// Returns the API secret length.
    #[must_use]
    pub fn api_secret_len(&self) -> usize {
        self.api_secret_len
    }

    /// Returns the device key suffix length.
    #[must_use]
    pub fn device_key_suffix_len(&self) -> usize {
        self.device_key_suffix_len
    }
}

impl Default for CredentialPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Credentials issued during a save, to be shown to the user once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCredentials {
    /// The device's API key.
    pub api_key: String,
    /// The freshly generated API secret.
    pub api_secret: String,
}

/// Applies creation defaults and fills missing credentials on save.
///
/// # Examples
///
/// ```
/// use beetwin_iot::provisioning::DeviceCreationDefaulter;
/// use beetwin_iot::record::DeviceRecord;
///
/// let mut device = DeviceRecord::new("101 Pump", "860000000000001");
/// let issued = DeviceCreationDefaulter::new().before_save(&mut device);
///
/// assert!(device.is_set_keys);
/// assert!(!device.ack);
/// assert!(issued.is_some());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DeviceCreationDefaulter {
    policy: CredentialPolicy,
}

impl DeviceCreationDefaulter {
    /// Creates a defaulter with the default credential policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a defaulter with a custom credential policy.
    #[must_use]
    pub fn with_policy(policy: CredentialPolicy) -> Self {
        Self { policy }
    }

    /// Runs the pre-save hook for a device.
    ///
    /// Returns the credentials if a new API secret was generated.
    pub fn before_save(&self, device: &mut DeviceRecord) -> Option<IssuedCredentials> {
        if device.is_new() {
            device.is_set_keys = true;
            device.ack = false;
        }

        // Empty strings count as missing, like absent fields.
        if device.api_key.as_deref().is_none_or(str::is_empty) {
            device.api_key = Some(random_alphanumeric(self.policy.api_key_len()));
        }
        let api_key = device.api_key.clone().unwrap_or_default();

        let issued = if device.api_secret.as_deref().is_none_or(str::is_empty) {
            let api_secret = random_alphanumeric(self.policy.api_secret_len());
            device.api_secret = Some(api_secret.clone());
            Some(IssuedCredentials {
                api_key,
                api_secret,
            })
        } else {
            None
        };

        if device
            .device_key
            .as_ref()
            .is_none_or(|key| key.as_str().is_empty())
        {
            device.device_key = Some(DeviceKey::generate(self.policy.device_key_suffix_len()));
        }

        if issued.is_some() {
            tracing::info!(device = %device.name, "Issued API credentials");
        }

        issued
    }
}
