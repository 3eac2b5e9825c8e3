// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device key credential.

use std::fmt;

use rand::Rng;
use rand::distr::Alphanumeric;

/// Key a device presents when polling for configuration.
///
/// Generated keys carry the [`DeviceKey::PREFIX`]; the remainder is the id the
/// device's configuration record is stored under.
///
/// # Examples
///
/// ```
/// use beetwin_iot::types::DeviceKey;
///
/// let key = DeviceKey::new("LSPL_8f3k2");
/// assert_eq!(key.device_id(), "8f3k2");
///
/// // Keys without the prefix are used as-is.
/// assert_eq!(DeviceKey::new("plain").device_id(), "plain");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct DeviceKey(String);

impl DeviceKey {
    /// Prefix of generated device keys.
    pub const PREFIX: &'static str = "LSPL_";

    /// Wraps an existing key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Generates a fresh key with `suffix_len` random alphanumerics after the prefix.
    #[must_use]
    pub fn generate(suffix_len: usize) -> Self {
        Self(format!("{}{}", Self::PREFIX, random_alphanumeric(suffix_len)))
    }

    /// Returns the full key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the device id: the key with one leading prefix removed.
    #[must_use]
    pub fn device_id(&self) -> &str {
        self.0.strip_prefix(Self::PREFIX).unwrap_or(&self.0)
    }
}

impl fmt::Display for DeviceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns `len` random ASCII letters and digits.
pub(crate) fn random_alphanumeric(len: usize) -> String {
    let mut rng = rand::rng();
    std::iter::repeat_with(|| char::from(rng.sample(Alphanumeric)))
        .take(len)
        .collect()
}
