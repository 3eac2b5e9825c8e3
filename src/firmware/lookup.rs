// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! OTA version records and how to fetch them.

use crate::error::Result;

/// A released firmware version.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OtaVersion {
    /// Version name the rows reference.
    pub name: String,
    /// Reference to the firmware file.
    #[serde(default)]
    pub firmware_file: Option<String>,
    /// Human readable version label.
    #[serde(default)]
    pub ota_label: Option<String>,
}

impl OtaVersion {
    /// Returns the label, falling back to the version name.
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.ota_label.as_deref().unwrap_or(&self.name)
    }
}

/// Fetches [`OtaVersion`] records by name.
#[allow(async_fn_in_trait)]
pub trait FirmwareLookup {
    /// Fetches an OTA version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version does not exist or cannot be fetched.
    async fn fetch_ota_version(&self, version: &str) -> Result<OtaVersion>;
}

#[cfg(feature = "http")]
pub use http_lookup::HttpFirmwareLookup;

#[cfg(feature = "http")]
mod http_lookup {
    use crate::error::Result;
    use crate::protocol::HttpClient;

    use super::{FirmwareLookup, OtaVersion};

    /// Document type holding OTA versions.
    const OTA_VERSION_DOCTYPE: &str = "OTA Version";

    #[derive(serde::Deserialize)]
    struct ResourceResponse {
        data: OtaVersion,
    }

    /// Reads OTA versions from the backend resource API.
    ///
    /// The endpoint answers `{"data": {"name": .., "firmware_file": .., "ota_label": ..}}`.
    #[derive(Debug, Clone)]
    pub struct HttpFirmwareLookup {
        client: HttpClient,
    }

    impl HttpFirmwareLookup {
        /// Creates a lookup using `client`.
        #[must_use]
        pub fn new(client: HttpClient) -> Self {
            Self { client }
        }

        fn path(version: &str) -> String {
            format!(
                "/api/resource/{}/{}",
                urlencoding::encode(OTA_VERSION_DOCTYPE),
                urlencoding::encode(version)
            )
        }
    }

    impl FirmwareLookup for HttpFirmwareLookup {
        async fn fetch_ota_version(&self, version: &str) -> Result<OtaVersion> {
            let response: ResourceResponse = self.client.get_json(&Self::path(version)).await?;
            Ok(response.data)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn path_encodes_doctype_and_name() {
            assert_eq!(
                HttpFirmwareLookup::path("v2.0/beta"),
                "/api/resource/OTA%20Version/v2.0%2Fbeta"
            );
        }
    }
}
