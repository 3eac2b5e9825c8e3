// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Where the report's device entries come from.

use crate::error::Result;

/// Supplies `"<name> <identifier>"` entries for the report's device selector.
#[allow(async_fn_in_trait)]
pub trait DeviceListSource {
    /// Fetches the device entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the entries cannot be fetched.
    async fn fetch_device_entries(&self) -> Result<Vec<String>>;
}

#[cfg(feature = "http")]
pub use http_source::HttpDeviceListSource;

#[cfg(feature = "http")]
mod http_source {
    use crate::error::Result;
    use crate::protocol::HttpClient;

    use super::DeviceListSource;

    /// Whitelisted backend method returning the report's device entries.
    const DEFAULT_METHOD: &str =
        "beetwin_iot.beetwin_iot.report.btx_pp_timeseries_data_table.get_devices.get_device_data";

    #[derive(serde::Deserialize)]
    struct MethodResponse {
        #[serde(default)]
        message: Option<Vec<String>>,
    }

    /// Reads device entries from a backend method endpoint.
    ///
    /// The endpoint answers `{"message": ["<name> <identifier>", ...]}`.
    #[derive(Debug, Clone)]
    pub struct HttpDeviceListSource {
        client: HttpClient,
        method: String,
    }

    impl HttpDeviceListSource {
        /// Creates a source calling the default report method.
        #[must_use]
        pub fn new(client: HttpClient) -> Self {
            Self {
                client,
                method: DEFAULT_METHOD.to_string(),
            }
        }

        /// Calls a different backend method.
        #[must_use]
        pub fn with_method(mut self, method: impl Into<String>) -> Self {
            self.method = method.into();
            self
        }

        fn path(&self) -> String {
            format!("/api/method/{}", urlencoding::encode(&self.method))
        }
    }

    impl DeviceListSource for HttpDeviceListSource {
        async fn fetch_device_entries(&self) -> Result<Vec<String>> {
            let response: MethodResponse = self.client.get_json(&self.path()).await?;
            Ok(response.message.unwrap_or_default())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::protocol::HttpConfig;

        #[test]
        fn default_path() {
            let client = HttpConfig::new("localhost").into_client().unwrap();
            let source = HttpDeviceListSource::new(client);
            assert_eq!(source.path(), format!("/api/method/{DEFAULT_METHOD}"));
        }

        #[test]
        fn custom_method_path() {
            let client = HttpConfig::new("localhost").into_client().unwrap();
            let source = HttpDeviceListSource::new(client).with_method("app.devices");
            assert_eq!(source.path(), "/api/method/app.devices");
        }
    }
}
