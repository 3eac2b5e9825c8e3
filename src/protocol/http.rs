// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP access to the application backend.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::{Error, ParseError, ProtocolError};

/// Configuration for reaching the application backend over HTTP.
///
/// # Examples
///
/// ```
/// use beetwin_iot::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("iot.example.com")
///     .with_https()
///     .with_token("api_key", "api_secret")
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.base_url(), "https://iot.example.com");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: u16,
    use_https: bool,
    token: Option<(String, String)>,
    timeout: Duration,
}

impl HttpConfig {
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default HTTPS port.
    pub const DEFAULT_HTTPS_PORT: u16 = 443;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration for the given host.
    ///
    /// A `http://` or `https://` prefix selects the scheme; a `:port` suffix
    /// selects the port.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        let host = host.into();
        let (use_https, rest) = if let Some(rest) = host.strip_prefix("https://") {
            (true, rest)
        } else if let Some(rest) = host.strip_prefix("http://") {
            (false, rest)
        } else {
            (false, host.as_str())
        };
        let rest = rest.trim_end_matches('/');

        let default_port = if use_https {
            Self::DEFAULT_HTTPS_PORT
        } else {
            Self::DEFAULT_PORT
        };
        let (host, port) = match rest.rsplit_once(':') {
            Some((h, p)) => match p.parse() {
                Ok(port) => (h.to_string(), port),
                Err(_) => (rest.to_string(), default_port),
            },
            None => (rest.to_string(), default_port),
        };

        Self {
            host,
            port,
            use_https,
            token: None,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Enables HTTPS.
    ///
    /// If the port is still the HTTP default it moves to 443.
    #[must_use]
    pub fn with_https(mut self) -> Self {
        self.use_https = true;
        if self.port == Self::DEFAULT_PORT {
            self.port = Self::DEFAULT_HTTPS_PORT;
        }
        self
    }

    /// Authenticates with an API key/secret pair.
    #[must_use]
    pub fn with_token(mut self, api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        self.token = Some((api_key.into(), api_secret.into()));
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the base URL from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        let scheme = if self.use_https { "https" } else { "http" };
        let port_suffix =
            if (self.use_https && self.port == 443) || (!self.use_https && self.port == 80) {
                String::new()
            } else {
                format!(":{}", self.port)
            };
        format!("{scheme}://{}{port_suffix}", self.host)
    }

    /// Creates an [`HttpClient`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the host is empty or the HTTP client cannot be created.
    pub fn into_client(self) -> Result<HttpClient, ProtocolError> {
        if self.host.is_empty() {
            return Err(ProtocolError::InvalidAddress("host is required".to_string()));
        }
        let base_url = self.base_url();

        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        let authorization = self
            .token
            .map(|(key, secret)| format!("token {key}:{secret}"));

        Ok(HttpClient {
            base_url,
            client,
            authorization,
        })
    }
}

/// JSON-over-HTTP client for the application backend.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: Client,
    authorization: Option<String>,
}

impl HttpClient {
    /// Returns the base URL requests are made against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the URL for a path starting with `/`.
    fn build_url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Sends a GET request and decodes the JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` on transport failures and non-success statuses,
    /// `ParseError` if the body is not the expected JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.build_url(path);

        tracing::debug!(url = %url, "Sending HTTP request");

        let mut request = self.client.get(&url);
        if let Some(auth) = &self.authorization {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await.map_err(ProtocolError::Http)?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ProtocolError::AuthenticationFailed.into());
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ProtocolError::NotFound(path.to_string()).into());
        }
        if !status.is_success() {
            return Err(ProtocolError::ConnectionFailed(format!(
                "HTTP {} - {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            ))
            .into());
        }

        let body = response.text().await.map_err(ProtocolError::Http)?;

        tracing::debug!(body = %body, "Received HTTP response");

        serde_json::from_str(&body).map_err(|e| ParseError::Json(e).into())
    }
}
