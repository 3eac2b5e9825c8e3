// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `beetwin_iot` library.
//!
//! The change tracker itself never fails. Errors come from the collaborators
//! around it: input validation, remote lookups, response parsing and the
//! persistence layer.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while talking to a remote collaborator.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a payload.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error occurred in the persistence layer.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// No device configuration exists for the given device id.
    #[error("device not found: {0}")]
    DeviceNotFound(String),
}

/// Errors related to input validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A required field was left empty.
    #[error("{0} is required")]
    Required(&'static str),

    /// The report date range is inverted.
    #[error("from date {from} is after to date {to}")]
    InvalidDateRange {
        /// Start of the range.
        from: chrono::NaiveDate,
        /// End of the range.
        to: chrono::NaiveDate,
    },

    /// A row identifier could not be parsed.
    #[error("invalid row id: {0}")]
    InvalidRowId(String),
}

/// Errors related to remote communication.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote side answered with an unexpected status.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The requested resource does not exist.
    #[error("resource not found: {0}")]
    NotFound(String),
}

/// Errors related to parsing payloads.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by a [`ConfigStore`](crate::store::ConfigStore).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store rejected the write.
    #[error("write rejected for {device_id}: {reason}")]
    WriteRejected {
        /// The device whose configuration could not be written.
        device_id: String,
        /// Why the write was rejected.
        reason: String,
    },

    /// The backing store is not reachable.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::Required("device");
        assert_eq!(err.to_string(), "device is required");
    }

    #[test]
    fn date_range_display() {
        let err = ValueError::InvalidDateRange {
            from: chrono::NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
            to: chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "from date 2025-03-02 is after to date 2025-03-01"
        );
    }

    #[test]
    fn error_from_store_error() {
        let store_err = StoreError::Unavailable("db down".to_string());
        let err: Error = store_err.into();
        assert!(matches!(err, Error::Store(StoreError::Unavailable(_))));
    }

    #[test]
    fn protocol_error_display() {
        let err = ProtocolError::Timeout(1500);
        assert_eq!(err.to_string(), "request timed out after 1500 ms");
    }
}
