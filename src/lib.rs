// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `BeeTwin IoT` - device configuration change tracking for an IoT fleet.
//!
//! Operators edit a device's configuration parameters and attach firmware
//! images; devices poll for pending changes and acknowledge them once
//! applied. This library keeps the pending and acknowledged flags of that
//! workflow consistent.
//!
//! # Supported Features
//!
//! - **Change tracking**: Detect edited parameter values and firmware swaps
//!   against a per-session shadow, and raise or clear the pending flags
//! - **Acknowledgment**: Answer device sync requests and clear flags the
//!   device confirmed
//! - **Provisioning**: Issue API credentials and device keys for new devices
//! - **Reports**: Build the device selector of the timeseries report
//! - **Firmware versions**: Copy a version's firmware file into a row, with
//!   a bounded lookup
//!
//! # Quick Start
//!
//! ## Editing a Configuration
//!
//! ```
//! use beetwin_iot::record::{DeviceConfigRecord, ParameterRow};
//! use beetwin_iot::store::MemoryConfigStore;
//! use beetwin_iot::tracker::{ConfigDecision, EditingSession};
//! use beetwin_iot::types::RowId;
//!
//! # async fn example() -> beetwin_iot::Result<()> {
//! let row = RowId::new();
//! let store = MemoryConfigStore::new();
//!
//! let loaded = DeviceConfigRecord::new("8f3k2")
//!     .with_parameters(vec![ParameterRow::persisted(row, "SR", "10")]);
//! let mut session = EditingSession::open(loaded);
//!
//! session.record_mut().set_parameter_value(row, "20");
//! let outcome = session.save(&store).await?;
//!
//! assert_eq!(outcome.config, ConfigDecision::Raised);
//! assert!(store.get("8f3k2").is_some_and(|r| r.flags().is_new_config));
//! # Ok(())
//! # }
//! ```
//!
//! ## Answering a Device
//!
//! ```no_run
//! use beetwin_iot::ack::{AckHandlerConfig, AckRequest, AcknowledgmentHandler};
//! use beetwin_iot::firmware::HttpFirmwareLookup;
//! use beetwin_iot::protocol::HttpConfig;
//! use beetwin_iot::store::MemoryConfigStore;
//!
//! #[tokio::main]
//! async fn main() -> beetwin_iot::Result<()> {
//!     let client = HttpConfig::new("https://iot.example.com")
//!         .with_token("api_key", "api_secret")
//!         .into_client()?;
//!
//!     let handler = AcknowledgmentHandler::new(
//!         MemoryConfigStore::new(),
//!         HttpFirmwareLookup::new(client),
//!         AckHandlerConfig::new("https://iot.example.io"),
//!     );
//!
//!     // The device applied its configuration and asks for anything else
//!     let request = AckRequest::new("LSPL_8f3k2").with_config_ack().with_config();
//!     let reply = handler.handle(&request).await?;
//!     println!("pending: {}", !reply.is_empty());
//!     Ok(())
//! }
//! ```

pub mod ack;
pub mod error;
pub mod event;
pub mod firmware;
#[cfg(feature = "http")]
pub mod protocol;
pub mod provisioning;
pub mod record;
pub mod report;
pub mod store;
pub mod tracker;
pub mod types;

pub use ack::{AckHandlerConfig, AckRequest, AcknowledgmentHandler, SyncResponse};
pub use error::{Error, ParseError, ProtocolError, Result, StoreError, ValueError};
pub use event::{EventBus, SyncEvent};
pub use firmware::{DeviceVersionResolver, FirmwareLookup, OtaVersion, VersionEntry};
#[cfg(feature = "http")]
pub use protocol::{HttpClient, HttpConfig};
pub use provisioning::{CredentialPolicy, DeviceCreationDefaulter, IssuedCredentials};
pub use record::{DeviceConfigRecord, DeviceRecord, ParameterRow, WorkflowFlags};
pub use report::{DeviceFilter, FilterLoad, ReportDeviceFilterPopulator, ReportFilters};
pub use store::{ConfigStore, MemoryConfigStore};
pub use tracker::{ConfigChangeTracker, EditingSession, SaveOutcome, ShadowState};
pub use types::{DeviceKey, RowId};
