// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the device acknowledgment channel.

use beetwin_iot::ack::{
    ACKNOWLEDGMENT_MESSAGE, AckHandlerConfig, AckRequest, AcknowledgmentHandler,
    NO_OTA_FILE_MESSAGE,
};
use beetwin_iot::error::{Error, ProtocolError, ValueError};
use beetwin_iot::event::{EventBus, SyncEvent};
use beetwin_iot::firmware::{FirmwareLookup, OtaVersion};
use beetwin_iot::record::{DeviceConfigRecord, ParameterRow, WorkflowFlags};
use beetwin_iot::store::MemoryConfigStore;
use beetwin_iot::tracker::EditingSession;
use beetwin_iot::types::RowId;

const DEVICE: &str = "8f3k2";
const DEVICE_KEY: &str = "LSPL_8f3k2";

struct LabelLookup;

impl FirmwareLookup for LabelLookup {
    async fn fetch_ota_version(&self, version: &str) -> beetwin_iot::Result<OtaVersion> {
        match version {
            "v2" => Ok(OtaVersion {
                name: "v2".into(),
                firmware_file: Some("/files/fw_v2.bin".into()),
                ota_label: Some("2.0.1".into()),
            }),
            other => Err(ProtocolError::NotFound(other.to_string()).into()),
        }
    }
}

fn pending_flags() -> WorkflowFlags {
    WorkflowFlags {
        is_new_config: true,
        acknowledge: false,
        is_new_ota: true,
        ota_acknowledge: false,
    }
}

fn pending_record() -> DeviceConfigRecord {
    let mut record = DeviceConfigRecord::new(DEVICE)
        .with_parameters(vec![
            ParameterRow::persisted(RowId::new(), "SR", "20"),
            ParameterRow::persisted(RowId::new(), "BR", "9600"),
        ])
        .with_flags(pending_flags())
        .with_device_version("v2");
    record.attach_firmware("/private/files/fw_v2.bin");
    record
}

fn handler_with(
    record: DeviceConfigRecord,
) -> AcknowledgmentHandler<MemoryConfigStore, LabelLookup> {
    let store = MemoryConfigStore::new();
    store.insert(record);
    AcknowledgmentHandler::new(
        store,
        LabelLookup,
        AckHandlerConfig::new("https://iot.example.io"),
    )
}

// ============================================================================
// Pending changes
// ============================================================================

mod pending {
    use super::*;

    #[tokio::test]
    async fn full_reply_for_pending_config_and_ota() {
        let handler = handler_with(pending_record());
        let request = AckRequest::new(DEVICE_KEY).with_config().with_ota().with_ack();

        let reply = handler.handle(&request).await.unwrap();

        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            serde_json::json!({
                "device_key": DEVICE_KEY,
                "name": DEVICE,
                "data": [{"values": {"BR": "9600", "SR": "20"}}],
                "ota_file_url": "https://iot.example.io/private/files/fw_v2.bin",
                "device_version": "2.0.1",
                "acknowledgment": ACKNOWLEDGMENT_MESSAGE,
            })
        );
    }

    #[tokio::test]
    async fn only_requested_sections_are_included() {
        let handler = handler_with(pending_record());

        let reply = handler
            .handle(&AckRequest::new(DEVICE_KEY).with_config())
            .await
            .unwrap();

        assert!(reply.data.is_some());
        assert!(reply.ota_file_url.is_none());
        assert!(reply.device_version.is_none());
        assert!(reply.acknowledgment.is_none());
    }

    #[tokio::test]
    async fn missing_attachment_sends_message() {
        let mut record = pending_record();
        record.clear_firmware();
        let handler = handler_with(record);

        let reply = handler
            .handle(&AckRequest::new(DEVICE_KEY).with_ota())
            .await
            .unwrap();

        assert!(reply.ota_file_url.is_none());
        assert_eq!(reply.ota_message.as_deref(), Some(NO_OTA_FILE_MESSAGE));
        // The version label only accompanies an actual file.
        assert!(reply.device_version.is_none());
    }

    #[tokio::test]
    async fn unknown_version_falls_back_to_name() {
        let mut record = pending_record();
        record.set_device_version(Some("v9".into()));
        let handler = handler_with(record);

        let reply = handler
            .handle(&AckRequest::new(DEVICE_KEY).with_ota())
            .await
            .unwrap();

        assert_eq!(reply.device_version.as_deref(), Some("v9"));
    }

    #[tokio::test]
    async fn nothing_pending_replies_empty() {
        let record = pending_record().with_flags(WorkflowFlags::default());
        let handler = handler_with(record);

        let reply = handler
            .handle(&AckRequest::new(DEVICE_KEY).with_config().with_ota().with_ack())
            .await
            .unwrap();

        assert!(reply.is_empty());
        assert_eq!(serde_json::to_string(&reply).unwrap(), "{}");
    }
}

// ============================================================================
// Acknowledgments
// ============================================================================

mod acknowledgments {
    use super::*;

    #[tokio::test]
    async fn config_ack_clears_config_and_persists() {
        let handler = handler_with(pending_record());

        let reply = handler
            .handle(&AckRequest::new(DEVICE_KEY).with_config_ack().with_config().with_ota())
            .await
            .unwrap();

        // OTA is still pending, so the reply describes it but not the config.
        assert!(reply.data.is_none());
        assert!(reply.ota_file_url.is_some());

        let flags = handler.store().get(DEVICE).unwrap().flags();
        assert!(!flags.is_new_config);
        assert!(flags.acknowledge);
        assert!(flags.is_new_ota);
        assert!(!flags.ota_acknowledge);
    }

    #[tokio::test]
    async fn both_acks_leave_nothing_pending() {
        let handler = handler_with(pending_record());

        let reply = handler
            .handle(
                &AckRequest::new(DEVICE_KEY)
                    .with_config_ack()
                    .with_ota_ack()
                    .with_config()
                    .with_ota(),
            )
            .await
            .unwrap();

        assert!(reply.is_empty());
        let flags = handler.store().get(DEVICE).unwrap().flags();
        assert!(flags.acknowledge);
        assert!(flags.ota_acknowledge);
        assert!(!flags.has_pending());
    }

    #[tokio::test]
    async fn acks_publish_events() {
        let bus = EventBus::new();
        let mut events = bus.subscribe();
        let handler = handler_with(pending_record()).with_event_bus(bus);

        handler
            .handle(&AckRequest::new(DEVICE_KEY).with_config_ack().with_ota_ack())
            .await
            .unwrap();

        assert_eq!(
            events.recv().await.unwrap(),
            SyncEvent::config_acknowledged(DEVICE)
        );
        assert_eq!(
            events.recv().await.unwrap(),
            SyncEvent::ota_acknowledged(DEVICE)
        );
    }

    #[tokio::test]
    async fn wire_request_with_string_flags() {
        let handler = handler_with(pending_record());
        let request: AckRequest = serde_json::from_value(serde_json::json!({
            "device_key": DEVICE_KEY,
            "is_config": "1",
            "is_ota": 0,
            "ACK": "0",
            "CACK": null,
        }))
        .unwrap();

        let reply = handler.handle(&request).await.unwrap();
        assert!(reply.data.is_some());
        assert!(reply.ota_file_url.is_none());
        assert!(reply.acknowledgment.is_none());
    }
}

// ============================================================================
// Errors
// ============================================================================

mod errors {
    use super::*;

    #[tokio::test]
    async fn unknown_device_is_rejected() {
        let handler = handler_with(pending_record());

        let err = handler
            .handle(&AckRequest::new("LSPL_unknown"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::DeviceNotFound(id) if id == "unknown"));
    }

    #[tokio::test]
    async fn missing_device_key_is_rejected() {
        let handler = handler_with(pending_record());

        let err = handler.handle(&AckRequest::default()).await.unwrap_err();

        assert!(matches!(err, Error::Value(ValueError::Required("device_key"))));
    }

    #[tokio::test]
    async fn only_one_prefix_is_stripped() {
        let record = DeviceConfigRecord::new("LSPL_x").with_flags(pending_flags());
        let handler = handler_with(record);

        let reply = handler
            .handle(&AckRequest::new("LSPL_LSPL_x").with_ack())
            .await
            .unwrap();

        assert_eq!(reply.name.as_deref(), Some("LSPL_x"));
    }
}

// ============================================================================
// Concurrent editing
// ============================================================================

mod concurrent_editing {
    use super::*;

    fn shared_handler(
        store: &MemoryConfigStore,
    ) -> AcknowledgmentHandler<MemoryConfigStore, LabelLookup> {
        AcknowledgmentHandler::new(
            store.clone(),
            LabelLookup,
            AckHandlerConfig::new("https://iot.example.io"),
        )
    }

    #[tokio::test]
    async fn idle_save_keeps_ota_ack_sent_while_editing() {
        let store = MemoryConfigStore::new();
        store.insert(DeviceConfigRecord::new(DEVICE).with_parameters(vec![
            ParameterRow::persisted(RowId::new(), "SR", "10"),
        ]));
        let handler = shared_handler(&store);
        let mut session = EditingSession::open(store.get(DEVICE).unwrap());

        session.record_mut().attach_firmware("/private/files/fw_v2.bin");
        session.save(&store).await.unwrap();
        assert!(store.get(DEVICE).unwrap().flags().is_new_ota);

        handler
            .handle(&AckRequest::new(DEVICE_KEY).with_ota_ack())
            .await
            .unwrap();
        assert!(store.get(DEVICE).unwrap().flags().ota_acknowledge);

        // Saving the still-open session without edits must not undo the ack.
        session.save(&store).await.unwrap();

        let flags = store.get(DEVICE).unwrap().flags();
        assert!(!flags.is_new_ota);
        assert!(flags.ota_acknowledge);
        assert_eq!(session.record().flags(), flags);
    }

    #[tokio::test]
    async fn suppressed_config_flags_follow_the_store() {
        let row = RowId::new();
        let store = MemoryConfigStore::new();
        store.insert(
            DeviceConfigRecord::new(DEVICE)
                .with_parameters(vec![ParameterRow::persisted(row, "SR", "10")])
                .with_flags(WorkflowFlags {
                    is_new_config: true,
                    acknowledge: false,
                    is_new_ota: false,
                    ota_acknowledge: true,
                }),
        );
        let handler = shared_handler(&store);
        let mut session = EditingSession::open(store.get(DEVICE).unwrap());

        handler
            .handle(&AckRequest::new(DEVICE_KEY).with_config_ack())
            .await
            .unwrap();

        session.record_mut().set_parameter_value(row, "20");
        session.record_mut().attach_firmware("/private/files/fw_v2.bin");
        session.save(&store).await.unwrap();

        let flags = store.get(DEVICE).unwrap().flags();
        assert!(!flags.is_new_config);
        assert!(flags.acknowledge);
        assert!(flags.is_new_ota);
        assert!(!flags.ota_acknowledge);
    }

    #[tokio::test]
    async fn raised_config_resets_stored_ack() {
        let row = RowId::new();
        let store = MemoryConfigStore::new();
        store.insert(
            DeviceConfigRecord::new(DEVICE)
                .with_parameters(vec![ParameterRow::persisted(row, "SR", "10")])
                .with_flags(pending_flags()),
        );
        let handler = shared_handler(&store);
        let mut session = EditingSession::open(store.get(DEVICE).unwrap());

        handler
            .handle(&AckRequest::new(DEVICE_KEY).with_config_ack().with_ota_ack())
            .await
            .unwrap();

        session.record_mut().set_parameter_value(row, "30");
        session.save(&store).await.unwrap();

        let flags = store.get(DEVICE).unwrap().flags();
        assert!(flags.is_new_config);
        assert!(!flags.acknowledge);
        assert!(!flags.is_new_ota);
        assert!(flags.ota_acknowledge);
    }
}
