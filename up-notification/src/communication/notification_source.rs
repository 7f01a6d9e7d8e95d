/********************************************************************************
 * Copyright (c) 2024 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Sending side of a notification channel.

use crate::address::EndpointAddress;
use crate::communication::envelope::{build_notification, Payload};
use crate::observability::{events, fields};
use std::fmt;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use tracing::{debug, warn};
use up_rust::{UCode, UMessage, UPayloadFormat, UPriority, UStatus, UTransport, UUri};

const COMPONENT: &str = "notification_source";

/// Sends notifications from one fixed source address to one fixed sink address.
///
/// Construction only binds configuration; the transport is first contacted by
/// [`NotificationSource::notify`]. Every `notify` call results in at most one
/// [`UTransport::send`], whose result is returned unchanged.
pub struct NotificationSource {
    transport: Arc<dyn UTransport>,
    source: UUri,
    sink: UUri,
    payload_format: UPayloadFormat,
    priority: UPriority,
}

impl NotificationSource {
    pub fn new(
        transport: Arc<dyn UTransport>,
        source: UUri,
        sink: UUri,
        payload_format: UPayloadFormat,
    ) -> Self {
        debug!(
            event = events::NOTIFICATION_SOURCE_CREATED,
            component = COMPONENT,
            src = %fields::format_uri(&source),
            sink = %fields::format_uri(&sink),
            payload_format = ?payload_format,
            "created notification source"
        );

        Self {
            transport,
            source,
            sink,
            payload_format,
            priority: UPriority::UPRIORITY_CS1,
        }
    }

    pub fn with_priority(mut self, priority: UPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn source(&self) -> &UUri {
        &self.source
    }

    pub fn sink(&self) -> &UUri {
        &self.sink
    }

    pub fn payload_format(&self) -> UPayloadFormat {
        self.payload_format
    }

    pub fn priority(&self) -> UPriority {
        self.priority
    }

    fn validate_addresses(&self) -> Result<(), UStatus> {
        if self.source.authority_name.is_empty() {
            return Err(UStatus::fail_with_code(
                UCode::INVALID_ARGUMENT,
                format!(
                    "notification source {} has no authority",
                    fields::format_uri(&self.source)
                ),
            ));
        }
        if self.sink.is_unset() {
            return Err(UStatus::fail_with_code(
                UCode::INVALID_ARGUMENT,
                "notification sink is not set",
            ));
        }
        Ok(())
    }

    fn build_message(&self, payload: Option<Payload>) -> Result<UMessage, UStatus> {
        build_notification(
            &self.source,
            &self.sink,
            self.priority,
            self.payload_format,
            payload,
        )
    }

    /// Sends one notification, with or without a payload.
    ///
    /// A payload whose format is [`UPayloadFormat::UPAYLOAD_FORMAT_UNSPECIFIED`] is
    /// tagged with the format this source was created with. Without a payload the
    /// message carries no bytes but still records that default format.
    pub async fn notify(&self, payload: Option<Payload>) -> Result<(), UStatus> {
        if let Err(err) = self.validate_addresses() {
            warn!(
                event = events::NOTIFY_REJECTED_INVALID_ADDRESS,
                component = COMPONENT,
                src = %fields::format_uri(&self.source),
                sink = %fields::format_uri(&self.sink),
                err = ?err,
                "refusing to send notification"
            );
            return Err(err);
        }

        let message = match self.build_message(payload) {
            Ok(message) => message,
            Err(err) => {
                warn!(
                    event = events::NOTIFY_BUILD_FAILED,
                    component = COMPONENT,
                    src = %fields::format_uri(&self.source),
                    sink = %fields::format_uri(&self.sink),
                    err = ?err,
                    "refusing to send notification"
                );
                return Err(err);
            }
        };
        let msg_id = fields::format_message_id(&message);
        let payload_summary = fields::format_payload(&message);

        match self.transport.send(message).await {
            Ok(()) => {
                debug!(
                    event = events::NOTIFY_SEND_OK,
                    component = COMPONENT,
                    msg_id = %msg_id,
                    src = %fields::format_uri(&self.source),
                    sink = %fields::format_uri(&self.sink),
                    payload = %payload_summary,
                    "notification sent"
                );
                Ok(())
            }
            Err(err) => {
                warn!(
                    event = events::NOTIFY_SEND_FAILED,
                    component = COMPONENT,
                    msg_id = %msg_id,
                    src = %fields::format_uri(&self.source),
                    sink = %fields::format_uri(&self.sink),
                    err = ?err,
                    "transport rejected notification"
                );
                Err(err)
            }
        }
    }
}

impl Debug for NotificationSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationSource")
            .field("source", &self.source)
            .field("sink", &self.sink)
            .field("payload_format", &self.payload_format)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}
