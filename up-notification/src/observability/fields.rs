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

//! Display helpers for structured log fields.

use crate::address::EndpointAddress;
use up_rust::{UMessage, UUri};

pub fn format_uri(uri: &UUri) -> String {
    if uri.is_unset() {
        return "<unset>".to_string();
    }
    format!(
        "//{}/{:X}/{:X}/{:X}",
        uri.authority_name, uri.ue_id, uri.ue_version_major, uri.resource_id
    )
}

pub fn format_optional_uri(uri: Option<&UUri>) -> String {
    uri.map(format_uri).unwrap_or_else(|| "<none>".to_string())
}

pub fn format_message_id(msg: &UMessage) -> String {
    msg.attributes
        .id
        .as_ref()
        .map(|id| id.to_hyphenated_string())
        .unwrap_or_else(|| "<none>".to_string())
}

pub fn format_source_uri(msg: &UMessage) -> String {
    format_optional_uri(msg.attributes.source.as_ref())
}

pub fn format_sink_uri(msg: &UMessage) -> String {
    format_optional_uri(msg.attributes.sink.as_ref())
}

pub fn format_payload(msg: &UMessage) -> String {
    match &msg.payload {
        Some(data) => format!(
            "{:?} ({} bytes)",
            msg.attributes.payload_format.enum_value_or_default(),
            data.len()
        ),
        None => "<none>".to_string(),
    }
}
