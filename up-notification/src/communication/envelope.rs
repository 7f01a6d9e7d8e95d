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

//! Notification envelopes on top of [`UMessage`].

use bytes::Bytes;
use up_rust::{UCode, UMessage, UMessageBuilder, UPayloadFormat, UPriority, UStatus, UUri};

/// Opaque notification body plus its declared format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Payload {
    pub data: Bytes,
    pub format: UPayloadFormat,
}

impl Payload {
    pub fn new(data: impl Into<Bytes>, format: UPayloadFormat) -> Self {
        Self {
            data: data.into(),
            format,
        }
    }

    pub fn text(text: &str) -> Self {
        Self::new(
            Bytes::copy_from_slice(text.as_bytes()),
            UPayloadFormat::UPAYLOAD_FORMAT_TEXT,
        )
    }

    /// Body and format carried by `msg`, if it has a body.
    pub fn from_message(msg: &UMessage) -> Option<Self> {
        msg.payload.as_ref().map(|data| Self {
            data: data.clone(),
            format: payload_format(msg),
        })
    }
}

pub(crate) fn payload_format(msg: &UMessage) -> UPayloadFormat {
    msg.attributes.payload_format.enum_value_or_default()
}

/// Builds one notification from `source` to `sink`.
///
/// A payload tagged [`UPayloadFormat::UPAYLOAD_FORMAT_UNSPECIFIED`] is recorded with
/// `default_format`; a notification without a payload records `default_format` too.
pub(crate) fn build_notification(
    source: &UUri,
    sink: &UUri,
    priority: UPriority,
    default_format: UPayloadFormat,
    payload: Option<Payload>,
) -> Result<UMessage, UStatus> {
    let mut builder = UMessageBuilder::notification(source.clone(), sink.clone());
    builder.with_priority(priority);

    let built = match payload {
        Some(Payload { data, format }) => {
            let format = if format == UPayloadFormat::UPAYLOAD_FORMAT_UNSPECIFIED {
                default_format
            } else {
                format
            };
            builder.build_with_payload(data, format)
        }
        None => builder.build().map(|mut msg| {
            if default_format != UPayloadFormat::UPAYLOAD_FORMAT_UNSPECIFIED {
                msg.attributes.mut_or_insert_default().payload_format = default_format.into();
            }
            msg
        }),
    };

    built.map_err(|err| {
        UStatus::fail_with_code(
            UCode::INVALID_ARGUMENT,
            format!("unable to build notification: {err:?}"),
        )
    })
}
