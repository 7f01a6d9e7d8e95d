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

//! Stable event names used in the `event` field of every log record.

pub const NOTIFICATION_SOURCE_CREATED: &str = "notification_source_created";
pub const NOTIFY_REJECTED_INVALID_ADDRESS: &str = "notify_rejected_invalid_address";
pub const NOTIFY_BUILD_FAILED: &str = "notify_build_failed";
pub const NOTIFY_SEND_OK: &str = "notify_send_ok";
pub const NOTIFY_SEND_FAILED: &str = "notify_send_failed";

pub const NOTIFICATION_SINK_REGISTERED: &str = "notification_sink_registered";
pub const NOTIFICATION_SINK_REGISTER_FAILED: &str = "notification_sink_register_failed";
pub const NOTIFICATION_SINK_DELIVERY_SKIPPED: &str = "notification_sink_delivery_skipped";
pub const NOTIFICATION_SINK_UNREGISTERED: &str = "notification_sink_unregistered";
pub const NOTIFICATION_SINK_UNREGISTER_FAILED: &str = "notification_sink_unregister_failed";
