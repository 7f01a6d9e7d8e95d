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

//! Communication layer.
//!
//! Thin wrappers that bind notification semantics onto a shared
//! [`up_rust::UTransport`]. Neither side schedules, buffers or retries anything;
//! delivery threading and ordering are whatever the transport provides.
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use up_notification::{NotificationSink, NotificationSource, Payload};
//! use up_rust::{UPayloadFormat, UStatus, UTransport, UUri};
//!
//! async fn greet(transport: Arc<dyn UTransport>, entity: UUri) -> Result<usize, UStatus> {
//!     let source_uri = UUri {
//!         resource_id: 0x8000,
//!         ..entity.clone()
//!     };
//!
//!     let received = Arc::new(Mutex::new(Vec::new()));
//!     let received_clone = received.clone();
//!     let _sink = NotificationSink::create_with_fn(
//!         transport.clone(),
//!         move |msg| received_clone.lock().unwrap().push(msg),
//!         source_uri.clone(),
//!     )
//!     .await?;
//!
//!     let source = NotificationSource::new(
//!         transport,
//!         source_uri,
//!         entity,
//!         UPayloadFormat::UPAYLOAD_FORMAT_TEXT,
//!     );
//!     source.notify(Some(Payload::text("Hello, world!"))).await?;
//!     source.notify(None).await?;
//!
//!     let count = received.lock().unwrap().len();
//!     Ok(count)
//! }
//! ```

pub(crate) mod envelope;
pub(crate) mod notification_sink;
pub(crate) mod notification_source;
