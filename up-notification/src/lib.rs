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

//! # up-notification
//!
//! `up-notification` implements uProtocol point-to-point notifications on top of
//! any publish/subscribe [`up_rust::UTransport`].
//!
//! A [`NotificationSource`] sends fire-and-forget messages from one fixed source
//! address to one fixed sink address. A [`NotificationSink`] registers a
//! [`up_rust::UListener`] that receives only the notifications whose source
//! matches its filter. Address filters follow the wildcard rules in
//! [`EndpointAddress`].
//!
//! ## Filter isolation
//!
//! ```
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use up_notification::{EndpointAddress, NotificationSink, NotificationSource};
//! use up_rust::{UPayloadFormat, UStatus, UTransport, UUri};
//!
//! async fn isolated(transport: Arc<dyn UTransport>, entity: UUri) -> Result<(), UStatus> {
//!     let first = Arc::new(AtomicUsize::new(0));
//!     let second = Arc::new(AtomicUsize::new(0));
//!     let (first_clone, second_clone) = (first.clone(), second.clone());
//!
//!     let _first_sink = NotificationSink::create_with_fn(
//!         transport.clone(),
//!         move |_msg| {
//!             first_clone.fetch_add(1, Ordering::SeqCst);
//!         },
//!         entity.with_resource(0x8000),
//!     )
//!     .await?;
//!     let _second_sink = NotificationSink::create_with_fn(
//!         transport.clone(),
//!         move |_msg| {
//!             second_clone.fetch_add(1, Ordering::SeqCst);
//!         },
//!         entity.with_resource(0x8001),
//!     )
//!     .await?;
//!
//!     let source = NotificationSource::new(
//!         transport,
//!         entity.with_resource(0x8000),
//!         entity.with_resource(0),
//!         UPayloadFormat::UPAYLOAD_FORMAT_UNSPECIFIED,
//!     );
//!     source.notify(None).await?;
//!
//!     // only the first sink's filter matches the notification's source
//!     assert_eq!(second.load(Ordering::SeqCst), 0);
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Sources and sinks report creation, send outcomes and registration changes as
//! `tracing` events named in `observability::events`. Failures are also returned
//! to the caller as [`up_rust::UStatus`], so the events are diagnostics only and
//! nothing here installs a subscriber.

mod address;
pub use address::{
    EndpointAddress, ANY_RESOURCE_ID, WILDCARD_AUTHORITY, WILDCARD_ENTITY_INSTANCE,
    WILDCARD_ENTITY_TYPE, WILDCARD_ENTITY_VERSION, WILDCARD_RESOURCE_ID,
};

mod communication;
pub use communication::envelope::Payload;
pub use communication::notification_sink::NotificationSink;
pub use communication::notification_source::NotificationSource;

#[doc(hidden)]
pub mod observability;
