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

//! Receiving side of a notification channel.

use crate::observability::{events, fields};
use async_trait::async_trait;
use std::fmt;
use std::fmt::{Debug, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, trace, warn};
use up_rust::{UListener, UMessage, UStatus, UTransport, UUri};

const COMPONENT: &str = "notification_sink";

/// Listener actually handed to the transport.
///
/// Deactivated before the transport registration is released, so a delivery that
/// the transport already scheduled never reaches the wrapped listener afterwards.
struct SinkListener {
    active: AtomicBool,
    source_filter: UUri,
    listener: Arc<dyn UListener>,
}

impl SinkListener {
    fn deactivate(&self) {
        self.active.store(false, Ordering::Release);
    }
}

#[async_trait]
impl UListener for SinkListener {
    async fn on_receive(&self, msg: UMessage) {
        if !self.active.load(Ordering::Acquire) {
            trace!(
                event = events::NOTIFICATION_SINK_DELIVERY_SKIPPED,
                component = COMPONENT,
                msg_id = %fields::format_message_id(&msg),
                source_filter = %fields::format_uri(&self.source_filter),
                "dropping notification for unregistered sink"
            );
            return;
        }
        self.listener.on_receive(msg).await;
    }
}

struct CallbackListener<F> {
    callback: F,
}

#[async_trait]
impl<F> UListener for CallbackListener<F>
where
    F: Fn(UMessage) + Send + Sync + 'static,
{
    async fn on_receive(&self, msg: UMessage) {
        (self.callback)(msg);
    }
}

/// A listener registration for notifications from sources matching one filter.
///
/// The transport does the filtering; every message it hands to the registration
/// reaches the listener exactly once. The registration lives until
/// [`NotificationSink::unregister`] is called or the sink is dropped.
///
/// Unregistering does not wait for an invocation that is already running; it only
/// guarantees that no new invocation starts afterwards.
pub struct NotificationSink {
    transport: Arc<dyn UTransport>,
    source_filter: UUri,
    sink_filter: Option<UUri>,
    registration: Option<Arc<SinkListener>>,
}

impl NotificationSink {
    /// Registers `listener` for notifications whose source matches `source_filter`.
    ///
    /// A failed registration is returned as-is and leaves nothing behind to clean up.
    pub async fn create(
        transport: Arc<dyn UTransport>,
        listener: Arc<dyn UListener>,
        source_filter: UUri,
    ) -> Result<Self, UStatus> {
        Self::register(transport, listener, source_filter, None).await
    }

    /// Like [`NotificationSink::create`], but only for notifications addressed to
    /// the uEntity of `sink`. The resource of `sink` is ignored.
    pub async fn create_for_sink(
        transport: Arc<dyn UTransport>,
        listener: Arc<dyn UListener>,
        source_filter: UUri,
        sink: &UUri,
    ) -> Result<Self, UStatus> {
        let sink_filter = UUri {
            resource_id: 0,
            ..sink.clone()
        };
        Self::register(transport, listener, source_filter, Some(sink_filter)).await
    }

    /// [`NotificationSink::create`] for a plain closure.
    pub async fn create_with_fn<F>(
        transport: Arc<dyn UTransport>,
        callback: F,
        source_filter: UUri,
    ) -> Result<Self, UStatus>
    where
        F: Fn(UMessage) + Send + Sync + 'static,
    {
        Self::create(
            transport,
            Arc::new(CallbackListener { callback }),
            source_filter,
        )
        .await
    }

    async fn register(
        transport: Arc<dyn UTransport>,
        listener: Arc<dyn UListener>,
        source_filter: UUri,
        sink_filter: Option<UUri>,
    ) -> Result<Self, UStatus> {
        let registration = Arc::new(SinkListener {
            active: AtomicBool::new(true),
            source_filter: source_filter.clone(),
            listener,
        });

        if let Err(err) = transport
            .register_listener(&source_filter, sink_filter.as_ref(), registration.clone())
            .await
        {
            warn!(
                event = events::NOTIFICATION_SINK_REGISTER_FAILED,
                component = COMPONENT,
                source_filter = %fields::format_uri(&source_filter),
                sink_filter = %fields::format_optional_uri(sink_filter.as_ref()),
                err = ?err,
                "unable to register notification listener"
            );
            return Err(err);
        }

        debug!(
            event = events::NOTIFICATION_SINK_REGISTERED,
            component = COMPONENT,
            source_filter = %fields::format_uri(&source_filter),
            sink_filter = %fields::format_optional_uri(sink_filter.as_ref()),
            "registered notification listener"
        );

        Ok(Self {
            transport,
            source_filter,
            sink_filter,
            registration: Some(registration),
        })
    }

    pub fn source_filter(&self) -> &UUri {
        &self.source_filter
    }

    pub fn sink_filter(&self) -> Option<&UUri> {
        self.sink_filter.as_ref()
    }

    pub fn is_registered(&self) -> bool {
        self.registration.is_some()
    }

    /// Releases the registration and returns the transport's verdict.
    ///
    /// No new callback starts once this has been called, even if the transport
    /// reports an error. Calling it again is a no-op that returns `Ok(())`.
    pub async fn unregister(&mut self) -> Result<(), UStatus> {
        let Some(registration) = self.registration.take() else {
            return Ok(());
        };
        registration.deactivate();

        release(
            self.transport.clone(),
            self.source_filter.clone(),
            self.sink_filter.clone(),
            registration,
        )
        .await
    }
}

async fn release(
    transport: Arc<dyn UTransport>,
    source_filter: UUri,
    sink_filter: Option<UUri>,
    registration: Arc<SinkListener>,
) -> Result<(), UStatus> {
    let result = transport
        .unregister_listener(&source_filter, sink_filter.as_ref(), registration)
        .await;

    match &result {
        Ok(()) => debug!(
            event = events::NOTIFICATION_SINK_UNREGISTERED,
            component = COMPONENT,
            source_filter = %fields::format_uri(&source_filter),
            sink_filter = %fields::format_optional_uri(sink_filter.as_ref()),
            "unregistered notification listener"
        ),
        Err(err) => warn!(
            event = events::NOTIFICATION_SINK_UNREGISTER_FAILED,
            component = COMPONENT,
            source_filter = %fields::format_uri(&source_filter),
            sink_filter = %fields::format_optional_uri(sink_filter.as_ref()),
            err = ?err,
            "transport failed to unregister notification listener"
        ),
    }
    result
}

impl Drop for NotificationSink {
    fn drop(&mut self) {
        let Some(registration) = self.registration.take() else {
            return;
        };
        registration.deactivate();

        let pending = release(
            self.transport.clone(),
            self.source_filter.clone(),
            self.sink_filter.clone(),
            registration,
        );
        // Blocking here could stall the runtime thread the transport needs.
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(pending);
            }
            Err(_) => {
                let _ = futures::executor::block_on(pending);
            }
        }
    }
}

impl Debug for NotificationSink {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationSink")
            .field("source_filter", &self.source_filter)
            .field("sink_filter", &self.sink_filter)
            .field("registered", &self.is_registered())
            .finish_non_exhaustive()
    }
}
