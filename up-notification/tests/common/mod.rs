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

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use up_notification::EndpointAddress;
use up_rust::{UCode, UListener, UMessage, UStatus, UTransport, UUri};

pub const DEFAULT_UE_ID: u32 = 0x10001;

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_test_writer()
        .try_init();
}

pub fn test_uri(resource_id: u16) -> UUri {
    UUri {
        authority_name: "test0".to_string(),
        ue_id: DEFAULT_UE_ID,
        ue_version_major: 1,
        resource_id: u32::from(resource_id),
        ..Default::default()
    }
}

pub fn local_transport() -> Arc<LocalTransport> {
    Arc::new(LocalTransport::default())
}

/// Polls `condition` until it holds, for at most one second.
pub async fn eventually(condition: impl Fn() -> bool) -> bool {
    for _ in 0..100 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}

struct Registration {
    source_filter: UUri,
    sink_filter: Option<UUri>,
    listener: Arc<dyn UListener>,
}

impl Registration {
    fn accepts(&self, msg: &UMessage) -> bool {
        let source = msg.attributes.source.as_ref().cloned().unwrap_or_default();
        let sink = msg.attributes.sink.as_ref().cloned().unwrap_or_default();
        source.matches_filter(&self.source_filter)
            && self
                .sink_filter
                .as_ref()
                .map_or(true, |filter| sink.matches_filter(filter))
    }

    fn is(
        &self,
        source_filter: &UUri,
        sink_filter: Option<&UUri>,
        listener: &Arc<dyn UListener>,
    ) -> bool {
        &self.source_filter == source_filter
            && self.sink_filter.as_ref() == sink_filter
            && Arc::as_ptr(&self.listener) as *const () == Arc::as_ptr(listener) as *const ()
    }
}

/// In-process transport: delivers every sent message to the matching listeners,
/// one after the other in registration order, on the sending task.
#[derive(Default)]
pub struct LocalTransport {
    registrations: Mutex<Vec<Arc<Registration>>>,
    closed: AtomicBool,
}

impl LocalTransport {
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn listener_count(&self) -> usize {
        self.registrations.lock().expect("lock registrations").len()
    }

    fn fail_if_closed(&self) -> Result<(), UStatus> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(UStatus::fail_with_code(
                UCode::UNAVAILABLE,
                "transport is closed",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl UTransport for LocalTransport {
    async fn send(&self, message: UMessage) -> Result<(), UStatus> {
        self.fail_if_closed()?;

        // no lock is held while listeners run, so they may (un)register freely
        let targets: Vec<Arc<Registration>> = self
            .registrations
            .lock()
            .expect("lock registrations")
            .iter()
            .filter(|registration| registration.accepts(&message))
            .cloned()
            .collect();

        for registration in targets {
            registration.listener.on_receive(message.clone()).await;
        }
        Ok(())
    }

    async fn receive(
        &self,
        _source_filter: &UUri,
        _sink_filter: Option<&UUri>,
    ) -> Result<UMessage, UStatus> {
        Err(UStatus::fail_with_code(
            UCode::UNIMPLEMENTED,
            "not used in tests",
        ))
    }

    async fn register_listener(
        &self,
        source_filter: &UUri,
        sink_filter: Option<&UUri>,
        listener: Arc<dyn UListener>,
    ) -> Result<(), UStatus> {
        self.fail_if_closed()?;
        if source_filter.authority_name.is_empty() {
            return Err(UStatus::fail_with_code(
                UCode::INVALID_ARGUMENT,
                "source filter needs an authority",
            ));
        }

        self.registrations
            .lock()
            .expect("lock registrations")
            .push(Arc::new(Registration {
                source_filter: source_filter.clone(),
                sink_filter: sink_filter.cloned(),
                listener,
            }));
        Ok(())
    }

    async fn unregister_listener(
        &self,
        source_filter: &UUri,
        sink_filter: Option<&UUri>,
        listener: Arc<dyn UListener>,
    ) -> Result<(), UStatus> {
        let mut registrations = self.registrations.lock().expect("lock registrations");
        match registrations
            .iter()
            .position(|registration| registration.is(source_filter, sink_filter, &listener))
        {
            Some(index) => {
                registrations.remove(index);
                Ok(())
            }
            None => Err(UStatus::fail_with_code(
                UCode::NOT_FOUND,
                "no such listener",
            )),
        }
    }
}

/// Thread-safe receive queue filled by a sink listener.
#[derive(Clone, Default)]
pub struct RxQueue {
    messages: Arc<Mutex<VecDeque<UMessage>>>,
}

impl RxQueue {
    pub fn listener(&self) -> Arc<dyn UListener> {
        Arc::new(self.clone())
    }

    pub fn len(&self) -> usize {
        self.messages.lock().expect("lock rx queue").len()
    }

    pub fn drain(&self) -> Vec<UMessage> {
        self.messages.lock().expect("lock rx queue").drain(..).collect()
    }
}

#[async_trait]
impl UListener for RxQueue {
    async fn on_receive(&self, msg: UMessage) {
        self.messages.lock().expect("lock rx queue").push_back(msg);
    }
}

/// Listener that only counts invocations.
#[derive(Clone, Default)]
pub struct CountingListener {
    count: Arc<AtomicUsize>,
}

impl CountingListener {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UListener for CountingListener {
    async fn on_receive(&self, _msg: UMessage) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

/// Wraps a transport and fails every send with a fixed code while armed.
pub struct FaultInjectingTransport {
    inner: Arc<dyn UTransport>,
    armed: AtomicBool,
    code: UCode,
}

impl FaultInjectingTransport {
    pub fn new(inner: Arc<dyn UTransport>, code: UCode) -> Self {
        Self {
            inner,
            armed: AtomicBool::new(false),
            code,
        }
    }

    pub fn arm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }

    pub fn disarm(&self) {
        self.armed.store(false, Ordering::SeqCst);
    }
}

#[async_trait]
impl UTransport for FaultInjectingTransport {
    async fn send(&self, message: UMessage) -> Result<(), UStatus> {
        if self.armed.load(Ordering::SeqCst) {
            return Err(UStatus::fail_with_code(self.code, "injected send failure"));
        }
        self.inner.send(message).await
    }

    async fn receive(
        &self,
        source_filter: &UUri,
        sink_filter: Option<&UUri>,
    ) -> Result<UMessage, UStatus> {
        self.inner.receive(source_filter, sink_filter).await
    }

    async fn register_listener(
        &self,
        source_filter: &UUri,
        sink_filter: Option<&UUri>,
        listener: Arc<dyn UListener>,
    ) -> Result<(), UStatus> {
        self.inner
            .register_listener(source_filter, sink_filter, listener)
            .await
    }

    async fn unregister_listener(
        &self,
        source_filter: &UUri,
        sink_filter: Option<&UUri>,
        listener: Arc<dyn UListener>,
    ) -> Result<(), UStatus> {
        self.inner
            .unregister_listener(source_filter, sink_filter, listener)
            .await
    }
}
