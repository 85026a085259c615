//! Mock bus implementations for testing.
//!
//! - [`ScriptedSource`] - Fixed message queue; ends or stays open once drained.
//!   Best for: consumer outcome and shutdown tests.
//!
//! - [`ChannelSource`] - Channel-backed source with an external sender.
//!   Best for: tests that interleave publishing with reads.
//!
//! - [`RecordingPublisher`] - Captures published payloads.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::{Error, Result};
use crate::port::outbound::bus::{BusMessage, MessagePublisher, MessageSource};

/// Observable subscription state shared with the test body.
#[derive(Debug, Default)]
pub struct SourceTracker {
    subject: Mutex<Option<String>>,
    subscribe_count: AtomicU32,
    unsubscribed: AtomicBool,
}

impl SourceTracker {
    /// The last subject subscribed to.
    pub fn subject(&self) -> Option<String> {
        self.subject.lock().unwrap().clone()
    }

    pub fn subscribe_count(&self) -> u32 {
        self.subscribe_count.load(Ordering::SeqCst)
    }

    pub fn unsubscribed(&self) -> bool {
        self.unsubscribed.load(Ordering::SeqCst)
    }

    fn record_subscribe(&self, subject: &str) {
        *self.subject.lock().unwrap() = Some(subject.to_string());
        self.subscribe_count.fetch_add(1, Ordering::SeqCst);
    }

    fn record_unsubscribe(&self) {
        self.unsubscribed.store(true, Ordering::SeqCst);
    }
}

// ---------------------------------------------------------------------------
// ScriptedSource
// ---------------------------------------------------------------------------

/// A source that yields a fixed list of messages.
pub struct ScriptedSource {
    messages: VecDeque<BusMessage>,
    subscribe_error: Option<String>,
    hold_open: bool,
    tracker: Arc<SourceTracker>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self {
            messages: VecDeque::new(),
            subscribe_error: None,
            hold_open: false,
            tracker: Arc::new(SourceTracker::default()),
        }
    }

    /// Queue raw payloads, delivered in order on subject `orders`.
    pub fn with_payloads(mut self, payloads: Vec<Vec<u8>>) -> Self {
        self.messages = payloads
            .into_iter()
            .map(|p| BusMessage::new("orders", p))
            .collect();
        self
    }

    /// Fail the subscribe call with a connection error.
    pub fn failing_subscribe(mut self, message: &str) -> Self {
        self.subscribe_error = Some(message.to_string());
        self
    }

    /// Once drained, wait forever instead of ending the subscription.
    pub fn hold_open(mut self) -> Self {
        self.hold_open = true;
        self
    }

    pub fn tracker(&self) -> Arc<SourceTracker> {
        Arc::clone(&self.tracker)
    }
}

impl Default for ScriptedSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageSource for ScriptedSource {
    async fn subscribe(&mut self, subject: &str) -> Result<()> {
        if let Some(message) = &self.subscribe_error {
            return Err(Error::Connection(message.clone()));
        }
        self.tracker.record_subscribe(subject);
        Ok(())
    }

    async fn next_message(&mut self) -> Option<BusMessage> {
        if let Some(message) = self.messages.pop_front() {
            return Some(message);
        }
        if self.hold_open {
            std::future::pending::<()>().await;
        }
        None
    }

    async fn unsubscribe(&mut self) -> Result<()> {
        self.tracker.record_unsubscribe();
        Ok(())
    }

    fn transport_name(&self) -> &'static str {
        "scripted"
    }
}

// ---------------------------------------------------------------------------
// ChannelSource
// ---------------------------------------------------------------------------

/// A source fed through an mpsc channel. Dropping every sender ends it.
pub struct ChannelSource {
    rx: mpsc::UnboundedReceiver<BusMessage>,
    tracker: Arc<SourceTracker>,
}

impl ChannelSource {
    /// Create a source and the sender that feeds it.
    pub fn new() -> (Self, mpsc::UnboundedSender<BusMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let source = Self {
            rx,
            tracker: Arc::new(SourceTracker::default()),
        };
        (source, tx)
    }

    pub fn tracker(&self) -> Arc<SourceTracker> {
        Arc::clone(&self.tracker)
    }
}

#[async_trait]
impl MessageSource for ChannelSource {
    async fn subscribe(&mut self, subject: &str) -> Result<()> {
        self.tracker.record_subscribe(subject);
        Ok(())
    }

    async fn next_message(&mut self) -> Option<BusMessage> {
        self.rx.recv().await
    }

    async fn unsubscribe(&mut self) -> Result<()> {
        self.tracker.record_unsubscribe();
        self.rx.close();
        Ok(())
    }

    fn transport_name(&self) -> &'static str {
        "channel"
    }
}

// ---------------------------------------------------------------------------
// RecordingPublisher
// ---------------------------------------------------------------------------

/// Publisher that keeps every message it is handed.
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    published: Mutex<Vec<BusMessage>>,
    flushes: AtomicU32,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published(&self) -> Vec<BusMessage> {
        self.published.lock().unwrap().clone()
    }

    pub fn flushes(&self) -> u32 {
        self.flushes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MessagePublisher for RecordingPublisher {
    async fn publish(&self, subject: &str, payload: Vec<u8>) -> Result<()> {
        self.published
            .lock()
            .unwrap()
            .push(BusMessage::new(subject, payload));
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        self.flushes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
