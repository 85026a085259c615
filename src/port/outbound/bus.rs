//! Message bus ports.
//!
//! The bus is a delivery mechanism only: at-least-once, unordered, one
//! opaque byte payload per message.

use async_trait::async_trait;

use crate::error::Result;

/// A message received from the bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusMessage {
    /// Subject the message was published on.
    pub subject: String,
    /// Raw payload bytes.
    pub payload: Vec<u8>,
}

impl BusMessage {
    /// Create a message for the given subject.
    pub fn new(subject: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            subject: subject.into(),
            payload: payload.into(),
        }
    }
}

/// A subscription-based source of bus messages.
#[async_trait]
pub trait MessageSource: Send {
    /// Subscribe to a single named subject.
    async fn subscribe(&mut self, subject: &str) -> Result<()>;

    /// Wait for the next message. `None` means the subscription has ended.
    async fn next_message(&mut self) -> Option<BusMessage>;

    /// Drop the active subscription, if any.
    async fn unsubscribe(&mut self) -> Result<()>;

    /// Transport name for logging.
    fn transport_name(&self) -> &'static str;
}

/// Publishes payloads to the bus.
#[async_trait]
pub trait MessagePublisher: Send + Sync {
    /// Publish one payload to a subject.
    async fn publish(&self, subject: &str, payload: Vec<u8>) -> Result<()>;

    /// Wait until everything published so far has been handed to the server.
    async fn flush(&self) -> Result<()>;
}
