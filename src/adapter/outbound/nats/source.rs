//! NATS subscription source.

use async_nats::{Client, Subscriber};
use async_trait::async_trait;
use futures_util::StreamExt;
use tracing::{debug, info, trace};

use crate::error::{Error, Result};
use crate::port::outbound::bus::{BusMessage, MessageSource};

/// Message source backed by a single NATS core subscription.
pub struct NatsMessageSource {
    client: Client,
    subscription: Option<Subscriber>,
    subject: Option<String>,
}

impl NatsMessageSource {
    /// Wrap an already-connected client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self {
            client,
            subscription: None,
            subject: None,
        }
    }
}

#[async_trait]
impl MessageSource for NatsMessageSource {
    async fn subscribe(&mut self, subject: &str) -> Result<()> {
        let subscriber = self
            .client
            .subscribe(subject.to_string())
            .await
            .map_err(|e| Error::Connection(format!("nats subscribe to {subject}: {e}")))?;

        info!(subject = %subject, "Subscribed");
        self.subscription = Some(subscriber);
        self.subject = Some(subject.to_string());
        Ok(())
    }

    async fn next_message(&mut self) -> Option<BusMessage> {
        let subscription = self.subscription.as_mut()?;
        let message = subscription.next().await?;
        trace!(subject = %message.subject, bytes = message.payload.len(), "Received bus message");
        Some(BusMessage::new(message.subject.to_string(), message.payload.to_vec()))
    }

    async fn unsubscribe(&mut self) -> Result<()> {
        let Some(mut subscription) = self.subscription.take() else {
            return Ok(());
        };
        subscription
            .unsubscribe()
            .await
            .map_err(|e| Error::Connection(format!("nats unsubscribe: {e}")))?;

        if let Some(subject) = self.subject.take() {
            debug!(subject = %subject, "Unsubscribed");
        }
        Ok(())
    }

    fn transport_name(&self) -> &'static str {
        "nats"
    }
}
