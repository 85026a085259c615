//! NATS publisher.

use async_nats::Client;
use async_trait::async_trait;
use tracing::debug;

use crate::error::{Error, Result};
use crate::port::outbound::bus::MessagePublisher;

/// Publishes raw payloads on a NATS connection.
#[derive(Clone)]
pub struct NatsPublisher {
    client: Client,
}

impl NatsPublisher {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MessagePublisher for NatsPublisher {
    async fn publish(&self, subject: &str, payload: Vec<u8>) -> Result<()> {
        let bytes = payload.len();
        self.client
            .publish(subject.to_string(), payload.into())
            .await
            .map_err(|e| Error::Connection(format!("nats publish to {subject}: {e}")))?;
        debug!(subject = %subject, bytes, "Published");
        Ok(())
    }

    async fn flush(&self) -> Result<()> {
        self.client
            .flush()
            .await
            .map_err(|e| Error::Connection(format!("nats flush: {e}")))
    }
}
