//! Publishing raw order payloads onto the bus.

use async_trait::async_trait;

use crate::error::Result;

/// A batch of payloads to publish, one message each.
#[derive(Debug, Clone, Default)]
pub struct PublishRequest {
    /// Raw TOML configuration content.
    pub config_toml: String,

    /// Subject override; the configured subject is used when absent.
    pub subject: Option<String>,

    pub payloads: Vec<Vec<u8>>,
}

/// Outcome of a publish batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReceipt {
    pub subject: String,
    pub published: usize,
}

#[async_trait]
pub trait PublishOperator: Send + Sync {
    /// Publish every payload in order, then flush.
    ///
    /// # Errors
    ///
    /// Returns an error if the bus is unreachable or rejects a message.
    async fn publish(&self, request: PublishRequest) -> Result<PublishReceipt>;
}
