//! Publish operator implementation.

use async_trait::async_trait;
use tracing::info;

use crate::adapter::outbound::nats::publisher::NatsPublisher;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;
use crate::port::inbound::operator::publish::{PublishOperator, PublishReceipt, PublishRequest};
use crate::port::outbound::bus::MessagePublisher;

use super::entry::Operator;

#[async_trait]
impl PublishOperator for Operator {
    async fn publish(&self, request: PublishRequest) -> Result<PublishReceipt> {
        let config = Config::parse_toml(&request.config_toml)?;
        let subject = request
            .subject
            .unwrap_or_else(|| config.bus.subject.clone());

        let client = bootstrap::connect_bus(&config.bus).await?;
        let publisher = NatsPublisher::new(client);

        let published = publish_all(&publisher, &subject, request.payloads).await?;
        Ok(PublishReceipt { subject, published })
    }
}

/// Publish payloads in order and flush once at the end.
pub(crate) async fn publish_all(
    publisher: &dyn MessagePublisher,
    subject: &str,
    payloads: Vec<Vec<u8>>,
) -> Result<usize> {
    let count = payloads.len();
    for payload in payloads {
        publisher.publish(subject, payload).await?;
    }
    publisher.flush().await?;
    info!(subject, count, "Published order payloads");
    Ok(count)
}
