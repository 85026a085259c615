//! Service runtime lifecycle.

use tokio::sync::watch;
use tracing::info;

use super::bootstrap::{build_services, connect_bus, Services};
use crate::adapter::outbound::nats::source::NatsMessageSource;
use crate::error::Result;
use crate::infrastructure::config::bus::BusConfig;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::bus::MessageSource;

/// Run the ingestion service until `shutdown` turns true.
///
/// # Errors
/// Returns an error if storage or the bus cannot be opened.
pub async fn run_with_shutdown(config: Config, shutdown: watch::Receiver<bool>) -> Result<()> {
    info!(
        database = %config.database.url,
        bus = %config.bus.url,
        subject = %config.bus.subject,
        "Starting orderhub"
    );

    let services = build_services(&config).await?;
    let client = connect_bus(&config.bus).await?;
    let mut source = NatsMessageSource::new(client);

    serve(&services, &mut source, &config.bus, shutdown).await
}

/// Consume from an already-built source until shutdown or until it ends.
///
/// # Errors
/// Returns an error if the subscription cannot be established.
pub async fn serve(
    services: &Services,
    source: &mut dyn MessageSource,
    bus: &BusConfig,
    shutdown: watch::Receiver<bool>,
) -> Result<()> {
    info!(cached = services.cache.len(), "Serving orders");
    let consumer = services.consumer(bus.persist_timeout());
    consumer.run(source, &bus.subject, shutdown).await?;
    info!("Orderhub stopped");
    Ok(())
}
