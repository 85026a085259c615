//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::adapter::outbound::nats::client;
use crate::adapter::outbound::sqlite::database::connection::{
    create_pool_with_timeout, run_migrations, DbPool,
};
use crate::adapter::outbound::sqlite::repository::SqliteOrderRepository;
use crate::application::cache::order::OrderCache;
use crate::application::ingest::consumer::IngestionConsumer;
use crate::application::query::facade::OrderQueryService;
use crate::error::{Error, Result};
use crate::infrastructure::config::bus::BusConfig;
use crate::infrastructure::config::database::DatabaseConfig;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::store::OrderRepository;

/// Fully wired application services sharing one repository and cache.
pub struct Services {
    pub repository: Arc<dyn OrderRepository>,
    pub cache: Arc<OrderCache>,
    pub query: Arc<OrderQueryService>,
}

impl Services {
    /// Wire services over a repository, warming the cache from it first.
    ///
    /// # Errors
    /// Returns the repository error if warm-up fails.
    pub async fn warm(repository: Arc<dyn OrderRepository>) -> Result<Self> {
        let cache = Arc::new(OrderCache::warm(repository.as_ref()).await?);
        let query = Arc::new(OrderQueryService::new(
            Arc::clone(&repository),
            Arc::clone(&cache),
        ));
        Ok(Self {
            repository,
            cache,
            query,
        })
    }

    /// Build the ingestion consumer over the same repository and cache.
    #[must_use]
    pub fn consumer(&self, persist_timeout: Duration) -> IngestionConsumer {
        IngestionConsumer::new(
            Arc::clone(&self.repository),
            Arc::clone(&self.cache),
            persist_timeout,
        )
    }
}

/// Create the connection pool described by the database settings.
///
/// # Errors
/// Returns a connection error if the pool cannot be built.
pub fn init_pool(config: &DatabaseConfig) -> Result<DbPool> {
    // Each connection to ":memory:" opens a separate database.
    let max_size = if config.url == ":memory:" {
        1
    } else {
        config.pool_size
    };
    create_pool_with_timeout(&config.url, max_size, config.busy_timeout())
}

/// Apply pending migrations, retrying with a fixed delay.
///
/// # Errors
/// Returns the last failure once `attempts` are exhausted.
pub async fn migrate_with_retry(pool: &DbPool, attempts: u32, delay: Duration) -> Result<()> {
    let mut attempt = 1;
    loop {
        let pool = pool.clone();
        let result = tokio::task::spawn_blocking(move || run_migrations(&pool))
            .await
            .unwrap_or_else(|e| Err(Error::Database(format!("migration task failed: {e}"))));

        match result {
            Ok(()) => {
                info!(attempt, "Database migrations applied");
                return Ok(());
            }
            Err(e) if attempt < attempts => {
                warn!(attempt, attempts, error = %e, "Migration failed, retrying");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Open the pool, migrate it and wrap it in a repository.
///
/// # Errors
/// Returns an error if the pool cannot be built or migrations keep failing.
pub async fn open_repository(config: &DatabaseConfig) -> Result<Arc<SqliteOrderRepository>> {
    let pool = init_pool(config)?;
    migrate_with_retry(
        &pool,
        config.migration_attempts,
        config.migration_retry_delay(),
    )
    .await?;
    info!(database = %config.url, "Database initialized");
    Ok(Arc::new(SqliteOrderRepository::new(pool)))
}

/// Open storage and warm the cache.
///
/// # Errors
/// Returns storage errors from opening, migrating or warm-up.
pub async fn build_services(config: &Config) -> Result<Services> {
    let repository = open_repository(&config.database).await?;
    Services::warm(repository).await
}

/// Connect to the configured bus.
///
/// # Errors
/// Returns a connection error if the server is unreachable.
pub async fn connect_bus(config: &BusConfig) -> Result<async_nats::Client> {
    client::connect(&config.url, &config.client_name).await
}
