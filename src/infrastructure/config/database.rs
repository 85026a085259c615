//! Database configuration.

use std::time::Duration;

use serde::Deserialize;

/// SQLite storage settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file (or `:memory:`).
    pub url: String,
    /// Maximum pooled connections.
    pub pool_size: u32,
    /// How long a connection waits on a locked database (milliseconds).
    pub busy_timeout_ms: u64,
    /// Migration attempts at startup before giving up.
    pub migration_attempts: u32,
    /// Delay between migration attempts (milliseconds).
    pub migration_retry_delay_ms: u64,
}

impl DatabaseConfig {
    #[must_use]
    pub const fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    #[must_use]
    pub const fn migration_retry_delay(&self) -> Duration {
        Duration::from_millis(self.migration_retry_delay_ms)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "orderhub.db".into(),
            pool_size: 5,
            busy_timeout_ms: 5000,
            migration_attempts: 4,
            migration_retry_delay_ms: 2000,
        }
    }
}
