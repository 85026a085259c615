//! Message bus configuration.

use std::time::Duration;

use serde::Deserialize;

/// NATS connection and subscription settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BusConfig {
    /// NATS server URL.
    pub url: String,
    /// Subject orders are published on.
    pub subject: String,
    /// Connection name reported to the server.
    pub client_name: String,
    /// Upper bound on persisting one order (milliseconds).
    pub persist_timeout_ms: u64,
}

impl BusConfig {
    #[must_use]
    pub const fn persist_timeout(&self) -> Duration {
        Duration::from_millis(self.persist_timeout_ms)
    }
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            url: "nats://127.0.0.1:4222".into(),
            subject: "orders".into(),
            client_name: "orderhub".into(),
            persist_timeout_ms: 5000,
        }
    }
}
