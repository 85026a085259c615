//! Runtime control projection types for operator-facing adapters.

use async_trait::async_trait;

use crate::error::Result;

/// Runtime configuration overrides from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    /// Raw TOML configuration content.
    pub config_toml: String,

    /// Override for log level (e.g., "debug", "info", "warn").
    pub log_level: Option<String>,

    /// Whether to output logs as JSON.
    pub json_logs: bool,
}

/// Resolved settings shown at startup.
#[derive(Debug, Clone)]
pub struct RunStartupSnapshot {
    pub database_url: String,
    pub bus_url: String,
    pub subject: String,
    pub persist_timeout_ms: u64,
}

/// Runtime control use-cases for operator-facing adapters.
#[async_trait]
pub trait RuntimeOperator: Send + Sync {
    /// Resolve the configuration a run would use, without starting anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    fn prepare_run(&self, request: &RunRequest) -> Result<RunStartupSnapshot>;

    /// Run the ingestion service until interrupted.
    ///
    /// # Errors
    ///
    /// Returns an error if storage or the bus cannot be opened, or the
    /// consumer stops on a fault.
    async fn execute_run(&self, request: RunRequest) -> Result<()>;
}
