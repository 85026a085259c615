//! Runtime operator implementation.

use async_trait::async_trait;
use tokio::signal;
use tokio::sync::watch;
use tracing::info;

use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::runtime;
use crate::port::inbound::operator::runtime::{RunRequest, RunStartupSnapshot, RuntimeOperator};

use super::{entry::Operator, shared};

#[async_trait]
impl RuntimeOperator for Operator {
    fn prepare_run(&self, request: &RunRequest) -> Result<RunStartupSnapshot> {
        let config = Self::load_run_config(request)?;
        Ok(RunStartupSnapshot {
            database_url: config.database.url,
            bus_url: config.bus.url,
            subject: config.bus.subject,
            persist_timeout_ms: config.bus.persist_timeout_ms,
        })
    }

    async fn execute_run(&self, request: RunRequest) -> Result<()> {
        let config = Self::load_run_config(&request)?;
        config.init_logging();

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let mut app_handle =
            tokio::spawn(async move { runtime::run_with_shutdown(config, shutdown_rx).await });

        tokio::select! {
            result = &mut app_handle => {
                return shared::map_app_result(result);
            }
            _ = signal::ctrl_c() => {
                info!("Shutdown signal received (Ctrl+C)");
                let _ = shutdown_tx.send(true);
            }
        }

        shared::map_app_result(app_handle.await)
    }
}

impl Operator {
    fn load_run_config(request: &RunRequest) -> Result<Config> {
        let mut config = Config::parse_toml(&request.config_toml)?;
        Self::apply_run_overrides(&mut config, request);
        Ok(config)
    }

    fn apply_run_overrides(config: &mut Config, request: &RunRequest) {
        if let Some(ref log_level) = request.log_level {
            config.logging.level.clone_from(log_level);
        }

        if request.json_logs {
            config.logging.format = "json".to_string();
        }
    }
}
