//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is parsed from TOML content; the database and bus URLs can be
//! overridden with `ORDERHUB_DATABASE_URL` and `ORDERHUB_BUS_URL`.
//!
//! # Example
//!
//! ```no_run
//! use orderhub::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let content = std::fs::read_to_string("config.toml")?;
//!     let config = Config::parse_toml(&content)?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use serde::Deserialize;

use super::bus::BusConfig;
use super::database::DatabaseConfig;
use super::logging::LoggingConfig;
use crate::error::{ConfigError, Result};

/// Environment variable overriding `database.url`.
pub const DATABASE_URL_ENV: &str = "ORDERHUB_DATABASE_URL";

/// Environment variable overriding `bus.url`.
pub const BUS_URL_ENV: &str = "ORDERHUB_BUS_URL";

/// Main application configuration.
///
/// Build with [`Config::parse_toml`]. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging and tracing configuration.
    pub logging: LoggingConfig,

    /// SQLite storage settings.
    pub database: DatabaseConfig,

    /// Message bus settings.
    pub bus: BusConfig,
}

impl Config {
    /// Parse configuration from TOML content, apply environment overrides
    /// and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Replace URLs with values from `lookup` when present and non-empty.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(DATABASE_URL_ENV).filter(|v| !v.is_empty()) {
            self.database.url = url;
        }
        if let Some(url) = lookup(BUS_URL_ENV).filter(|v| !v.is_empty()) {
            self.bus.url = url;
        }
    }

    /// Initialize the global tracing subscriber.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns the first missing or out-of-range setting.
    pub fn validate(&self) -> Result<()> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "database.url" }.into());
        }
        if self.bus.url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "bus.url" }.into());
        }
        if self.bus.subject.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "bus.subject" }.into());
        }
        if self.database.pool_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.pool_size",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.database.migration_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.migration_attempts",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.bus.persist_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "bus.persist_timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if !self.logging.is_known_format() {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("expected \"pretty\" or \"json\", got \"{}\"", self.logging.format),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn parse(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config.database.url, "orderhub.db");
        assert_eq!(config.database.migration_attempts, 4);
        assert_eq!(config.database.migration_retry_delay_ms, 2000);
        assert_eq!(config.bus.subject, "orders");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn sections_override_defaults() {
        let config = parse(
            r#"
            [logging]
            level = "debug"
            format = "json"

            [database]
            url = "/var/lib/orderhub/orders.db"
            pool_size = 2

            [bus]
            url = "nats://bus:4222"
            subject = "orders.v1"
            persist_timeout_ms = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.database.url, "/var/lib/orderhub/orders.db");
        assert_eq!(config.database.pool_size, 2);
        assert_eq!(config.database.busy_timeout_ms, 5000);
        assert_eq!(config.bus.subject, "orders.v1");
        assert_eq!(config.bus.persist_timeout().as_millis(), 250);
    }

    #[test]
    fn empty_subject_is_missing_field() {
        let err = parse("[bus]\nsubject = \"\"").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingField { field: "bus.subject" })
        ));
    }

    #[test]
    fn zero_pool_size_is_invalid() {
        let err = parse("[database]\npool_size = 0").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue { field: "database.pool_size", .. })
        ));
    }

    #[test]
    fn zero_persist_timeout_is_invalid() {
        let err = parse("[bus]\npersist_timeout_ms = 0").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue { field: "bus.persist_timeout_ms", .. })
        ));
    }

    #[test]
    fn unknown_log_format_is_invalid() {
        let err = parse("[logging]\nformat = \"xml\"").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue { field: "logging.format", .. })
        ));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = parse("[database\nurl = 1").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
    }

    #[test]
    fn overrides_replace_urls() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            DATABASE_URL_ENV => Some("/tmp/override.db".into()),
            BUS_URL_ENV => Some("nats://override:4222".into()),
            _ => None,
        });

        assert_eq!(config.database.url, "/tmp/override.db");
        assert_eq!(config.bus.url, "nats://override:4222");
    }

    #[test]
    fn empty_override_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|_| Some(String::new()));

        assert_eq!(config.database.url, "orderhub.db");
        assert_eq!(config.bus.url, "nats://127.0.0.1:4222");
    }
}
