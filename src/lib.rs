//! Orderhub - order ingestion from NATS into SQLite with a warmed read cache.
//!
//! Orders arrive as JSON on a bus subject. Each one is decoded, validated,
//! written to SQLite as one transaction across four tables, and then placed
//! in an in-process cache. Point reads are served from the cache and fall
//! back to storage; list reads always go to storage.
//!
//! # Architecture
//!
//! The crate is laid out hexagonally:
//!
//! - [`domain`] - Order aggregate, identifiers and validation rules
//! - [`port`] - Traits at the seams: repository, bus, query, operator
//! - [`application`] - Cache, ingestion consumer and query facade
//! - [`adapter`] - SQLite (Diesel) and NATS adapters, plus the CLI
//! - [`infrastructure`] - Configuration, wiring and service lifecycle
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use orderhub::infrastructure::config::settings::Config;
//! use orderhub::infrastructure::runtime;
//!
//! # async fn start() -> orderhub::error::Result<()> {
//! let config = Config::parse_toml(&std::fs::read_to_string("config.toml").unwrap_or_default())?;
//! config.init_logging();
//! let (_stop, shutdown) = tokio::sync::watch::channel(false);
//! runtime::run_with_shutdown(config, shutdown).await
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
