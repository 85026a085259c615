//! Infrastructure layer.
//!
//! Provides technical concerns that support the application without containing
//! business logic. This layer handles configuration, storage and bus wiring,
//! and the service lifecycle.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root for runtime wiring
//! - [`config`] - Configuration loading and validation
//! - [`operator`] - Operator use cases installed behind the CLI
//! - [`runtime`] - Ingestion service lifecycle

pub mod bootstrap;
pub mod config;
pub mod operator;
pub mod runtime;
