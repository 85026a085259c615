use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::id::OrderUid;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Inbound order rejected by validation.
    #[error(transparent)]
    Validation(#[from] DomainError),

    /// Bus or database connectivity failure.
    #[error("connection error: {0}")]
    Connection(String),

    /// Statement failure other than a constraint violation.
    #[error("database error: {0}")]
    Database(String),

    /// Unique, foreign-key, check or not-null violation.
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// Storage returned something other than what was written or linked.
    #[error("data integrity error: {0}")]
    Integrity(String),

    #[error("order not found: {0}")]
    NotFound(OrderUid),

    /// The operation was cancelled or timed out; any open transaction was rolled back.
    #[error("operation cancelled")]
    Cancelled,

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for the expected "no such order" outcome.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// True for connectivity failures that a bootstrap layer may retry.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
