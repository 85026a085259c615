//! One-shot order reads for operator-facing adapters.

use async_trait::async_trait;

use crate::domain::{id::OrderUid, order::Order};
use crate::error::Result;

/// Order reads against the configured database, outside a running service.
#[async_trait]
pub trait OrdersOperator: Send + Sync {
    /// Fetch one order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`](crate::error::Error::NotFound) for unknown
    /// UIDs, or the storage error.
    async fn order(&self, config_toml: &str, order_uid: &OrderUid) -> Result<Order>;

    /// List every stored order.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the list cannot be read.
    async fn orders(&self, config_toml: &str) -> Result<Vec<Order>>;
}
