//! Read-side use cases exposed to inbound drivers.

use async_trait::async_trait;

use crate::domain::{id::OrderUid, order::Order};
use crate::error::Result;

/// The two read operations served to callers.
///
/// The point read and the list read carry different staleness guarantees:
/// `get_order` is answered from the in-process cache when possible, while
/// `list_orders` always reads durable storage.
#[async_trait]
pub trait OrderQuery: Send + Sync {
    /// Fetch one order. Unknown UIDs fail with
    /// [`Error::NotFound`](crate::error::Error::NotFound).
    async fn get_order(&self, order_uid: &OrderUid) -> Result<Order>;

    /// List all durable orders.
    async fn list_orders(&self) -> Result<Vec<Order>>;
}
