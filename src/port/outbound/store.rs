//! Persistence port for composite orders.

use async_trait::async_trait;

use crate::domain::{id::OrderUid, order::Order};
use crate::error::Result;

/// Durable storage of orders across their delivery, payment and item rows.
///
/// Implementations own the decomposition of an [`Order`] into rows and its
/// recomposition on read. They never touch the read cache.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist a composite order atomically.
    ///
    /// Either every row of the order is committed or none is. A duplicate
    /// `order_uid` fails with [`Error::Constraint`](crate::error::Error::Constraint);
    /// it is never silently replaced.
    async fn add_order(&self, order: &Order) -> Result<()>;

    /// Load one fully composed order.
    ///
    /// Fails with [`Error::NotFound`](crate::error::Error::NotFound) for an
    /// unknown UID.
    async fn get_order_by_id(&self, order_uid: &OrderUid) -> Result<Order>;

    /// Load every stored order, fully composed. Empty storage yields an empty list.
    async fn get_orders(&self) -> Result<Vec<Order>>;
}
