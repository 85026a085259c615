//! Query facade combining the read cache and the repository.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::application::cache::order::{CacheLookup, OrderCache};
use crate::domain::{id::OrderUid, order::Order};
use crate::error::Result;
use crate::port::inbound::query::OrderQuery;
use crate::port::outbound::store::OrderRepository;

/// Serves point reads from the cache and list reads from storage.
pub struct OrderQueryService {
    repository: Arc<dyn OrderRepository>,
    cache: Arc<OrderCache>,
}

impl OrderQueryService {
    pub fn new(repository: Arc<dyn OrderRepository>, cache: Arc<OrderCache>) -> Self {
        Self { repository, cache }
    }
}

#[async_trait]
impl OrderQuery for OrderQueryService {
    async fn get_order(&self, order_uid: &OrderUid) -> Result<Order> {
        if let CacheLookup::Hit(order) = self.cache.get(order_uid) {
            return Ok(order);
        }

        debug!(order_uid = %order_uid, "Cache miss, reading storage");
        let order = self.repository.get_order_by_id(order_uid).await?;
        self.cache.upsert(order.clone());
        Ok(order)
    }

    async fn list_orders(&self) -> Result<Vec<Order>> {
        self.repository.get_orders().await
    }
}
