//! Thread-safe read cache of fully composed orders.

use dashmap::DashMap;
use tracing::info;

use crate::domain::{id::OrderUid, order::Order};
use crate::error::Result;
use crate::port::outbound::store::OrderRepository;

/// Result of a cache lookup. A miss is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    Hit(Order),
    Miss,
}

impl CacheLookup {
    /// Convert into an `Option`, discarding the hit/miss distinction.
    #[must_use]
    pub fn into_option(self) -> Option<Order> {
        match self {
            Self::Hit(order) => Some(order),
            Self::Miss => None,
        }
    }

    #[must_use]
    pub const fn is_hit(&self) -> bool {
        matches!(self, Self::Hit(_))
    }
}

/// In-process mapping from order UID to the composed order.
///
/// Entries are never evicted or expired. Reads never touch storage.
#[derive(Debug, Default)]
pub struct OrderCache {
    orders: DashMap<OrderUid, Order>,
}

impl OrderCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            orders: DashMap::new(),
        }
    }

    /// Build a cache holding every durable order.
    ///
    /// # Errors
    /// Returns the repository error if the full set cannot be loaded.
    pub async fn warm(repository: &dyn OrderRepository) -> Result<Self> {
        let cache = Self::new();
        let orders = repository.get_orders().await?;
        for order in orders {
            cache.upsert(order);
        }
        info!(orders = cache.len(), "Order cache warmed");
        Ok(cache)
    }

    /// Look up an order by UID.
    #[must_use]
    pub fn get(&self, order_uid: &OrderUid) -> CacheLookup {
        match self.orders.get(order_uid) {
            Some(entry) => CacheLookup::Hit(entry.value().clone()),
            None => CacheLookup::Miss,
        }
    }

    /// Insert or replace the entry for the order's UID.
    pub fn upsert(&self, order: Order) {
        self.orders.insert(order.order_uid.clone(), order);
    }

    #[must_use]
    pub fn contains(&self, order_uid: &OrderUid) -> bool {
        self.orders.contains_key(order_uid)
    }

    /// Number of cached orders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Returns true if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::{model_order, order_with_uid};
    use crate::testkit::store::MemoryRepository;
    use std::sync::Arc;

    #[test]
    fn new_cache_misses() {
        let cache = OrderCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.get(&OrderUid::new("nonexistent-id")), CacheLookup::Miss);
    }

    #[test]
    fn upsert_then_get_hits() {
        let cache = OrderCache::new();
        let order = model_order();

        cache.upsert(order.clone());

        assert_eq!(cache.get(&order.order_uid), CacheLookup::Hit(order.clone()));
        assert!(cache.contains(&order.order_uid));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn upsert_replaces_existing_entry() {
        let cache = OrderCache::new();
        let mut order = model_order();
        cache.upsert(order.clone());

        order.track_number = "REPLACED".into();
        cache.upsert(order.clone());

        assert_eq!(cache.len(), 1);
        let cached = cache.get(&order.order_uid).into_option().unwrap();
        assert_eq!(cached.track_number, "REPLACED");
    }

    #[tokio::test]
    async fn warm_loads_every_durable_order() {
        let repo = MemoryRepository::new();
        for i in 0..5 {
            repo.insert(order_with_uid(&format!("order-{i}")));
        }

        let cache = OrderCache::warm(&repo).await.unwrap();

        assert_eq!(cache.len(), 5);
        for i in 0..5 {
            assert!(cache.get(&OrderUid::new(format!("order-{i}"))).is_hit());
        }
    }

    #[tokio::test]
    async fn warm_from_empty_store_is_empty() {
        let repo = MemoryRepository::new();
        let cache = OrderCache::warm(&repo).await.unwrap();
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn warm_propagates_repository_failure() {
        let repo = MemoryRepository::new();
        repo.fail_reads("database is locked");

        assert!(OrderCache::warm(&repo).await.is_err());
    }

    #[test]
    fn concurrent_writer_and_readers() {
        let cache = Arc::new(OrderCache::new());
        let writer = {
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || {
                for i in 0..200 {
                    cache.upsert(order_with_uid(&format!("o-{i}")));
                }
            })
        };
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for i in 0..200 {
                        if let CacheLookup::Hit(order) = cache.get(&OrderUid::new(format!("o-{i}"))) {
                            assert_eq!(order.order_uid.as_str(), format!("o-{i}"));
                        }
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(cache.len(), 200);
    }
}
