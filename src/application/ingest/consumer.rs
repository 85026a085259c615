//! Ingestion consumer: the sole writer into the cache after warm-up.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use super::decode::decode;
use super::stats::IngestStats;
use crate::application::cache::order::OrderCache;
use crate::domain::order::Order;
use crate::error::{Error, Result};
use crate::port::outbound::bus::MessageSource;
use crate::port::outbound::store::OrderRepository;

/// Terminal state of one bus message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Persisted and visible in the cache.
    Cached,
    /// Payload was not a JSON order.
    DecodeFailed,
    /// Order failed a field rule.
    ValidationFailed,
    /// Storage rejected the order, failed, or timed out.
    PersistFailed,
}

/// Consumes order payloads, persists them and updates the cache.
pub struct IngestionConsumer {
    repository: Arc<dyn OrderRepository>,
    cache: Arc<OrderCache>,
    persist_timeout: Duration,
    stats: Arc<IngestStats>,
}

impl IngestionConsumer {
    pub fn new(
        repository: Arc<dyn OrderRepository>,
        cache: Arc<OrderCache>,
        persist_timeout: Duration,
    ) -> Self {
        Self {
            repository,
            cache,
            persist_timeout,
            stats: Arc::new(IngestStats::new()),
        }
    }

    /// Counters shared with the caller.
    #[must_use]
    pub fn stats(&self) -> Arc<IngestStats> {
        Arc::clone(&self.stats)
    }

    /// Persist an order, then cache the same value.
    ///
    /// The cache is only updated after the write has committed.
    ///
    /// # Errors
    /// Returns the repository error, or [`Error::Cancelled`] if the write
    /// did not finish within the persist timeout (it is rolled back).
    pub async fn add_order(&self, order: Order) -> Result<()> {
        match tokio::time::timeout(self.persist_timeout, self.repository.add_order(&order)).await {
            Ok(result) => result?,
            Err(_) => {
                warn!(
                    order_uid = %order.order_uid,
                    timeout_ms = self.persist_timeout.as_millis() as u64,
                    "Persist timed out"
                );
                return Err(Error::Cancelled);
            }
        }
        self.cache.upsert(order);
        Ok(())
    }

    /// Run one payload through decode, validation, persistence and cache.
    pub async fn handle_payload(&self, payload: &[u8]) -> IngestOutcome {
        let outcome = self.ingest(payload).await;
        self.stats.record(outcome);
        outcome
    }

    async fn ingest(&self, payload: &[u8]) -> IngestOutcome {
        let order = match decode(payload) {
            Ok(order) => order,
            Err(e) => {
                warn!(error = %e, bytes = payload.len(), "Dropping undecodable message");
                return IngestOutcome::DecodeFailed;
            }
        };

        if let Err(e) = order.check() {
            warn!(order_uid = %order.order_uid, part = %e.part(), error = %e, "Dropping invalid order");
            return IngestOutcome::ValidationFailed;
        }

        let uid = order.order_uid.clone();
        let items = order.item_count();
        match self.add_order(order).await {
            Ok(()) => {
                info!(order_uid = %uid, items, "Order ingested");
                IngestOutcome::Cached
            }
            Err(e) => {
                error!(order_uid = %uid, error = %e, "Failed to persist order");
                IngestOutcome::PersistFailed
            }
        }
    }

    /// Subscribe to `subject` and ingest messages until shutdown or until the
    /// source ends, then unsubscribe.
    ///
    /// # Errors
    /// Returns an error only if the subscription cannot be established.
    pub async fn run(
        &self,
        source: &mut dyn MessageSource,
        subject: &str,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<()> {
        source.subscribe(subject).await?;
        info!(transport = source.transport_name(), subject = %subject, "Listening for orders");

        if *shutdown.borrow() {
            info!("Shutdown requested before first message");
        } else {
            loop {
                tokio::select! {
                    result = shutdown.changed() => {
                        match result {
                            Ok(()) => {
                                if *shutdown.borrow() {
                                    info!("Shutdown signal received");
                                    break;
                                }
                            }
                            Err(_) => {
                                info!("Shutdown channel closed");
                                break;
                            }
                        }
                    }
                    message = source.next_message() => {
                        let Some(message) = message else {
                            warn!("Bus subscription ended");
                            break;
                        };
                        debug!(subject = %message.subject, bytes = message.payload.len(), "Message received");
                        self.handle_payload(&message.payload).await;
                    }
                }
            }
        }

        if let Err(e) = source.unsubscribe().await {
            warn!(error = %e, "Failed to unsubscribe");
        }
        self.stats.log_summary();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::cache::order::CacheLookup;
    use crate::domain::id::OrderUid;
    use crate::testkit::bus::ScriptedSource;
    use crate::testkit::domain::{model_order, order_with_uid, payload, MODEL_ORDER_JSON};
    use crate::testkit::store::MemoryRepository;

    fn consumer(repo: Arc<MemoryRepository>) -> (IngestionConsumer, Arc<OrderCache>) {
        let cache = Arc::new(OrderCache::new());
        let consumer = IngestionConsumer::new(repo, Arc::clone(&cache), Duration::from_secs(1));
        (consumer, cache)
    }

    // -------------------------------------------------------------------------
    // handle_payload
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn valid_payload_is_persisted_and_cached() {
        let repo = Arc::new(MemoryRepository::new());
        let (consumer, cache) = consumer(Arc::clone(&repo));

        let outcome = consumer.handle_payload(MODEL_ORDER_JSON.as_bytes()).await;

        assert_eq!(outcome, IngestOutcome::Cached);
        assert!(repo.contains("b563feb7b2b84b6test"));
        assert_eq!(
            cache.get(&OrderUid::new("b563feb7b2b84b6test")),
            CacheLookup::Hit(model_order())
        );
    }

    #[tokio::test]
    async fn undecodable_payload_is_dropped() {
        let repo = Arc::new(MemoryRepository::new());
        let (consumer, cache) = consumer(Arc::clone(&repo));

        let outcome = consumer.handle_payload(b"{\"order_uid\": 42").await;

        assert_eq!(outcome, IngestOutcome::DecodeFailed);
        assert_eq!(repo.add_calls(), 0);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn invalid_order_never_reaches_storage() {
        let repo = Arc::new(MemoryRepository::new());
        let (consumer, cache) = consumer(Arc::clone(&repo));
        let mut order = model_order();
        order.delivery.email.clear();

        let outcome = consumer.handle_payload(&payload(&order)).await;

        assert_eq!(outcome, IngestOutcome::ValidationFailed);
        assert_eq!(repo.add_calls(), 0);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn storage_failure_leaves_cache_untouched() {
        let repo = Arc::new(MemoryRepository::new());
        repo.fail_writes("disk I/O error");
        let (consumer, cache) = consumer(Arc::clone(&repo));

        let outcome = consumer.handle_payload(MODEL_ORDER_JSON.as_bytes()).await;

        assert_eq!(outcome, IngestOutcome::PersistFailed);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn duplicate_uid_keeps_first_cached_value() {
        let repo = Arc::new(MemoryRepository::new());
        let (consumer, cache) = consumer(Arc::clone(&repo));
        let first = order_with_uid("dup");
        let mut second = order_with_uid("dup");
        second.track_number = "SECOND".into();

        assert_eq!(consumer.handle_payload(&payload(&first)).await, IngestOutcome::Cached);
        assert_eq!(
            consumer.handle_payload(&payload(&second)).await,
            IngestOutcome::PersistFailed
        );

        let cached = cache.get(&OrderUid::new("dup")).into_option().unwrap();
        assert_eq!(cached.track_number, first.track_number);
    }

    #[tokio::test]
    async fn slow_write_times_out_as_persist_failure() {
        let repo = Arc::new(MemoryRepository::new());
        repo.stall_writes(Duration::from_millis(200));
        let cache = Arc::new(OrderCache::new());
        let consumer = IngestionConsumer::new(repo, Arc::clone(&cache), Duration::from_millis(20));

        let outcome = consumer.handle_payload(MODEL_ORDER_JSON.as_bytes()).await;

        assert_eq!(outcome, IngestOutcome::PersistFailed);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn add_order_timeout_is_cancelled() {
        let repo = Arc::new(MemoryRepository::new());
        repo.stall_writes(Duration::from_millis(200));
        let consumer =
            IngestionConsumer::new(repo, Arc::new(OrderCache::new()), Duration::from_millis(20));

        let err = consumer.add_order(model_order()).await.unwrap_err();
        assert!(matches!(err, Error::Cancelled));
    }

    #[tokio::test]
    async fn outcomes_are_counted() {
        let repo = Arc::new(MemoryRepository::new());
        let (consumer, _cache) = consumer(repo);

        consumer.handle_payload(MODEL_ORDER_JSON.as_bytes()).await;
        consumer.handle_payload(b"nope").await;

        let stats = consumer.stats().snapshot();
        assert_eq!(stats.received, 2);
        assert_eq!(stats.cached, 1);
        assert_eq!(stats.decode_failed, 1);
    }

    // -------------------------------------------------------------------------
    // run
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn run_drains_source_then_unsubscribes() {
        let repo = Arc::new(MemoryRepository::new());
        let (consumer, cache) = consumer(Arc::clone(&repo));
        let mut source = ScriptedSource::new().with_payloads(vec![
            payload(&order_with_uid("a")),
            b"garbage".to_vec(),
            payload(&order_with_uid("b")),
        ]);
        let tracker = source.tracker();
        let (_tx, rx) = watch::channel(false);

        consumer.run(&mut source, "orders", rx).await.unwrap();

        assert_eq!(tracker.subject().as_deref(), Some("orders"));
        assert!(tracker.unsubscribed());
        assert_eq!(cache.len(), 2);
        assert_eq!(consumer.stats().snapshot().decode_failed, 1);
    }

    #[tokio::test]
    async fn run_stops_on_shutdown_signal() {
        let repo = Arc::new(MemoryRepository::new());
        let (consumer, _cache) = consumer(repo);
        let mut source = ScriptedSource::new().hold_open();
        let tracker = source.tracker();
        let (tx, rx) = watch::channel(false);

        let stopper = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            tx.send(true).unwrap();
        });

        tokio::time::timeout(Duration::from_secs(2), consumer.run(&mut source, "orders", rx))
            .await
            .expect("run should stop on shutdown")
            .unwrap();
        stopper.await.unwrap();

        assert!(tracker.unsubscribed());
    }

    #[tokio::test]
    async fn run_fails_when_subscribe_fails() {
        let repo = Arc::new(MemoryRepository::new());
        let (consumer, _cache) = consumer(repo);
        let mut source = ScriptedSource::new().failing_subscribe("connection refused");
        let (_tx, rx) = watch::channel(false);

        let err = consumer.run(&mut source, "orders", rx).await.unwrap_err();
        assert!(err.is_transport());
    }
}
