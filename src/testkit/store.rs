//! In-memory order repository for tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{id::OrderUid, order::Order};
use crate::error::{Error, Result};
use crate::port::outbound::store::OrderRepository;

/// Repository double backed by a sorted map.
///
/// Counts calls per operation so tests can assert whether storage was
/// touched, and can be told to fail reads or writes, or to stall writes.
#[derive(Default)]
pub struct MemoryRepository {
    orders: Mutex<BTreeMap<OrderUid, Order>>,
    add_calls: AtomicUsize,
    get_calls: AtomicUsize,
    list_calls: AtomicUsize,
    read_failure: Mutex<Option<String>>,
    write_failure: Mutex<Option<String>>,
    write_delay: Mutex<Option<Duration>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an order without counting a call.
    pub fn insert(&self, order: Order) {
        self.orders
            .lock()
            .unwrap()
            .insert(order.order_uid.clone(), order);
    }

    /// Make every subsequent read fail with a database error.
    pub fn fail_reads(&self, message: &str) {
        *self.read_failure.lock().unwrap() = Some(message.to_string());
    }

    /// Make every subsequent write fail with a database error.
    pub fn fail_writes(&self, message: &str) {
        *self.write_failure.lock().unwrap() = Some(message.to_string());
    }

    /// Delay each write before it is applied.
    pub fn stall_writes(&self, delay: Duration) {
        *self.write_delay.lock().unwrap() = Some(delay);
    }

    pub fn contains(&self, order_uid: &str) -> bool {
        self.orders.lock().unwrap().contains_key(&OrderUid::new(order_uid))
    }

    pub fn len(&self) -> usize {
        self.orders.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn add_calls(&self) -> usize {
        self.add_calls.load(Ordering::SeqCst)
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn read_failure(&self) -> Result<()> {
        match self.read_failure.lock().unwrap().as_ref() {
            Some(message) => Err(Error::Database(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl OrderRepository for MemoryRepository {
    async fn add_order(&self, order: &Order) -> Result<()> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);

        let delay = *self.write_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = self.write_failure.lock().unwrap().as_ref() {
            return Err(Error::Database(message.clone()));
        }

        let mut orders = self.orders.lock().unwrap();
        if orders.contains_key(&order.order_uid) {
            return Err(Error::Constraint(format!(
                "UNIQUE constraint failed: orders.order_uid ({})",
                order.order_uid
            )));
        }
        orders.insert(order.order_uid.clone(), order.clone());
        Ok(())
    }

    async fn get_order_by_id(&self, order_uid: &OrderUid) -> Result<Order> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.read_failure()?;
        self.orders
            .lock()
            .unwrap()
            .get(order_uid)
            .cloned()
            .ok_or_else(|| Error::NotFound(order_uid.clone()))
    }

    async fn get_orders(&self) -> Result<Vec<Order>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.read_failure()?;
        Ok(self.orders.lock().unwrap().values().cloned().collect())
    }
}
