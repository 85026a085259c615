//! Scoped, cancellable storage work on a pooled SQLite connection.
//!
//! Diesel is synchronous, so every unit of work runs on the blocking pool.
//! The awaiting future owns a cancel guard: if it is dropped (a timeout
//! fired, or the caller is shutting down) the guard raises a flag that the
//! running work observes at its next [`TxContext::checkpoint`]. A
//! transaction that observes the flag returns [`Error::Cancelled`] and is
//! rolled back instead of committed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use diesel::{Connection, SqliteConnection};
use tracing::warn;

use super::database::connection::DbPool;
use crate::error::{Error, Result};

/// Handle passed to transactional work.
pub struct TxContext<'a> {
    conn: &'a mut SqliteConnection,
    cancelled: &'a AtomicBool,
}

impl TxContext<'_> {
    /// The connection the transaction is open on.
    pub fn conn(&mut self) -> &mut SqliteConnection {
        &mut *self.conn
    }

    /// Fail with [`Error::Cancelled`] if the caller has gone away.
    ///
    /// # Errors
    /// Returns `Error::Cancelled` once the awaiting future was dropped.
    pub fn checkpoint(&self) -> Result<()> {
        if self.cancelled.load(Ordering::Acquire) {
            return Err(Error::Cancelled);
        }
        Ok(())
    }
}

/// Raises the shared flag when the awaiting future is dropped.
struct CancelOnDrop(Arc<AtomicBool>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Release);
    }
}

/// Executes storage work against a connection pool.
#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    /// Create a store over an existing pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Run read-only work outside a transaction.
    ///
    /// # Errors
    /// Returns the work's error, or a connection error if no connection
    /// could be checked out.
    pub async fn run<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        let handle = tokio::task::spawn_blocking(move || {
            let mut pooled = pool.get().map_err(|e| Error::Connection(e.to_string()))?;
            let conn: &mut SqliteConnection = &mut pooled;
            work(conn)
        });
        join(handle.await)
    }

    /// Run work inside a single transaction.
    ///
    /// The transaction commits only if the work returns `Ok` and the caller
    /// is still waiting; any error or cancellation rolls it back.
    ///
    /// # Errors
    /// Returns the work's error, [`Error::Cancelled`] if the caller went
    /// away, or a connection error if no connection could be checked out.
    pub async fn transaction<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&mut TxContext<'_>) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        let flag = Arc::new(AtomicBool::new(false));
        let _guard = CancelOnDrop(Arc::clone(&flag));

        let handle = tokio::task::spawn_blocking(move || {
            let mut pooled = pool.get().map_err(|e| Error::Connection(e.to_string()))?;
            let conn: &mut SqliteConnection = &mut pooled;
            let result = conn.transaction::<T, Error, _>(|conn| {
                let mut tx = TxContext {
                    conn,
                    cancelled: &flag,
                };
                tx.checkpoint()?;
                let value = work(&mut tx)?;
                tx.checkpoint()?;
                Ok(value)
            });
            if matches!(result, Err(Error::Cancelled)) {
                warn!("Transaction cancelled, rolled back");
            }
            result
        });
        join(handle.await)
    }
}

fn join<T>(joined: std::result::Result<Result<T>, tokio::task::JoinError>) -> Result<T> {
    joined.unwrap_or_else(|e| Err(Error::Database(format!("storage task failed: {e}"))))
}
