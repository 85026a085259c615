//! Ingestion counters.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::info;

use super::consumer::IngestOutcome;

/// Lock-free counters, one per terminal outcome.
#[derive(Debug, Default)]
pub struct IngestStats {
    received: AtomicU64,
    cached: AtomicU64,
    decode_failed: AtomicU64,
    validation_failed: AtomicU64,
    persist_failed: AtomicU64,
}

/// Point-in-time copy of [`IngestStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSnapshot {
    pub received: u64,
    pub cached: u64,
    pub decode_failed: u64,
    pub validation_failed: u64,
    pub persist_failed: u64,
}

impl IngestSnapshot {
    /// Messages dropped at any stage.
    #[must_use]
    pub const fn dropped(&self) -> u64 {
        self.decode_failed + self.validation_failed + self.persist_failed
    }
}

impl IngestStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one message and its outcome.
    pub fn record(&self, outcome: IngestOutcome) {
        self.received.fetch_add(1, Ordering::Relaxed);
        let counter = match outcome {
            IngestOutcome::Cached => &self.cached,
            IngestOutcome::DecodeFailed => &self.decode_failed,
            IngestOutcome::ValidationFailed => &self.validation_failed,
            IngestOutcome::PersistFailed => &self.persist_failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn snapshot(&self) -> IngestSnapshot {
        IngestSnapshot {
            received: self.received.load(Ordering::Relaxed),
            cached: self.cached.load(Ordering::Relaxed),
            decode_failed: self.decode_failed.load(Ordering::Relaxed),
            validation_failed: self.validation_failed.load(Ordering::Relaxed),
            persist_failed: self.persist_failed.load(Ordering::Relaxed),
        }
    }

    /// Log the current counters.
    pub fn log_summary(&self) {
        let s = self.snapshot();
        info!(
            received = s.received,
            cached = s.cached,
            decode_failed = s.decode_failed,
            validation_failed = s.validation_failed,
            persist_failed = s.persist_failed,
            "Ingestion summary"
        );
    }
}
