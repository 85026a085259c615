//! Order ingestion from the message bus.
//!
//! Each payload moves through `received → decoded → validated → persisted →
//! cached`. Any failing step drops the message; there is no requeue.
//!
//! - [`decode`]: Payload decoding and validation
//! - [`consumer::IngestionConsumer`]: Subscription loop, persistence and cache update
//! - [`stats::IngestStats`]: Per-outcome counters

pub mod consumer;
pub mod decode;
pub mod stats;
