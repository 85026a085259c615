//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for sample orders and their wire payloads.
//! - [`store`] - In-memory [`OrderRepository`](crate::port::outbound::store::OrderRepository)
//!   with call counters and failure injection.
//! - [`bus`] - Mock message sources and a recording publisher.

pub mod bus;
pub mod domain;
pub mod store;
