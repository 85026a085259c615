//! Outbound adapters (driven side).

pub mod nats;
pub mod sqlite;
