//! Runtime caches used by application services.
//!
//! - [`order::OrderCache`]: Composed orders keyed by UID, warmed from storage at startup

pub mod order;
