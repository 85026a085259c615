//! Read-side use cases.
//!
//! - [`facade::OrderQueryService`]: Cache-first point reads, durable list reads

pub mod facade;
