//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies: durable order
//! storage and the message bus.

pub mod bus;
pub mod store;
