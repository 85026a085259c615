//! NATS message bus adapter.
//!
//! - [`client`]: Connection setup
//! - [`source`]: Subscription-based [`MessageSource`](crate::port::outbound::bus::MessageSource)
//! - [`publisher`]: [`MessagePublisher`](crate::port::outbound::bus::MessagePublisher) used by the CLI

pub mod client;
pub mod publisher;
pub mod source;
