//! Operator implementations for inbound adapters.

pub mod entry;
pub mod orders;
pub mod publish;
pub mod runtime;

mod shared;
