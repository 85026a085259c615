//! Operator-facing inbound ports consumed by CLI adapters.

pub mod orders;
pub mod port;
pub mod publish;
pub mod runtime;
