//! Inbound (driving) ports consumed by inbound adapters.
//!
//! - [`query`]: Read operations served to the command line or an HTTP layer
//! - [`operator`]: Process-level use cases behind the command line

pub mod operator;
pub mod query;
