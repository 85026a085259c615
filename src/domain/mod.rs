//! Storage-agnostic domain types.
//!
//! The composite [`order::Order`] and its owned parts, the [`id::OrderUid`]
//! identifier, and the validation rules an inbound order must satisfy.

pub mod error;
pub mod id;
pub mod order;
