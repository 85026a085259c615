//! SQLite persistence adapters.
//!
//! Provides the store adapter (pooled connections and scoped transactions)
//! and the order repository built on it, using Diesel ORM.

pub mod database;
pub mod error;
pub mod repository;
pub mod transaction;
