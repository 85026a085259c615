//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the seams between the application and the outside world.
//! Outbound adapters (SQLite, NATS) implement the outbound traits; inbound
//! drivers (the command line, an HTTP layer) consume the inbound traits.
//!
//! ```text
//!        ┌──────────────┐        ┌─────────────────────────┐        ┌──────────────┐
//!        │ CLI / HTTP   │──────▶ │      Application        │──────▶ │ SQLite store │
//!        │ (OrderQuery) │        │ cache · ingest · query  │        │ (Repository) │
//!        └──────────────┘        └─────────────────────────┘        └──────────────┘
//!                                             ▲
//!                                             │
//!                                     ┌───────────────┐
//!                                     │ NATS (Source) │
//!                                     └───────────────┘
//! ```

pub mod inbound;
pub mod outbound;
