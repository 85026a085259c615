//! Command-line inbound adapter.
//!
//! - [`command`]: Argument definitions
//! - [`operator`]: Access to the installed operator
//! - [`output`]: Human and JSON output
//! - [`run`], [`publish`], [`query`]: Command handlers

pub mod command;
pub mod operator;
pub mod output;
pub mod publish;
pub mod query;
pub mod run;
