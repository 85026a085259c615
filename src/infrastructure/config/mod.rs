//! Infrastructure configuration modules.

pub mod bus;
pub mod database;
pub mod logging;
pub mod settings;
