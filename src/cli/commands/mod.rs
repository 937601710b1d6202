//! Command implementations.
//!
//! The full-screen interface lives in [`crate::tui`]; these are the
//! commands that write to stdout.

mod config;
mod run;

pub use config::show_config;
pub use run::run;
