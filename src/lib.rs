//! pomodoro-timer - A Pomodoro work/break timer for the terminal
//!
//! This crate provides the session controller and countdown engine behind
//! the `pomodoro` binary, plus its terminal interface and headless runner.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod logging;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::PomodoroError;
pub use features::focus::{SessionConfig, SessionController};
