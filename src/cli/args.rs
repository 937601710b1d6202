use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "pomodoro")]
#[command(about = "A Pomodoro work/break timer for the terminal")]
#[command(long_about = "pomodoro - A Pomodoro work/break timer for the terminal

Enter a work duration and a break duration in minutes, then start the cycle.
The timer alternates work and break periods, shows the countdown in the
window title, and sends a desktop notification at every transition.

QUICK START:
  pomodoro                     Open the timer with the configured durations
  pomodoro tui -w 25 -b 5      Open the timer with 25/5 pre-filled
  pomodoro run -w 25 -b 5      Run the cycle without the full-screen interface
  pomodoro config              Show the effective configuration

CONFIGURATION:
  Defaults are read from ~/.pomodoro/config.yaml if it exists.")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Path to a configuration file
    ///
    /// Defaults to ~/.pomodoro/config.yaml. A missing file means defaults.
    #[arg(short, long, global = true, env = "POMODORO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write logs to this file
    ///
    /// The interface logs to ~/.pomodoro/pomodoro.log by default; the
    /// headless commands log to stderr.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable YAML output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the full-screen timer (default)
    ///
    /// Keys:
    ///   Tab / Shift+Tab   Move between fields
    ///   0-9, Backspace    Edit the focused duration
    ///   Enter / Space     Start or stop
    ///   q / Esc           Quit
    Tui(TimerArgs),

    /// Run the work/break cycle in the current terminal
    ///
    /// Prints the countdown on one line and a message at each transition.
    /// Press Ctrl+C to stop.
    ///
    /// # Examples
    ///
    ///   pomodoro run                 Use the configured durations
    ///   pomodoro run -w 25 -b 5      25 minutes work, 5 minutes break
    Run(TimerArgs),

    /// Show the effective configuration
    Config {
        /// Output format
        #[arg(short, long, value_enum, default_value = "pretty")]
        output: OutputFormat,
    },
}

/// Duration overrides shared by the timer commands.
///
/// Values are kept as text and validated when the session starts.
#[derive(Args, Debug, Clone, Default)]
pub struct TimerArgs {
    /// Work duration in minutes
    #[arg(short, long)]
    pub work: Option<String>,

    /// Break duration in minutes
    #[arg(short = 'b', long = "break")]
    pub break_time: Option<String>,
}

impl TimerArgs {
    /// Input values: the override when given, the configured default otherwise.
    #[must_use]
    pub fn resolve(&self, config: &Config) -> (String, String) {
        let work = self
            .work
            .clone()
            .unwrap_or_else(|| config.timer.work_minutes.to_string());
        let break_time = self
            .break_time
            .clone()
            .unwrap_or_else(|| config.timer.break_minutes.to_string());
        (work, break_time)
    }
}
