//! Pomodoro sessions.
//!
//! - `state`: phases, durations and input validation
//! - `timer`: the countdown engine
//! - `session`: the controller that starts and stops the engine

pub mod session;
pub mod state;
pub mod timer;

pub use session::{SessionController, BASE_TITLE};
pub use state::{accepts_keystroke, parse_minutes, Phase, RunState, SessionConfig};
pub use timer::{format_mmss, phase_title, Countdown, PhaseOutcome, SessionEvent};
