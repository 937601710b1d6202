//! Session phases, durations and run state.
//!
//! Durations are entered as minutes in free-text inputs, so validation
//! happens here at two levels: keystroke filtering while typing, and full
//! validation when a session is started.

use serde::{Deserialize, Serialize};

use crate::error::PomodoroError;

/// Seconds per minute of configured duration.
pub const SECONDS_PER_MINUTE: u64 = 60;

/// Current countdown segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// No session is running.
    #[default]
    Idle,
    /// Counting down a work period.
    Work,
    /// Counting down a break period.
    Break,
}

impl Phase {
    /// Label used in the window title.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Work => "Work",
            Self::Break => "Break",
        }
    }

    /// The phase that follows this one in a running cycle.
    #[must_use]
    pub const fn next(&self) -> Self {
        match self {
            Self::Idle | Self::Break => Self::Work,
            Self::Work => Self::Break,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Work and break durations for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Work period in minutes, always positive.
    pub work_minutes: u32,
    /// Break period in minutes, always positive.
    pub break_minutes: u32,
}

impl SessionConfig {
    /// Validate raw input strings into a session configuration.
    ///
    /// # Errors
    ///
    /// Returns `PomodoroError::InvalidInput` if either value is empty,
    /// contains a non-digit character, or is zero.
    pub fn validate(work: &str, break_time: &str) -> Result<Self, PomodoroError> {
        match (parse_minutes(work), parse_minutes(break_time)) {
            (Some(work_minutes), Some(break_minutes)) => Ok(Self {
                work_minutes,
                break_minutes,
            }),
            _ => Err(PomodoroError::invalid_durations()),
        }
    }

    /// Length of the given phase in seconds. Idle has no length.
    #[must_use]
    pub const fn phase_seconds(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Idle => 0,
            Phase::Work => self.work_minutes as u64 * SECONDS_PER_MINUTE,
            Phase::Break => self.break_minutes as u64 * SECONDS_PER_MINUTE,
        }
    }
}

/// Parse a minutes value: trimmed, digits only, positive, fits in `u32`.
#[must_use]
pub fn parse_minutes(input: &str) -> Option<u32> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    trimmed.parse::<u32>().ok().filter(|&m| m > 0)
}

/// Whether a candidate input value is acceptable while typing.
///
/// Empty is allowed so the field can be cleared; anything else must be all
/// ASCII digits. Spaces are rejected.
#[must_use]
pub fn accepts_keystroke(candidate: &str) -> bool {
    candidate.chars().all(|c| c.is_ascii_digit())
}

/// Observable state of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunState {
    /// Whether a cycle is running.
    pub running: bool,
    /// Completed work phases since the program started.
    pub pomodoro_count: u32,
    /// Current phase.
    pub phase: Phase,
    /// Seconds left in the current phase.
    pub remaining_seconds: u64,
}
