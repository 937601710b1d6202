//! Application state for the TUI.

use crate::features::focus::{accepts_keystroke, SessionController};

/// Focusable controls, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    /// Work minutes input.
    #[default]
    Work,
    /// Break minutes input.
    Break,
    /// Start/Stop button.
    Toggle,
}

impl Field {
    /// Next control in tab order.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Work => Self::Break,
            Self::Break => Self::Toggle,
            Self::Toggle => Self::Work,
        }
    }

    /// Previous control in tab order.
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Work => Self::Toggle,
            Self::Break => Self::Work,
            Self::Toggle => Self::Break,
        }
    }
}

/// Application state.
pub struct App {
    /// Session controller driving the countdown.
    pub controller: SessionController,
    /// Work minutes input text.
    pub work_input: String,
    /// Break minutes input text.
    pub break_input: String,
    /// Focused control.
    pub focus: Field,
    /// Status message to display.
    pub status: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Create a new app instance with pre-filled inputs.
    ///
    /// Initial values go through the same keystroke filter as typing.
    #[must_use]
    pub fn new(controller: SessionController, work: &str, break_time: &str) -> Self {
        let prefill = |value: &str| {
            if accepts_keystroke(value) {
                value.to_string()
            } else {
                String::new()
            }
        };
        Self {
            controller,
            work_input: prefill(work),
            break_input: prefill(break_time),
            focus: Field::Toggle,
            status: None,
            should_quit: false,
        }
    }

    /// Inputs cannot be edited while a session runs.
    #[must_use]
    pub const fn inputs_locked(&self) -> bool {
        self.controller.is_running()
    }

    fn focused_input(&mut self) -> Option<&mut String> {
        if self.inputs_locked() {
            return None;
        }
        match self.focus {
            Field::Work => Some(&mut self.work_input),
            Field::Break => Some(&mut self.break_input),
            Field::Toggle => None,
        }
    }

    /// Type a character into the focused input.
    ///
    /// The character is dropped if the resulting text would not be all
    /// digits.
    pub fn input_char(&mut self, c: char) {
        if let Some(input) = self.focused_input() {
            let mut candidate = input.clone();
            candidate.push(c);
            if accepts_keystroke(&candidate) {
                *input = candidate;
            }
        }
    }

    /// Delete the last character of the focused input.
    pub fn backspace(&mut self) {
        if let Some(input) = self.focused_input() {
            input.pop();
        }
    }

    /// Move focus forward.
    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    /// Move focus backward.
    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Press the Start/Stop button.
    ///
    /// Returns whether a session is now running.
    pub fn toggle(&mut self) -> bool {
        self.controller.toggle(&self.work_input, &self.break_input)
    }

    /// Apply countdown updates posted since the last frame.
    pub fn tick(&mut self) {
        self.controller.pump();
    }

    /// Label for the Start/Stop button.
    #[must_use]
    pub const fn toggle_label(&self) -> &'static str {
        if self.controller.is_running() {
            "Stop"
        } else {
            "Start"
        }
    }

    /// Running work-time total.
    #[must_use]
    pub fn work_total_label(&self) -> String {
        format!("Work time: {} minutes", self.controller.work_minutes_total())
    }

    /// Clear the status message.
    pub fn clear_status(&mut self) {
        self.status = None;
    }
}
