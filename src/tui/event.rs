//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::PomodoroError;
use crate::tui::app::{App, Field};

/// Key help shown in the status bar.
pub const HELP: &str = "Tab:next field | 0-9:edit | Enter/Space:start/stop | q:quit";

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Press the Start/Stop button.
    Toggle,
}

/// Handle terminal events.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events(app: &mut App) -> Result<Option<Action>, PomodoroError> {
    // Poll with a short timeout so countdown updates keep flowing
    if event::poll(Duration::from_millis(100))
        .map_err(|e| PomodoroError::Terminal(format!("Event poll failed: {e}")))?
    {
        if let Event::Key(key) = event::read()
            .map_err(|e| PomodoroError::Terminal(format!("Event read failed: {e}")))?
        {
            return Ok(handle_key(app, key));
        }
    }

    Ok(None)
}

/// Map a key press to app changes and an optional action.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Handle Ctrl+C
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.clear_status();
            return Some(Action::Quit);
        }

        KeyCode::Tab | KeyCode::Down => {
            app.clear_status();
            app.focus_next();
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.clear_status();
            app.focus_previous();
        }

        KeyCode::Enter | KeyCode::Char(' ') => {
            app.clear_status();
            return Some(Action::Toggle);
        }

        KeyCode::Char('?') => {
            app.status = Some(HELP.to_string());
        }

        KeyCode::Char(c) => {
            app.input_char(c);
        }
        KeyCode::Backspace => {
            app.backspace();
        }

        KeyCode::Home => {
            app.focus = Field::Work;
        }
        KeyCode::End => {
            app.focus = Field::Toggle;
        }

        _ => {}
    }

    None
}
