//! Terminal User Interface (TUI) for the timer.
//!
//! Two duration inputs, a Start/Stop button, the countdown clock and the
//! work-time total. Built with ratatui and crossterm; the terminal window
//! title mirrors the countdown.

mod app;
mod event;
mod ui;

pub use app::{App, Field};
pub use event::Action;

use std::io;

use crossterm::{
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::prelude::*;
use tokio::runtime::Handle;

use crate::config::Config;
use crate::error::PomodoroError;
use crate::features::focus::SessionController;
use crate::features::notify;

/// Run the TUI application.
///
/// Countdown tasks are spawned on `runtime`; this thread only draws and
/// reads keys.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run(
    runtime: &Handle,
    config: &Config,
    work: &str,
    break_time: &str,
) -> Result<(), PomodoroError> {
    let controller = SessionController::new(
        runtime.clone(),
        notify::from_config(&config.notifications),
        config.ui.title.clone(),
    );
    let mut app = App::new(controller, work, break_time);

    // Setup terminal
    enable_raw_mode()
        .map_err(|e| PomodoroError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle(&config.ui.title))
        .map_err(|e| PomodoroError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| PomodoroError::Terminal(format!("Failed to create terminal: {e}")))?;

    tracing::info!("interface started");
    let result = run_app(&mut terminal, &mut app);
    app.controller.stop();

    // Restore terminal
    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        SetTitle(&config.ui.title)
    )
    .ok();
    terminal.show_cursor().ok();
    tracing::info!(
        pomodoros = app.controller.pomodoro_count(),
        "interface closed"
    );

    result
}

/// Run the main application loop.
fn run_app<B: Backend + io::Write>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), PomodoroError> {
    let mut shown_title = String::new();

    while !app.should_quit {
        app.tick();

        if app.controller.title() != shown_title {
            shown_title = app.controller.title().to_string();
            execute!(terminal.backend_mut(), SetTitle(&shown_title))
                .map_err(|e| PomodoroError::Terminal(format!("Failed to set title: {e}")))?;
        }

        // Draw UI
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| PomodoroError::Terminal(format!("Failed to draw: {e}")))?;

        // Handle events
        if let Some(action) = event::handle_events(app)? {
            match action {
                Action::Quit => app.should_quit = true,
                Action::Toggle => {
                    app.toggle();
                }
            }
        }
    }

    Ok(())
}
