//! `run` command implementation.
//!
//! Drives the same session controller as the interface, printing the
//! countdown on a single line instead of drawing a screen.

use std::io::{self, Write};

use colored::Colorize;
use tokio::runtime::Handle;

use crate::cli::args::TimerArgs;
use crate::config::Config;
use crate::error::PomodoroError;
use crate::features::focus::{Phase, SessionController, SessionEvent};
use crate::features::notify::{self, Notice};

/// Run the work/break cycle until Ctrl+C.
///
/// # Errors
///
/// Returns an error if the durations are invalid or stdout cannot be
/// written.
pub async fn run(config: &Config, args: &TimerArgs) -> Result<String, PomodoroError> {
    let (work, break_time) = args.resolve(config);
    let notifier = notify::from_config(&config.notifications);
    let mut controller =
        SessionController::new(Handle::current(), notifier, config.ui.title.clone());
    let session = controller.start(&work, &break_time)?;

    let started = controller
        .started_at()
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_default();
    let mut stdout = io::stdout();
    writeln!(
        stdout,
        "{}",
        format!(
            "🍅 Started at {started}: {} min work / {} min break",
            session.work_minutes, session.break_minutes
        )
        .green()
    )?;
    writeln!(stdout, "{}", "   Press Ctrl+C to stop".dimmed())?;

    loop {
        tokio::select! {
            event = controller.next_event() => {
                let Some(event) = event else { break };
                match event {
                    SessionEvent::PhaseStarted { .. } | SessionEvent::Tick { .. } => {
                        write!(stdout, "\r{}   ", controller.title())?;
                        stdout.flush()?;
                    }
                    SessionEvent::PhaseCompleted { phase, .. } => {
                        writeln!(stdout)?;
                        writeln!(stdout, "{}", completion_line(phase))?;
                    }
                    SessionEvent::Finished => {}
                }
            }
            signal = tokio::signal::ctrl_c(), if controller.is_running() => {
                signal?;
                controller.stop();
            }
        }
    }

    controller.wait_finished().await?;
    writeln!(stdout)?;
    Ok(summary(controller.pomodoro_count(), controller.work_minutes_total()))
}

fn completion_line(phase: Phase) -> String {
    let notice = match phase {
        Phase::Work => Notice::work_ended(),
        Phase::Break | Phase::Idle => Notice::break_ended(),
    };
    format!("🔔 {}. {}", notice.title, notice.message)
        .yellow()
        .to_string()
}

fn summary(pomodoros: u32, work_minutes: u64) -> String {
    format!(
        "Stopped after {pomodoros} pomodoro{}. Work time: {work_minutes} minutes",
        if pomodoros == 1 { "" } else { "s" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_pluralizes() {
        assert_eq!(summary(0, 0), "Stopped after 0 pomodoros. Work time: 0 minutes");
        assert_eq!(summary(1, 25), "Stopped after 1 pomodoro. Work time: 25 minutes");
        assert_eq!(summary(3, 75), "Stopped after 3 pomodoros. Work time: 75 minutes");
    }

    #[test]
    fn test_completion_line_uses_notice_text() {
        colored::control::set_override(false);
        assert_eq!(
            completion_line(Phase::Work),
            "🔔 Work session ended. Enjoy your break!"
        );
        assert_eq!(
            completion_line(Phase::Break),
            "🔔 Break ended. Enjoy your work!"
        );
    }

    #[tokio::test]
    async fn test_run_rejects_invalid_durations() {
        let args = TimerArgs {
            work: Some(String::new()),
            break_time: Some("5".to_string()),
        };
        let err = run(&Config::default(), &args).await.unwrap_err();
        assert!(err.is_validation());
    }
}
