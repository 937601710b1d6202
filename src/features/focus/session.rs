//! Session controller.
//!
//! Owns the running flag and the display state. The countdown itself runs on
//! a Tokio task; everything it reports arrives as [`SessionEvent`]s that the
//! interface thread applies with [`SessionController::pump`] or
//! [`SessionController::next_event`], so display state is only ever touched
//! from one thread.

use std::sync::Arc;

use chrono::{DateTime, Local};
use tokio::runtime::Handle;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::error::PomodoroError;
use crate::features::focus::state::{Phase, RunState, SessionConfig};
use crate::features::focus::timer::{format_mmss, phase_title, run_cycle, SessionEvent};
use crate::features::notify::Notifier;

/// Default window title when no session is running.
pub const BASE_TITLE: &str = "Pomodoro Timer";

/// Event queue of a run that was replaced by a newer start.
///
/// Kept until its task exits so work phases it completed are still credited.
struct RetiredRun {
    events: mpsc::UnboundedReceiver<SessionEvent>,
    config: SessionConfig,
}

/// Starts, stops and tracks Pomodoro sessions.
pub struct SessionController {
    runtime: Handle,
    notifier: Arc<dyn Notifier>,
    base_title: String,
    running_tx: Option<watch::Sender<bool>>,
    events: Option<mpsc::UnboundedReceiver<SessionEvent>>,
    retired: Vec<RetiredRun>,
    task: Option<JoinHandle<u32>>,
    config: Option<SessionConfig>,
    state: RunState,
    work_minutes_total: u64,
    started_at: Option<DateTime<Local>>,
    title: String,
    error: Option<String>,
}

impl SessionController {
    /// Create an idle controller that spawns countdowns on `runtime`.
    pub fn new(runtime: Handle, notifier: Arc<dyn Notifier>, base_title: impl Into<String>) -> Self {
        let base_title = base_title.into();
        Self {
            runtime,
            notifier,
            title: base_title.clone(),
            base_title,
            running_tx: None,
            events: None,
            retired: Vec::new(),
            task: None,
            config: None,
            state: RunState::default(),
            work_minutes_total: 0,
            started_at: None,
            error: None,
        }
    }

    /// Snapshot of the run state.
    #[must_use]
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Check if a cycle is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.state.running
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Completed work phases since the controller was created.
    #[must_use]
    pub const fn pomodoro_count(&self) -> u32 {
        self.state.pomodoro_count
    }

    /// Minutes of work completed since the controller was created.
    #[must_use]
    pub const fn work_minutes_total(&self) -> u64 {
        self.work_minutes_total
    }

    /// Durations of the current or last run.
    #[must_use]
    pub const fn config(&self) -> Option<SessionConfig> {
        self.config
    }

    /// When the current or last run was started.
    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Local>> {
        self.started_at
    }

    /// Clock text, MM:SS.
    #[must_use]
    pub fn display(&self) -> String {
        format_mmss(self.state.remaining_seconds)
    }

    /// Window title for the current state.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Inline error from the last failed start, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Validate durations and start the work/break cycle.
    ///
    /// Returns as soon as the countdown task is spawned.
    ///
    /// # Errors
    ///
    /// Returns `PomodoroError::InvalidInput` if the durations are invalid, or
    /// `PomodoroError::Runtime` if a session is already running.
    pub fn start(&mut self, work: &str, break_time: &str) -> Result<SessionConfig, PomodoroError> {
        if self.state.running {
            return Err(PomodoroError::Runtime(
                "A session is already running".to_string(),
            ));
        }
        let config = SessionConfig::validate(work, break_time)?;

        self.pump();
        if let (Some(events), Some(previous)) = (self.events.take(), self.config) {
            self.retired.push(RetiredRun {
                events,
                config: previous,
            });
        }

        let (running_tx, running_rx) = watch::channel(true);
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        self.task = Some(self.runtime.spawn(run_cycle(
            config,
            running_rx,
            events_tx,
            Arc::clone(&self.notifier),
        )));
        self.running_tx = Some(running_tx);
        self.events = Some(events_rx);
        self.config = Some(config);

        self.state.running = true;
        self.state.phase = Phase::Work;
        self.state.remaining_seconds = config.phase_seconds(Phase::Work);
        self.title = phase_title(Phase::Work, self.state.remaining_seconds);
        self.started_at = Some(Local::now());
        self.error = None;

        tracing::info!(
            work_minutes = config.work_minutes,
            break_minutes = config.break_minutes,
            "session started"
        );
        Ok(config)
    }

    /// Signal the countdown task to stop.
    ///
    /// The clock resets to 00:00 once the task reports that it has exited.
    pub fn stop(&mut self) {
        if !self.state.running {
            return;
        }
        if let Some(tx) = self.running_tx.take() {
            let _ = tx.send(false);
        }
        self.state.running = false;
        self.state.phase = Phase::Idle;
        self.title.clone_from(&self.base_title);
        tracing::info!(pomodoro_count = self.state.pomodoro_count, "session stopped");
    }

    /// Start when idle, stop when running.
    ///
    /// Any previous error is cleared first. A failed start is kept as the
    /// inline error message. Returns whether a session is now running.
    pub fn toggle(&mut self, work: &str, break_time: &str) -> bool {
        self.error = None;
        if self.state.running {
            self.stop();
            return false;
        }
        match self.start(work, break_time) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(error = %e, "start rejected");
                self.error = Some(e.to_string());
                false
            }
        }
    }

    /// Apply every event already posted by the countdown task.
    ///
    /// Returns the number of events applied.
    pub fn pump(&mut self) -> usize {
        self.drain_retired();
        let mut applied = 0;
        while let Some(event) = self.events.as_mut().and_then(|rx| rx.try_recv().ok()) {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Wait for the next event from the countdown task and apply it.
    ///
    /// Returns `None` once the task has exited and its queue is drained.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.drain_retired();
        let event = self.events.as_mut()?.recv().await?;
        self.apply(event);
        Some(event)
    }

    /// Wait for the countdown task to exit and apply its final events.
    ///
    /// Returns the number of work phases completed by that task.
    ///
    /// # Errors
    ///
    /// Returns `PomodoroError::Runtime` if the task panicked.
    pub async fn wait_finished(&mut self) -> Result<u32, PomodoroError> {
        let completed = match self.task.take() {
            Some(task) => task
                .await
                .map_err(|e| PomodoroError::Runtime(format!("countdown task failed: {e}")))?,
            None => 0,
        };
        self.pump();
        Ok(completed)
    }

    /// Credit work phases finished by replaced runs; their display updates
    /// are stale and dropped.
    fn drain_retired(&mut self) {
        let mut retired = std::mem::take(&mut self.retired);
        retired.retain_mut(|run| loop {
            match run.events.try_recv() {
                Ok(SessionEvent::PhaseCompleted {
                    phase: Phase::Work,
                    ..
                }) => self.credit_work(run.config),
                Ok(_) => {}
                Err(TryRecvError::Empty) => return true,
                Err(TryRecvError::Disconnected) => return false,
            }
        });
        self.retired = retired;
    }

    fn credit_work(&mut self, config: SessionConfig) {
        self.state.pomodoro_count += 1;
        self.work_minutes_total += u64::from(config.work_minutes);
    }

    fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::PhaseStarted {
                phase,
                total_seconds,
            } => self.show(phase, total_seconds),
            SessionEvent::Tick {
                phase,
                remaining_seconds,
            } => self.show(phase, remaining_seconds),
            SessionEvent::PhaseCompleted { phase, .. } => {
                if let (Phase::Work, Some(config)) = (phase, self.config) {
                    self.credit_work(config);
                }
            }
            SessionEvent::Finished => {
                self.state.remaining_seconds = 0;
                self.state.phase = Phase::Idle;
            }
        }
    }

    fn show(&mut self, phase: Phase, remaining_seconds: u64) {
        if !self.state.running {
            return;
        }
        self.state.phase = phase;
        self.state.remaining_seconds = remaining_seconds;
        self.title = phase_title(phase, remaining_seconds);
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        if let Some(tx) = self.running_tx.take() {
            let _ = tx.send(false);
        }
    }
}
