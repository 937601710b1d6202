//! Countdown engine.
//!
//! [`Countdown`] is the pure sequence of displayed values for one phase.
//! [`run_phase`] paces it at one item per second on the Tokio clock and
//! [`run_cycle`] alternates work and break phases until cancelled.
//!
//! Cancellation is cooperative. The running flag is a `watch` channel; it is
//! checked before every tick and raced against the wait for the next second,
//! so a stop is observed well within one tick.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::features::focus::state::{Phase, SessionConfig, SECONDS_PER_MINUTE};
use crate::features::notify::{dispatch, Notice, Notifier};

/// Interval between ticks.
pub const TICK: Duration = Duration::from_secs(1);

/// Lazy sequence of `(minutes, seconds)` remaining after each elapsed second.
///
/// A countdown of `n` seconds yields exactly `n` items, ending at `(0, 0)`.
#[derive(Debug, Clone)]
pub struct Countdown {
    remaining: u64,
}

impl Countdown {
    /// Create a countdown over `total_seconds`.
    #[must_use]
    pub const fn new(total_seconds: u64) -> Self {
        Self {
            remaining: total_seconds,
        }
    }

    /// Seconds not yet counted.
    #[must_use]
    pub const fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl Iterator for Countdown {
    type Item = (u64, u64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(split_mmss(self.remaining))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (len, Some(len))
    }
}

impl ExactSizeIterator for Countdown {}

/// Split seconds into whole minutes and leftover seconds.
#[must_use]
pub const fn split_mmss(seconds: u64) -> (u64, u64) {
    (seconds / SECONDS_PER_MINUTE, seconds % SECONDS_PER_MINUTE)
}

/// Format seconds as MM:SS.
#[must_use]
pub fn format_mmss(seconds: u64) -> String {
    let (minutes, seconds) = split_mmss(seconds);
    format!("{minutes:02}:{seconds:02}")
}

/// Window title for a phase with the given time left.
#[must_use]
pub fn phase_title(phase: Phase, remaining_seconds: u64) -> String {
    format!("{}: {}", phase.label(), format_mmss(remaining_seconds))
}

/// Update posted from the countdown task to the interface thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A phase began with its full duration on the clock.
    PhaseStarted {
        /// The phase that started.
        phase: Phase,
        /// Its length in seconds.
        total_seconds: u64,
    },
    /// One second elapsed.
    Tick {
        /// The running phase.
        phase: Phase,
        /// Seconds left in the phase.
        remaining_seconds: u64,
    },
    /// A phase ran to the end without being cancelled.
    PhaseCompleted {
        /// The phase that completed.
        phase: Phase,
        /// Completed work phases in this run so far.
        pomodoro_count: u32,
    },
    /// The task observed cancellation and exited.
    Finished,
}

/// How a phase ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseOutcome {
    /// Every tick was delivered.
    Completed,
    /// The running flag was cleared after `ticks` ticks.
    Cancelled {
        /// Ticks delivered before cancellation.
        ticks: u64,
    },
}

impl PhaseOutcome {
    /// Check if the phase completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

fn is_running(running: &watch::Receiver<bool>) -> bool {
    *running.borrow()
}

/// Count down one phase, posting a [`SessionEvent::Tick`] each second.
///
/// A closed event channel means nobody is listening any more and is treated
/// as cancellation.
pub async fn run_phase(
    phase: Phase,
    total_seconds: u64,
    running: &mut watch::Receiver<bool>,
    events: &mpsc::UnboundedSender<SessionEvent>,
) -> PhaseOutcome {
    if events
        .send(SessionEvent::PhaseStarted {
            phase,
            total_seconds,
        })
        .is_err()
    {
        return PhaseOutcome::Cancelled { ticks: 0 };
    }

    let mut interval = time::interval_at(Instant::now() + TICK, TICK);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut ticks = 0;
    for (minutes, seconds) in Countdown::new(total_seconds) {
        if !is_running(running) {
            return PhaseOutcome::Cancelled { ticks };
        }

        loop {
            tokio::select! {
                _ = interval.tick() => break,
                changed = running.changed() => {
                    if changed.is_err() || !*running.borrow_and_update() {
                        return PhaseOutcome::Cancelled { ticks };
                    }
                }
            }
        }

        ticks += 1;
        let tick = SessionEvent::Tick {
            phase,
            remaining_seconds: minutes * SECONDS_PER_MINUTE + seconds,
        };
        if events.send(tick).is_err() {
            return PhaseOutcome::Cancelled { ticks };
        }
    }

    PhaseOutcome::Completed
}

/// Alternate work and break phases until the running flag is cleared.
///
/// Returns the number of work phases completed. Always posts
/// [`SessionEvent::Finished`] on exit.
pub async fn run_cycle(
    config: SessionConfig,
    mut running: watch::Receiver<bool>,
    events: mpsc::UnboundedSender<SessionEvent>,
    notifier: Arc<dyn Notifier>,
) -> u32 {
    let mut pomodoro_count = 0;
    let mut phase = Phase::Work;

    while is_running(&running) {
        let total_seconds = config.phase_seconds(phase);
        tracing::info!(%phase, total_seconds, "phase started");

        let outcome = run_phase(phase, total_seconds, &mut running, &events).await;
        if let PhaseOutcome::Cancelled { ticks } = outcome {
            tracing::info!(%phase, ticks, "phase cancelled");
            break;
        }

        let notice = match phase {
            Phase::Work => {
                pomodoro_count += 1;
                Notice::work_ended()
            }
            Phase::Break | Phase::Idle => Notice::break_ended(),
        };
        tracing::info!(%phase, pomodoro_count, "phase completed");

        // Announce first; the interface reacts to PhaseCompleted.
        dispatch(notifier.as_ref(), &notice);
        let _ = events.send(SessionEvent::PhaseCompleted {
            phase,
            pomodoro_count,
        });

        phase = phase.next();
    }

    let _ = events.send(SessionEvent::Finished);
    pomodoro_count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PomodoroError;
    use crate::features::notify::MockNotifier;
    use mockall::Sequence;

    fn drain(rx: &mut mpsc::UnboundedReceiver<SessionEvent>) -> Vec<SessionEvent> {
        let mut out = Vec::new();
        while let Ok(event) = rx.try_recv() {
            out.push(event);
        }
        out
    }

    fn tick_values(events: &[SessionEvent]) -> Vec<u64> {
        events
            .iter()
            .filter_map(|e| match e {
                SessionEvent::Tick {
                    remaining_seconds, ..
                } => Some(*remaining_seconds),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_countdown_yields_exactly_n_ticks() {
        for n in [1_u64, 2, 59, 60, 61, 125] {
            let ticks: Vec<_> = Countdown::new(n).collect();
            assert_eq!(ticks.len() as u64, n);
            let expected: Vec<_> = (0..n).rev().map(|s| (s / 60, s % 60)).collect();
            assert_eq!(ticks, expected);
        }
    }

    #[test]
    fn test_countdown_zero_is_empty() {
        assert_eq!(Countdown::new(0).next(), None);
        assert_eq!(Countdown::new(0).len(), 0);
    }

    #[test]
    fn test_countdown_is_lazy() {
        let mut countdown = Countdown::new(3600);
        assert_eq!(countdown.next(), Some((59, 59)));
        assert_eq!(countdown.remaining(), 3599);
        assert_eq!(countdown.len(), 3599);
    }

    #[test]
    fn test_format_mmss() {
        assert_eq!(format_mmss(0), "00:00");
        assert_eq!(format_mmss(59), "00:59");
        assert_eq!(format_mmss(90), "01:30");
        assert_eq!(format_mmss(3000), "50:00");
        assert_eq!(format_mmss(7200), "120:00");
    }

    #[test]
    fn test_phase_title() {
        assert_eq!(phase_title(Phase::Work, 1500), "Work: 25:00");
        assert_eq!(phase_title(Phase::Break, 61), "Break: 01:01");
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_phase_completes() {
        let (_flag, mut running) = watch::channel(true);
        let (tx, mut rx) = mpsc::unbounded_channel();

        let start = Instant::now();
        let outcome = run_phase(Phase::Work, 3, &mut running, &tx).await;

        assert_eq!(outcome, PhaseOutcome::Completed);
        assert_eq!(start.elapsed(), Duration::from_secs(3));

        let events = drain(&mut rx);
        assert_eq!(
            events[0],
            SessionEvent::PhaseStarted {
                phase: Phase::Work,
                total_seconds: 3
            }
        );
        assert_eq!(tick_values(&events), vec![2, 1, 0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_phase_cancelled_mid_countdown() {
        let (flag, mut running) = watch::channel(true);
        let (tx, mut rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(async move { run_phase(Phase::Break, 10, &mut running, &tx).await });

        let mut seen = 0;
        while let Some(event) = rx.recv().await {
            if matches!(event, SessionEvent::Tick { .. }) {
                seen += 1;
                if seen == 4 {
                    break;
                }
            }
        }
        flag.send(false).unwrap();

        let outcome = task.await.unwrap();
        assert_eq!(outcome, PhaseOutcome::Cancelled { ticks: 4 });
        assert!(tick_values(&drain(&mut rx)).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_phase_not_running_delivers_nothing() {
        let (_flag, mut running) = watch::channel(false);
        let (tx, mut rx) = mpsc::unbounded_channel();

        let outcome = run_phase(Phase::Work, 5, &mut running, &tx).await;

        assert_eq!(outcome, PhaseOutcome::Cancelled { ticks: 0 });
        assert!(tick_values(&drain(&mut rx)).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_phase_stops_when_listener_gone() {
        let (_flag, mut running) = watch::channel(true);
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        let outcome = run_phase(Phase::Work, 5, &mut running, &tx).await;
        assert!(!outcome.is_completed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cycle_notifies_in_order() {
        let (flag, running) = watch::channel(true);
        let (tx, mut rx) = mpsc::unbounded_channel();

        let mut seq = Sequence::new();
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|n| *n == Notice::work_ended())
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        notifier
            .expect_notify()
            .withf(|n| *n == Notice::break_ended())
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let config = SessionConfig {
            work_minutes: 1,
            break_minutes: 1,
        };
        let task = tokio::spawn(run_cycle(config, running, tx, Arc::new(notifier)));

        let mut completed = Vec::new();
        while let Some(event) = rx.recv().await {
            if let SessionEvent::PhaseCompleted {
                phase,
                pomodoro_count,
            } = event
            {
                completed.push((phase, pomodoro_count));
                if phase == Phase::Break {
                    break;
                }
            }
        }
        flag.send(false).unwrap();

        assert_eq!(task.await.unwrap(), 1);
        assert_eq!(completed, vec![(Phase::Work, 1), (Phase::Break, 1)]);
        assert_eq!(drain(&mut rx).last(), Some(&SessionEvent::Finished));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cycle_cancelled_in_work_sends_no_notification() {
        let (flag, running) = watch::channel(true);
        let (tx, mut rx) = mpsc::unbounded_channel();

        let mut notifier = MockNotifier::new();
        notifier.expect_notify().never();

        let config = SessionConfig {
            work_minutes: 1,
            break_minutes: 1,
        };
        let task = tokio::spawn(run_cycle(config, running, tx, Arc::new(notifier)));

        while let Some(event) = rx.recv().await {
            if let SessionEvent::Tick {
                remaining_seconds: 30,
                ..
            } = event
            {
                break;
            }
        }
        flag.send(false).unwrap();

        assert_eq!(task.await.unwrap(), 0);
        let rest = drain(&mut rx);
        assert!(!rest
            .iter()
            .any(|e| matches!(e, SessionEvent::PhaseCompleted { .. })));
        assert_eq!(rest.last(), Some(&SessionEvent::Finished));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cycle_cancelled_in_break_keeps_pomodoro() {
        let (flag, running) = watch::channel(true);
        let (tx, mut rx) = mpsc::unbounded_channel();

        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|n| *n == Notice::work_ended())
            .times(1)
            .returning(|_| Ok(()));
        notifier
            .expect_notify()
            .withf(|n| *n == Notice::break_ended())
            .never();

        let config = SessionConfig {
            work_minutes: 1,
            break_minutes: 1,
        };
        let task = tokio::spawn(run_cycle(config, running, tx, Arc::new(notifier)));

        while let Some(event) = rx.recv().await {
            if let SessionEvent::Tick {
                phase: Phase::Break,
                remaining_seconds: 30,
            } = event
            {
                break;
            }
        }
        flag.send(false).unwrap();

        assert_eq!(task.await.unwrap(), 1);
        let rest = drain(&mut rx);
        assert!(!rest.iter().any(|e| matches!(
            e,
            SessionEvent::PhaseCompleted {
                phase: Phase::Break,
                ..
            }
        )));
        assert_eq!(rest.last(), Some(&SessionEvent::Finished));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cycle_survives_notification_failure() {
        let (flag, running) = watch::channel(true);
        let (tx, mut rx) = mpsc::unbounded_channel();

        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .returning(|_| Err(PomodoroError::Notification("no daemon".to_string())));

        let config = SessionConfig {
            work_minutes: 1,
            break_minutes: 1,
        };
        let task = tokio::spawn(run_cycle(config, running, tx, Arc::new(notifier)));

        let mut work_done = 0;
        while let Some(event) = rx.recv().await {
            if let SessionEvent::PhaseCompleted {
                phase: Phase::Work,
                pomodoro_count,
            } = event
            {
                work_done = pomodoro_count;
                if pomodoro_count == 2 {
                    break;
                }
            }
        }
        flag.send(false).unwrap();

        assert_eq!(work_done, 2);
        assert_eq!(task.await.unwrap(), 2);
    }
}
