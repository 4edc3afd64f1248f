//! Shared session timer state management

use std::{
    path::Path,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::{
    error::TimerError,
    services::HistorySink,
    tasks::TickerHandle,
};
use super::{
    session::{SessionState, Transition},
    PomodoroSettings,
};

const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Point-in-time view of the timer, published to presentation-layer watchers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub active: bool,
    pub work_session: bool,
    pub remaining_seconds: u64,
    pub total_work_minutes: u64,
    pub last_transition: Option<DateTime<Utc>>,
}

/// State shared between the timer facade and its ticking task
#[derive(Debug)]
pub(crate) struct TimerInner {
    session: Mutex<SessionState>,
    settings: Mutex<PomodoroSettings>,
    last_transition: Mutex<Option<DateTime<Utc>>>,
    /// Channel for timer updates
    snapshot_tx: watch::Sender<TimerSnapshot>,
}

/// The session timer: countdown state, work/break alternation, work-minute
/// tally and session history.
///
/// The ticking resource is owned explicitly: `start()` arms a fresh
/// [`TickerHandle`] and releases the previous one, `stop()` and drop
/// release it. Both are idempotent.
#[derive(Debug)]
pub struct SessionTimer {
    inner: Arc<TimerInner>,
    ticker: Mutex<Option<TickerHandle>>,
    /// Keep the receiver alive to prevent channel closure
    _snapshot_rx: watch::Receiver<TimerSnapshot>,
}

// A panicking lock holder cannot leave the machine half-updated, so a
// poisoned guard is reclaimed rather than propagated.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl TimerInner {
    fn snapshot(&self) -> TimerSnapshot {
        let session = lock(&self.session);
        TimerSnapshot {
            active: session.is_active(),
            work_session: session.is_work_session(),
            remaining_seconds: session.remaining_seconds,
            total_work_minutes: session.total_work_minutes,
            last_transition: *lock(&self.last_transition),
        }
    }

    fn publish(&self) {
        if let Err(e) = self.snapshot_tx.send(self.snapshot()) {
            warn!("Failed to send timer update: {}", e);
        }
    }

    fn mark_transition(&self) {
        *lock(&self.last_transition) = Some(Utc::now());
    }

    /// Advance the countdown by one second. Returns false once the timer is
    /// no longer active, telling the ticking task to exit.
    pub(crate) fn tick(&self) -> bool {
        let transition = {
            let mut session = lock(&self.session);
            if !session.is_active() {
                return false;
            }
            let settings = *lock(&self.settings);
            session.tick(&settings)
        };

        match transition {
            Some(Transition::WorkToBreak { credited_minutes }) => {
                self.mark_transition();
                info!(
                    "Work session completed, {} minutes credited, break started",
                    credited_minutes
                );
            }
            Some(Transition::BreakToWork) => {
                self.mark_transition();
                info!("Break completed, next work session started");
            }
            None => {}
        }

        self.publish();
        true
    }
}

impl SessionTimer {
    /// Create an idle timer with the given settings
    pub fn new(settings: PomodoroSettings) -> Self {
        let inner = Arc::new(TimerInner {
            session: Mutex::new(SessionState::new()),
            settings: Mutex::new(settings),
            last_transition: Mutex::new(None),
            snapshot_tx: watch::channel(TimerSnapshot {
                active: false,
                work_session: false,
                remaining_seconds: 0,
                total_work_minutes: 0,
                last_transition: None,
            })
            .0,
        });
        let snapshot_rx = inner.snapshot_tx.subscribe();
        Self {
            inner,
            ticker: Mutex::new(None),
            _snapshot_rx: snapshot_rx,
        }
    }

    /// Start (or restart) a work session.
    ///
    /// Any previously armed ticker is released before a new one is armed,
    /// so at most one ticking task drives this timer. Must be called from
    /// within a tokio runtime.
    pub fn start(&self) {
        let work_seconds = lock(&self.inner.settings).work_seconds();
        lock(&self.inner.session).begin(work_seconds);
        self.inner.mark_transition();
        info!("Work session started: {} seconds on the clock", work_seconds);
        self.inner.publish();

        // Release the prior ticker before arming its replacement so two
        // ticking tasks are never live at once.
        if let Some(previous) = lock(&self.ticker).take() {
            previous.disarm();
        }
        let fresh = TickerHandle::arm(Arc::clone(&self.inner), TICK_INTERVAL);
        *lock(&self.ticker) = Some(fresh);
    }

    /// Stop the timer and release the ticker. Safe to call when already
    /// stopped.
    pub fn stop(&self) {
        if let Some(ticker) = lock(&self.ticker).take() {
            ticker.disarm();
        }

        let halted = lock(&self.inner.session).halt();
        if let Some(phase) = halted {
            self.inner.mark_transition();
            info!("Stopped during {} session", phase.as_str());
            self.inner.publish();
        }
    }

    /// Advance the countdown by one elapsed second. Invoked by the ticking
    /// task; ignored while the timer is idle.
    pub fn tick(&self) {
        self.inner.tick();
    }

    /// Credit the currently configured work duration to the running tally.
    ///
    /// The work-to-break boundary performs the same crediting on its own;
    /// this entry point lets the presentation layer credit a work block
    /// directly.
    pub fn update_work_time(&self) {
        let minutes = lock(&self.inner.settings).work_minutes();
        lock(&self.inner.session).credit_work(minutes);
        self.inner.publish();
    }

    /// Replace the settings wholesale. Applied at the next start or phase
    /// transition; the running countdown is left untouched.
    pub fn update_settings(&self, settings: PomodoroSettings) {
        *lock(&self.inner.settings) = settings;
        info!(
            "Settings updated: work={}min, break={}min",
            settings.work_minutes(),
            settings.break_minutes()
        );
    }

    /// Current settings value
    pub fn settings(&self) -> PomodoroSettings {
        *lock(&self.inner.settings)
    }

    /// Append a free-form entry to the session history
    pub fn record_entry(&self, entry: impl Into<String>) {
        lock(&self.inner.session).history.push(entry.into());
    }

    /// Copy of the session history log
    pub fn history(&self) -> Vec<String> {
        lock(&self.inner.session).history.clone()
    }

    /// Write the session history through the sink, one entry per line.
    ///
    /// Sink failures propagate to the caller; there is no retry.
    pub fn save_history(&self, sink: &dyn HistorySink, path: &Path) -> Result<(), TimerError> {
        let contents = {
            let session = lock(&self.inner.session);
            session
                .history
                .iter()
                .fold(String::new(), |mut out, entry| {
                    out.push_str(entry);
                    out.push('\n');
                    out
                })
        };

        sink.write(path, &contents)
            .map_err(|source| TimerError::HistoryWrite {
                path: path.display().to_string(),
                source,
            })
    }

    /// Current point-in-time view of the timer
    pub fn snapshot(&self) -> TimerSnapshot {
        self.inner.snapshot()
    }

    /// Subscribe to timer updates
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.inner.snapshot_tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    fn timer(work: u64, brk: u64) -> SessionTimer {
        SessionTimer::new(PomodoroSettings::new(work, brk).unwrap())
    }

    /// Records every write instead of touching the filesystem
    #[derive(Default)]
    struct RecordingSink {
        writes: Mutex<Vec<(String, String)>>,
    }

    impl HistorySink for RecordingSink {
        fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
            self.writes
                .lock()
                .unwrap()
                .push((path.display().to_string(), contents.to_string()));
            Ok(())
        }
    }

    struct FailingSink;

    impl HistorySink for FailingSink {
        fn write(&self, _path: &Path, _contents: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }
    }

    #[tokio::test]
    async fn start_arms_a_full_work_countdown() {
        let timer = timer(25, 5);
        timer.start();

        let snapshot = timer.snapshot();
        assert!(snapshot.active);
        assert!(snapshot.work_session);
        assert_eq!(snapshot.remaining_seconds, 1500);
        timer.stop();
    }

    #[tokio::test]
    async fn stop_clears_the_countdown() {
        let timer = timer(25, 5);
        timer.start();
        timer.stop();

        let snapshot = timer.snapshot();
        assert!(!snapshot.active);
        assert_eq!(snapshot.remaining_seconds, 0);
    }

    #[tokio::test]
    async fn stop_is_idempotent() {
        let timer = timer(25, 5);
        timer.stop();
        timer.start();
        timer.stop();
        timer.stop();

        assert!(!timer.snapshot().active);
    }

    #[tokio::test]
    async fn ticks_after_stop_leave_state_untouched() {
        let timer = timer(25, 5);
        timer.start();
        timer.stop();

        for _ in 0..5 {
            timer.tick();
        }

        let snapshot = timer.snapshot();
        assert!(!snapshot.active);
        assert_eq!(snapshot.remaining_seconds, 0);
        assert_eq!(snapshot.total_work_minutes, 0);
    }

    #[tokio::test]
    async fn restart_while_active_resets_the_countdown() {
        let timer = timer(25, 5);
        timer.start();
        timer.tick();
        timer.tick();
        assert_eq!(timer.snapshot().remaining_seconds, 1498);

        timer.start();
        assert_eq!(timer.snapshot().remaining_seconds, 1500);
        timer.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn restart_leaves_a_single_ticker_armed() {
        let timer = timer(25, 5);
        timer.start();
        timer.start();

        // With a stale ticker still live, one elapsed second would cost
        // two decrements.
        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(timer.snapshot().remaining_seconds, 1499);
        timer.stop();
    }

    #[tokio::test]
    async fn work_completion_credits_and_flips_to_break() {
        let timer = timer(1, 5);
        timer.start();

        for _ in 0..60 {
            timer.tick();
        }

        let snapshot = timer.snapshot();
        assert!(snapshot.active);
        assert!(!snapshot.work_session);
        assert_eq!(snapshot.remaining_seconds, 300);
        assert_eq!(snapshot.total_work_minutes, 1);
        timer.stop();
    }

    #[tokio::test]
    async fn update_work_time_credits_configured_minutes() {
        let timer = timer(25, 5);
        timer.update_work_time();
        assert_eq!(timer.snapshot().total_work_minutes, 25);
    }

    #[tokio::test]
    async fn settings_replacement_applies_at_next_start() {
        let timer = timer(25, 5);
        timer.update_settings(PomodoroSettings::new(45, 15).unwrap());
        assert_eq!(timer.settings(), PomodoroSettings::new(45, 15).unwrap());

        timer.start();
        assert_eq!(timer.snapshot().remaining_seconds, 45 * 60);
        timer.stop();
    }

    #[test]
    fn save_history_writes_entries_newline_terminated() {
        let timer = timer(25, 5);
        timer.record_entry("Test session");

        let sink = RecordingSink::default();
        timer
            .save_history(&sink, Path::new("history.txt"))
            .unwrap();

        let writes = sink.writes.lock().unwrap();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].1, "Test session\n");
    }

    #[test]
    fn save_history_propagates_sink_failure() {
        let timer = timer(25, 5);
        timer.record_entry("Test session");

        let err = timer
            .save_history(&FailingSink, Path::new("history.txt"))
            .unwrap_err();
        assert!(matches!(err, TimerError::HistoryWrite { .. }));
    }

    #[tokio::test]
    async fn snapshot_watchers_observe_updates() {
        let timer = timer(25, 5);
        let mut updates = timer.subscribe();

        timer.start();
        updates.changed().await.unwrap();
        assert!(updates.borrow_and_update().active);

        timer.stop();
        updates.changed().await.unwrap();
        assert!(!updates.borrow_and_update().active);
    }
}
