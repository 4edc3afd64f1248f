//! Session phase state machine
//!
//! Pure countdown and alternation logic, free of timers and locks. The
//! surrounding [`SessionTimer`](super::SessionTimer) drives it from the
//! ticking task.

use super::PomodoroSettings;

/// Current phase of the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No countdown running
    Idle,
    /// Counting down a work session
    Work,
    /// Counting down a break session
    Break,
}

impl SessionPhase {
    /// Check if a countdown is running in this phase
    pub fn is_running(&self) -> bool {
        !matches!(self, SessionPhase::Idle)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Work => "work",
            SessionPhase::Break => "break",
        }
    }
}

/// Phase change produced by a countdown reaching zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A work session completed; its configured minutes were credited
    WorkToBreak { credited_minutes: u64 },
    /// A break completed; the next work session started
    BreakToWork,
}

/// Countdown state, work-minute tally and session history
#[derive(Debug, Clone)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub remaining_seconds: u64,
    pub total_work_minutes: u64,
    pub history: Vec<String>,
}

impl SessionState {
    /// Create a new idle session state
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Idle,
            remaining_seconds: 0,
            total_work_minutes: 0,
            history: Vec::new(),
        }
    }

    /// Check if a countdown is running
    pub fn is_active(&self) -> bool {
        self.phase.is_running()
    }

    /// Check if the current phase is a work session
    pub fn is_work_session(&self) -> bool {
        self.phase == SessionPhase::Work
    }

    /// Begin a work session countdown. Restarting while active resets the
    /// countdown to the full work duration.
    pub fn begin(&mut self, work_seconds: u64) {
        self.phase = SessionPhase::Work;
        self.remaining_seconds = work_seconds;
    }

    /// Halt any running countdown and return the phase that was running.
    ///
    /// A manually stopped work session is logged to the history but not
    /// credited to the work-minute tally. Halting an idle state is a no-op.
    pub fn halt(&mut self) -> Option<SessionPhase> {
        if !self.phase.is_running() {
            self.remaining_seconds = 0;
            return None;
        }

        let stopped = self.phase;
        if stopped == SessionPhase::Work {
            self.history.push("Work session stopped".to_string());
        }
        self.phase = SessionPhase::Idle;
        self.remaining_seconds = 0;
        Some(stopped)
    }

    /// Advance the countdown by one elapsed second.
    ///
    /// Ignored while idle, so a stale ticker cannot corrupt state. When the
    /// countdown reaches zero the phase flips and the countdown restarts
    /// from the configured duration of the new phase; alternation continues
    /// until [`halt`](Self::halt).
    pub fn tick(&mut self, settings: &PomodoroSettings) -> Option<Transition> {
        if !self.phase.is_running() {
            return None;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds > 0 {
            return None;
        }

        match self.phase {
            SessionPhase::Work => {
                self.credit_work(settings.work_minutes());
                self.history.push("Work session completed".to_string());
                self.phase = SessionPhase::Break;
                self.remaining_seconds = settings.break_seconds();
                Some(Transition::WorkToBreak {
                    credited_minutes: settings.work_minutes(),
                })
            }
            SessionPhase::Break => {
                self.history.push("Break session completed".to_string());
                self.phase = SessionPhase::Work;
                self.remaining_seconds = settings.work_seconds();
                Some(Transition::BreakToWork)
            }
            SessionPhase::Idle => None,
        }
    }

    /// Add completed work minutes to the running tally
    pub fn credit_work(&mut self, minutes: u64) {
        self.total_work_minutes += minutes;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
