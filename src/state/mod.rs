//! State management module
//!
//! This module contains all state-related structures and their management logic.

pub mod session;
pub mod settings;
pub mod timer;

// Re-export main types
pub use session::{SessionPhase, SessionState, Transition};
pub use settings::PomodoroSettings;
pub use timer::{SessionTimer, TimerSnapshot};

pub(crate) use timer::TimerInner;
