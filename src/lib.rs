//! Pomodo - a state-managed Pomodoro session timer
//!
//! This library provides the session timer state machine: countdown state,
//! work/break alternation, an accumulated work-minute tally and a session
//! history log, driven by a per-second ticking task.

pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::TimerError;
pub use services::{FileHistorySink, HistorySink};
pub use state::{PomodoroSettings, SessionTimer, TimerSnapshot};
pub use utils::signals::shutdown_signal;
