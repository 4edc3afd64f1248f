//! Pomodoro duration settings

use serde::{Deserialize, Serialize};

use crate::error::TimerError;

/// Work and break durations in minutes.
///
/// Constructed through [`PomodoroSettings::new`], which rejects zero
/// durations, and replaced wholesale rather than mutated field by field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroSettings {
    work_minutes: u64,
    break_minutes: u64,
}

impl PomodoroSettings {
    /// Create validated settings. Both durations must be positive.
    pub fn new(work_minutes: u64, break_minutes: u64) -> Result<Self, TimerError> {
        if work_minutes == 0 {
            return Err(TimerError::InvalidSettings(
                "work duration must be at least one minute".to_string(),
            ));
        }
        if break_minutes == 0 {
            return Err(TimerError::InvalidSettings(
                "break duration must be at least one minute".to_string(),
            ));
        }
        Ok(Self {
            work_minutes,
            break_minutes,
        })
    }

    pub fn work_minutes(&self) -> u64 {
        self.work_minutes
    }

    pub fn break_minutes(&self) -> u64 {
        self.break_minutes
    }

    /// Work session length in seconds
    pub fn work_seconds(&self) -> u64 {
        self.work_minutes * 60
    }

    /// Break session length in seconds
    pub fn break_seconds(&self) -> u64 {
        self.break_minutes * 60
    }
}

impl Default for PomodoroSettings {
    /// Classic 25-minute work / 5-minute break split
    fn default() -> Self {
        Self {
            work_minutes: 25,
            break_minutes: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_work_duration() {
        assert!(matches!(
            PomodoroSettings::new(0, 5),
            Err(TimerError::InvalidSettings(_))
        ));
    }

    #[test]
    fn rejects_zero_break_duration() {
        assert!(matches!(
            PomodoroSettings::new(25, 0),
            Err(TimerError::InvalidSettings(_))
        ));
    }

    #[test]
    fn converts_minutes_to_seconds() {
        let settings = PomodoroSettings::new(25, 5).unwrap();
        assert_eq!(settings.work_seconds(), 1500);
        assert_eq!(settings.break_seconds(), 300);
    }

    #[test]
    fn replacement_preserves_value_equality() {
        let settings = PomodoroSettings::new(45, 15).unwrap();
        let replaced = settings;
        assert_eq!(replaced, PomodoroSettings::new(45, 15).unwrap());
        assert_eq!(replaced.work_minutes(), 45);
        assert_eq!(replaced.break_minutes(), 15);
    }
}
