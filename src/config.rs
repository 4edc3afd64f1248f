//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::Parser;

use crate::{error::TimerError, state::PomodoroSettings};

/// CLI argument parsing structure
#[derive(Parser)]
#[command(name = "pomodo")]
#[command(about = "A state-managed Pomodoro session timer for the terminal")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Work session duration in minutes
    #[arg(short, long, default_value = "25")]
    pub work: u64,

    /// Break session duration in minutes
    #[arg(short, long = "break", default_value = "5")]
    pub break_minutes: u64,

    /// Path the session history is exported to on shutdown
    #[arg(long, default_value = "pomodoro-history.txt")]
    pub history: PathBuf,

    /// Print the final timer snapshot as JSON on exit
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Validate the configured durations into a settings value
    pub fn settings(&self) -> Result<PomodoroSettings, TimerError> {
        PomodoroSettings::new(self.work, self.break_minutes)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
