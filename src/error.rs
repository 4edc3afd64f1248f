//! Error types for the session timer core

use std::io;
use thiserror::Error;

/// Errors surfaced by the session timer and its collaborators
#[derive(Debug, Error)]
pub enum TimerError {
    /// Settings with a zero duration are rejected before a countdown
    /// can be armed with them.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// A history sink write failed. Propagated to the caller, never retried.
    #[error("failed to write history to {path}")]
    HistoryWrite {
        path: String,
        #[source]
        source: io::Error,
    },
}
