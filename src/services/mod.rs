//! External collaborators module
//!
//! This module contains the collaborators the timer core delegates to for
//! durable storage.

pub mod history;

// Re-export main types
pub use history::{FileHistorySink, HistorySink};
