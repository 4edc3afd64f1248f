//! Background tasks module
//!
//! This module contains the ticking task that runs alongside the timer.

pub mod ticker;

// Re-export main types
pub use ticker::TickerHandle;
