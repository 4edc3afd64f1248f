//! Ticking background task

use std::{sync::Arc, time::Duration};

use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant},
};
use tracing::debug;

use crate::state::TimerInner;

/// Owned handle to the ticking task driving a [`SessionTimer`].
///
/// Arming spawns a tokio task that delivers one tick per interval to the
/// timer state. The handle is held by the timer that armed it; disarming
/// (or dropping) aborts the task, and the task also exits on its own once
/// the timer goes inactive.
///
/// [`SessionTimer`]: crate::state::SessionTimer
#[derive(Debug)]
pub struct TickerHandle {
    task: JoinHandle<()>,
}

impl TickerHandle {
    /// Spawn a ticking task for the given timer state. Must be called from
    /// within a tokio runtime.
    pub(crate) fn arm(inner: Arc<TimerInner>, period: Duration) -> Self {
        let task = tokio::spawn(async move {
            debug!("Ticker armed with period {:?}", period);
            // First tick fires one full period after arming, not immediately.
            let mut ticker = interval_at(Instant::now() + period, period);
            loop {
                ticker.tick().await;
                if !inner.tick() {
                    debug!("Timer inactive, ticker exiting");
                    break;
                }
            }
        });

        Self { task }
    }

    /// Cancel the ticking task. Idempotent.
    pub fn disarm(&self) {
        self.task.abort();
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
