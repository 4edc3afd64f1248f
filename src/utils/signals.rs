//! Signal handling for graceful shutdown

use futures::stream::StreamExt;
use signal_hook_tokio::Signals;
use tracing::{debug, info};

/// Wait for shutdown signals (SIGTERM, SIGINT).
///
/// Resolves on the first signal so the caller can stop the timer and
/// export the session history before exiting.
pub async fn shutdown_signal() {
    let mut signals = Signals::new([
        signal_hook::consts::SIGTERM,
        signal_hook::consts::SIGINT,
    ])
    .expect("Failed to create signal handler");

    if let Some(signal) = signals.next().await {
        info!("Received signal: {}, stopping timer", signal);
    }
    debug!("Proceeding with timer shutdown");
}
