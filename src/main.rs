//! Pomodo - a state-managed Pomodoro session timer for the terminal
//!
//! This is the main entry point for the pomodo application.

use tracing::info;

use pomodo::{
    config::Config,
    services::FileHistorySink,
    state::SessionTimer,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodo={}", config.log_level()))
        .init();

    info!("Starting pomodo v0.1.0");
    info!(
        "Configuration: work={}min, break={}min, history={}",
        config.work,
        config.break_minutes,
        config.history.display()
    );

    let settings = config.settings()?;
    let timer = SessionTimer::new(settings);

    // Log a countdown line at every full minute boundary
    let mut updates = timer.subscribe();
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let snapshot = updates.borrow_and_update().clone();
            if snapshot.active
                && snapshot.remaining_seconds > 0
                && snapshot.remaining_seconds % 60 == 0
            {
                info!(
                    "{} session: {} minutes remaining",
                    if snapshot.work_session { "Work" } else { "Break" },
                    snapshot.remaining_seconds / 60
                );
            }
        }
    });

    timer.start();

    shutdown_signal().await;
    info!("Shutdown signal received");

    timer.stop();
    timer.save_history(&FileHistorySink, &config.history)?;

    let snapshot = timer.snapshot();
    if config.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        info!(
            "Total work time: {} minutes across {} history entries",
            snapshot.total_work_minutes,
            timer.history().len()
        );
    }

    info!("Timer shutdown complete");
    Ok(())
}
