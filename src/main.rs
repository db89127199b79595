//! Hourglass - a terminal countdown timer
//!
//! This is the main entry point for the hourglass binary.

use std::io::Write;

use tracing::info;

use hourglass::{
    clock::format_time,
    config::Config,
    timer::{Timer, TimerOptions},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("hourglass={}", config.log_level()))
        .init();

    info!("Starting hourglass countdown");
    info!(
        "Configuration: duration={}s, interval={}ms, loop={}, frame_sync={}",
        config.duration, config.interval, config.looping, config.frame_sync
    );

    // Completion is signalled out of the timer callback so the main task
    // can wait on it alongside shutdown signals
    let (done_tx, mut done_rx) = tokio::sync::watch::channel(false);

    let render_format = config.format.clone();
    let options = TimerOptions::new()
        .interval_ms(config.interval)
        .frame_synced(config.frame_sync)
        .format(config.format.clone())
        .looping(config.looping)
        .on_tick(move |remaining_ms| {
            print!("\r{}   ", format_time(remaining_ms, &render_format));
            let _ = std::io::stdout().flush();
        })
        .on_complete(move || {
            let _ = done_tx.send(true);
        });

    let timer = Timer::new(config.total_ms(), options)?;
    timer.start();

    tokio::select! {
        _ = done_rx.changed() => {
            println!();
            info!("Countdown complete");
        }
        _ = shutdown_signal() => {
            println!();
            info!("Shutdown signal received");
            timer.stop();
        }
    }

    if config.json {
        println!("{}", serde_json::to_string_pretty(&timer.snapshot())?);
    }

    Ok(())
}
