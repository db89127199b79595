//! Signal handling for clean teardown

use futures::stream::StreamExt;
use signal_hook_tokio::Signals;
use tracing::{info, warn};

/// Wait for a shutdown signal (SIGTERM, SIGINT).
///
/// Falls back to tokio's ctrl-c handler if the signal stream cannot be
/// installed, so the binary always has a way out.
pub async fn shutdown_signal() {
    match Signals::new([signal_hook::consts::SIGTERM, signal_hook::consts::SIGINT]) {
        Ok(mut signals) => {
            if let Some(signal) = signals.next().await {
                info!("Received signal: {}", signal);
            }
        }
        Err(e) => {
            warn!("Failed to install signal handler: {}, falling back to ctrl-c", e);
            let _ = tokio::signal::ctrl_c().await;
        }
    }
}
