//! Interrupt handling
//!
//! Converts Ctrl+C into a cancellation signal the tailing loop can observe.

use tokio::sync::watch;
use tracing::info;

/// Spawns the interrupt listener and returns the shutdown flag
///
/// The returned receiver starts at `false` and flips to `true` at most once,
/// when the first interrupt arrives. A second interrupt before graceful
/// shutdown completes is left to the process boundary.
pub fn shutdown_signal() -> watch::Receiver<bool> {
    let (tx, rx) = watch::channel(false);

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("received interrupt, stopping...");
            let _ = tx.send(true);
        }
    });

    rx
}
