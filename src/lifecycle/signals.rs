//! OS signal handling.
//!
//! Ctrl+C ends the run the same way the run-time deadline does: the
//! shutdown broadcast fires and every user winds down.

use std::sync::Arc;
use crate::lifecycle::Shutdown;

/// Trigger `shutdown` on the first Ctrl+C, or return once shutdown happens for another reason.
pub async fn shutdown_on_ctrl_c(shutdown: Arc<Shutdown>) {
    let mut rx = shutdown.subscribe();
    if shutdown.is_triggered() {
        return;
    }

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            match result {
                Ok(()) => tracing::info!("Shutdown signal received"),
                Err(e) => tracing::error!(error = %e, "Failed to install Ctrl+C handler"),
            }
            shutdown.trigger();
        }
        _ = rx.recv() => {}
    }
}
