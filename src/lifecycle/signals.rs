//! OS signal handling.

use crate::lifecycle::Shutdown;

/// Wait for Ctrl+C and trigger `shutdown`.
///
/// If the handler cannot be installed the error is logged and shutdown is
/// triggered immediately.
pub async fn shutdown_on_ctrl_c(shutdown: Shutdown) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
    }
    shutdown.trigger();
}
