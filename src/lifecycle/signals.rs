//! OS signal handling.
//!
//! Only the interrupt signal (Ctrl+C) is intercepted for graceful shutdown.
//! TERM, QUIT and KILL deliberately keep their default behavior and
//! terminate the process without draining.

/// Wait for the interrupt signal.
pub async fn wait_for_interrupt() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        // Without a handler there is no orderly way to stop; park this task
        // so the serve path keeps running and TERM remains the way out.
        tracing::error!(%error, "failed to install interrupt handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("interrupt received");
}
