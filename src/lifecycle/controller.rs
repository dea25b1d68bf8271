//! Startup and shutdown sequencing.
//!
//! # Responsibilities
//! - Acquire shared resources (the database) before serving
//! - Install the admission gate and start the listener
//! - Block on the termination trigger, then drain under a deadline
//! - Release the database exactly once, after the drain
//!
//! # Design Decisions
//! - Resource acquisition failure is fatal; there is nothing to serve
//!   without the database
//! - The drain deadline is absolute: when the grace period elapses the
//!   serve task is aborted and whatever is still in flight ends with the
//!   process
//! - Deadline overrun is normal operation under load, logged at info

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::admission::AdmissionGate;
use crate::config::AppConfig;
use crate::http::{build_router, AppState};
use crate::lifecycle::{signals, Shutdown};
use crate::storage::{Database, StorageError};

/// Fatal errors from the controller. Any of these terminates the process.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to open database: {0}")]
    Storage(#[from] StorageError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),

    #[error("server task failed: {0}")]
    ServeTask(tokio::task::JoinError),
}

/// The running application. Owns the shared database handle between
/// initialization and teardown.
pub struct App {
    config: AppConfig,
    db: Database,
}

impl App {
    /// Open shared resources. Failure here is fatal to the process.
    pub async fn initialize(config: AppConfig) -> Result<Self, AppError> {
        let db = Database::open(&config.database.path).await?;
        tracing::info!(path = %config.database.path, "database ready");
        Ok(Self { config, db })
    }

    /// Serve until `shutdown` is triggered (the interrupt signal triggers it
    /// too), then drain in-flight requests for at most the configured grace
    /// period and release the database. Returns only in a terminal state.
    pub async fn run(self, shutdown: Shutdown) -> Result<(), AppError> {
        let grace = Duration::from_secs(self.config.shutdown.grace_secs);
        let gate = Arc::new(AdmissionGate::new(
            self.config.admission.max_concurrent,
            Duration::from_millis(self.config.admission.wait_ms),
        ));

        let state = AppState {
            db: self.db.clone(),
        };
        let router = build_router(state, gate, &self.config.timeouts);

        let addr = self.config.listener.bind_address.clone();
        let listener = TcpListener::bind(&addr).await.map_err(|source| AppError::Bind {
            addr: addr.clone(),
            source,
        })?;
        tracing::info!(
            address = %addr,
            max_concurrent = %self.config.admission.max_concurrent,
            grace_secs = self.config.shutdown.grace_secs,
            "listening for connections"
        );

        // Both receivers exist before anything can trigger, so neither the
        // drain future nor the wait below can miss the signal.
        let mut drain_rx = shutdown.subscribe();
        let mut shutdown_rx = shutdown.subscribe();

        // The accept loop runs on its own task; this path blocks on the
        // termination trigger.
        let mut server = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    let _ = drain_rx.recv().await;
                })
                .await
        });

        let trigger = shutdown.clone();
        tokio::spawn(async move {
            signals::wait_for_interrupt().await;
            trigger.trigger();
        });

        let result = tokio::select! {
            // Accept-loop death before any shutdown was requested is fatal.
            res = &mut server => match res {
                Ok(serve_result) => serve_result.map_err(AppError::Serve),
                Err(join_error) => Err(AppError::ServeTask(join_error)),
            },
            _ = shutdown_rx.recv() => {
                tracing::info!(
                    grace_secs = self.config.shutdown.grace_secs,
                    "shutdown requested; draining in-flight requests"
                );
                match tokio::time::timeout(grace, &mut server).await {
                    Ok(Ok(serve_result)) => {
                        tracing::info!("drained all in-flight requests");
                        serve_result.map_err(AppError::Serve)
                    }
                    Ok(Err(join_error)) => Err(AppError::ServeTask(join_error)),
                    Err(_elapsed) => {
                        // Expected under load, not an error.
                        server.abort();
                        let _ = (&mut server).await;
                        tracing::info!(
                            "grace period elapsed; terminating remaining connections"
                        );
                        Ok(())
                    }
                }
            }
        };

        // Release the shared resource exactly once, after the drain, and
        // regardless of how serving ended.
        self.db.close();
        tracing::info!("shutting down");
        result
    }
}
