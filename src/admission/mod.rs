//! Request admission control.
//!
//! Bounds how many requests may be inside the handler pipeline at once. A
//! fixed pool of N tokens backs the gate; an arrival that cannot take a
//! token within the configured wait interval is turned away with
//! `503 Service Unavailable` and never reaches a handler.
//!
//! # Design Decisions
//! - Tokens are semaphore permits held as RAII guards, so release happens
//!   on every exit path, including a panicking handler
//! - No ordering guarantee among waiters; any waiter may take a freed token
//! - A rejection is terminal for that arrival; retry belongs to the client

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::http::response::error_response;

/// Message returned with every overload rejection.
pub const REJECTION_MESSAGE: &str = "Too many requests";

/// Outcome of one admission attempt.
pub enum Admission {
    /// The request may proceed; the permit returns to the pool on drop.
    Admitted(OwnedSemaphorePermit),
    /// No token became free within the wait interval.
    Rejected,
}

/// Fixed-capacity concurrency gate.
pub struct AdmissionGate {
    permits: Arc<Semaphore>,
    wait: Duration,
}

impl AdmissionGate {
    /// Create a gate admitting at most `capacity` concurrent requests.
    ///
    /// Zero capacity is unrepresentable here: `capacity` is `NonZeroUsize`,
    /// and the config schema rejects a configured zero before it gets this
    /// far.
    pub fn new(capacity: NonZeroUsize, wait: Duration) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(capacity.get())),
            wait,
        }
    }

    /// Try to take a token, waiting at most the configured interval.
    pub async fn admit(&self) -> Admission {
        match tokio::time::timeout(self.wait, Arc::clone(&self.permits).acquire_owned()).await {
            Ok(Ok(permit)) => Admission::Admitted(permit),
            // The pool is never closed, so the only other outcome is the
            // wait interval elapsing.
            Ok(Err(_)) | Err(_) => Admission::Rejected,
        }
    }

    /// Tokens currently free.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }
}

/// Middleware placing the gate in front of every route. Rejected requests
/// never reach a handler.
pub async fn admission_middleware(
    State(gate): State<Arc<AdmissionGate>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    match gate.admit().await {
        Admission::Admitted(_permit) => next.run(request).await,
        Admission::Rejected => {
            tracing::warn!(
                method = %request.method(),
                path = %request.uri().path(),
                "admission capacity exhausted; rejecting request"
            );
            error_response(StatusCode::SERVICE_UNAVAILABLE, REJECTION_MESSAGE)
        }
    }
}
