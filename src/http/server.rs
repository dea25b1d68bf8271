//! Router construction and middleware layering.
//!
//! # Responsibilities
//! - Create the Axum Router with all product routes
//! - Wire up middleware (tracing, request timeout, admission gate)
//! - Share the database handle with handlers via state

use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::admission::{admission_middleware, AdmissionGate};
use crate::config::TimeoutConfig;
use crate::http::handlers;
use crate::storage::Database;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

/// Build the router with the admission gate installed in front of every
/// route. Requests the gate rejects never reach a handler.
pub fn build_router(state: AppState, gate: Arc<AdmissionGate>, timeouts: &TimeoutConfig) -> Router {
    Router::new()
        .route("/products", get(handlers::list_products))
        .route("/product", post(handlers::create_product))
        .route(
            "/product/{id}",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .with_state(state)
        .layer(middleware::from_fn_with_state(gate, admission_middleware))
        .layer(TimeoutLayer::new(Duration::from_secs(timeouts.request_secs)))
        .layer(TraceLayer::new_for_http())
}
