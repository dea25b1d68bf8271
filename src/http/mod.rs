//! HTTP surface of the service.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (router, timeout + trace layers)
//!     → admission gate (token or 503)
//!     → handlers.rs (CRUD translation)
//!     → storage (SQL)
//!     → response.rs / listing.rs (JSON envelopes)
//! ```

pub mod handlers;
pub mod listing;
pub mod response;
pub mod server;

pub use server::{build_router, AppState};
