//! Product catalog HTTP service.
//!
//! A small CRUD API over SQLite with two control mechanisms wrapped around
//! the handlers: an admission gate that bounds how many requests may be
//! inside the pipeline at once, and a lifecycle controller that sequences
//! startup, signal-triggered drain, and resource teardown.

pub mod admission;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod storage;

pub use config::AppConfig;
pub use lifecycle::{App, Shutdown};
