//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (controller.rs):
//!     Open database → Build router + admission gate → Bind listener → Serve
//!
//! Shutdown (controller.rs + shutdown.rs):
//!     Trigger observed → Stop accepting → Drain until deadline →
//!     Close database → Exit
//!
//! Signals (signals.rs):
//!     Interrupt → trigger graceful shutdown
//!     TERM/QUIT are not intercepted; they terminate without draining
//! ```
//!
//! # Design Decisions
//! - Ordered startup: resources first, listener last
//! - Ordered shutdown: stop accept, drain, close
//! - Drain has a deadline: remaining connections are terminated after it

pub mod controller;
pub mod shutdown;
pub mod signals;

pub use controller::{App, AppError};
pub use shutdown::Shutdown;
