//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via tracing; request spans come from tower-http
//! - Overload rejections log at warn: operational events, not bugs
//! - Shutdown milestones log at info; teardown failures at warn

pub mod logging;
