//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via the tracing crate; per-request spans come
//!   from tower-http's TraceLayer on the serving router
//! - No metrics surface; logs are the only sink

pub mod logging;
