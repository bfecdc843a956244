//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber for binaries using the toolkit
//!
//! # Design Decisions
//! - RUST_LOG wins; the configured level is only a fallback
//! - Safe to call once per process; binaries call it before serving

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// `default_filter` is used when `RUST_LOG` is not set, e.g. `"info"` or
/// `"apikit=debug,tower_http=debug"`.
pub fn init(default_filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
