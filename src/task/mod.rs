//! Background task spawning and tracking.
//!
//! # Responsibilities
//! - Run fire-and-forget work off the request path
//! - Contain and log panics so a failed task cannot take the process down
//! - Let shutdown wait for outstanding work to drain
//!
//! # Design Decisions
//! - Panics are caught per task and logged, never propagated
//! - `wait` consumes the set: tracking ends when shutdown begins

use std::future::Future;

use futures_util::FutureExt;
use tokio::task::JoinHandle;
use tracing::error;

/// Tracks background tasks so shutdown can drain them.
#[derive(Debug, Default)]
pub struct BackgroundTasks {
    handles: Vec<JoinHandle<()>>,
}

impl BackgroundTasks {
    /// Create an empty task set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `future` on the runtime, tracking it for shutdown.
    ///
    /// A panic inside the future is caught and logged.
    pub fn spawn<F>(&mut self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.handles.push(tokio::spawn(async move {
            if let Err(panic) = std::panic::AssertUnwindSafe(future).catch_unwind().await {
                let message = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                error!(%message, "background task panicked");
            }
        }));
    }

    /// Number of tasks spawned so far.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// True iff no task has been spawned.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Wait for every tracked task to finish.
    pub async fn wait(self) {
        for handle in self.handles {
            let _ = handle.await;
        }
    }
}
