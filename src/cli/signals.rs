//! Ctrl-C handling for in-flight builds

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shutdown signal raised on Ctrl-C.
///
/// Build subprocesses are spawned with kill-on-drop, so selecting against
/// `wait` and dropping the build future is enough to tear the child down.
pub struct ShutdownSignal {
    shutdown: Arc<AtomicBool>,
}

impl ShutdownSignal {
    /// Create a new shutdown signal handler
    pub fn new() -> Self {
        Self {
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get a clone of the shutdown flag
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// Check if shutdown was requested
    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Resolve when Ctrl-C is received
    pub async fn wait(&self) {
        if tokio::signal::ctrl_c().await.is_ok() {
            self.shutdown.store(true, Ordering::SeqCst);
        }
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}
