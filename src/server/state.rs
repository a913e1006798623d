//! Startup state shared between the startup sequence and probe handlers

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// One-shot "startup complete" flag
///
/// Starts out incomplete and flips to complete exactly once. Clones share
/// the same flag, so the startup task and the handlers see one value.
#[derive(Debug, Clone)]
pub struct StartupState {
    complete: Arc<AtomicBool>,
}

impl StartupState {
    /// Create a new startup state (initially incomplete)
    pub fn new() -> Self {
        Self {
            complete: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Mark startup as complete
    ///
    /// Returns true if this call performed the transition.
    pub fn mark_complete(&self) -> bool {
        !self.complete.swap(true, Ordering::SeqCst)
    }

    /// Check if startup has completed
    pub fn is_complete(&self) -> bool {
        self.complete.load(Ordering::SeqCst)
    }
}

impl Default for StartupState {
    fn default() -> Self {
        Self::new()
    }
}

/// Simulated startup sequence: wait out `delay`, then mark the state complete
pub async fn run_startup(delay: Duration, state: StartupState) {
    if !delay.is_zero() {
        info!(delay_secs = delay.as_secs_f64(), "Simulating startup delay");
        tokio::time::sleep(delay).await;
    }

    if state.mark_complete() {
        info!("Startup complete");
    }
}
