//! HTTP server for probe endpoints
//!
//! Provides Kubernetes probes:
//! - `/healthz` - Liveness probe (process is running)
//! - `/ready` - Readiness probe (startup has completed)
//! - `/startup` - Startup probe (startup has completed)

mod probes;
mod state;

pub use probes::{bind, router, run, run_with, serve, ServerError};
pub use state::{run_startup, StartupState};

#[cfg(test)]
#[path = "probes_test.rs"]
mod tests;

#[cfg(test)]
#[path = "state_test.rs"]
mod state_tests;
