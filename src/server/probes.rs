//! Probe endpoints for Kubernetes
//!
//! - `/healthz` - Liveness: Is the process alive?
//! - `/ready` - Readiness: Has startup completed so traffic can be routed here?
//! - `/startup` - Startup: Has the startup sequence finished?
//! - `/` - Greeting

use crate::config::{ProbeConfig, StartupMode};
use crate::server::state::{run_startup, StartupState};
use axum::{extract::State, http::StatusCode, routing::get, Router};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Liveness probe handler
///
/// Always returns 200 OK - if this responds, the process is alive.
async fn healthz() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

/// Readiness probe handler
///
/// Returns 200 OK if startup has completed, 503 Service Unavailable if not.
async fn ready(State(state): State<StartupState>) -> (StatusCode, &'static str) {
    if state.is_complete() {
        (StatusCode::OK, "Ready")
    } else {
        debug!("Readiness probe: not ready");
        (StatusCode::SERVICE_UNAVAILABLE, "Not Ready")
    }
}

/// Startup probe handler
async fn startup(State(state): State<StartupState>) -> (StatusCode, &'static str) {
    if state.is_complete() {
        (StatusCode::OK, "Startup Complete")
    } else {
        debug!("Startup probe: still starting");
        (StatusCode::SERVICE_UNAVAILABLE, "Still Starting")
    }
}

async fn home() -> (StatusCode, &'static str) {
    (StatusCode::OK, "Hello, Kubernetes!")
}

/// Build the probe router over the shared startup state
///
/// Unknown paths fall through to axum's default 404.
pub fn router(state: StartupState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/healthz", get(healthz))
        .route("/ready", get(ready))
        .route("/startup", get(startup))
        .with_state(state)
}

/// Bind the probe listener
///
/// `host` may be an IP literal or a resolvable hostname.
pub async fn bind(host: &str, port: u16) -> Result<TcpListener, ServerError> {
    let listener = TcpListener::bind((host, port))
        .await
        .map_err(|source| ServerError::Bind {
            addr: format!("{}:{}", host, port),
            source,
        })?;

    // Log after successful bind - server is actually listening
    match listener.local_addr() {
        Ok(addr) => info!(addr = %addr, "Probe server listening"),
        Err(_) => info!(host = %host, port = %port, "Probe server listening"),
    }

    Ok(listener)
}

/// Serve probe requests on `listener` until `shutdown` resolves
pub async fn serve<F>(
    listener: TcpListener,
    state: StartupState,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Probe server stopped");
    Ok(())
}

/// Run the full startup sequence and serve until `shutdown` resolves
///
/// Binds `config.host:config.port`; see [`run_with`] for the ordering of
/// the startup delay and the listener.
pub async fn run<F>(
    config: &ProbeConfig,
    state: StartupState,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let host = config.host.clone();
    let port = config.port;
    run_with(
        config.startup_mode,
        config.startup_delay,
        state,
        move || async move { bind(&host, port).await },
        shutdown,
    )
    .await
}

/// Run the startup sequence with a caller-supplied listener factory
///
/// In [`StartupMode::Blocking`] the delay elapses before `bind_listener`
/// is called, so no request ever observes an incomplete state. A shutdown
/// arriving during the delay ends the run without binding. In
/// [`StartupMode::Background`] the listener is bound first and the probes
/// report 503 until the delay elapses.
pub async fn run_with<B, BF, F>(
    mode: StartupMode,
    delay: Duration,
    state: StartupState,
    bind_listener: B,
    shutdown: F,
) -> Result<(), ServerError>
where
    B: FnOnce() -> BF,
    BF: Future<Output = Result<TcpListener, ServerError>>,
    F: Future<Output = ()> + Send + 'static,
{
    let mut shutdown = Box::pin(shutdown);

    match mode {
        StartupMode::Blocking => {
            tokio::select! {
                _ = run_startup(delay, state.clone()) => {}
                _ = &mut shutdown => {
                    info!("Shutdown requested during startup, exiting before bind");
                    return Ok(());
                }
            }
            let listener = bind_listener().await?;
            serve(listener, state, shutdown).await
        }
        StartupMode::Background => {
            let listener = bind_listener().await?;
            let startup_task = tokio::spawn(run_startup(delay, state.clone()));
            let result = serve(listener, state, shutdown).await;
            startup_task.abort();
            result
        }
    }
}
