pub mod config;
pub mod server;

// Re-export for main.rs
pub use crate::config::{ConfigError, ProbeConfig, StartupMode};
pub use crate::server::{run, ServerError, StartupState};
