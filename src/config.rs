//! Probe server configuration
//!
//! Read from environment variables at startup:
//! - `PROBE_HOST` - listen host (default `0.0.0.0`)
//! - `PROBE_PORT` - listen port (default `8080`)
//! - `PROBE_STARTUP_DELAY_SECS` - simulated startup delay (default `10`)
//! - `PROBE_STARTUP_MODE` - `blocking` or `background` (default `blocking`)

use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Default listen host
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listen port
pub const DEFAULT_PORT: u16 = 8080;

/// Default simulated startup delay
pub const DEFAULT_STARTUP_DELAY: Duration = Duration::from_secs(10);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}='{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Where the simulated startup delay sits relative to the listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartupMode {
    /// Wait out the delay, then bind. Nothing is reachable until startup completes.
    #[default]
    Blocking,
    /// Bind immediately and report not-ready until the delay elapses.
    Background,
}

impl FromStr for StartupMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blocking" => Ok(Self::Blocking),
            "background" => Ok(Self::Background),
            other => Err(format!(
                "unknown startup mode '{}', expected 'blocking' or 'background'",
                other
            )),
        }
    }
}

impl fmt::Display for StartupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blocking => write!(f, "blocking"),
            Self::Background => write!(f, "background"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    pub host: String,
    pub port: u16,
    pub startup_delay: Duration,
    pub startup_mode: StartupMode,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            startup_delay: DEFAULT_STARTUP_DELAY,
            startup_mode: StartupMode::default(),
        }
    }
}

impl ProbeConfig {
    /// Create config from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup
    ///
    /// Missing or empty values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(host) = get("PROBE_HOST") {
            config.host = host.trim().to_string();
        }
        if let Some(port) = get("PROBE_PORT") {
            config.port = parse("PROBE_PORT", &port)?;
        }
        if let Some(secs) = get("PROBE_STARTUP_DELAY_SECS") {
            config.startup_delay =
                Duration::from_secs(parse::<u64>("PROBE_STARTUP_DELAY_SECS", &secs)?);
        }
        if let Some(mode) = get("PROBE_STARTUP_MODE") {
            config.startup_mode = parse("PROBE_STARTUP_MODE", &mode)?;
        }

        Ok(config)
    }
}

fn parse<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
