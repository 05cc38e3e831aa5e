//! Configuration for the resort map client

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// Environment variable holding the API base URL
pub const ENV_BASE_URL: &str = "RESORT_MAP_API_BASE_URL";
/// Environment variable holding the request timeout in seconds
pub const ENV_TIMEOUT_S: &str = "RESORT_MAP_API_TIMEOUT_S";
/// Environment variable holding the viewport debounce delay in milliseconds
pub const ENV_DEBOUNCE_MS: &str = "RESORT_MAP_DEBOUNCE_MS";

/// Main client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the hotel API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,

    /// Result limit used when a query does not set one
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Viewport debounce configuration
    #[serde(default)]
    pub debounce: DebounceConfig,
}

fn default_base_url() -> String { "http://127.0.0.1:8080".to_string() }
fn default_timeout() -> u64 { 10_000 }
fn default_limit() -> u32 { 100 }

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout(),
            default_limit: default_limit(),
            debounce: DebounceConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by whatever the environment sets
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable lookup
    pub fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_BASE_URL) {
            config.base_url = url;
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_S) {
            let secs: f64 = raw
                .trim()
                .parse()
                .map_err(|_| ClientError::Config(format!("{} is not a number: {}", ENV_TIMEOUT_S, raw)))?;
            if !(secs.is_finite() && secs > 0.0) {
                return Err(ClientError::Config(format!("{} must be positive: {}", ENV_TIMEOUT_S, raw)));
            }
            config.timeout_ms = (secs * 1000.0).round() as u64;
        }

        if let Some(raw) = lookup(ENV_DEBOUNCE_MS) {
            config.debounce.delay_ms = raw
                .trim()
                .parse()
                .map_err(|_| ClientError::Config(format!("{} is not an integer: {}", ENV_DEBOUNCE_MS, raw)))?;
        }

        Ok(config)
    }

    /// Set the base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Viewport debounce configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebounceConfig {
    /// Quiet period before a viewport change is applied
    #[serde(default = "default_delay")]
    pub delay_ms: u64,
}

fn default_delay() -> u64 { 300 }

impl Default for DebounceConfig {
    fn default() -> Self {
        Self { delay_ms: default_delay() }
    }
}

impl DebounceConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}
