//! Client configuration types for chatdock.
//!
//! `ClientConfig` is the top-level `config.toml` that points the console at a
//! backend and tunes polling.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default backend origin (the REST API lives under `/rest/v1`).
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Delay between two status fetches of the same bot.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 3000;

/// Configuration for the chatdock console.
///
/// Loaded from `~/.chatdock/config.toml`. All fields have defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend origin without the `/rest/v1` suffix.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Fixed delay between status fetches, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Per-request HTTP timeout, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl ClientConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Base URL of the REST API, e.g. `http://localhost:8000/rest/v1`.
    pub fn api_base_url(&self) -> String {
        format!("{}/rest/v1", self.backend_url.trim_end_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            poll_interval_ms: default_poll_interval_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}
