//! Client configuration loader for chatdock.
//!
//! Reads `config.toml` from the data directory (`~/.chatdock/` by default)
//! and deserializes it into [`ClientConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::Path;

use chatdock_types::config::ClientConfig;

/// Shortest accepted delay between status fetches.
const MIN_POLL_INTERVAL_MS: u64 = 250;

/// Shortest accepted HTTP timeout. Zero would fail every request at once.
const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Load client configuration from `{data_dir}/config.toml`.
///
/// - Missing file: [`ClientConfig::default()`].
/// - Unreadable or unparsable file: logs a warning and returns the default.
/// - Otherwise the parsed config, with the poll interval and request timeout
///   clamped to their floors.
pub async fn load_client_config(data_dir: &Path) -> ClientConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ClientConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ClientConfig::default();
        }
    };

    match toml::from_str::<ClientConfig>(&content) {
        Ok(mut config) => {
            config.poll_interval_ms = config.poll_interval_ms.max(MIN_POLL_INTERVAL_MS);
            config.request_timeout_secs = config.request_timeout_secs.max(MIN_REQUEST_TIMEOUT_SECS);
            config
        }
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ClientConfig::default()
        }
    }
}

/// Apply a backend URL given on the command line or via `CHATDOCK_BACKEND_URL`.
///
/// Blank and unparsable values are ignored with a warning.
pub fn with_backend_override(mut config: ClientConfig, backend: Option<&str>) -> ClientConfig {
    let Some(backend) = backend.map(str::trim).filter(|b| !b.is_empty()) else {
        return config;
    };

    match reqwest::Url::parse(backend) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            config.backend_url = backend.trim_end_matches('/').to_string();
        }
        _ => {
            tracing::warn!("Ignoring invalid backend URL '{backend}', using {}", config.backend_url);
        }
    }
    config
}
