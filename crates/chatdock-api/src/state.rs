//! Application state wiring configuration and the backend client together.
//!
//! AppState pins the core's `WidgetApi` port to the concrete REST client.

use std::path::PathBuf;
use std::sync::Arc;

use chatdock_infra::config::{load_client_config, with_backend_override};
use chatdock_infra::filesystem::resolve_data_dir;
use chatdock_infra::rest::RestClient;
use chatdock_types::config::ClientConfig;

/// Shared application state used by every CLI command.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<RestClient>,
    pub config: ClientConfig,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Load `config.toml`, apply the backend override and build the client.
    pub async fn init(backend: Option<&str>) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        let config = with_backend_override(load_client_config(&data_dir).await, backend);
        tracing::debug!(backend = %config.backend_url, data_dir = %data_dir.display(), "state initialized");

        let api = Arc::new(RestClient::new(&config)?);

        Ok(Self {
            api,
            config,
            data_dir,
        })
    }
}
