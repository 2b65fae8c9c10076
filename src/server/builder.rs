//! Server builder and run_server function

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{GatewayError, Result};
use std::path::Path;
use tracing::{info, warn};

/// Server builder for easier configuration
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| GatewayError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config)
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the server, loading configuration from the given path
///
/// Falls back to the default configuration when the file is missing so the
/// gateway can be started without any setup.
pub async fn run_server<P: AsRef<Path>>(config_path: P) -> Result<()> {
    info!("Starting ingestion gateway");

    let config_path = config_path.as_ref();
    let config = match Config::from_file(config_path).await {
        Ok(config) => {
            info!("Configuration loaded from {:?}", config_path);
            config
        }
        Err(e) => {
            warn!(
                "Configuration file {:?} not usable ({}), using defaults",
                config_path, e
            );
            Config::default()
        }
    };

    let server = HttpServer::new(&config)?;
    info!(
        "Server starting at: http://{}",
        config.server().bind_addr()
    );
    info!("API Endpoints:");
    info!("   POST /ingest - Submit identifiers for ingestion");
    info!("   GET  /status/{{ingestion_id}} - Poll ingestion status");
    info!("   GET  /health - Health check");
    info!("   GET  /version - Build information");

    server.start().await
}
