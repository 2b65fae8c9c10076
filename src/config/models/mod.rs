//! Configuration model definitions
//!
//! Each configuration concern lives in its own module; this module stitches
//! them together into the top-level [`GatewayConfig`].

pub mod ingestion;
pub mod server;

pub use ingestion::IngestionConfig;
pub use server::ServerConfig;

use serde::{Deserialize, Serialize};

/// Top-level gateway configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Ingestion pipeline configuration
    #[serde(default)]
    pub ingestion: IngestionConfig,
}
