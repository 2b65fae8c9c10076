//! # Ingest Gateway
//!
//! A bulk data ingestion gateway: clients submit batches of identifiers with
//! a priority, and the gateway processes them asynchronously under a global
//! rate limit while clients poll for status.
//!
//! ## Features
//!
//! - **Priority scheduling**: `HIGH` batches are always dispatched before
//!   `MEDIUM` and `LOW`, with FIFO order within a priority level
//! - **Rate limiting**: at most one batch begins execution per dispatch
//!   interval, regardless of backlog
//! - **Simple polling API**: submit with `POST /ingest`, poll with
//!   `GET /status/{ingestion_id}`
//! - **In-memory core**: no external storage; state lives for the process
//!   lifetime
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ingest_gateway::{Config, Gateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/gateway.yaml").await?;
//!     let gateway = Gateway::new(config).await?;
//!     gateway.run().await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

// Public module exports
pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{GatewayError, Result};

// Export core functionality
pub use core::{
    Batch, BatchStatus, BatchTicket, IngestionRequest, IngestionSnapshot, Priority, RequestStatus,
};

use tracing::info;

/// A minimal gateway facade wrapping configuration and server
pub struct Gateway {
    config: Config,
    server: server::HttpServer,
}

impl Gateway {
    /// Create a new gateway instance
    ///
    /// Must be called from within a Tokio runtime: construction spawns the
    /// background dispatch loop.
    pub async fn new(config: Config) -> Result<Self> {
        info!("Creating new gateway instance");

        let server = server::HttpServer::new(&config)?;

        Ok(Self { config, server })
    }

    /// Run the gateway server
    pub async fn run(self) -> Result<()> {
        info!("Starting ingestion gateway");
        info!("Configuration: {:#?}", self.config);

        self.server.start().await?;

        Ok(())
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
