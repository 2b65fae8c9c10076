//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::queue::DispatchQueue;
use crate::core::store::RequestStore;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc for efficient sharing across worker
/// threads; the same store and queue instances are shared with the
/// background dispatch loop.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Request store, source of truth for status reads
    pub store: Arc<RequestStore>,
    /// Dispatch queue fed by submissions
    pub queue: Arc<DispatchQueue>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, store: Arc<RequestStore>, queue: Arc<DispatchQueue>) -> Self {
        Self {
            config: Arc::new(config),
            store,
            queue,
        }
    }

    /// Get gateway configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
