//! Ingestion pipeline configuration

use crate::utils::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ingestion pipeline configuration
///
/// All values are fixed at process start; the scheduler and store are
/// constructed from this struct and never reconfigured at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestionConfig {
    /// Maximum number of identifiers per batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Interval between batch dispatches in milliseconds
    #[serde(default = "default_dispatch_interval_ms")]
    pub dispatch_interval_ms: u64,
    /// Simulated downstream work duration per identifier in milliseconds
    #[serde(default = "default_work_delay_ms")]
    pub work_delay_ms: u64,
    /// Maximum number of batches waiting for dispatch
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            dispatch_interval_ms: default_dispatch_interval_ms(),
            work_delay_ms: default_work_delay_ms(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

impl IngestionConfig {
    /// Validate the ingestion configuration
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(GatewayError::Config(
                "ingestion.batch_size must be greater than zero".to_string(),
            ));
        }
        if self.dispatch_interval_ms == 0 {
            return Err(GatewayError::Config(
                "ingestion.dispatch_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.queue_capacity == 0 {
            return Err(GatewayError::Config(
                "ingestion.queue_capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Interval between batch dispatches
    pub fn dispatch_interval(&self) -> Duration {
        Duration::from_millis(self.dispatch_interval_ms)
    }

    /// Simulated downstream work duration per identifier
    pub fn work_delay(&self) -> Duration {
        Duration::from_millis(self.work_delay_ms)
    }
}

fn default_batch_size() -> usize {
    3
}

fn default_dispatch_interval_ms() -> u64 {
    5000
}

fn default_work_delay_ms() -> u64 {
    1000
}

fn default_queue_capacity() -> usize {
    1024
}
