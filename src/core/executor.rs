//! Batch execution against the simulated downstream store

use crate::core::store::RequestStore;
use crate::core::types::BatchTicket;
use crate::utils::error::Result;
use async_trait::async_trait;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Downstream system processing a single identifier
///
/// The production implementation simulates an external call with a delay;
/// tests inject instant or failing workers through this seam.
#[async_trait]
pub trait ExternalWorker: Send + Sync {
    /// Process one identifier
    async fn process(&self, id: u64) -> Result<()>;
}

/// Worker standing in for the real downstream service
pub struct SimulatedWorker {
    /// Base processing time per identifier
    delay: Duration,
}

impl SimulatedWorker {
    /// Create a worker with the given per-identifier delay
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl ExternalWorker for SimulatedWorker {
    async fn process(&self, id: u64) -> Result<()> {
        if !self.delay.is_zero() {
            // +/-10% jitter around the configured delay
            let factor = { rand::thread_rng().gen_range(0.9..1.1) };
            tokio::time::sleep(self.delay.mul_f64(factor)).await;
        }
        debug!(id, "Processed identifier");
        Ok(())
    }
}

/// Executes one batch at a time and writes status transitions to the store
pub struct BatchExecutor {
    /// Store receiving status updates
    store: Arc<RequestStore>,
    /// Downstream worker invoked per identifier
    worker: Arc<dyn ExternalWorker>,
}

impl BatchExecutor {
    /// Create an executor writing to `store` through `worker`
    pub fn new(store: Arc<RequestStore>, worker: Arc<dyn ExternalWorker>) -> Self {
        Self { store, worker }
    }

    /// Execute one batch to completion
    ///
    /// Marks the batch in progress, processes its identifiers in order, and
    /// marks it completed. Worker failures are logged and do not stop the
    /// batch: processing is best-effort and a dispatched batch always reaches
    /// its terminal status.
    pub async fn run(&self, ticket: &BatchTicket) -> Result<()> {
        let ids = self
            .store
            .begin_batch(ticket.ingestion_id, ticket.batch_index)?;

        info!(
            ingestion_id = %ticket.ingestion_id,
            batch_index = ticket.batch_index,
            ids = ids.len(),
            "Executing batch"
        );

        for id in ids {
            if let Err(e) = self.worker.process(id).await {
                warn!(
                    ingestion_id = %ticket.ingestion_id,
                    id,
                    error = %e,
                    "Identifier processing failed, continuing"
                );
            }
        }

        self.store
            .complete_batch(ticket.ingestion_id, ticket.batch_index)?;

        info!(
            ingestion_id = %ticket.ingestion_id,
            batch_index = ticket.batch_index,
            "Batch completed"
        );
        Ok(())
    }
}
