//! In-memory request store, the single source of truth for status reads

use crate::config::IngestionConfig;
use crate::core::queue::DispatchQueue;
use crate::core::types::{
    Batch, BatchStatus, BatchTicket, IngestionRequest, IngestionSnapshot, Priority,
};
use crate::utils::error::{GatewayError, Result};
use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, error, info};
use uuid::Uuid;

/// Concurrency-safe store of all ingestion requests
///
/// Owns every [`IngestionRequest`] for the lifetime of the process; the
/// dispatch queue only ever holds [`BatchTicket`] handles into it. Status
/// mutations go through [`begin_batch`](RequestStore::begin_batch) and
/// [`complete_batch`](RequestStore::complete_batch), whose writes are
/// serialized per request by the map's entry locking, so readers observe
/// either the pre- or post-mutation state, never a mix.
pub struct RequestStore {
    /// All requests by ingestion ID
    requests: DashMap<Uuid, IngestionRequest>,
    /// Queue fed by `create`
    queue: Arc<DispatchQueue>,
    /// Next logical submission stamp
    submit_seq: AtomicU64,
    /// Maximum identifiers per batch
    batch_size: usize,
}

impl RequestStore {
    /// Create a store feeding the given dispatch queue
    pub fn new(config: &IngestionConfig, queue: Arc<DispatchQueue>) -> Self {
        Self {
            requests: DashMap::new(),
            queue,
            submit_seq: AtomicU64::new(1),
            batch_size: config.batch_size,
        }
    }

    /// Accept a submission: partition, store, and enqueue
    ///
    /// Identifiers are partitioned into consecutive batches of at most the
    /// configured batch size, preserving input order. The request is visible
    /// to `get` and its tickets are queued before this returns; dispatch
    /// itself happens asynchronously. Enqueueing is all-or-nothing: on
    /// `QueueFull` the stored request is rolled back and the error surfaced.
    pub fn create(&self, ids: Vec<u64>, priority: Priority) -> Result<Uuid> {
        let ingestion_id = Uuid::new_v4();
        let submit_seq = self.submit_seq.fetch_add(1, Ordering::SeqCst);

        let batches: Vec<Batch> = ids
            .chunks(self.batch_size)
            .map(|chunk| Batch::new(chunk.to_vec()))
            .collect();

        let tickets: Vec<BatchTicket> = (0..batches.len())
            .map(|batch_index| BatchTicket {
                ingestion_id,
                batch_index,
                priority,
                submit_seq,
            })
            .collect();

        let request = IngestionRequest {
            ingestion_id,
            priority,
            created_at: Utc::now(),
            submit_seq,
            batches,
        };
        let batch_count = request.batches.len();

        // Store first so a popped ticket always resolves; roll back if the
        // queue rejects the submission.
        self.requests.insert(ingestion_id, request);
        if let Err(e) = self.queue.push_all(tickets) {
            self.requests.remove(&ingestion_id);
            return Err(e);
        }

        info!(
            ingestion_id = %ingestion_id,
            ?priority,
            batches = batch_count,
            "Accepted ingestion request"
        );
        Ok(ingestion_id)
    }

    /// Point-in-time snapshot of a request, or `None` if unknown
    pub fn get(&self, ingestion_id: Uuid) -> Option<IngestionSnapshot> {
        self.requests.get(&ingestion_id).map(|r| r.snapshot())
    }

    /// Mark a batch as started and return its identifiers for execution
    pub fn begin_batch(&self, ingestion_id: Uuid, batch_index: usize) -> Result<Vec<u64>> {
        self.transition(ingestion_id, batch_index, BatchStatus::InProgress)
    }

    /// Mark a batch as completed
    pub fn complete_batch(&self, ingestion_id: Uuid, batch_index: usize) -> Result<()> {
        self.transition(ingestion_id, batch_index, BatchStatus::Completed)?;
        Ok(())
    }

    /// Number of stored requests
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Whether the store holds no requests
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    fn transition(
        &self,
        ingestion_id: Uuid,
        batch_index: usize,
        next: BatchStatus,
    ) -> Result<Vec<u64>> {
        let mut request = self.requests.get_mut(&ingestion_id).ok_or_else(|| {
            // A queued ticket must always resolve to a stored request
            error!(%ingestion_id, "Dispatched batch has no matching request");
            debug_assert!(false, "dispatched batch has no matching request");
            GatewayError::Internal(format!(
                "Dispatched batch has no matching request {}",
                ingestion_id
            ))
        })?;

        let batch = request.batches.get_mut(batch_index).ok_or_else(|| {
            error!(%ingestion_id, batch_index, "Batch index out of range");
            debug_assert!(false, "batch index out of range");
            GatewayError::Internal(format!(
                "Batch index {} out of range for request {}",
                batch_index, ingestion_id
            ))
        })?;

        if !batch.status.can_transition_to(next) {
            error!(
                %ingestion_id,
                batch_index,
                from = ?batch.status,
                to = ?next,
                "Rejected status transition"
            );
            return Err(GatewayError::Internal(format!(
                "Invalid status transition {:?} -> {:?}",
                batch.status, next
            )));
        }

        batch.status = next;
        let ids = batch.ids.clone();
        debug!(%ingestion_id, batch_index, status = ?next, "Batch status updated");
        Ok(ids)
    }
}
