//! Shared data types for the ingestion core

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Largest identifier accepted by the API (inclusive)
pub const MAX_ID: u64 = 1_000_000_007;

/// Priority of an ingestion request
///
/// Total order: `High > Medium > Low`. Derived `Ord` relies on declaration
/// order, so `Low` must stay first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    /// Background work, dispatched last
    Low,
    /// Default traffic
    Medium,
    /// Dispatched before everything else
    High,
}

/// Processing status of a single batch
///
/// Transitions are monotonic: `Pending -> InProgress -> Completed`. Once a
/// batch is `Completed` it never changes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    /// Waiting in the dispatch queue
    Pending,
    /// Currently being executed
    InProgress,
    /// Execution finished (terminal)
    Completed,
}

impl BatchStatus {
    /// Whether a transition from `self` to `next` moves forward
    pub fn can_transition_to(self, next: BatchStatus) -> bool {
        matches!(
            (self, next),
            (BatchStatus::Pending, BatchStatus::InProgress)
                | (BatchStatus::InProgress, BatchStatus::Completed)
        )
    }
}

/// Aggregate status of an ingestion request, derived from its batches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// All batches pending
    Pending,
    /// At least one batch started, not all completed
    InProgress,
    /// All batches completed
    Completed,
}

/// A single batch of identifiers, processed as one dispatch unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    /// Unique batch ID, assigned at creation
    pub batch_id: Uuid,
    /// Identifiers in submission order
    pub ids: Vec<u64>,
    /// Current processing status
    pub status: BatchStatus,
}

impl Batch {
    /// Create a new pending batch
    pub fn new(ids: Vec<u64>) -> Self {
        Self {
            batch_id: Uuid::new_v4(),
            ids,
            status: BatchStatus::Pending,
        }
    }
}

/// A client submission comprising one or more batches
#[derive(Debug, Clone)]
pub struct IngestionRequest {
    /// Unique request ID, returned to the client
    pub ingestion_id: Uuid,
    /// Priority as submitted, shared by all batches
    pub priority: Priority,
    /// Wall-clock submission timestamp
    pub created_at: DateTime<Utc>,
    /// Logical submission stamp, strictly increasing across requests.
    /// All batches of one request share it for tie-breaking.
    pub submit_seq: u64,
    /// Batches in partition order (first `B` ids form batch 0, and so on)
    pub batches: Vec<Batch>,
}

impl IngestionRequest {
    /// Derive the aggregate status from the batch statuses
    pub fn overall_status(&self) -> RequestStatus {
        let total = self.batches.len();
        let completed = self
            .batches
            .iter()
            .filter(|b| b.status == BatchStatus::Completed)
            .count();
        let pending = self
            .batches
            .iter()
            .filter(|b| b.status == BatchStatus::Pending)
            .count();

        if completed == total {
            RequestStatus::Completed
        } else if pending == total {
            RequestStatus::Pending
        } else {
            RequestStatus::InProgress
        }
    }

    /// Point-in-time view of this request for status polling
    pub fn snapshot(&self) -> IngestionSnapshot {
        IngestionSnapshot {
            ingestion_id: self.ingestion_id,
            status: self.overall_status(),
            created_at: self.created_at,
            priority: self.priority,
            batches: self.batches.clone(),
        }
    }
}

/// Immutable view of an ingestion request returned to status readers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestionSnapshot {
    /// Request ID
    pub ingestion_id: Uuid,
    /// Aggregate status derived from the batches
    pub status: RequestStatus,
    /// Wall-clock submission timestamp
    pub created_at: DateTime<Utc>,
    /// Priority as submitted
    pub priority: Priority,
    /// Batches in partition order
    pub batches: Vec<Batch>,
}

/// Handle to one pending batch, held by the dispatch queue
///
/// The queue never owns batch data; executing a ticket resolves the actual
/// batch through the request store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchTicket {
    /// Owning request
    pub ingestion_id: Uuid,
    /// Index of the batch within the owning request
    pub batch_index: usize,
    /// Priority inherited from the owning request
    pub priority: Priority,
    /// Logical submission stamp of the owning request
    pub submit_seq: u64,
}

impl Ord for BatchTicket {
    /// Dispatch order: priority descending, then submission order ascending,
    /// then batch index ascending. `BinaryHeap` is a max-heap, so "greater"
    /// means "dispatched first".
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| other.submit_seq.cmp(&self.submit_seq))
            .then_with(|| other.batch_index.cmp(&self.batch_index))
    }
}

impl PartialOrd for BatchTicket {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
