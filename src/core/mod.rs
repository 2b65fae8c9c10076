//! Ingestion core: types, queue, store, executor, and scheduler
//!
//! The submission path (`RequestStore::create`) and the dispatch loop
//! (`Scheduler`) are the only two actors; they share the store and the
//! queue, both of which are safe for concurrent use.

pub mod executor;
pub mod queue;
pub mod scheduler;
pub mod store;
pub mod types;

pub use executor::{BatchExecutor, ExternalWorker, SimulatedWorker};
pub use queue::DispatchQueue;
pub use scheduler::{Scheduler, SchedulerHandle};
pub use store::RequestStore;
pub use types::{
    Batch, BatchStatus, BatchTicket, IngestionRequest, IngestionSnapshot, Priority, RequestStatus,
    MAX_ID,
};
