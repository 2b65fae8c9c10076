//! Common test utilities for ingest-gateway
//!
//! Provides test configurations with small, fast scheduling constants and
//! factories assembling the ingestion pipeline the way the server does.

use ingest_gateway::config::{Config, IngestionConfig};
use ingest_gateway::core::executor::{BatchExecutor, SimulatedWorker};
use ingest_gateway::core::queue::DispatchQueue;
use ingest_gateway::core::scheduler::Scheduler;
use ingest_gateway::core::store::RequestStore;
use std::sync::Arc;

/// Test configuration with millisecond-scale scheduling constants
///
/// Batch size 3 matches the production default; the interval is shrunk so
/// end-to-end tests observe several dispatch cycles in well under a second.
pub fn test_config(dispatch_interval_ms: u64) -> Config {
    let mut config = Config::default();
    config.gateway.ingestion = IngestionConfig {
        batch_size: 3,
        dispatch_interval_ms,
        work_delay_ms: 0,
        queue_capacity: 64,
    };
    config
}

/// The assembled ingestion pipeline of one gateway instance
pub struct TestPipeline {
    pub config: Config,
    pub queue: Arc<DispatchQueue>,
    pub store: Arc<RequestStore>,
    pub scheduler: Scheduler,
}

/// Assemble a pipeline from a config, exactly as the server does
pub fn build_pipeline(config: Config) -> TestPipeline {
    let ingestion = config.ingestion();
    let queue = Arc::new(DispatchQueue::new(ingestion.queue_capacity));
    let store = Arc::new(RequestStore::new(ingestion, Arc::clone(&queue)));
    let worker = Arc::new(SimulatedWorker::new(ingestion.work_delay()));
    let executor = BatchExecutor::new(Arc::clone(&store), worker);
    let scheduler = Scheduler::new(ingestion, Arc::clone(&queue), executor);

    TestPipeline {
        config,
        queue,
        store,
        scheduler,
    }
}
