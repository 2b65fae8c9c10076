//! Timer-driven dispatch loop
//!
//! One batch may begin execution per dispatch interval, which together with
//! the sequential executor forms the gateway's rate limit.

use crate::config::IngestionConfig;
use crate::core::executor::BatchExecutor;
use crate::core::queue::DispatchQueue;
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

/// Dispatches the highest-priority pending batch once per tick
pub struct Scheduler {
    /// Queue consumed by the loop (sole consumer)
    queue: Arc<DispatchQueue>,
    /// Executor running one batch at a time
    executor: BatchExecutor,
    /// Fixed interval between dispatches
    interval: Duration,
}

impl Scheduler {
    /// Create a scheduler over the given queue and executor
    pub fn new(config: &IngestionConfig, queue: Arc<DispatchQueue>, executor: BatchExecutor) -> Self {
        Self {
            queue,
            executor,
            interval: config.dispatch_interval(),
        }
    }

    /// Run one dispatch cycle: pop the highest-priority batch and execute it
    ///
    /// Returns whether a batch was dispatched. Exactly one batch is taken per
    /// call regardless of how many are pending; execution runs to completion
    /// before this returns.
    pub async fn tick(&self) -> Result<bool> {
        match self.queue.pop_highest() {
            Some(ticket) => {
                self.executor.run(&ticket).await?;
                Ok(true)
            }
            None => {
                debug!("Dispatch tick found empty queue");
                Ok(false)
            }
        }
    }

    /// Spawn the dispatch loop as a background task
    ///
    /// The loop runs until the returned handle signals shutdown. A batch in
    /// flight when shutdown is requested finishes before the loop exits, so
    /// no batch is ever abandoned mid-status.
    pub fn spawn(self) -> SchedulerHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            // A slow batch delays subsequent ticks instead of bunching them
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            info!(interval = ?self.interval, "Dispatch loop started");

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(e) = self.tick().await {
                            error!(error = %e, "Batch dispatch failed");
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        info!("Dispatch loop shutting down");
                        break;
                    }
                }
            }
        });

        SchedulerHandle { shutdown_tx, task }
    }
}

/// Handle controlling a spawned dispatch loop
pub struct SchedulerHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Signal shutdown and wait for the loop to exit
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.task.await {
            error!(error = %e, "Dispatch loop task failed to join");
        }
    }
}
