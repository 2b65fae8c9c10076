//! Bounded priority queue feeding the dispatch loop

use crate::core::types::BatchTicket;
use crate::utils::error::{GatewayError, Result};
use parking_lot::Mutex;
use std::collections::BinaryHeap;

/// Priority queue of batches waiting for dispatch
///
/// Producers are the submission handlers, the single consumer is the
/// scheduler loop. Ordering is carried by [`BatchTicket`]'s `Ord`: priority
/// descending, submission order ascending, batch index ascending. The queue
/// is bounded; a full queue rejects the whole submission rather than
/// accepting part of it.
pub struct DispatchQueue {
    /// Pending tickets, max-heap on dispatch order
    heap: Mutex<BinaryHeap<BatchTicket>>,
    /// Maximum number of pending tickets
    capacity: usize,
}

impl DispatchQueue {
    /// Create a queue with the given capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            heap: Mutex::new(BinaryHeap::new()),
            capacity,
        }
    }

    /// Enqueue all tickets of one request, or none of them
    ///
    /// A submission whose batches do not fit is rejected in full; a stored
    /// request never has only part of its batches scheduled.
    pub fn push_all(&self, tickets: Vec<BatchTicket>) -> Result<()> {
        let mut heap = self.heap.lock();
        if heap.len() + tickets.len() > self.capacity {
            return Err(GatewayError::QueueFull(format!(
                "{} pending batches, capacity {}",
                heap.len(),
                self.capacity
            )));
        }
        for ticket in tickets {
            heap.push(ticket);
        }
        Ok(())
    }

    /// Remove and return the highest-priority pending ticket
    pub fn pop_highest(&self) -> Option<BatchTicket> {
        self.heap.lock().pop()
    }

    /// Number of pending tickets
    pub fn len(&self) -> usize {
        self.heap.lock().len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.heap.lock().is_empty()
    }
}
