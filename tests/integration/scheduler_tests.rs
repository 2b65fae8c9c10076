//! End-to-end scheduling behavior tests
//!
//! Run the real dispatch loop with millisecond-scale intervals and observe
//! status transitions through the store, the same read path the HTTP layer
//! uses. Sleeps are placed mid-interval so a slow machine does not move an
//! observation across a tick boundary.

#[cfg(test)]
mod tests {
    use crate::common::{build_pipeline, test_config};
    use ingest_gateway::core::types::{BatchStatus, Priority, RequestStatus};
    use std::time::Duration;

    #[tokio::test]
    async fn test_high_priority_overtakes_earlier_low() {
        let pipeline = build_pipeline(test_config(200));

        // LOW is submitted first, HIGH second, both before the first tick
        let low = pipeline
            .store
            .create(vec![1, 2, 3], Priority::Low)
            .unwrap();
        let high = pipeline
            .store
            .create(vec![4, 5, 6], Priority::High)
            .unwrap();

        let handle = pipeline.scheduler.spawn();

        // Mid first interval: only the HIGH batch may have been dispatched
        tokio::time::sleep(Duration::from_millis(100)).await;
        let high_status = pipeline.store.get(high).unwrap();
        let low_status = pipeline.store.get(low).unwrap();
        assert_ne!(high_status.batches[0].status, BatchStatus::Pending);
        assert_eq!(low_status.batches[0].status, BatchStatus::Pending);

        // After the second tick the LOW batch follows
        tokio::time::sleep(Duration::from_millis(200)).await;
        let low_status = pipeline.store.get(low).unwrap();
        assert_ne!(low_status.batches[0].status, BatchStatus::Pending);

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_second_batch_waits_a_full_interval() {
        let pipeline = build_pipeline(test_config(200));

        // Six ids at batch size 3: exactly two batches
        let id = pipeline
            .store
            .create(vec![1, 2, 3, 4, 5, 6], Priority::Medium)
            .unwrap();

        let handle = pipeline.scheduler.spawn();

        // Mid first interval: batch 0 dispatched, batch 1 still pending
        tokio::time::sleep(Duration::from_millis(100)).await;
        let snapshot = pipeline.store.get(id).unwrap();
        assert_ne!(snapshot.batches[0].status, BatchStatus::Pending);
        assert_eq!(snapshot.batches[1].status, BatchStatus::Pending);
        assert_eq!(snapshot.status, RequestStatus::InProgress);

        // Mid second interval: batch 1 has started too
        tokio::time::sleep(Duration::from_millis(200)).await;
        let snapshot = pipeline.store.get(id).unwrap();
        assert_ne!(snapshot.batches[1].status, BatchStatus::Pending);

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_at_most_one_dispatch_per_interval() {
        let mut config = test_config(200);
        config.gateway.ingestion.batch_size = 1;
        let pipeline = build_pipeline(config);

        // Five single-id batches, far more than the observed window allows
        let id = pipeline
            .store
            .create(vec![1, 2, 3, 4, 5], Priority::Medium)
            .unwrap();

        let handle = pipeline.scheduler.spawn();

        // Window covers the ticks at 0ms, 200ms, and 400ms only
        tokio::time::sleep(Duration::from_millis(500)).await;
        let started = pipeline
            .store
            .get(id)
            .unwrap()
            .batches
            .iter()
            .filter(|b| b.status != BatchStatus::Pending)
            .count();

        handle.shutdown().await;

        assert!(started >= 1, "no batch dispatched at all");
        assert!(
            started <= 3,
            "rate limit violated: {} batches started in 3 intervals",
            started
        );
    }

    #[tokio::test]
    async fn test_fifo_order_for_equal_priority_requests() {
        let pipeline = build_pipeline(test_config(200));

        let first = pipeline.store.create(vec![1], Priority::Low).unwrap();
        let second = pipeline.store.create(vec![2], Priority::Low).unwrap();

        let handle = pipeline.scheduler.spawn();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(
            pipeline.store.get(first).unwrap().status,
            RequestStatus::Completed
        );
        assert_eq!(
            pipeline.store.get(second).unwrap().status,
            RequestStatus::Pending
        );

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_request_reaches_completed_and_stays_there() {
        let pipeline = build_pipeline(test_config(100));

        let id = pipeline
            .store
            .create(vec![1, 2, 3, 4, 5], Priority::High)
            .unwrap();

        let handle = pipeline.scheduler.spawn();

        // Two batches, ticks at 0ms and 100ms: done well before 350ms
        tokio::time::sleep(Duration::from_millis(350)).await;
        let snapshot = pipeline.store.get(id).unwrap();
        assert_eq!(snapshot.status, RequestStatus::Completed);
        assert!(
            snapshot
                .batches
                .iter()
                .all(|b| b.status == BatchStatus::Completed)
        );

        // Completed is terminal
        tokio::time::sleep(Duration::from_millis(150)).await;
        let snapshot = pipeline.store.get(id).unwrap();
        assert_eq!(snapshot.status, RequestStatus::Completed);

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_shutdown_with_pending_backlog_is_clean() {
        let mut config = test_config(100);
        config.gateway.ingestion.batch_size = 1;
        let pipeline = build_pipeline(config);

        let id = pipeline
            .store
            .create(vec![1, 2, 3, 4, 5, 6, 7, 8], Priority::Medium)
            .unwrap();

        let handle = pipeline.scheduler.spawn();
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.shutdown().await;

        // Whatever was dispatched finished; nothing is stuck mid-flight
        let snapshot = pipeline.store.get(id).unwrap();
        assert!(
            snapshot
                .batches
                .iter()
                .all(|b| b.status != BatchStatus::InProgress)
        );
    }
}
