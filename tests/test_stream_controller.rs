//! Integration tests for the stream controller task
//!
//! Runs the controller on a paused tokio clock so tick timing can be
//! checked exactly:
//! - Seed batch is published before the first tick
//! - Ticks are spaced by the configured period
//! - Pause cancels the timer, resume waits a full period
//! - Shutdown and handle drop both stop the task

#[cfg(test)]
mod stream_controller_tests {
    use fraudflow::engine_core::{EventGenerator, MonitorEngine};
    use fraudflow::stream::{spawn_stream, Snapshot, StreamConfig, StreamError, StreamHandle, StreamStatus};
    use tokio::sync::watch;
    use tokio::task::JoinHandle;
    use tokio::time::{sleep, Duration, Instant};

    const PERIOD: Duration = Duration::from_millis(2500);

    fn test_config() -> StreamConfig {
        StreamConfig {
            window_capacity: 10,
            rng_seed: Some(99),
            ..StreamConfig::default()
        }
    }

    fn spawn_test_stream(config: &StreamConfig) -> (StreamHandle, JoinHandle<()>) {
        let engine = MonitorEngine::new(
            EventGenerator::new(config.rng_seed),
            config.window_capacity,
            config.alert_capacity,
        );
        spawn_stream(engine, config)
    }

    async fn next_snapshot(rx: &mut watch::Receiver<Snapshot>) -> Snapshot {
        rx.changed().await.expect("controller dropped the snapshot channel");
        rx.borrow_and_update().clone()
    }

    #[tokio::test(start_paused = true)]
    async fn test_seed_batch_published_on_start() {
        let config = test_config();
        let (handle, task) = spawn_test_stream(&config);

        let snapshot = handle.latest();
        assert_eq!(snapshot.status, StreamStatus::Running);
        assert_eq!(snapshot.transactions.len(), 8);
        assert_eq!(snapshot.stats.total_transactions, 8);
        assert_eq!(snapshot.ticks, 0);

        let fraud = snapshot.transactions.iter().filter(|t| t.is_fraud).count();
        assert_eq!(snapshot.stats.fraud_detected, fraud);
        assert_eq!(snapshot.alerts.len(), fraud.min(config.alert_capacity));

        handle.shutdown().await.unwrap();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_follow_period() {
        let config = test_config();
        let (handle, task) = spawn_test_stream(&config);
        let mut rx = handle.subscribe();
        rx.borrow_and_update();

        let mut last = Instant::now();
        for expected_ticks in 1..=3u64 {
            let snapshot = next_snapshot(&mut rx).await;
            let now = Instant::now();
            assert!(now - last >= PERIOD, "tick fired early: {:?}", now - last);
            assert_eq!(snapshot.ticks, expected_ticks);
            assert_eq!(
                snapshot.transactions.len(),
                (8 + expected_ticks as usize).min(config.window_capacity)
            );
            last = now;
        }

        handle.shutdown().await.unwrap();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_window_stays_bounded() {
        let config = test_config();
        let (handle, task) = spawn_test_stream(&config);
        let mut rx = handle.subscribe();

        let mut snapshot = rx.borrow_and_update().clone();
        while snapshot.ticks < 6 {
            snapshot = next_snapshot(&mut rx).await;
            assert!(snapshot.transactions.len() <= config.window_capacity);
        }

        assert_eq!(snapshot.transactions.len(), config.window_capacity);
        // Totals describe the window, not the session
        assert_eq!(snapshot.stats.total_transactions, config.window_capacity);

        handle.shutdown().await.unwrap();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_stops_ticks() {
        let config = test_config();
        let (handle, task) = spawn_test_stream(&config);
        let mut rx = handle.subscribe();
        rx.borrow_and_update();

        handle.pause().await.unwrap();
        let paused = next_snapshot(&mut rx).await;
        assert_eq!(paused.status, StreamStatus::Paused);
        assert_eq!(paused.ticks, 0);

        sleep(PERIOD * 4).await;
        assert!(!rx.has_changed().unwrap());
        assert_eq!(handle.latest().ticks, 0);
        assert_eq!(handle.latest().transactions.len(), 8);

        handle.shutdown().await.unwrap();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_resume_waits_full_period() {
        let config = test_config();
        let (handle, task) = spawn_test_stream(&config);
        let mut rx = handle.subscribe();
        rx.borrow_and_update();

        // Pause partway through the first period
        sleep(PERIOD / 2).await;
        handle.pause().await.unwrap();
        assert_eq!(next_snapshot(&mut rx).await.status, StreamStatus::Paused);

        sleep(PERIOD).await;
        let resumed_at = Instant::now();
        handle.resume().await.unwrap();
        let resumed = next_snapshot(&mut rx).await;
        assert_eq!(resumed.status, StreamStatus::Running);
        assert_eq!(resumed.ticks, 0);

        let ticked = next_snapshot(&mut rx).await;
        assert_eq!(ticked.ticks, 1);
        assert!(Instant::now() - resumed_at >= PERIOD);

        handle.shutdown().await.unwrap();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_round_trip() {
        let config = test_config();
        let (handle, task) = spawn_test_stream(&config);
        let mut rx = handle.subscribe();
        rx.borrow_and_update();

        handle.toggle().await.unwrap();
        assert_eq!(next_snapshot(&mut rx).await.status, StreamStatus::Paused);
        handle.toggle().await.unwrap();
        assert_eq!(next_snapshot(&mut rx).await.status, StreamStatus::Running);

        handle.shutdown().await.unwrap();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_closes_handle() {
        let config = test_config();
        let (handle, task) = spawn_test_stream(&config);

        handle.shutdown().await.unwrap();
        task.await.unwrap();

        let result = handle.pause().await;
        assert!(matches!(result, Err(StreamError::Closed)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handles_stops_task() {
        let config = test_config();
        let (handle, task) = spawn_test_stream(&config);
        let mut rx = handle.subscribe();
        // Mark the seed snapshot as seen so only the close is left to observe
        rx.borrow_and_update();

        drop(handle);
        task.await.unwrap();

        // Channel closes once the controller is gone
        assert!(rx.changed().await.is_err());
    }
}
