//! Fraudflow - live transaction risk monitor
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin fraudflow               # terminal dashboard
//! cargo run --release --bin fraudflow -- --headless # JSONL snapshots on stdout
//! ```
//!
//! ## Environment Variables
//!
//! - TICK_INTERVAL_MS - Period between generated transactions (default: 2500)
//! - SEED_BATCH_SIZE - Transactions generated at startup (default: 8)
//! - WINDOW_CAPACITY - Transactions kept in the live window (default: 50)
//! - ALERT_CAPACITY - Alerts kept in the alert feed (default: 10)
//! - COMMAND_BUFFER - Pending pause/resume commands (default: 32)
//! - RNG_SEED - Fixed seed for a reproducible feed (optional)
//! - RUST_LOG - Logging level (optional, default: info)

use fraudflow::engine_core::{EventGenerator, MonitorEngine};
use fraudflow::stream::{spawn_stream, JsonlSnapshotSink, SnapshotSink, StreamConfig, StreamHandle};
use fraudflow::ui;
use std::env;

#[derive(Debug, Clone, Copy, PartialEq)]
enum OutputMode {
    Terminal,
    Headless,
}

fn parse_mode_from_args() -> OutputMode {
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|a| a == "--headless") {
        OutputMode::Headless
    } else {
        OutputMode::Terminal
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Logs go to stderr so they never mix with the dashboard or the JSONL feed
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let mode = parse_mode_from_args();
    let config = StreamConfig::from_env()?;

    log::info!("🚀 Starting Fraudflow");
    log::info!("📊 Configuration:");
    log::info!("   Mode: {:?}", mode);
    log::info!("   Tick interval: {}ms", config.tick_interval_ms);
    log::info!("   Seed batch: {}", config.seed_batch_size);
    log::info!("   Window capacity: {}", config.window_capacity);
    log::info!("   Alert capacity: {}", config.alert_capacity);
    match config.rng_seed {
        Some(seed) => log::info!("   RNG seed: {}", seed),
        None => log::info!("   RNG seed: entropy"),
    }

    let engine = MonitorEngine::new(
        EventGenerator::new(config.rng_seed),
        config.window_capacity,
        config.alert_capacity,
    );
    let (handle, controller_task) = spawn_stream(engine, &config);

    match mode {
        OutputMode::Terminal => {
            if let Err(e) = ui::run_ui(handle.clone()).await {
                log::error!("UI error: {}", e);
            }
            log::info!("UI exited");
        }
        OutputMode::Headless => {
            let sink = JsonlSnapshotSink::new(std::io::stdout());
            run_headless(&handle, sink).await?;
        }
    }

    if handle.shutdown().await.is_err() {
        log::debug!("Stream controller already stopped");
    }
    if let Err(e) = controller_task.await {
        log::error!("❌ Stream controller task failed: {}", e);
    }

    log::info!("✅ Fraudflow stopped");
    Ok(())
}

/// Write every published snapshot to the sink until Ctrl-C
async fn run_headless<S: SnapshotSink>(
    handle: &StreamHandle,
    mut sink: S,
) -> Result<(), Box<dyn std::error::Error>> {
    log::info!("📝 Writing snapshots to {} sink (Ctrl-C to stop)", sink.sink_type());
    let mut snapshots = handle.subscribe();

    let first = snapshots.borrow_and_update().clone();
    sink.write_snapshot(&first).await?;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                log::info!("Received Ctrl-C");
                break;
            }
            changed = snapshots.changed() => {
                if changed.is_err() {
                    log::info!("Snapshot channel closed");
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                sink.write_snapshot(&snapshot).await?;
            }
        }
    }

    sink.flush().await?;
    Ok(())
}
