//! Stream controller - seeds the engine, drives periodic ticks and handles
//! pause/resume
//!
//! The controller task is the only owner of the engine. Presentation code
//! talks to it through a [`StreamHandle`]: commands go in over an mpsc
//! channel, snapshots come out over a watch channel.
//!
//! ```text
//! Idle ──start()──► Running ◄──resume()/toggle()── Paused
//!                      │                              ▲
//!                      └──────pause()/toggle()────────┘
//! ```

use super::config::StreamConfig;
use super::snapshot::{Snapshot, StreamStatus};
use crate::engine_core::MonitorEngine;
use rand::rngs::StdRng;
use rand::Rng;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, Interval, MissedTickBehavior};

/// Commands accepted by the controller task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamCommand {
    Pause,
    Resume,
    Toggle,
    Shutdown,
}

#[derive(Debug)]
pub enum StreamError {
    /// The controller task has stopped
    Closed,
}

impl std::fmt::Display for StreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamError::Closed => write!(f, "Stream controller is no longer running"),
        }
    }
}

impl std::error::Error for StreamError {}

pub struct StreamController<R: Rng = StdRng> {
    engine: MonitorEngine<R>,
    period: Duration,
    seed_batch_size: usize,
    status: StreamStatus,
    /// Pending timer registration; `None` while idle or paused
    ticker: Option<Interval>,
    publisher: watch::Sender<Snapshot>,
}

impl<R: Rng> StreamController<R> {
    pub fn new(engine: MonitorEngine<R>, config: &StreamConfig) -> (Self, watch::Receiver<Snapshot>) {
        let (publisher, receiver) = watch::channel(Snapshot::idle());
        let controller = Self {
            engine,
            period: config.tick_interval(),
            seed_batch_size: config.seed_batch_size,
            status: StreamStatus::Idle,
            ticker: None,
            publisher,
        };
        (controller, receiver)
    }

    pub fn status(&self) -> StreamStatus {
        self.status
    }

    pub fn engine(&self) -> &MonitorEngine<R> {
        &self.engine
    }

    /// `Idle → Running`: seed synchronously, publish, arm the timer.
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        if self.status != StreamStatus::Idle {
            log::debug!("start() ignored, stream is {}", self.status.as_str());
            return;
        }

        self.engine.seed(self.seed_batch_size);
        self.status = StreamStatus::Running;
        self.arm_timer();
        self.publish();
        log::info!("▶️  Stream running (tick every {}ms)", self.period.as_millis());
    }

    /// `Running → Paused`: cancel the pending timer
    pub fn pause(&mut self) {
        if self.status != StreamStatus::Running {
            log::debug!("pause() ignored, stream is {}", self.status.as_str());
            return;
        }

        self.cancel_timer();
        self.status = StreamStatus::Paused;
        self.publish();
        log::info!("⏸️  Stream paused");
    }

    /// `Paused → Running`: re-arm with a full period before the next tick
    pub fn resume(&mut self) {
        if self.status != StreamStatus::Paused {
            log::debug!("resume() ignored, stream is {}", self.status.as_str());
            return;
        }

        self.status = StreamStatus::Running;
        self.arm_timer();
        self.publish();
        log::info!("▶️  Stream resumed");
    }

    pub fn toggle(&mut self) {
        match self.status {
            StreamStatus::Running => self.pause(),
            StreamStatus::Paused => self.resume(),
            StreamStatus::Idle => log::debug!("toggle() ignored, stream is idle"),
        }
    }

    /// Run one pipeline cycle and publish the result
    pub fn on_tick(&mut self) {
        if self.status != StreamStatus::Running {
            return;
        }
        self.engine.tick();
        self.publish();
    }

    /// Cancel any timer and release session state. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        self.cancel_timer();
        if !self.engine.window().is_empty() {
            log::info!("🧹 Releasing {} windowed transactions", self.engine.window().len());
        }
        self.engine.reset();
    }

    /// Apply a command; `false` means the controller should stop
    pub fn apply(&mut self, command: StreamCommand) -> bool {
        match command {
            StreamCommand::Pause => self.pause(),
            StreamCommand::Resume => self.resume(),
            StreamCommand::Toggle => self.toggle(),
            StreamCommand::Shutdown => return false,
        }
        true
    }

    /// Process commands and ticks until shutdown or until every handle is dropped
    pub async fn run(mut self, mut commands: mpsc::Receiver<StreamCommand>) {
        log::info!("📡 Stream controller task started");

        loop {
            tokio::select! {
                biased;

                command = commands.recv() => match command {
                    Some(command) => {
                        if !self.apply(command) {
                            log::info!("Stream controller received shutdown signal");
                            break;
                        }
                    }
                    None => {
                        log::info!("All stream handles dropped");
                        break;
                    }
                },
                _ = next_tick(&mut self.ticker) => self.on_tick(),
            }
        }

        self.teardown();
        log::info!("Stream controller task stopped");
    }

    fn arm_timer(&mut self) {
        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.ticker = Some(ticker);
    }

    fn cancel_timer(&mut self) {
        if self.ticker.take().is_some() {
            log::debug!("Tick timer cancelled");
        }
    }

    fn publish(&self) {
        self.publisher
            .send_replace(Snapshot::capture(&self.engine, self.status));
    }
}

/// Resolves on the next tick, or never when no timer is armed
async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

/// Presentation-side handle to a running controller
#[derive(Clone)]
pub struct StreamHandle {
    commands: mpsc::Sender<StreamCommand>,
    snapshots: watch::Receiver<Snapshot>,
}

impl StreamHandle {
    pub fn new(commands: mpsc::Sender<StreamCommand>, snapshots: watch::Receiver<Snapshot>) -> Self {
        Self { commands, snapshots }
    }

    pub async fn send(&self, command: StreamCommand) -> Result<(), StreamError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| StreamError::Closed)
    }

    pub async fn pause(&self) -> Result<(), StreamError> {
        self.send(StreamCommand::Pause).await
    }

    pub async fn resume(&self) -> Result<(), StreamError> {
        self.send(StreamCommand::Resume).await
    }

    pub async fn toggle(&self) -> Result<(), StreamError> {
        self.send(StreamCommand::Toggle).await
    }

    pub async fn shutdown(&self) -> Result<(), StreamError> {
        self.send(StreamCommand::Shutdown).await
    }

    /// New receiver for published snapshots
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    /// Copy of the most recently published snapshot
    pub fn latest(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }
}

/// Seed the engine, then spawn the controller task.
///
/// The seed batch is published before this returns.
pub fn spawn_stream<R>(engine: MonitorEngine<R>, config: &StreamConfig) -> (StreamHandle, JoinHandle<()>)
where
    R: Rng + Send + 'static,
{
    let (tx, rx) = mpsc::channel(config.command_buffer);
    let (mut controller, snapshots) = StreamController::new(engine, config);
    controller.start();

    let task = tokio::spawn(controller.run(rx));
    (StreamHandle::new(tx, snapshots), task)
}
