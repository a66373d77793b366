//! Fraudflow - live payment transaction risk monitor
//!
//! - `engine_core` - transaction generation, risk scoring, window, stats, alerts, search
//! - `stream` - controller task driving the engine on a timer, config, snapshot sinks
//! - `ui` - terminal front-end reading published snapshots

pub mod engine_core;
pub mod stream;
pub mod ui;

pub use engine_core::{MonitorEngine, Transaction};
pub use stream::{spawn_stream, Snapshot, StreamConfig, StreamHandle};
