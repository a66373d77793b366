//! Stream runtime around the engine
//!
//! - `config` - environment configuration
//! - `controller` - seeding, tick timer, pause/resume, command handling
//! - `snapshot` - the state published to subscribers
//! - `sink` - snapshot sink backends (JSONL)

pub mod config;
pub mod controller;
pub mod sink;
pub mod snapshot;

pub use config::{ConfigError, StreamConfig};
pub use controller::{spawn_stream, StreamCommand, StreamController, StreamError, StreamHandle};
pub use sink::{JsonlSnapshotSink, SinkError, SnapshotSink};
pub use snapshot::{Snapshot, StreamStatus};
