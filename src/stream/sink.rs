//! Snapshot sink backends for headless runs

use super::snapshot::Snapshot;
use async_trait::async_trait;
use std::io::{BufWriter, Write};

#[derive(Debug)]
pub enum SinkError {
    Io(std::io::Error),
    Serialization(serde_json::Error),
}

impl From<std::io::Error> for SinkError {
    fn from(err: std::io::Error) -> Self {
        SinkError::Io(err)
    }
}

impl From<serde_json::Error> for SinkError {
    fn from(err: serde_json::Error) -> Self {
        SinkError::Serialization(err)
    }
}

impl std::fmt::Display for SinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SinkError::Io(e) => write!(f, "IO error: {}", e),
            SinkError::Serialization(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for SinkError {}

/// Backend trait for consuming published snapshots
#[async_trait]
pub trait SnapshotSink: Send {
    async fn write_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), SinkError>;

    async fn flush(&mut self) -> Result<(), SinkError>;

    /// Backend type for logging
    fn sink_type(&self) -> &'static str;
}

/// One JSON object per line
pub struct JsonlSnapshotSink<W: Write + Send> {
    writer: BufWriter<W>,
    written: u64,
}

impl<W: Write + Send> JsonlSnapshotSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: BufWriter::new(inner),
            written: 0,
        }
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    /// Flush and return the underlying writer
    pub fn into_inner(self) -> Result<W, SinkError> {
        self.writer
            .into_inner()
            .map_err(|e| SinkError::Io(e.into_error()))
    }
}

#[async_trait]
impl<W: Write + Send> SnapshotSink for JsonlSnapshotSink<W> {
    async fn write_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), SinkError> {
        let json = serde_json::to_string(snapshot)?;
        writeln!(self.writer, "{}", json)?;
        self.written += 1;
        self.writer.flush()?;
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }

    fn sink_type(&self) -> &'static str {
        "JSONL"
    }
}
