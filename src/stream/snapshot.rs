//! Published engine state

use crate::engine_core::{Alert, FlagBreakdown, MonitorEngine, RiskDistribution, Stats, Transaction};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamStatus {
    Idle,
    Running,
    Paused,
}

impl StreamStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamStatus::Idle => "idle",
            StreamStatus::Running => "running",
            StreamStatus::Paused => "paused",
        }
    }
}

/// Owned copy of the engine state handed to subscribers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub status: StreamStatus,
    /// Most-recent-first
    pub transactions: Vec<Transaction>,
    pub stats: Stats,
    /// Most-recent-first
    pub alerts: Vec<Alert>,
    pub risk_distribution: RiskDistribution,
    pub flag_breakdown: FlagBreakdown,
    pub ticks: u64,
}

impl Snapshot {
    pub fn idle() -> Self {
        Self {
            status: StreamStatus::Idle,
            transactions: Vec::new(),
            stats: Stats::default(),
            alerts: Vec::new(),
            risk_distribution: RiskDistribution::default(),
            flag_breakdown: FlagBreakdown::default(),
            ticks: 0,
        }
    }

    pub fn capture<R: Rng>(engine: &MonitorEngine<R>, status: StreamStatus) -> Self {
        Self {
            status,
            transactions: engine.window().to_vec(),
            stats: engine.stats(),
            alerts: engine.alerts().to_vec(),
            risk_distribution: engine.risk_distribution(),
            flag_breakdown: engine.flag_breakdown().clone(),
            ticks: engine.ticks(),
        }
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::idle()
    }
}
