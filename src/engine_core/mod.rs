//! Engine Core - Transaction simulation and risk scoring
//!
//! Synthesizes payment transactions, scores them against a fixed rule set,
//! keeps a bounded window of recent transactions and derives stats and alerts
//! from it.
//!
//! # Architecture
//!
//! ```text
//! EventGenerator (seeded RNG) ──► RiskScorer (hour as input)
//!     ↓
//! TransactionWindow (50, most-recent-first)
//!     ↓
//! Stats / RiskDistribution / FlagBreakdown (wholesale recompute)
//!     ↓
//! AlertManager (10, fraud only)
//! ```
//!
//! `filter` is a read-only view over the window for the presentation layer.

pub mod aggregator;
pub mod alerts;
pub mod engine;
pub mod filter;
pub mod generator;
pub mod scorer;
pub mod transaction;
pub mod window;

pub use aggregator::{FlagBreakdown, RiskDistribution, Stats};
pub use alerts::{Alert, AlertManager, Severity};
pub use engine::{MonitorEngine, NowFn};
pub use filter::{filter_optional, filter_transactions};
pub use generator::EventGenerator;
pub use scorer::{RiskAssessment, RiskFlag, RiskScorer};
pub use transaction::{
    RiskLevel, Transaction, TransactionDraft, TransactionId, TransactionStatus, TransactionType,
};
pub use window::{RecentFeed, TransactionWindow};
