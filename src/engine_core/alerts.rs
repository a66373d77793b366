//! Alert feed derived from fraud verdicts

use super::transaction::{format_amount, Transaction, TransactionId};
use super::window::RecentFeed;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ALERT_CAPACITY: usize = 10;

/// Scores strictly above this raise a critical alert
pub const CRITICAL_THRESHOLD: u8 = 75;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Critical,
}

impl Severity {
    pub fn from_score(score: u8) -> Self {
        if score > CRITICAL_THRESHOLD {
            Severity::Critical
        } else {
            Severity::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Id of the originating transaction
    pub id: TransactionId,
    pub message: String,
    pub severity: Severity,
    pub time: String,
}

impl Alert {
    /// `None` unless the transaction was judged fraudulent
    pub fn from_transaction(txn: &Transaction) -> Option<Self> {
        if !txn.is_fraud {
            return None;
        }

        Some(Self {
            id: txn.id,
            message: format!(
                "Suspicious {} of ₹{} at {}",
                txn.kind,
                format_amount(txn.amount),
                txn.merchant
            ),
            severity: Severity::from_score(txn.risk_score),
            time: txn.time.clone(),
        })
    }
}

/// Bounded most-recent-first alert sequence
#[derive(Debug, Clone)]
pub struct AlertManager {
    alerts: RecentFeed<Alert>,
}

impl AlertManager {
    pub fn new(capacity: usize) -> Self {
        Self {
            alerts: RecentFeed::new(capacity),
        }
    }

    /// Record an alert for a fraudulent transaction; other transactions are ignored
    pub fn on_transaction(&mut self, txn: &Transaction) -> Option<&Alert> {
        let alert = Alert::from_transaction(txn)?;
        self.alerts.push(alert);
        self.alerts.current().next()
    }

    pub fn current(&self) -> impl ExactSizeIterator<Item = &Alert> + DoubleEndedIterator {
        self.alerts.current()
    }

    pub fn to_vec(&self) -> Vec<Alert> {
        self.alerts.to_vec()
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn clear(&mut self) {
        self.alerts.clear();
    }
}

impl Default for AlertManager {
    fn default() -> Self {
        Self::new(DEFAULT_ALERT_CAPACITY)
    }
}
