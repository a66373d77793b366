//! Window statistics, always recomputed wholesale from the current window

use super::scorer::RiskFlag;
use super::transaction::{RiskLevel, Transaction};
use serde::{Deserialize, Serialize};

/// Summary of the current window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_transactions: usize,
    pub fraud_detected: usize,
    pub total_amount: u64,
    /// Percentage of fraud in the window, floored
    pub risk_score: u32,
}

impl Stats {
    /// Derive stats from scratch. O(n) in the window length.
    ///
    /// Never patched incrementally: eviction removes members that earlier totals included.
    pub fn recompute<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut stats = Stats::default();
        for txn in transactions {
            stats.total_transactions += 1;
            stats.total_amount += txn.amount;
            if txn.is_fraud {
                stats.fraud_detected += 1;
            }
        }

        stats.risk_score = if stats.total_transactions == 0 {
            0
        } else {
            (stats.fraud_detected * 100 / stats.total_transactions) as u32
        };

        stats
    }

    /// Volume in thousands, one decimal (`₹12.3k`)
    pub fn volume_label(&self) -> String {
        format!("₹{:.1}k", self.total_amount as f64 / 1000.0)
    }
}

/// Window transactions per risk band
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl RiskDistribution {
    pub fn recompute<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut distribution = RiskDistribution::default();
        for txn in transactions {
            match txn.risk_level() {
                RiskLevel::Low => distribution.low += 1,
                RiskLevel::Medium => distribution.medium += 1,
                RiskLevel::High => distribution.high += 1,
            }
        }
        distribution
    }

    pub fn get(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::Low => self.low,
            RiskLevel::Medium => self.medium,
            RiskLevel::High => self.high,
        }
    }
}

/// Window transactions carrying each flag, in rule order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagBreakdown {
    pub counts: Vec<(RiskFlag, usize)>,
}

impl FlagBreakdown {
    pub fn recompute<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut counts: Vec<(RiskFlag, usize)> = RiskFlag::all().into_iter().map(|f| (f, 0)).collect();
        for txn in transactions {
            for (flag, count) in counts.iter_mut() {
                if txn.has_flag(*flag) {
                    *count += 1;
                }
            }
        }
        Self { counts }
    }

    pub fn count(&self, flag: RiskFlag) -> usize {
        self.counts
            .iter()
            .find(|(f, _)| *f == flag)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }
}

impl Default for FlagBreakdown {
    fn default() -> Self {
        Self::recompute(std::iter::empty())
    }
}
