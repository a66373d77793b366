//! Rule-based risk scoring

use super::transaction::{is_foreign_location, is_suspicious_merchant, TransactionDraft};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Amounts strictly above this trigger `HighAmount`
pub const HIGH_AMOUNT_THRESHOLD: u64 = 20_000;

/// Hours strictly below this trigger `UnusualTime`
pub const UNUSUAL_HOUR_CUTOFF: u32 = 6;

/// Scores strictly above this are fraud
pub const FRAUD_THRESHOLD: u32 = 50;

pub const MAX_RISK_SCORE: u32 = 100;

/// Reason attached to a transaction for each rule that fired.
///
/// Declaration order is rule order, which is also flag order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskFlag {
    #[serde(rename = "High Amount")]
    HighAmount,
    #[serde(rename = "Foreign Location")]
    ForeignLocation,
    #[serde(rename = "Suspicious Merchant")]
    SuspiciousMerchant,
    #[serde(rename = "Unusual Time")]
    UnusualTime,
}

impl RiskFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskFlag::HighAmount => "High Amount",
            RiskFlag::ForeignLocation => "Foreign Location",
            RiskFlag::SuspiciousMerchant => "Suspicious Merchant",
            RiskFlag::UnusualTime => "Unusual Time",
        }
    }

    pub fn contribution(&self) -> u32 {
        match self {
            RiskFlag::HighAmount => 35,
            RiskFlag::ForeignLocation => 25,
            RiskFlag::SuspiciousMerchant => 30,
            RiskFlag::UnusualTime => 10,
        }
    }

    pub fn all() -> [RiskFlag; 4] {
        [
            RiskFlag::HighAmount,
            RiskFlag::ForeignLocation,
            RiskFlag::SuspiciousMerchant,
            RiskFlag::UnusualTime,
        ]
    }
}

impl fmt::Display for RiskFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of scoring one transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskAssessment {
    /// Sum of contributions before clamping
    pub raw_score: u32,
    /// Stored/displayed score, clamped to [0, 100]
    pub score: u8,
    pub flags: Vec<RiskFlag>,
}

impl RiskAssessment {
    pub fn from_flags(flags: Vec<RiskFlag>) -> Self {
        let raw_score: u32 = flags.iter().map(RiskFlag::contribution).sum();
        let score = raw_score.min(MAX_RISK_SCORE) as u8;
        Self {
            raw_score,
            score,
            flags,
        }
    }

    /// Compared against the raw sum, before clamping
    pub fn is_fraud(&self) -> bool {
        self.raw_score > FRAUD_THRESHOLD
    }
}

/// Fixed heuristic scorer. The hour of day is an explicit input.
pub struct RiskScorer;

impl RiskScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, amount: u64, location: &str, merchant: &str, hour: u32) -> RiskAssessment {
        let mut flags = Vec::with_capacity(4);

        if amount > HIGH_AMOUNT_THRESHOLD {
            flags.push(RiskFlag::HighAmount);
        }
        if is_foreign_location(location) {
            flags.push(RiskFlag::ForeignLocation);
        }
        if is_suspicious_merchant(merchant) {
            flags.push(RiskFlag::SuspiciousMerchant);
        }
        if hour < UNUSUAL_HOUR_CUTOFF {
            flags.push(RiskFlag::UnusualTime);
        }

        RiskAssessment::from_flags(flags)
    }

    pub fn score_draft(&self, draft: &TransactionDraft, hour: u32) -> RiskAssessment {
        self.score(draft.amount, &draft.location, &draft.merchant, hour)
    }
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_rule_fires() {
        let scorer = RiskScorer::new();
        let assessment = scorer.score(25_000, "New York", "Unknown Vendor", 2);

        assert_eq!(
            assessment.flags,
            vec![
                RiskFlag::HighAmount,
                RiskFlag::ForeignLocation,
                RiskFlag::SuspiciousMerchant,
                RiskFlag::UnusualTime,
            ]
        );
        assert_eq!(assessment.raw_score, 100);
        assert_eq!(assessment.score, 100);
        assert!(assessment.is_fraud());
    }

    #[test]
    fn test_clean_transaction() {
        let scorer = RiskScorer::new();
        let assessment = scorer.score(500, "Mumbai", "Amazon", 14);

        assert!(assessment.flags.is_empty());
        assert_eq!(assessment.score, 0);
        assert!(!assessment.is_fraud());
    }

    #[test]
    fn test_threshold_is_strict() {
        let scorer = RiskScorer::new();

        // 25 + 10 = 35
        assert!(!scorer.score(100, "London", "Amazon", 3).is_fraud());
        // 35 + 10 = 45
        assert!(!scorer.score(30_000, "Delhi", "Uber", 0).is_fraud());
        // 25 + 30 = 55
        let foreign_suspicious = scorer.score(100, "Singapore", "Suspicious Site", 12);
        assert_eq!(foreign_suspicious.score, 55);
        assert!(foreign_suspicious.is_fraud());
        // 35 + 25 = 60
        assert!(scorer.score(20_001, "London", "Steam", 9).is_fraud());
    }

    #[test]
    fn test_boundary_values_do_not_trigger() {
        let scorer = RiskScorer::new();
        let assessment = scorer.score(HIGH_AMOUNT_THRESHOLD, "Pune", "Netflix", UNUSUAL_HOUR_CUTOFF);
        assert!(assessment.flags.is_empty());
    }

    #[test]
    fn test_clamp_keeps_verdict() {
        let assessment = RiskAssessment::from_flags(vec![
            RiskFlag::HighAmount,
            RiskFlag::ForeignLocation,
            RiskFlag::SuspiciousMerchant,
            RiskFlag::UnusualTime,
            RiskFlag::HighAmount,
        ]);
        assert_eq!(assessment.raw_score, 135);
        assert_eq!(assessment.score, 100);
        assert!(assessment.is_fraud());
        assert_eq!(assessment.is_fraud(), u32::from(assessment.score) > FRAUD_THRESHOLD);
    }
}
