//! Transaction record and the fixed catalogs the generator samples from

use super::scorer::{RiskAssessment, RiskFlag};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DOMESTIC_LOCATIONS: [&str; 7] = [
    "Mumbai",
    "Delhi",
    "Bangalore",
    "Hyderabad",
    "Chennai",
    "Kolkata",
    "Pune",
];

pub const FOREIGN_LOCATIONS: [&str; 3] = ["New York", "London", "Singapore"];

/// Merchants that are never flagged.
pub const TRUSTED_MERCHANTS: [&str; 8] = [
    "Amazon",
    "Flipkart",
    "Swiggy",
    "Uber",
    "Netflix",
    "Steam",
    "Apple Store",
    "Google Play",
];

pub const SUSPICIOUS_MERCHANTS: [&str; 2] = ["Unknown Vendor", "Suspicious Site"];

/// Entry the generator picks on its suspicious-merchant draw.
pub const DESIGNATED_SUSPICIOUS_MERCHANT: &str = "Suspicious Site";

pub const USER_ID_PREFIX: &str = "USR";

/// Display format for `Transaction::time`.
pub const TIME_FORMAT: &str = "%H:%M:%S";

pub fn is_foreign_location(location: &str) -> bool {
    FOREIGN_LOCATIONS.contains(&location)
}

pub fn is_suspicious_merchant(merchant: &str) -> bool {
    SUSPICIOUS_MERCHANTS.contains(&merchant)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    Purchase,
    Transfer,
    Withdrawal,
    Deposit,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Purchase => "Purchase",
            TransactionType::Transfer => "Transfer",
            TransactionType::Withdrawal => "Withdrawal",
            TransactionType::Deposit => "Deposit",
        }
    }

    pub fn all() -> [TransactionType; 4] {
        [
            TransactionType::Purchase,
            TransactionType::Transfer,
            TransactionType::Withdrawal,
            TransactionType::Deposit,
        ]
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Approved,
    Blocked,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Approved => "approved",
            TransactionStatus::Blocked => "blocked",
        }
    }
}

/// Risk band used for analytics and colouring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Low below 30, Medium below 60, High otherwise
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=29 => RiskLevel::Low,
            30..=59 => RiskLevel::Medium,
            _ => RiskLevel::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::High => "High Risk",
        }
    }
}

/// Creation time in epoch milliseconds plus a random tie-breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransactionId {
    pub millis: i64,
    pub nonce: u64,
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:016x}", self.millis, self.nonce)
    }
}

/// Sampled fields of a transaction before scoring
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    pub kind: TransactionType,
    pub amount: u64,
    pub merchant: String,
    pub location: String,
    pub user_id: String,
}

/// A scored transaction. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: u64,
    pub merchant: String,
    pub location: String,
    pub time: String,
    pub risk_score: u8,
    pub flags: Vec<RiskFlag>,
    pub is_fraud: bool,
    pub status: TransactionStatus,
    pub user_id: String,
}

impl Transaction {
    pub fn from_parts(
        id: TransactionId,
        draft: TransactionDraft,
        assessment: RiskAssessment,
        created_at: &DateTime<Local>,
    ) -> Self {
        let is_fraud = assessment.is_fraud();
        let status = if is_fraud {
            TransactionStatus::Blocked
        } else {
            TransactionStatus::Approved
        };

        Self {
            id,
            kind: draft.kind,
            amount: draft.amount,
            merchant: draft.merchant,
            location: draft.location,
            time: created_at.format(TIME_FORMAT).to_string(),
            risk_score: assessment.score,
            flags: assessment.flags,
            is_fraud,
            status,
            user_id: draft.user_id,
        }
    }

    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_score(self.risk_score)
    }

    pub fn has_flag(&self, flag: RiskFlag) -> bool {
        self.flags.contains(&flag)
    }
}

/// Render an amount with thousands separators (`25000` → `25,000`)
pub fn format_amount(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
