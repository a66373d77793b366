//! Synthetic transaction generation

use super::transaction::{
    TransactionDraft, TransactionId, TransactionType, DESIGNATED_SUSPICIOUS_MERCHANT,
    DOMESTIC_LOCATIONS, FOREIGN_LOCATIONS, TRUSTED_MERCHANTS, USER_ID_PREFIX,
};
use chrono::{DateTime, Local};
use rand::prelude::*;
use rand::rngs::StdRng;

const HIGH_AMOUNT_PROBABILITY: f64 = 0.10;
const FOREIGN_LOCATION_PROBABILITY: f64 = 0.15;
const SUSPICIOUS_MERCHANT_PROBABILITY: f64 = 0.10;

/// Generator for synthetic transaction drafts.
///
/// Every field is sampled independently:
/// - amount: 10% in [20000, 70000), otherwise [100, 5100)
/// - location: 15% foreign, otherwise domestic
/// - merchant: 10% the designated suspicious entry, otherwise a trusted merchant
/// - type: uniform
/// - user id: `USR` + [1000, 9999]
pub struct EventGenerator<R: Rng = StdRng> {
    rng: R,
}

impl EventGenerator<StdRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Seeded when `seed` is set, entropy otherwise
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> EventGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn draw(&mut self) -> TransactionDraft {
        let amount = if self.rng.gen_bool(HIGH_AMOUNT_PROBABILITY) {
            self.rng.gen_range(20_000..70_000)
        } else {
            self.rng.gen_range(100..5_100)
        };

        let location = if self.rng.gen_bool(FOREIGN_LOCATION_PROBABILITY) {
            self.pick(&FOREIGN_LOCATIONS)
        } else {
            self.pick(&DOMESTIC_LOCATIONS)
        };

        let merchant = if self.rng.gen_bool(SUSPICIOUS_MERCHANT_PROBABILITY) {
            DESIGNATED_SUSPICIOUS_MERCHANT
        } else {
            self.pick(&TRUSTED_MERCHANTS)
        };

        let kind = self.pick(&TransactionType::all());
        let user_id = format!("{}{}", USER_ID_PREFIX, self.rng.gen_range(1000..=9999));

        TransactionDraft {
            kind,
            amount,
            merchant: merchant.to_string(),
            location: location.to_string(),
            user_id,
        }
    }

    /// Id from the creation instant plus a random tie-breaker
    pub fn next_id(&mut self, now: &DateTime<Local>) -> TransactionId {
        TransactionId {
            millis: now.timestamp_millis(),
            nonce: self.rng.gen(),
        }
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.rng.gen_range(0..items.len())]
    }
}
