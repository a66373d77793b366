//! Monitor engine - owns the window, alerts and stats and runs the
//! generate → score → store → aggregate → alert pipeline
//!
//! ```text
//! EventGenerator::draw()
//!     ↓
//! RiskScorer::score_draft(hour)
//!     ↓
//! TransactionWindow::push()
//!     ↓
//! Stats / RiskDistribution / FlagBreakdown ::recompute(window)
//!     ↓
//! AlertManager::on_transaction()
//! ```
//!
//! The engine is synchronous and has no notion of time beyond its clock
//! function; the stream controller decides when to call `seed` and `tick`.

use super::aggregator::{FlagBreakdown, RiskDistribution, Stats};
use super::alerts::AlertManager;
use super::generator::EventGenerator;
use super::scorer::RiskScorer;
use super::transaction::Transaction;
use super::window::TransactionWindow;
use chrono::{DateTime, Local, Timelike};
use rand::rngs::StdRng;
use rand::Rng;

/// Clock used for transaction ids, timestamps and the time-of-day rule
pub type NowFn = Box<dyn Fn() -> DateTime<Local> + Send + Sync>;

pub struct MonitorEngine<R: Rng = StdRng> {
    generator: EventGenerator<R>,
    scorer: RiskScorer,
    window: TransactionWindow,
    alerts: AlertManager,
    stats: Stats,
    risk_distribution: RiskDistribution,
    flag_breakdown: FlagBreakdown,
    /// Timer ticks applied since seeding
    ticks: u64,
    now_fn: NowFn,
}

impl<R: Rng> MonitorEngine<R> {
    /// Engine reading the local wall clock
    pub fn new(generator: EventGenerator<R>, window_capacity: usize, alert_capacity: usize) -> Self {
        Self::new_with_clock(generator, window_capacity, alert_capacity, Box::new(Local::now))
    }

    /// Engine with a custom clock (for testing with fixed times)
    pub fn new_with_clock(
        generator: EventGenerator<R>,
        window_capacity: usize,
        alert_capacity: usize,
        now_fn: NowFn,
    ) -> Self {
        Self {
            generator,
            scorer: RiskScorer::new(),
            window: TransactionWindow::new(window_capacity),
            alerts: AlertManager::new(alert_capacity),
            stats: Stats::default(),
            risk_distribution: RiskDistribution::default(),
            flag_breakdown: FlagBreakdown::default(),
            ticks: 0,
            now_fn,
        }
    }

    /// Generate and score one transaction without storing it
    pub fn produce(&mut self) -> Transaction {
        let now = (self.now_fn)();
        let draft = self.generator.draw();
        let assessment = self.scorer.score_draft(&draft, now.hour());
        let id = self.generator.next_id(&now);
        Transaction::from_parts(id, draft, assessment, &now)
    }

    /// Populate the window with an initial batch.
    ///
    /// Stats are recomputed once over the whole batch; alerts are raised per
    /// fraudulent transaction in batch order. Returns the number of frauds.
    pub fn seed(&mut self, count: usize) -> usize {
        let batch: Vec<Transaction> = (0..count).map(|_| self.produce()).collect();

        for txn in &batch {
            self.window.push(txn.clone());
        }
        self.recompute();

        let mut frauds = 0;
        for txn in &batch {
            if self.alerts.on_transaction(txn).is_some() {
                frauds += 1;
            }
        }

        log::info!(
            "🌱 Seeded {} transactions ({} blocked, risk {}%)",
            count,
            frauds,
            self.stats.risk_score
        );
        frauds
    }

    /// One timer tick: produce, store, recompute, then alert
    pub fn tick(&mut self) -> Transaction {
        let txn = self.produce();

        let evicted = self.window.push(txn.clone());
        if evicted > 0 {
            log::debug!("Evicted {} transaction(s) from window", evicted);
        }
        self.recompute();

        if self.alerts.on_transaction(&txn).is_some() {
            log::warn!(
                "🚨 Blocked {} {} ₹{} at {} ({}), score {} [{}]",
                txn.id,
                txn.kind,
                txn.amount,
                txn.merchant,
                txn.location,
                txn.risk_score,
                txn.flags.iter().map(|f| f.as_str()).collect::<Vec<_>>().join(", ")
            );
        } else {
            log::debug!(
                "✅ Approved {} {} ₹{} at {} ({}), score {}",
                txn.id,
                txn.kind,
                txn.amount,
                txn.merchant,
                txn.location,
                txn.risk_score
            );
        }
        self.ticks += 1;

        txn
    }

    /// Single aggregation path used after every window mutation
    fn recompute(&mut self) {
        self.stats = Stats::recompute(self.window.current());
        self.risk_distribution = RiskDistribution::recompute(self.window.current());
        self.flag_breakdown = FlagBreakdown::recompute(self.window.current());
    }

    /// Drop all session state
    pub fn reset(&mut self) {
        self.window.clear();
        self.alerts.clear();
        self.ticks = 0;
        self.recompute();
    }

    pub fn window(&self) -> &TransactionWindow {
        &self.window
    }

    pub fn alerts(&self) -> &AlertManager {
        &self.alerts
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn risk_distribution(&self) -> RiskDistribution {
        self.risk_distribution
    }

    pub fn flag_breakdown(&self) -> &FlagBreakdown {
        &self.flag_breakdown
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
