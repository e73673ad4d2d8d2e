//! Per-run instruction statistics accumulator.
//!
//! The accumulator is owned by whichever component drives instrumentation and
//! is fed one call per fetch notification. Consecutive notifications for the
//! same address count once; a tight loop that re-executes the very same
//! address with nothing in between therefore under-counts.

use tracing::{debug, trace};

use crate::{
    Category, CategoryWeights, DecodeTable, FetchEvent, StatsConfig, StatsSnapshot,
    CATEGORY_COUNT,
};

/// Running per-category instruction counts for one monitored program run.
#[derive(Debug, Clone, PartialEq)]
pub struct Accumulator {
    config: StatsConfig,
    counts: [u64; CATEGORY_COUNT],
    total: u64,
    last_address: Option<u64>,
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new(StatsConfig::default())
    }
}

impl Accumulator {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new(config: StatsConfig) -> Self {
        debug!(
            decode_table = %config.decode_table,
            weights = ?config.weights.as_array(),
            "instruction statistics accumulator created"
        );
        Self {
            config,
            counts: [0; CATEGORY_COUNT],
            total: 0,
            last_address: None,
        }
    }

    /// Admits the instruction `word` fetched at `address`.
    ///
    /// Returns the category that was counted, or `None` when `address`
    /// repeats the previous admission and the call was suppressed.
    pub fn admit(&mut self, address: u64, word: u32) -> Option<Category> {
        if self.last_address == Some(address) {
            trace!(address, "duplicate fetch notification suppressed");
            return None;
        }
        self.last_address = Some(address);

        let category = self.config.decode_table.classify(word);
        self.counts[category.index()] += 1;
        self.total += 1;
        Some(category)
    }

    /// Feeds one host fetch notification.
    ///
    /// A fetch without an instruction word still becomes the last seen
    /// address but is not counted.
    pub fn observe(&mut self, event: FetchEvent) -> Option<Category> {
        match event.word {
            Some(word) => self.admit(event.address, word),
            None => {
                trace!(address = event.address, "fetch yielded no instruction");
                self.last_address = Some(event.address);
                None
            }
        }
    }

    /// Clears counts and the last seen address. Configuration is kept.
    pub fn reset(&mut self) {
        debug!(total = self.total, "instruction statistics reset");
        self.counts = [0; CATEGORY_COUNT];
        self.total = 0;
        self.last_address = None;
    }

    /// Copies the current statistics, recomputing the cycle estimate.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            counts: self.counts,
            total: self.total,
            estimated_cycles: self.estimated_cycles(),
            weights: self.config.weights,
        }
    }

    /// Weighted cycle estimate for the current counts.
    #[must_use]
    pub fn estimated_cycles(&self) -> f64 {
        self.config.weights.weighted_sum(&self.counts)
    }

    /// Admissions counted for `category`.
    #[must_use]
    pub const fn count(&self, category: Category) -> u64 {
        self.counts[category.index()]
    }

    /// Total admissions counted.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Most recently admitted address.
    #[must_use]
    pub const fn last_address(&self) -> Option<u64> {
        self.last_address
    }

    /// Configuration this accumulator was built with.
    #[must_use]
    pub const fn config(&self) -> &StatsConfig {
        &self.config
    }

    /// Weight table in use.
    #[must_use]
    pub const fn weights(&self) -> &CategoryWeights {
        &self.config.weights
    }

    /// Decode table in use.
    #[must_use]
    pub const fn decode_table(&self) -> DecodeTable {
        self.config.decode_table
    }

    /// Display label of `category`.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub const fn category_label(&self, category: Category) -> &'static str {
        category.label()
    }

    /// Configured weight of `category`.
    #[must_use]
    pub const fn category_weight(&self, category: Category) -> f64 {
        self.config.weights.weight(category)
    }
}
