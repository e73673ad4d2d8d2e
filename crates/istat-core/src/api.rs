//! Host-facing configuration, input event and snapshot types.

use std::fmt;
use std::str::FromStr;

use crate::report::{Report, ReportStyle};
use crate::{Category, CategoryWeights, ConfigError, DecodeTable, CATEGORY_COUNT};

/// Named weight/decode-table pairings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum StatsPreset {
    /// Division-heavy weights (50/4/1.2/2/1) over the base decode table.
    Classic,
    /// Weights 25/4/2/3/1 over the extended decode table.
    #[default]
    Extended,
}

impl StatsPreset {
    /// Weight table of this preset.
    #[must_use]
    pub const fn weights(self) -> CategoryWeights {
        match self {
            Self::Classic => CategoryWeights::CLASSIC,
            Self::Extended => CategoryWeights::EXTENDED,
        }
    }

    /// Decode table of this preset.
    #[must_use]
    pub const fn decode_table(self) -> DecodeTable {
        match self {
            Self::Classic => DecodeTable::Base,
            Self::Extended => DecodeTable::Extended,
        }
    }

    /// Stable lowercase name, accepted back by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Extended => "extended",
        }
    }
}

impl fmt::Display for StatsPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StatsPreset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "extended" => Ok(Self::Extended),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }
}

/// Immutable configuration for one accumulator instance.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct StatsConfig {
    /// Opcode coverage used to classify admitted words.
    pub decode_table: DecodeTable,
    /// Relative cycle cost per category.
    pub weights: CategoryWeights,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self::from_preset(StatsPreset::default())
    }
}

impl StatsConfig {
    /// Builds the configuration a preset describes.
    #[must_use]
    pub const fn from_preset(preset: StatsPreset) -> Self {
        Self {
            decode_table: preset.decode_table(),
            weights: preset.weights(),
        }
    }

    /// Replaces the weight table.
    #[must_use]
    pub const fn with_weights(mut self, weights: CategoryWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Replaces the decode table.
    #[must_use]
    pub const fn with_decode_table(mut self, decode_table: DecodeTable) -> Self {
        self.decode_table = decode_table;
        self
    }
}

/// One instruction-fetch notification from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct FetchEvent {
    /// Program address of the fetch.
    pub address: u64,
    /// Fetched instruction word, `None` when no instruction exists there.
    pub word: Option<u32>,
}

impl FetchEvent {
    /// Fetch that produced an instruction word.
    #[must_use]
    pub const fn instruction(address: u64, word: u32) -> Self {
        Self {
            address,
            word: Some(word),
        }
    }

    /// Fetch at an address holding no instruction.
    #[must_use]
    pub const fn empty(address: u64) -> Self {
        Self {
            address,
            word: None,
        }
    }
}

/// Point-in-time copy of accumulated statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(try_from = "SnapshotFields"))]
pub struct StatsSnapshot {
    /// Admissions per category, indexed by [`Category::index`].
    pub counts: [u64; CATEGORY_COUNT],
    /// Sum of `counts`.
    pub total: u64,
    /// `Σ counts[c] * weights[c]`.
    pub estimated_cycles: f64,
    /// Weights the estimate was computed with.
    pub weights: CategoryWeights,
}

/// Stored form of a [`StatsSnapshot`], checked against its own counts on load.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct SnapshotFields {
    counts: [u64; CATEGORY_COUNT],
    total: u64,
    estimated_cycles: f64,
    weights: CategoryWeights,
}

#[cfg(feature = "serde")]
impl TryFrom<SnapshotFields> for StatsSnapshot {
    type Error = ConfigError;

    fn try_from(fields: SnapshotFields) -> Result<Self, Self::Error> {
        let counted = fields
            .counts
            .iter()
            .try_fold(0u64, |sum, count| sum.checked_add(*count))
            .ok_or(ConfigError::SnapshotCountOverflow)?;
        if counted != fields.total {
            return Err(ConfigError::SnapshotTotal {
                stated: fields.total,
                counted,
            });
        }

        let snapshot = Self::from_counts(fields.counts, fields.weights);
        let computed = snapshot.estimated_cycles;
        let drift = (fields.estimated_cycles - computed).abs();
        if drift.is_nan() || drift > 1e-9 * computed.abs().max(1.0) {
            return Err(ConfigError::SnapshotEstimate {
                stated: fields.estimated_cycles,
                computed,
            });
        }
        Ok(snapshot)
    }
}

impl Default for StatsSnapshot {
    fn default() -> Self {
        Self::from_counts([0; CATEGORY_COUNT], CategoryWeights::default())
    }
}

/// One report row: a category with its label, weight and count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryRow {
    /// Category of this row.
    pub category: Category,
    /// Display label.
    pub label: &'static str,
    /// Configured weight.
    pub weight: f64,
    /// Admissions counted.
    pub count: u64,
}

impl StatsSnapshot {
    /// Builds a snapshot, deriving `total` and `estimated_cycles` from `counts`.
    #[must_use]
    pub fn from_counts(counts: [u64; CATEGORY_COUNT], weights: CategoryWeights) -> Self {
        Self {
            counts,
            total: counts.iter().sum(),
            estimated_cycles: weights.weighted_sum(&counts),
            weights,
        }
    }

    /// Admissions counted for `category`.
    #[must_use]
    pub const fn count(&self, category: Category) -> u64 {
        self.counts[category.index()]
    }

    /// Weight configured for `category`.
    #[must_use]
    pub const fn weight(&self, category: Category) -> f64 {
        self.weights.weight(category)
    }

    /// Display label of `category`.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub const fn label(&self, category: Category) -> &'static str {
        category.label()
    }

    /// Fraction of all admissions that fell into `category`, in `[0, 1]`.
    ///
    /// Returns `0.0` before anything has been admitted.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn share(&self, category: Category) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(category) as f64 / self.total as f64
    }

    /// Rows in ordinal order.
    pub fn rows(&self) -> impl Iterator<Item = CategoryRow> + '_ {
        Category::ALL.into_iter().map(move |category| CategoryRow {
            category,
            label: self.label(category),
            weight: self.weight(category),
            count: self.count(category),
        })
    }

    /// Renders this snapshot in the given dump style.
    #[must_use]
    pub const fn report(&self, style: ReportStyle) -> Report<'_> {
        Report::new(self, style)
    }
}
