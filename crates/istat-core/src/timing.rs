use std::str::FromStr;

use crate::{Category, ConfigError, CATEGORY_COUNT};

/// Relative cycle costs used by the classic preset.
pub const CLASSIC_WEIGHT_TABLE: [(Category, f64); CATEGORY_COUNT] = [
    (Category::Division, 50.0),
    (Category::Multiply, 4.0),
    (Category::JumpOrBranch, 1.2),
    (Category::Memory, 2.0),
    (Category::Other, 1.0),
];

/// Relative cycle costs used by the extended preset.
pub const EXTENDED_WEIGHT_TABLE: [(Category, f64); CATEGORY_COUNT] = [
    (Category::Division, 25.0),
    (Category::Multiply, 4.0),
    (Category::JumpOrBranch, 2.0),
    (Category::Memory, 3.0),
    (Category::Other, 1.0),
];

/// Looks up the weight for a category in a `(category, weight)` table.
#[must_use]
pub const fn table_weight(table: &[(Category, f64)], category: Category) -> Option<f64> {
    let mut i = 0;
    while i < table.len() {
        let (entry, weight) = table[i];
        if entry.index() == category.index() {
            return Some(weight);
        }
        i += 1;
    }
    None
}

/// Per-category relative cycle cost, indexed by [`Category::index`].
///
/// Every weight is finite and non-negative; [`CategoryWeights::new`] enforces
/// this for caller-supplied values.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(try_from = "[f64; CATEGORY_COUNT]"))]
pub struct CategoryWeights([f64; CATEGORY_COUNT]);

impl CategoryWeights {
    /// Classic weights: division 50, multiply 4, branch 1.2, memory 2, other 1.
    pub const CLASSIC: Self = Self::from_table(&CLASSIC_WEIGHT_TABLE);
    /// Extended weights: division 25, multiply 4, branch 2, memory 3, other 1.
    pub const EXTENDED: Self = Self::from_table(&EXTENDED_WEIGHT_TABLE);

    /// Validates and wraps one weight per category, in ordinal order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonFiniteWeight`] for NaN or infinite values and
    /// [`ConfigError::NegativeWeight`] for values below zero.
    pub fn new(weights: [f64; CATEGORY_COUNT]) -> Result<Self, ConfigError> {
        for category in Category::ALL {
            let value = weights[category.index()];
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteWeight { category, value });
            }
            if value < 0.0 {
                return Err(ConfigError::NegativeWeight { category, value });
            }
        }
        Ok(Self(weights))
    }

    /// Parses a weight list from a slice of values in ordinal order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::WeightCount`] when `values` does not hold one
    /// entry per category, otherwise the errors of [`CategoryWeights::new`].
    pub fn from_slice(values: &[f64]) -> Result<Self, ConfigError> {
        let weights: [f64; CATEGORY_COUNT] =
            values.try_into().map_err(|_| ConfigError::WeightCount {
                expected: CATEGORY_COUNT,
                found: values.len(),
            })?;
        Self::new(weights)
    }

    /// Categories missing from `table` get weight zero.
    const fn from_table(table: &[(Category, f64)]) -> Self {
        let mut weights = [0.0; CATEGORY_COUNT];
        let mut i = 0;
        while i < CATEGORY_COUNT {
            if let Some(weight) = table_weight(table, Category::ALL[i]) {
                weights[i] = weight;
            }
            i += 1;
        }
        Self(weights)
    }

    /// Weight of one category.
    #[must_use]
    pub const fn weight(&self, category: Category) -> f64 {
        self.0[category.index()]
    }

    /// All weights in ordinal order.
    #[must_use]
    pub const fn as_array(&self) -> [f64; CATEGORY_COUNT] {
        self.0
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Share of the total weight carried by `category`, in percent.
    ///
    /// Returns `0.0` when every weight is zero.
    #[must_use]
    pub fn share_percent(&self, category: Category) -> f64 {
        let total = self.total();
        if total == 0.0 {
            return 0.0;
        }
        self.weight(category) / total * 100.0
    }

    /// Weighted sum `Σ counts[c] * weight[c]`, computed from scratch.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn weighted_sum(&self, counts: &[u64; CATEGORY_COUNT]) -> f64 {
        counts
            .iter()
            .zip(self.0.iter())
            .map(|(count, weight)| *count as f64 * weight)
            .sum()
    }
}

impl TryFrom<[f64; CATEGORY_COUNT]> for CategoryWeights {
    type Error = ConfigError;

    fn try_from(weights: [f64; CATEGORY_COUNT]) -> Result<Self, Self::Error> {
        Self::new(weights)
    }
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self::EXTENDED
    }
}

impl FromStr for CategoryWeights {
    type Err = ConfigError;

    /// Parses a comma-separated list such as `25,4,2,3,1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<f64>()
                    .map_err(|_| ConfigError::InvalidWeight(part.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_slice(&values)
    }
}
