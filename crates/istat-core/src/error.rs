use thiserror::Error;

use crate::Category;

/// Errors raised while building or parsing statistics configuration.
///
/// Classification and accumulation never fail; only caller-supplied
/// configuration can be rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A weight was below zero.
    #[error("weight for {category} must not be negative (got {value})")]
    NegativeWeight {
        /// Category the weight belongs to.
        category: Category,
        /// Rejected value.
        value: f64,
    },
    /// A weight was NaN or infinite.
    #[error("weight for {category} must be finite (got {value})")]
    NonFiniteWeight {
        /// Category the weight belongs to.
        category: Category,
        /// Rejected value.
        value: f64,
    },
    /// A weight list did not contain exactly one value per category.
    #[error("expected {expected} weights, found {found}")]
    WeightCount {
        /// Number of categories.
        expected: usize,
        /// Number of values supplied.
        found: usize,
    },
    /// A weight list entry was not a number.
    #[error("invalid weight value `{0}`")]
    InvalidWeight(String),
    /// Preset name was not recognised.
    #[error("unknown preset `{0}` (expected `classic` or `extended`)")]
    UnknownPreset(String),
    /// Decode table name was not recognised.
    #[error("unknown decode table `{0}` (expected `base` or `extended`)")]
    UnknownDecodeTable(String),
    /// A stored snapshot's total disagrees with its per-category counts.
    #[error("snapshot total {stated} does not match its counts (sum {counted})")]
    SnapshotTotal {
        /// Total carried by the snapshot.
        stated: u64,
        /// Sum of the snapshot's counts.
        counted: u64,
    },
    /// A stored snapshot's counts sum past `u64::MAX`.
    #[error("snapshot counts overflow a 64-bit total")]
    SnapshotCountOverflow,
    /// A stored snapshot's estimate is not the weighted sum of its counts.
    #[error("snapshot estimate {stated} does not match its counts (expected {computed})")]
    SnapshotEstimate {
        /// Estimate carried by the snapshot.
        stated: f64,
        /// Weighted sum recomputed from counts and weights.
        computed: f64,
    },
    /// Report style name was not recognised.
    #[error("unknown report style `{0}` (expected `plain`, `aligned` or `weighted`)")]
    UnknownReportStyle(String),
}

#[cfg(test)]
mod tests {
    use super::ConfigError;
    use crate::Category;

    #[test]
    fn messages_name_the_offending_category() {
        let error = ConfigError::NegativeWeight {
            category: Category::JumpOrBranch,
            value: -1.5,
        };
        assert_eq!(
            error.to_string(),
            "weight for Jump/Branch must not be negative (got -1.5)"
        );
    }

    #[test]
    fn count_mismatch_reports_both_sides() {
        let error = ConfigError::WeightCount {
            expected: 5,
            found: 3,
        };
        assert_eq!(error.to_string(), "expected 5 weights, found 3");
    }

    #[test]
    fn snapshot_total_mismatch_reports_both_sides() {
        let error = ConfigError::SnapshotTotal {
            stated: 7,
            counted: 1,
        };
        assert_eq!(
            error.to_string(),
            "snapshot total 7 does not match its counts (sum 1)"
        );
    }
}
