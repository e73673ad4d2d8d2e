use std::fmt;

/// Coarse instruction classes tracked by the statistics accumulator.
///
/// The discriminant is the stable ordinal used both as an array index and as
/// the display order of every report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
pub enum Category {
    /// Integer and floating-point divide.
    Division = 0,
    /// Integer and floating-point multiply, multiply-accumulate.
    Multiply = 1,
    /// Jumps, calls and conditional branches.
    JumpOrBranch = 2,
    /// Loads and stores.
    Memory = 3,
    /// Everything else, including encodings the table does not know.
    Other = 4,
}

/// Number of categories.
pub const CATEGORY_COUNT: usize = 5;

impl Category {
    /// All categories in ordinal order.
    pub const ALL: [Self; CATEGORY_COUNT] = [
        Self::Division,
        Self::Multiply,
        Self::JumpOrBranch,
        Self::Memory,
        Self::Other,
    ];

    /// Returns the ordinal of this category.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Converts an ordinal back into a category.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Division),
            1 => Some(Self::Multiply),
            2 => Some(Self::JumpOrBranch),
            3 => Some(Self::Memory),
            4 => Some(Self::Other),
            _ => None,
        }
    }

    /// Human-readable label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Division => "Division",
            Self::Multiply => "Multiply",
            Self::JumpOrBranch => "Jump/Branch",
            Self::Memory => "Memory",
            Self::Other => "Others",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, CATEGORY_COUNT};

    #[test]
    fn ordinals_match_display_order() {
        for (index, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.index(), index);
            assert_eq!(Category::from_index(index), Some(*category));
        }
        assert_eq!(Category::from_index(CATEGORY_COUNT), None);
    }

    #[test]
    fn labels_are_stable() {
        let labels: Vec<_> = Category::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(
            labels,
            ["Division", "Multiply", "Jump/Branch", "Memory", "Others"]
        );
        assert_eq!(Category::JumpOrBranch.to_string(), "Jump/Branch");
    }
}
