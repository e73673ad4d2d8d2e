//! Instruction-category statistics for MIPS-like 32-bit instruction streams.
//!
//! Words are classified into five coarse categories and counted once per
//! admitted fetch; a weighted sum of the counts gives a rough cycle estimate.

/// Instruction categories and their stable ordinals.
pub mod category;
pub use category::{Category, CATEGORY_COUNT};

/// Opcode/funct field extraction and named field values.
pub mod encoding;
pub use encoding::{decode_opcode_funct, encode_opcode_funct, funct_of, opcode_of};

/// Configuration error taxonomy.
pub mod error;
pub use error::ConfigError;

/// Total word-to-category classifier.
pub mod decoder;
pub use decoder::{classify, DecodeTable};

/// Per-category cycle weights and presets.
pub mod timing;
pub use timing::{table_weight, CategoryWeights, CLASSIC_WEIGHT_TABLE, EXTENDED_WEIGHT_TABLE};

/// Host-facing configuration, fetch event and snapshot types.
pub mod api;
pub use api::{CategoryRow, FetchEvent, StatsConfig, StatsPreset, StatsSnapshot};

/// Owned per-run counters.
pub mod accumulator;
pub use accumulator::Accumulator;

/// Textual dump rendering.
pub mod report;
pub use report::{format_tenths, Report, ReportStyle, FINAL_CYCLE_LABEL};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use serde_json as _;
