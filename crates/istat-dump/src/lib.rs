//! Headless driver for instruction statistics: trace parsing, replay and
//! dump file writing.

use tracing_subscriber as _;

/// Trace replay and report file output.
pub mod dump;
/// Text fetch-trace format.
pub mod trace;

pub use dump::{load_trace, run_trace, write_report, DumpError, DEFAULT_OUTPUT};
pub use trace::{parse_line, parse_trace, read_trace, TraceError, TraceErrorKind};
