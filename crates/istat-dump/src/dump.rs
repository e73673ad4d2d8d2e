//! Headless replay of a fetch trace into a statistics dump file.

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use istat_core::{Accumulator, ConfigError, FetchEvent, ReportStyle, StatsConfig, StatsSnapshot};
use thiserror::Error;
use tracing::info;

use crate::trace::{read_trace, TraceError};

/// Output file written when no path is given.
pub const DEFAULT_OUTPUT: &str = "InstructionStatistics.txt";

/// Failure of a headless dump run.
#[derive(Debug, Error)]
pub enum DumpError {
    /// The trace file could not be opened.
    #[error("failed to open {}: {source}", path.display())]
    Open {
        /// Trace path.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// The trace contents were malformed or unreadable.
    #[error("{}: {source}", path.display())]
    Trace {
        /// Trace path.
        path: PathBuf,
        /// Underlying error.
        source: TraceError,
    },
    /// A preset, table, style or weight value was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The report could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Report path.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
}

/// Reads and parses the trace file at `path`.
///
/// # Errors
///
/// Returns [`DumpError::Open`] when the file cannot be opened and
/// [`DumpError::Trace`] when its contents are malformed.
pub fn load_trace(path: &Path) -> Result<Vec<FetchEvent>, DumpError> {
    let file = File::open(path).map_err(|source| DumpError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_trace(BufReader::new(file)).map_err(|source| DumpError::Trace {
        path: path.to_path_buf(),
        source,
    })
}

/// Replays `events` into a fresh accumulator and returns the final snapshot.
pub fn run_trace<I>(config: StatsConfig, events: I) -> StatsSnapshot
where
    I: IntoIterator<Item = FetchEvent>,
{
    let mut accumulator = Accumulator::new(config);
    let mut fetches = 0usize;
    for event in events {
        accumulator.observe(event);
        fetches += 1;
    }

    let snapshot = accumulator.snapshot();
    info!(
        fetches,
        counted = snapshot.total,
        estimated_cycles = snapshot.estimated_cycles,
        "trace replayed"
    );
    snapshot
}

/// Writes the rendered report to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`DumpError::Write`] when the file cannot be created or written.
pub fn write_report(
    path: &Path,
    snapshot: &StatsSnapshot,
    style: ReportStyle,
) -> Result<(), DumpError> {
    let to_write_error = |source: io::Error| DumpError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(to_write_error)?;
    snapshot
        .report(style)
        .write_to(BufWriter::new(file))
        .map_err(to_write_error)?;
    info!(path = %path.display(), %style, "statistics written");
    Ok(())
}
