//! Text fetch-trace parsing.
//!
//! A trace holds one fetch per line:
//!
//! ```text
//! # address  word
//! 0x00400000 0x2008000a
//! 00400004   8d090000
//! 0x00400008 -
//! ```
//!
//! Both fields are hexadecimal with an optional `0x` prefix. A word of `-`
//! records a fetch that produced no instruction. Blank lines and lines whose
//! first non-blank character is `#` are skipped.

use std::io::{self, BufRead};

use istat_core::FetchEvent;
use thiserror::Error;
use tracing::debug;

/// Word placeholder for a fetch without an instruction.
pub const NO_WORD: &str = "-";

/// What was wrong with a single trace line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceErrorKind {
    /// The line holds an address but no word.
    #[error("missing instruction word")]
    MissingField,
    /// The line holds more than two fields.
    #[error("unexpected trailing field `{0}`")]
    ExtraField(String),
    /// The address is not a 64-bit hex number.
    #[error("invalid address `{0}`")]
    InvalidAddress(String),
    /// The word is neither `-` nor a 32-bit hex number.
    #[error("invalid instruction word `{0}`")]
    InvalidWord(String),
    /// The line is not valid UTF-8.
    #[error("line is not valid UTF-8")]
    InvalidEncoding,
}

/// Failure while reading a trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// A line could not be parsed.
    #[error("line {line}: {kind}")]
    Syntax {
        /// 1-based line number.
        line: usize,
        /// Problem found on that line.
        kind: TraceErrorKind,
    },
    /// The underlying reader failed.
    #[error("failed to read trace: {0}")]
    Io(#[from] io::Error),
}

impl TraceError {
    /// Line number of a syntax error.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::Syntax { line, .. } => Some(*line),
            Self::Io(_) => None,
        }
    }
}

/// Parses one trace line. Returns `Ok(None)` for blank and comment lines.
///
/// # Errors
///
/// Returns the [`TraceErrorKind`] describing the first malformed field.
pub fn parse_line(line: &str) -> Result<Option<FetchEvent>, TraceErrorKind> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut fields = line.split_whitespace();
    let Some(address_field) = fields.next() else {
        return Ok(None);
    };
    let word_field = fields.next().ok_or(TraceErrorKind::MissingField)?;
    if let Some(extra) = fields.next() {
        return Err(TraceErrorKind::ExtraField(extra.to_string()));
    }

    let address = parse_hex(address_field)
        .and_then(|digits| u64::from_str_radix(digits, 16).ok())
        .ok_or_else(|| TraceErrorKind::InvalidAddress(address_field.to_string()))?;

    if word_field == NO_WORD {
        return Ok(Some(FetchEvent::empty(address)));
    }
    let word = parse_hex(word_field)
        .and_then(|digits| u32::from_str_radix(digits, 16).ok())
        .ok_or_else(|| TraceErrorKind::InvalidWord(word_field.to_string()))?;

    Ok(Some(FetchEvent::instruction(address, word)))
}

fn parse_hex(field: &str) -> Option<&str> {
    let digits = field
        .strip_prefix("0x")
        .or_else(|| field.strip_prefix("0X"))
        .unwrap_or(field);
    (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_hexdigit())).then_some(digits)
}

/// Reads every fetch event from `reader`.
///
/// # Errors
///
/// Returns [`TraceError::Syntax`] for the first malformed line and
/// [`TraceError::Io`] when reading fails.
pub fn read_trace<R: BufRead>(reader: R) -> Result<Vec<FetchEvent>, TraceError> {
    let mut events = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let syntax = |kind: TraceErrorKind| TraceError::Syntax {
            line: index + 1,
            kind,
        };
        let line = match line {
            Ok(line) => line,
            Err(error) if error.kind() == io::ErrorKind::InvalidData => {
                return Err(syntax(TraceErrorKind::InvalidEncoding));
            }
            Err(error) => return Err(error.into()),
        };
        let event = parse_line(&line).map_err(syntax)?;
        events.extend(event);
    }
    debug!(events = events.len(), "parsed fetch trace");
    Ok(events)
}

/// Parses a whole trace held in memory.
///
/// # Errors
///
/// Same as [`read_trace`].
pub fn parse_trace(text: &str) -> Result<Vec<FetchEvent>, TraceError> {
    read_trace(text.as_bytes())
}
