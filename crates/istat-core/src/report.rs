//! Textual dump of a statistics snapshot.
//!
//! Line layout and one-decimal rounding match the dump file consumed by
//! existing tooling.

use std::fmt;
use std::io;
use std::str::FromStr;

use crate::{ConfigError, StatsSnapshot};

/// Label of the trailing estimate line.
pub const FINAL_CYCLE_LABEL: &str = "Final Cycle";

/// Field width of right-aligned labels in [`ReportStyle::Aligned`].
pub const ALIGNED_LABEL_WIDTH: usize = 15;

/// Line layout of a rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ReportStyle {
    /// `Division: 3` ... `Final Cycle: 150.0`.
    #[default]
    Plain,
    /// Labels right-aligned to [`ALIGNED_LABEL_WIDTH`] columns.
    Aligned,
    /// `Division (25.0): 3` ... `Final Cycle: 75.0`.
    Weighted,
}

impl ReportStyle {
    /// Stable lowercase name, accepted back by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Aligned => "aligned",
            Self::Weighted => "weighted",
        }
    }
}

impl fmt::Display for ReportStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReportStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "aligned" => Ok(Self::Aligned),
            "weighted" => Ok(Self::Weighted),
            _ => Err(ConfigError::UnknownReportStyle(s.to_string())),
        }
    }
}

/// Borrowed view rendering a snapshot as text.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    snapshot: &'a StatsSnapshot,
    style: ReportStyle,
}

impl<'a> Report<'a> {
    /// Wraps a snapshot for rendering.
    #[must_use]
    pub const fn new(snapshot: &'a StatsSnapshot, style: ReportStyle) -> Self {
        Self { snapshot, style }
    }

    /// Style used when rendering.
    #[must_use]
    pub const fn style(&self) -> ReportStyle {
        self.style
    }

    /// Streams the report into `writer`.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by `writer`.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        write!(writer, "{self}")?;
        writer.flush()
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = ALIGNED_LABEL_WIDTH;
        let style = self.style();
        for row in self.snapshot.rows() {
            match style {
                ReportStyle::Plain => writeln!(f, "{}: {}", row.label, row.count)?,
                ReportStyle::Aligned => writeln!(f, "{:>width$}: {}", row.label, row.count)?,
                ReportStyle::Weighted => writeln!(
                    f,
                    "{} ({}): {}",
                    row.label,
                    format_tenths(row.weight),
                    row.count
                )?,
            }
        }

        let estimate = format_tenths(self.snapshot.estimated_cycles);
        match style {
            ReportStyle::Aligned => writeln!(f, "{FINAL_CYCLE_LABEL:>width$}: {estimate}"),
            ReportStyle::Plain | ReportStyle::Weighted => {
                writeln!(f, "{FINAL_CYCLE_LABEL}: {estimate}")
            }
        }
    }
}

/// Formats `value` with exactly one decimal, rounding half away from zero.
///
/// Rounding is applied to the shortest decimal representation that
/// round-trips to `value`, so `0.15` renders as `0.2` and `0.25` as `0.3`.
/// Non-finite values fall back to the standard formatter.
#[must_use]
pub fn format_tenths(value: f64) -> String {
    if !value.is_finite() {
        return format!("{value:.1}");
    }

    let shortest = value.abs().to_string();
    let (int_part, frac_part) = shortest
        .split_once('.')
        .unwrap_or((shortest.as_str(), ""));
    let mut frac_digits = frac_part.bytes();
    let tenths = frac_digits.next().unwrap_or(b'0');
    let round_up = frac_digits.next().is_some_and(|d| d >= b'5');

    // Digits of `value * 10` truncated, most significant first.
    let mut digits: Vec<u8> = int_part.bytes().map(|d| d - b'0').collect();
    digits.push(tenths - b'0');

    if round_up {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if !carry {
                break;
            }
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
            }
        }
        if carry {
            digits.insert(0, 1);
        }
    }

    let is_zero = digits.iter().all(|d| *d == 0);
    let split = digits.len() - 1;
    let mut out = String::with_capacity(digits.len() + 2);
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    out.extend(digits[..split].iter().map(|d| char::from(b'0' + d)));
    out.push('.');
    out.push(char::from(b'0' + digits[split]));
    out
}
