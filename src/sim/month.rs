//! Calendar months used to index utilisation profiles and results.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Number of months in the simulated year.
pub const MONTHS_PER_YEAR: usize = 12;

/// A month of a non-leap year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    /// All months in calendar order.
    pub const ALL: [Month; MONTHS_PER_YEAR] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    /// Zero-based column index (Jan = 0).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Month at zero-based `index`, if in range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Three-letter English abbreviation, as used in output headers.
    pub fn name(self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }

    /// Number of days in a non-leap year.
    pub fn days(self) -> usize {
        match self {
            Month::Feb => 28,
            Month::Apr | Month::Jun | Month::Sep | Month::Nov => 30,
            _ => 31,
        }
    }

    /// Following month, wrapping December to January.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % MONTHS_PER_YEAR]
    }

    /// Preceding month, wrapping January to December.
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + MONTHS_PER_YEAR - 1) % MONTHS_PER_YEAR]
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a month string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown month \"{0}\" (expected Jan..Dec or 1..12)")]
pub struct ParseMonthError(pub String);

impl FromStr for Month {
    type Err = ParseMonthError;

    /// Accepts a three-letter abbreviation (any case) or a 1-based number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<usize>() {
            return n
                .checked_sub(1)
                .and_then(Month::from_index)
                .ok_or_else(|| ParseMonthError(s.to_string()));
        }
        Month::ALL
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseMonthError(s.to_string()))
    }
}
