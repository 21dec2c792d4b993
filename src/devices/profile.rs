//! Hour-by-month utilisation probabilities for a device type.

use serde::Serialize;

use crate::sim::month::{MONTHS_PER_YEAR, Month};
use crate::sim::types::{HOURS_PER_DAY, HourlyLoad};

/// Probability that any one device of a type is switched on, for each hour
/// of the day (rows) and month of the year (columns).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UtilisationProfile {
    values: [[f32; MONTHS_PER_YEAR]; HOURS_PER_DAY],
}

impl UtilisationProfile {
    /// A profile with every entry equal to zero.
    pub fn zeros() -> Self {
        Self {
            values: [[0.0; MONTHS_PER_YEAR]; HOURS_PER_DAY],
        }
    }

    /// A profile with the same probability in every hour and month.
    ///
    /// The probability is clamped into `[0, 1]`.
    pub fn constant(p: f32) -> Self {
        Self {
            values: [[p.clamp(0.0, 1.0); MONTHS_PER_YEAR]; HOURS_PER_DAY],
        }
    }

    /// Builds a profile from a daily shape scaled by a per-month factor.
    ///
    /// Each entry is `hourly[h] * monthly[m]`, clamped into `[0, 1]`.
    pub fn from_shape(hourly: &HourlyLoad, monthly: &[f32; MONTHS_PER_YEAR]) -> Self {
        let mut values = [[0.0; MONTHS_PER_YEAR]; HOURS_PER_DAY];
        for (h, row) in values.iter_mut().enumerate() {
            for (m, cell) in row.iter_mut().enumerate() {
                *cell = (hourly[h] * monthly[m]).clamp(0.0, 1.0);
            }
        }
        Self { values }
    }

    /// Builds a profile from 24 rows of 12 probabilities.
    ///
    /// # Errors
    ///
    /// Returns a description of the first problem found: wrong row count,
    /// wrong column count, or a value that is not a probability.
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self, String> {
        if rows.len() != HOURS_PER_DAY {
            return Err(format!(
                "expected {HOURS_PER_DAY} rows (one per hour), found {}",
                rows.len()
            ));
        }
        let mut values = [[0.0; MONTHS_PER_YEAR]; HOURS_PER_DAY];
        for (h, row) in rows.iter().enumerate() {
            if row.len() != MONTHS_PER_YEAR {
                return Err(format!(
                    "hour {h}: expected {MONTHS_PER_YEAR} columns (one per month), found {}",
                    row.len()
                ));
            }
            for (m, &p) in row.iter().enumerate() {
                if !(0.0..=1.0).contains(&p) {
                    return Err(format!(
                        "hour {h}, month {}: {p} is not a probability in [0, 1]",
                        Month::ALL[m]
                    ));
                }
                values[h][m] = p;
            }
        }
        Ok(Self { values })
    }

    /// On-probability at `hour` (0-23) in `month`.
    ///
    /// # Panics
    ///
    /// Panics if `hour >= 24`.
    pub fn probability(&self, hour: usize, month: Month) -> f32 {
        self.values[hour][month.index()]
    }

    /// The 24 hourly probabilities for one month.
    pub fn month_column(&self, month: Month) -> HourlyLoad {
        let mut column = [0.0; HOURS_PER_DAY];
        for (h, cell) in column.iter_mut().enumerate() {
            *cell = self.values[h][month.index()];
        }
        column
    }

    /// Expected number of device-hours switched on per day in `month`.
    pub fn expected_daily_hours(&self, month: Month) -> f32 {
        self.month_column(month).iter().sum()
    }
}
