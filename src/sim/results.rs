//! Hour-by-month summary tables of the Monte Carlo trials.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::month::{MONTHS_PER_YEAR, Month};
use super::stats;
use super::trials::MonthTrials;
use super::types::{HOURS_PER_DAY, HourlyLoad};

/// A 24-hour by 12-month table of load values (kW, or a ratio for
/// variability).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyTable {
    values: [[f32; MONTHS_PER_YEAR]; HOURS_PER_DAY],
}

impl Default for HourlyTable {
    fn default() -> Self {
        Self {
            values: [[0.0; MONTHS_PER_YEAR]; HOURS_PER_DAY],
        }
    }
}

impl HourlyTable {
    pub fn get(&self, hour: usize, month: Month) -> f32 {
        self.values[hour][month.index()]
    }

    pub fn set(&mut self, hour: usize, month: Month, value: f32) {
        self.values[hour][month.index()] = value;
    }

    /// The 24 hourly values of one month.
    pub fn month_column(&self, month: Month) -> HourlyLoad {
        let mut column = [0.0; HOURS_PER_DAY];
        for (h, v) in column.iter_mut().enumerate() {
            *v = self.values[h][month.index()];
        }
        column
    }

    /// Rows in hour order, each holding the 12 monthly values.
    pub fn rows(&self) -> impl Iterator<Item = (usize, &[f32; MONTHS_PER_YEAR])> {
        self.values.iter().enumerate()
    }

    /// Largest value with the hour and month it occurs in; the first one
    /// wins on ties.
    pub fn max(&self) -> (f32, usize, Month) {
        let mut best = (f32::NEG_INFINITY, 0, Month::Jan);
        for (h, row) in self.values.iter().enumerate() {
            for month in Month::ALL {
                let v = row[month.index()];
                if v > best.0 {
                    best = (v, h, month);
                }
            }
        }
        best
    }

    /// Sum of the 24 hourly values of `month`; kWh per day for load tables.
    pub fn daily_total(&self, month: Month) -> f32 {
        self.month_column(month).iter().sum()
    }
}

/// Which summary table to select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
    Mean,
    StdDev,
    Variability,
    Percentile,
}

impl Statistic {
    pub const ALL: [Statistic; 4] = [
        Statistic::Mean,
        Statistic::StdDev,
        Statistic::Variability,
        Statistic::Percentile,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Statistic::Mean => "mean",
            Statistic::StdDev => "std_dev",
            Statistic::Variability => "variability",
            Statistic::Percentile => "percentile",
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Statistic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mean" => Ok(Statistic::Mean),
            "std_dev" | "std" | "standard_deviation" => Ok(Statistic::StdDev),
            "variability" | "percentage_variability" => Ok(Statistic::Variability),
            "percentile" => Ok(Statistic::Percentile),
            other => Err(format!(
                "unknown statistic \"{other}\", expected one of: mean, std_dev, variability, percentile"
            )),
        }
    }
}

/// Mean, standard deviation, relative variability and percentile of the
/// system load for each hour of each month.
#[derive(Debug, Clone, Serialize)]
pub struct LoadResults {
    /// Percentile used for [`LoadResults::percentile`].
    pub percentile_rank: f32,
    /// Number of trials per month the tables were computed from.
    pub trials: usize,
    pub mean: HourlyTable,
    pub std_dev: HourlyTable,
    /// `std_dev / mean`; 0 where the mean is 0.
    pub variability: HourlyTable,
    pub percentile: HourlyTable,
}

impl LoadResults {
    /// Summarises the trials of every month.
    ///
    /// Months absent from `trials` stay zero in every table. When a month
    /// appears more than once the last occurrence wins.
    pub fn from_trials(trials: &[MonthTrials], percentile_rank: f32) -> Self {
        let mut out = Self {
            percentile_rank,
            trials: trials.iter().map(MonthTrials::len).max().unwrap_or(0),
            mean: HourlyTable::default(),
            std_dev: HourlyTable::default(),
            variability: HourlyTable::default(),
            percentile: HourlyTable::default(),
        };
        for month_trials in trials {
            let month = month_trials.month;
            for (hour, samples) in month_trials.by_hour().iter().enumerate() {
                let mean = stats::mean(samples);
                let std_dev = stats::sample_std_dev(samples);
                let variability = if mean > 0.0 { std_dev / mean } else { 0.0 };
                out.mean.set(hour, month, mean);
                out.std_dev.set(hour, month, std_dev);
                out.variability.set(hour, month, variability);
                out.percentile
                    .set(hour, month, stats::percentile(samples, percentile_rank));
            }
        }
        out
    }

    /// The table for `statistic`.
    pub fn table(&self, statistic: Statistic) -> &HourlyTable {
        match statistic {
            Statistic::Mean => &self.mean,
            Statistic::StdDev => &self.std_dev,
            Statistic::Variability => &self.variability,
            Statistic::Percentile => &self.percentile,
        }
    }
}
