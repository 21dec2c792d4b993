//! Daily energy per trial and its spread across trials, month by month.

use serde::Serialize;

use super::month::Month;
use super::stats::BoxStats;
use super::trials::MonthTrials;
use super::types::HourlyLoad;

/// One simulated day: the hourly system load and its total energy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyEnergy {
    pub month: Month,
    pub trial: usize,
    pub hourly_kw: HourlyLoad,
    pub daily_sum_kwh: f32,
}

/// Spread of daily energy (kWh per day) across the trials of one month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthDailyStats {
    pub month: Month,
    pub trials: usize,
    pub daily_kwh: BoxStats,
}

/// Flattens every trial of every month into [`DailyEnergy`] rows, months in
/// the order given and trials in simulation order.
pub fn daily_energy(trials: &[MonthTrials]) -> Vec<DailyEnergy> {
    trials
        .iter()
        .flat_map(|mt| {
            mt.loads.iter().enumerate().map(move |(trial, load)| DailyEnergy {
                month: mt.month,
                trial,
                hourly_kw: *load,
                daily_sum_kwh: load.iter().sum(),
            })
        })
        .collect()
}

/// Box-plot statistics of daily energy for each month present in `trials`.
pub fn monthly_daily_stats(trials: &[MonthTrials]) -> Vec<MonthDailyStats> {
    trials
        .iter()
        .map(|mt| MonthDailyStats {
            month: mt.month,
            trials: mt.len(),
            daily_kwh: BoxStats::from_samples(&mt.daily_energy_kwh()),
        })
        .collect()
}
