//! Raw Monte Carlo samples for one month.

use super::month::Month;
use super::types::{HOURS_PER_DAY, HourlyLoad};

/// All trials of the system load for one month, one `HourlyLoad` per trial.
#[derive(Debug, Clone)]
pub struct MonthTrials {
    pub month: Month,
    pub loads: Vec<HourlyLoad>,
}

impl MonthTrials {
    /// Creates an empty sample set for `month`.
    pub fn new(month: Month) -> Self {
        Self {
            month,
            loads: Vec::new(),
        }
    }

    /// Creates an empty sample set with room for `trials` samples.
    pub fn with_capacity(month: Month, trials: usize) -> Self {
        Self {
            month,
            loads: Vec::with_capacity(trials),
        }
    }

    pub fn push(&mut self, load: HourlyLoad) {
        self.loads.push(load);
    }

    pub fn len(&self) -> usize {
        self.loads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }

    /// The load at `hour` across all trials (kW).
    pub fn hour_samples(&self, hour: usize) -> Vec<f32> {
        self.loads.iter().map(|l| l[hour]).collect()
    }

    /// Energy drawn over each trial day (kWh). Steps are one hour long, so
    /// this is the sum of hourly kW.
    pub fn daily_energy_kwh(&self) -> Vec<f32> {
        self.loads.iter().map(|l| l.iter().sum()).collect()
    }

    /// Per-hour samples for all 24 hours, indexed `[hour][trial]`.
    pub fn by_hour(&self) -> Vec<Vec<f32>> {
        (0..HOURS_PER_DAY).map(|h| self.hour_samples(h)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_energy_sums_hours() {
        let mut t = MonthTrials::new(Month::Mar);
        t.push([1.0; HOURS_PER_DAY]);
        t.push([0.5; HOURS_PER_DAY]);
        assert_eq!(t.daily_energy_kwh(), vec![24.0, 12.0]);
        assert_eq!(t.hour_samples(3), vec![1.0, 0.5]);
        assert_eq!(t.by_hour().len(), HOURS_PER_DAY);
    }
}
