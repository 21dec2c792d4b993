//! Per-device, per-hour breakdown of simulated load.

use std::collections::BTreeMap;

use serde::Serialize;

use super::month::{MONTHS_PER_YEAR, Month};

/// Load of one device type in one hour of one trial.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailedRecord {
    pub trial: usize,
    pub device: String,
    pub device_type: String,
    pub month: Month,
    pub hour: usize,
    /// Energy drawn over the hour (kWh), equal to the hourly load in kW.
    pub load_kwh: f32,
}

/// Grouping helpers over the records produced by
/// [`super::engine::Engine::detailed`].
#[derive(Debug, Clone)]
pub struct DetailedBreakdown {
    records: Vec<DetailedRecord>,
    trials: usize,
}

impl DetailedBreakdown {
    /// Wraps records generated from `trials` Monte Carlo trials.
    pub fn new(records: Vec<DetailedRecord>, trials: usize) -> Self {
        Self { records, trials }
    }

    pub fn records(&self) -> &[DetailedRecord] {
        &self.records
    }

    /// Mean daily energy (kWh) per key, averaged over trials and months.
    fn mean_daily_by<'a>(
        &'a self,
        key: impl Fn(&'a DetailedRecord) -> &'a str,
    ) -> BTreeMap<String, f32> {
        let mut totals: BTreeMap<String, f32> = BTreeMap::new();
        for r in &self.records {
            *totals.entry(key(r).to_string()).or_default() += r.load_kwh;
        }
        let days = (self.trials * MONTHS_PER_YEAR).max(1) as f32;
        for v in totals.values_mut() {
            *v /= days;
        }
        totals
    }

    /// Mean daily energy (kWh) of each device, averaged over the year.
    pub fn mean_daily_energy_by_device(&self) -> BTreeMap<String, f32> {
        self.mean_daily_by(|r| r.device.as_str())
    }

    /// Mean daily energy (kWh) of each device category.
    pub fn mean_daily_energy_by_type(&self) -> BTreeMap<String, f32> {
        self.mean_daily_by(|r| r.device_type.as_str())
    }
}
