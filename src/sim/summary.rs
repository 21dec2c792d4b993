//! Headline figures derived from the summary tables.

use std::fmt;

use serde::Serialize;

use super::month::{MONTHS_PER_YEAR, Month};
use super::results::LoadResults;

/// Aggregate indicators of a complete year of Monte Carlo results.
///
/// Computed post-hoc from [`LoadResults`] so printed, exported and served
/// numbers always agree.
#[derive(Debug, Clone, Serialize)]
pub struct LoadSummary {
    /// Trials per month.
    pub trials: usize,
    /// Reported percentile.
    pub percentile: f32,
    /// Expected yearly energy: mean daily energy times days in each month (kWh).
    pub annual_energy_kwh: f32,
    /// Mean energy per day for each month, January first (kWh).
    pub mean_daily_energy_kwh: [f32; MONTHS_PER_YEAR],
    /// Highest hourly mean load (kW).
    pub peak_mean_kw: f32,
    /// Hour of day of the highest mean load.
    pub peak_mean_hour: usize,
    /// Month of the highest mean load.
    pub peak_mean_month: Month,
    /// Highest hourly percentile load (kW); a sizing value for generation.
    pub peak_percentile_kw: f32,
    /// Largest relative variability (std / mean) over all hours and months.
    pub max_variability: f32,
}

impl LoadSummary {
    /// Computes all indicators from the summary tables.
    pub fn from_results(results: &LoadResults) -> Self {
        let mut mean_daily = [0.0; MONTHS_PER_YEAR];
        let mut annual = 0.0;
        for month in Month::ALL {
            let daily = results.mean.daily_total(month);
            mean_daily[month.index()] = daily;
            annual += daily * month.days() as f32;
        }
        let (peak_mean_kw, peak_mean_hour, peak_mean_month) = results.mean.max();
        let (peak_percentile_kw, _, _) = results.percentile.max();
        let (max_variability, _, _) = results.variability.max();

        Self {
            trials: results.trials,
            percentile: results.percentile_rank,
            annual_energy_kwh: annual,
            mean_daily_energy_kwh: mean_daily,
            peak_mean_kw,
            peak_mean_hour,
            peak_mean_month,
            peak_percentile_kw,
            max_variability,
        }
    }
}

impl fmt::Display for LoadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Load Summary ---")?;
        writeln!(f, "Trials per month:      {}", self.trials)?;
        writeln!(f, "Annual energy:         {:.1} kWh", self.annual_energy_kwh)?;
        writeln!(
            f,
            "Peak mean load:        {:.3} kW ({} {:02}:00)",
            self.peak_mean_kw, self.peak_mean_month, self.peak_mean_hour
        )?;
        writeln!(
            f,
            "Peak P{} load:         {:.3} kW",
            self.percentile, self.peak_percentile_kw
        )?;
        writeln!(f, "Max variability:       {:.1}%", self.max_variability * 100.0)?;
        write!(f, "Daily energy (kWh):   ")?;
        for month in Month::ALL {
            write!(
                f,
                " {}={:.2}",
                month,
                self.mean_daily_energy_kwh[month.index()]
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::trials::MonthTrials;
    use crate::sim::types::HOURS_PER_DAY;

    fn flat_year(kw: f32) -> Vec<MonthTrials> {
        Month::ALL
            .iter()
            .map(|&m| {
                let mut t = MonthTrials::new(m);
                t.push([kw; HOURS_PER_DAY]);
                t.push([kw; HOURS_PER_DAY]);
                t
            })
            .collect()
    }

    #[test]
    fn annual_energy_weights_days_per_month() {
        let results = LoadResults::from_trials(&flat_year(1.0), 90.0);
        let summary = LoadSummary::from_results(&results);
        assert!((summary.annual_energy_kwh - 24.0 * 365.0).abs() < 0.5);
        assert!((summary.mean_daily_energy_kwh[1] - 24.0).abs() < 1e-4);
    }

    #[test]
    fn peak_is_located() {
        let mut year = flat_year(1.0);
        year[6].loads[0][20] = 5.0;
        let results = LoadResults::from_trials(&year, 100.0);
        let summary = LoadSummary::from_results(&results);
        assert!((summary.peak_mean_kw - 3.0).abs() < 1e-6);
        assert_eq!(summary.peak_mean_hour, 20);
        assert_eq!(summary.peak_mean_month, Month::Jul);
        assert!((summary.peak_percentile_kw - 5.0).abs() < 1e-6);
    }

    #[test]
    fn display_has_headline_lines() {
        let results = LoadResults::from_trials(&flat_year(0.5), 90.0);
        let s = format!("{}", LoadSummary::from_results(&results));
        assert!(s.contains("Annual energy:"));
        assert!(s.contains("Peak mean load:"));
        assert!(s.contains("Peak P90 load:"));
    }
}
