//! End-to-end runs: configuration to engine to summarised results.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::ScenarioConfig;
use crate::error::Result;
use crate::io::{export, homer};
use crate::sim::daily::{self, MonthDailyStats};
use crate::sim::detailed::DetailedBreakdown;
use crate::sim::engine::Engine;
use crate::sim::results::{LoadResults, Statistic};
use crate::sim::summary::LoadSummary;
use crate::sim::trials::MonthTrials;
use crate::sim::types::SimConfig;

/// File name for the daily energy export.
pub const DAILY_FILE: &str = "daily_energy.csv";
/// File name for the per-device export.
pub const DETAILED_FILE: &str = "detailed_load.csv";

/// File name for a HOMER series built from `statistic`.
pub fn homer_file_name(statistic: Statistic) -> String {
    format!("homer_{statistic}_load.txt")
}

/// Everything produced by one year of Monte Carlo trials.
pub struct SimulationRun {
    pub config: SimConfig,
    pub trials: Vec<MonthTrials>,
    pub results: LoadResults,
    pub summary: LoadSummary,
}

impl SimulationRun {
    /// Box statistics of daily energy for each month.
    pub fn daily_stats(&self) -> Vec<MonthDailyStats> {
        daily::monthly_daily_stats(&self.trials)
    }
}

/// Validates `cfg`, loads its inventory and builds an engine.
///
/// # Errors
///
/// Returns the first validation error, or any inventory loading error.
pub fn build_engine(cfg: &ScenarioConfig) -> Result<Engine> {
    if let Some(err) = cfg.validate().into_iter().next() {
        return Err(err.into());
    }
    let inventory = cfg.load_inventory()?;
    Ok(Engine::new(cfg.sim_config(), inventory))
}

/// Runs every month and summarises the trials.
pub fn run_year(engine: &mut Engine) -> SimulationRun {
    let trials = engine.run_year();
    let config = engine.config().clone();
    let results = LoadResults::from_trials(&trials, config.percentile);
    let summary = LoadSummary::from_results(&results);
    info!(
        annual_kwh = summary.annual_energy_kwh,
        peak_kw = summary.peak_percentile_kw,
        "simulation complete"
    );
    SimulationRun {
        config,
        trials,
        results,
        summary,
    }
}

/// Which optional files to write next to the four summary tables.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub daily: bool,
    pub detailed: bool,
    pub homer: Option<Statistic>,
}

/// Draws the per-device breakdown and logs mean daily energy per device and
/// per device type.
pub fn detailed_breakdown(engine: &mut Engine) -> DetailedBreakdown {
    let trials = engine.config().trials;
    let breakdown = DetailedBreakdown::new(engine.detailed(), trials);
    for (device, kwh) in breakdown.mean_daily_energy_by_device() {
        info!(%device, daily_kwh = kwh, "mean daily device energy");
    }
    for (device_type, kwh) in breakdown.mean_daily_energy_by_type() {
        info!(%device_type, daily_kwh = kwh, "mean daily energy by device type");
    }
    breakdown
}

/// Writes the summary tables and any requested extra files to `dir`.
///
/// The detailed breakdown draws fresh trials from `engine`, so it is
/// statistically equivalent to, not identical with, the summarised run.
///
/// # Returns
///
/// Every path written.
///
/// # Errors
///
/// Returns an error if any file cannot be written.
pub fn write_outputs(
    engine: &mut Engine,
    run: &SimulationRun,
    dir: &Path,
    decimals: usize,
    options: &ExportOptions,
) -> Result<Vec<PathBuf>> {
    let mut written = export::write_hourly_tables(&run.results, dir, decimals)?;

    if options.daily {
        let path = dir.join(DAILY_FILE);
        export::export_daily_energy(&daily::daily_energy(&run.trials), &path, decimals)?;
        written.push(path);
    }

    if options.detailed {
        let breakdown = detailed_breakdown(engine);
        let path = dir.join(DETAILED_FILE);
        export::export_detailed(breakdown.records(), &path, decimals)?;
        written.push(path);
    }

    if let Some(statistic) = options.homer {
        let path = dir.join(homer_file_name(statistic));
        homer::export_series(run.results.table(statistic), &path, decimals)?;
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quick_preset_runs_a_full_year() {
        let cfg = ScenarioConfig::quick();
        let engine = build_engine(&cfg);
        assert!(engine.is_ok());
        let Ok(mut engine) = engine else { return };
        let run = run_year(&mut engine);
        assert_eq!(run.trials.len(), 12);
        assert!(run.trials.iter().all(|t| t.len() == 20));
        assert!(run.summary.annual_energy_kwh > 0.0);
        assert_eq!(run.daily_stats().len(), 12);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut cfg = ScenarioConfig::quick();
        cfg.simulation.trials = 0;
        assert!(build_engine(&cfg).is_err());
    }

    #[test]
    fn detailed_breakdown_covers_every_device_type() {
        let mut cfg = ScenarioConfig::quick();
        cfg.simulation.trials = 3;
        let mut engine = build_engine(&cfg).expect("quick preset should build");
        let breakdown = detailed_breakdown(&mut engine);

        let by_type = breakdown.mean_daily_energy_by_type();
        let types: Vec<&str> = by_type.keys().map(String::as_str).collect();
        let expected: Vec<&str> = engine.inventory().device_types().into_iter().collect();
        assert_eq!(types, expected);

        let type_total: f32 = by_type.values().sum();
        let device_total: f32 = breakdown.mean_daily_energy_by_device().values().sum();
        assert!((type_total - device_total).abs() < 1e-2);
    }

    #[test]
    fn homer_file_name_uses_statistic() {
        assert_eq!(homer_file_name(Statistic::Mean), "homer_mean_load.txt");
        assert_eq!(
            homer_file_name(Statistic::Percentile),
            "homer_percentile_load.txt"
        );
    }
}
