//! Incremental Monte Carlo runner and TUI application state.

use std::time::Instant;

use crate::config::ScenarioConfig;
use crate::error::Result;
use crate::runner::build_engine;
use crate::sim::engine::Engine;
use crate::sim::month::{MONTHS_PER_YEAR, Month};
use crate::sim::stats::{self, BoxStats};
use crate::sim::trials::MonthTrials;
use crate::sim::types::{HOURS_PER_DAY, HourlyLoad};

/// Tick interval options in milliseconds (slowest → fastest).
const SPEED_LEVELS_MS: [u64; 6] = [500, 250, 100, 50, 20, 5];

/// Default speed index (100 ms).
const DEFAULT_SPEED_IDX: usize = 2;

/// Running hourly statistics for one month.
pub struct MonthView {
    pub mean: HourlyLoad,
    pub percentile: HourlyLoad,
    pub daily_kwh: BoxStats,
    pub trials: usize,
}

/// TUI application state.
///
/// Trials are accumulated one per tick, month by month, in the same order
/// as a batch run, so a finished TUI session holds the same samples as
/// `load-sim` with the same scenario.
pub struct App {
    engine: Engine,
    /// Current scenario configuration (kept for restart).
    scenario: ScenarioConfig,
    /// Samples gathered so far, one entry per month.
    pub trials: Vec<MonthTrials>,
    /// Index of the month currently receiving trials.
    pub fill_idx: usize,
    /// Month shown in the chart and status panel.
    pub view_month: Month,
    /// Whether the simulation is paused.
    pub paused: bool,
    /// Current index into `SPEED_LEVELS_MS`.
    pub speed_idx: usize,
    /// Whether the user has requested quit.
    pub quit: bool,
    /// When the last simulation tick was executed.
    pub last_tick: Instant,
    /// Name of the active scenario or preset.
    pub preset_name: String,
}

fn empty_year() -> Vec<MonthTrials> {
    Month::ALL.iter().map(|&m| MonthTrials::new(m)).collect()
}

impl App {
    /// Creates a new app for a validated scenario.
    ///
    /// # Errors
    ///
    /// Returns an error if the scenario's inventory cannot be loaded.
    pub fn new(scenario: ScenarioConfig, label: &str) -> Result<Self> {
        let engine = build_engine(&scenario)?;
        Ok(Self {
            engine,
            scenario,
            trials: empty_year(),
            fill_idx: 0,
            view_month: Month::Jan,
            paused: false,
            speed_idx: DEFAULT_SPEED_IDX,
            quit: false,
            last_tick: Instant::now(),
            preset_name: label.to_string(),
        })
    }

    /// Trials per month configured for this run.
    pub fn trials_per_month(&self) -> usize {
        self.engine.config().trials
    }

    /// Reported percentile of the active scenario.
    pub fn percentile(&self) -> f32 {
        self.engine.config().percentile
    }

    /// Trials completed across all months.
    pub fn completed_trials(&self) -> usize {
        self.trials.iter().map(MonthTrials::len).sum()
    }

    /// Trials in a complete year.
    pub fn total_trials(&self) -> usize {
        self.trials_per_month() * MONTHS_PER_YEAR
    }

    /// Returns `true` when every month has all its trials.
    pub fn is_finished(&self) -> bool {
        self.fill_idx >= MONTHS_PER_YEAR
    }

    /// Month currently receiving trials, if any.
    pub fn filling_month(&self) -> Option<Month> {
        Month::from_index(self.fill_idx)
    }

    /// Runs one more trial if not finished.
    pub fn tick(&mut self) {
        let Some(month) = self.filling_month() else {
            return;
        };
        let load = self.engine.system_load_kw(month);
        self.trials[self.fill_idx].push(load);
        if self.trials[self.fill_idx].len() >= self.trials_per_month() {
            self.fill_idx += 1;
        }
    }

    /// Running statistics for the viewed month, or `None` before its first
    /// trial.
    pub fn view(&self) -> Option<MonthView> {
        let month_trials = &self.trials[self.view_month.index()];
        if month_trials.is_empty() {
            return None;
        }
        let mut mean = [0.0; HOURS_PER_DAY];
        let mut percentile = [0.0; HOURS_PER_DAY];
        for (hour, samples) in month_trials.by_hour().iter().enumerate() {
            mean[hour] = stats::mean(samples);
            percentile[hour] = stats::percentile(samples, self.percentile());
        }
        Some(MonthView {
            mean,
            percentile,
            daily_kwh: BoxStats::from_samples(&month_trials.daily_energy_kwh()),
            trials: month_trials.len(),
        })
    }

    /// Analytical expected daily energy of the viewed month (kWh).
    pub fn expected_daily_kwh(&self) -> f32 {
        self.engine
            .inventory()
            .expected_daily_energy_kwh(self.view_month)
    }

    /// Toggles pause/resume.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Increases simulation speed (shorter tick interval).
    pub fn speed_up(&mut self) {
        if self.speed_idx + 1 < SPEED_LEVELS_MS.len() {
            self.speed_idx += 1;
        }
    }

    /// Decreases simulation speed (longer tick interval).
    pub fn speed_down(&mut self) {
        if self.speed_idx > 0 {
            self.speed_idx -= 1;
        }
    }

    /// Returns the current tick interval in milliseconds.
    pub fn tick_interval_ms(&self) -> u64 {
        SPEED_LEVELS_MS[self.speed_idx]
    }

    pub fn next_month(&mut self) {
        self.view_month = self.view_month.next();
    }

    pub fn prev_month(&mut self) {
        self.view_month = self.view_month.prev();
    }

    /// Replaces the scenario and discards all trials. Unknown presets and
    /// scenarios that fail to load are ignored.
    fn reset_with(&mut self, scenario: ScenarioConfig, label: &str) {
        let Ok(engine) = build_engine(&scenario) else {
            return;
        };
        self.engine = engine;
        self.scenario = scenario;
        self.trials = empty_year();
        self.fill_idx = 0;
        self.paused = false;
        self.preset_name = label.to_string();
    }

    /// Switches to a built-in preset, resetting simulation state.
    pub fn switch_preset(&mut self, name: &str) {
        if let Ok(scenario) = ScenarioConfig::from_preset(name) {
            self.reset_with(scenario, name);
        }
    }

    /// Restarts the current scenario from the first trial.
    pub fn restart(&mut self) {
        let scenario = self.scenario.clone();
        let label = self.preset_name.clone();
        self.reset_with(scenario, &label);
    }
}
