//! Core simulation types shared by the engine and result builders.

use serde::Serialize;

/// Hours in one simulated day; the engine works at hourly resolution.
pub const HOURS_PER_DAY: usize = 24;

/// Load in kW for each hour of one simulated day.
pub type HourlyLoad = [f32; HOURS_PER_DAY];

/// Runtime Monte Carlo parameters.
///
/// # Examples
///
/// ```
/// use load_sim::sim::types::SimConfig;
///
/// let cfg = SimConfig::new(100, 90.0, 42);
/// assert_eq!(cfg.trials, 100);
/// assert_eq!(cfg.percentile, 90.0);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct SimConfig {
    /// Number of Monte Carlo trials per month.
    pub trials: usize,
    /// Reported percentile, in `[0, 100]`.
    pub percentile: f32,
    /// Master random seed for reproducibility.
    pub seed: u64,
}

impl SimConfig {
    /// Creates a new simulation configuration.
    ///
    /// # Panics
    ///
    /// Panics if `trials` is zero or `percentile` is outside `[0, 100]`.
    pub fn new(trials: usize, percentile: f32, seed: u64) -> Self {
        assert!(trials > 0, "trials must be > 0");
        assert!(
            (0.0..=100.0).contains(&percentile),
            "percentile must be in [0, 100]"
        );
        Self {
            trials,
            percentile,
            seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sim_config_basic() {
        let cfg = SimConfig::new(10, 95.0, 7);
        assert_eq!(cfg.trials, 10);
        assert_eq!(cfg.percentile, 95.0);
        assert_eq!(cfg.seed, 7);
    }

    #[test]
    #[should_panic]
    fn sim_config_zero_trials_panics() {
        SimConfig::new(0, 90.0, 0);
    }

    #[test]
    #[should_panic]
    fn sim_config_bad_percentile_panics() {
        SimConfig::new(10, 101.0, 0);
    }
}
