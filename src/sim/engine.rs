//! Monte Carlo engine: binomial device switching summed into system load.

use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info};

use crate::devices::{DeviceEntry, DeviceInventory};

use super::detailed::DetailedRecord;
use super::month::Month;
use super::sampler::binomial;
use super::trials::MonthTrials;
use super::types::{HOURS_PER_DAY, HourlyLoad, SimConfig};

/// Simulation engine owning the device inventory and random state.
///
/// Every draw comes from a single `StdRng` seeded from
/// [`SimConfig::seed`], so a given inventory, seed and call sequence always
/// reproduces the same trials.
pub struct Engine {
    config: SimConfig,
    inventory: DeviceInventory,
    rng: StdRng,
}

/// Samples one device type for one simulated day of `month`.
fn sample_device(entry: &DeviceEntry, month: Month, rng: &mut StdRng) -> HourlyLoad {
    let owned = entry.device.owned();
    let power_kw = entry.device.power_kw();
    let mut load = [0.0; HOURS_PER_DAY];
    for (hour, kw) in load.iter_mut().enumerate() {
        let on = binomial(rng, owned, entry.profile.probability(hour, month));
        *kw = on as f32 * power_kw;
    }
    load
}

impl Engine {
    /// Creates a new engine.
    ///
    /// # Arguments
    ///
    /// * `config` - Trial count, percentile and seed
    /// * `inventory` - Device types and their utilisation profiles
    pub fn new(config: SimConfig, inventory: DeviceInventory) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            config,
            inventory,
            rng,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn inventory(&self) -> &DeviceInventory {
        &self.inventory
    }

    /// Randomised hourly load (kW) of the device at `index` for one day of
    /// `month`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range for the inventory.
    pub fn device_load_kw(&mut self, index: usize, month: Month) -> HourlyLoad {
        sample_device(&self.inventory.entries()[index], month, &mut self.rng)
    }

    /// One Monte Carlo trial: the summed hourly load (kW) of every device for
    /// one day of `month`.
    pub fn system_load_kw(&mut self, month: Month) -> HourlyLoad {
        let mut total = [0.0; HOURS_PER_DAY];
        for entry in self.inventory.entries() {
            let device_load = sample_device(entry, month, &mut self.rng);
            for (t, d) in total.iter_mut().zip(device_load) {
                *t += d;
            }
        }
        total
    }

    /// Runs the configured number of trials for `month`.
    pub fn run_month(&mut self, month: Month) -> MonthTrials {
        let mut trials = MonthTrials::with_capacity(month, self.config.trials);
        for _ in 0..self.config.trials {
            let load = self.system_load_kw(month);
            trials.push(load);
        }
        debug!(%month, trials = trials.len(), "month simulated");
        trials
    }

    /// Runs every month of the year, January first.
    pub fn run_year(&mut self) -> Vec<MonthTrials> {
        info!(
            trials = self.config.trials,
            devices = self.inventory.len(),
            "running Monte Carlo simulation for each month"
        );
        Month::ALL.iter().map(|&m| self.run_month(m)).collect()
    }

    /// Per-device breakdown for every trial, device, month and hour.
    ///
    /// Records are ordered trial, then device (inventory order), then month,
    /// then hour. Steps are one hour long, so each record's kW value is also
    /// its energy in kWh.
    pub fn detailed(&mut self) -> Vec<DetailedRecord> {
        let per_trial = self.inventory.len() * Month::ALL.len() * HOURS_PER_DAY;
        let mut records = Vec::with_capacity(self.config.trials * per_trial);
        info!(
            trials = self.config.trials,
            "generating per-device load for each month and hour"
        );
        for trial in 0..self.config.trials {
            for entry in self.inventory.entries() {
                for month in Month::ALL {
                    let load = sample_device(entry, month, &mut self.rng);
                    for (hour, kw) in load.into_iter().enumerate() {
                        records.push(DetailedRecord {
                            trial,
                            device: entry.device.name.clone(),
                            device_type: entry.device.device_type.clone(),
                            month,
                            hour,
                            load_kwh: kw,
                        });
                    }
                }
            }
        }
        records
    }
}
