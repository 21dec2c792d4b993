//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::devices::DeviceInventory;
use crate::devices::catalog::{self, BUILTIN_CATALOGS};
use crate::error::Result;
use crate::io::input;
use crate::sim::types::SimConfig;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the `demo` preset except the input
/// source, which defaults to a `Device list.csv` file plus a
/// `Utilisation profiles` directory. Load from TOML with
/// [`ScenarioConfig::from_toml_file`] or use [`ScenarioConfig::demo`] for
/// the built-in village.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Monte Carlo parameters.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Where the device list and utilisation profiles come from.
    #[serde(default)]
    pub inputs: InputsConfig,
    /// Where and how results are written.
    #[serde(default)]
    pub outputs: OutputsConfig,
}

/// Monte Carlo parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Trials per month (must be > 0).
    pub trials: usize,
    /// Reported percentile: e.g. 90 means 90% of trial loads fall below the
    /// reported value.
    pub percentile: f32,
    /// Master random seed.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: 100,
            percentile: 90.0,
            seed: 42,
        }
    }
}

/// Device list read when neither `device_list` nor `builtin` is given.
pub const DEFAULT_DEVICE_LIST: &str = "Device list.csv";

/// Input source: CSV files, or a built-in catalog.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputsConfig {
    /// Device list CSV path; [`DEFAULT_DEVICE_LIST`] when unset.
    pub device_list: Option<PathBuf>,
    /// Directory holding one utilisation profile per device.
    pub profiles_dir: PathBuf,
    /// Profile file name suffix appended to the device name.
    pub profile_suffix: String,
    /// Built-in catalog name, used instead of `device_list`.
    pub builtin: Option<String>,
}

impl Default for InputsConfig {
    fn default() -> Self {
        Self {
            device_list: None,
            profiles_dir: PathBuf::from("Utilisation profiles"),
            profile_suffix: "_times.csv".to_string(),
            builtin: None,
        }
    }
}

impl InputsConfig {
    /// Inputs backed by the named built-in catalog.
    pub fn builtin(name: &str) -> Self {
        Self {
            builtin: Some(name.to_string()),
            ..Self::default()
        }
    }

    /// Device list CSV to read, or `None` when a built-in catalog is used.
    pub fn device_list_path(&self) -> Option<PathBuf> {
        if self.builtin.is_some() {
            return None;
        }
        Some(
            self.device_list
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DEVICE_LIST)),
        )
    }
}

/// Output location and formatting.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputsConfig {
    /// Directory receiving the result files (created if missing).
    pub dir: PathBuf,
    /// Decimal places written to CSV files (at most 6).
    pub decimals: usize,
}

impl Default for OutputsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("Outputs"),
            decimals: 3,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, thiserror::Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"simulation.trials"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ScenarioConfig {
    /// The built-in village with 100 trials per month and a P90 output.
    pub fn demo() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            inputs: InputsConfig::builtin("village"),
            outputs: OutputsConfig::default(),
        }
    }

    /// A fast, low-fidelity run of the built-in village.
    pub fn quick() -> Self {
        Self {
            simulation: SimulationConfig {
                trials: 20,
                ..SimulationConfig::default()
            },
            ..Self::demo()
        }
    }

    /// Many trials and a P95 output, for generation sizing.
    pub fn high_confidence() -> Self {
        Self {
            simulation: SimulationConfig {
                trials: 500,
                percentile: 95.0,
                ..SimulationConfig::default()
            },
            ..Self::demo()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["demo", "quick", "high_confidence"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> std::result::Result<Self, ConfigError> {
        match name {
            "demo" => Ok(Self::demo()),
            "quick" => Ok(Self::quick()),
            "high_confidence" => Ok(Self::high_confidence()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// Relative input and output paths are resolved against the directory
    /// containing the file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> std::result::Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        let mut cfg = Self::from_toml_str(&content)?;
        if let Some(base) = path.parent() {
            cfg.resolve_paths(base);
        }
        Ok(cfg)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> std::result::Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Makes relative file paths relative to `base`.
    fn resolve_paths(&mut self, base: &Path) {
        let join = |p: &Path| {
            if p.is_relative() {
                base.join(p)
            } else {
                p.to_path_buf()
            }
        };
        if let Some(list) = self.inputs.device_list_path() {
            self.inputs.device_list = Some(join(&list));
        }
        self.inputs.profiles_dir = join(&self.inputs.profiles_dir);
        self.outputs.dir = join(&self.outputs.dir);
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let s = &self.simulation;

        if s.trials == 0 {
            errors.push(ConfigError {
                field: "simulation.trials".into(),
                message: "must be > 0".into(),
            });
        }
        if !(0.0..=100.0).contains(&s.percentile) {
            errors.push(ConfigError {
                field: "simulation.percentile".into(),
                message: format!("must be in [0, 100], got {}", s.percentile),
            });
        }

        let inp = &self.inputs;
        match (&inp.device_list, &inp.builtin) {
            (Some(_), Some(_)) => errors.push(ConfigError {
                field: "inputs.builtin".into(),
                message: "cannot be combined with inputs.device_list".into(),
            }),
            (None, Some(name)) if !BUILTIN_CATALOGS.contains(&name.as_str()) => {
                errors.push(ConfigError {
                    field: "inputs.builtin".into(),
                    message: format!(
                        "unknown catalog \"{name}\", available: {}",
                        BUILTIN_CATALOGS.join(", ")
                    ),
                });
            }
            _ => {}
        }
        if inp.profile_suffix.is_empty() {
            errors.push(ConfigError {
                field: "inputs.profile_suffix".into(),
                message: "must not be empty".into(),
            });
        }

        if self.outputs.decimals > 6 {
            errors.push(ConfigError {
                field: "outputs.decimals".into(),
                message: "must be <= 6".into(),
            });
        }

        errors
    }

    /// Runtime simulation parameters.
    ///
    /// # Panics
    ///
    /// Panics if the configuration has not passed [`ScenarioConfig::validate`].
    pub fn sim_config(&self) -> SimConfig {
        let s = &self.simulation;
        SimConfig::new(s.trials, s.percentile, s.seed)
    }

    /// Builds the device inventory from the configured source.
    ///
    /// # Errors
    ///
    /// Returns an error if the input files are missing or malformed, or the
    /// built-in catalog name is unknown.
    pub fn load_inventory(&self) -> Result<DeviceInventory> {
        let inp = &self.inputs;
        if let Some(name) = &inp.builtin {
            return catalog::builtin(name).unwrap_or_else(|| {
                Err(ConfigError {
                    field: "inputs.builtin".into(),
                    message: format!("unknown catalog \"{name}\""),
                }
                .into())
            });
        }
        let list = inp
            .device_list
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DEVICE_LIST));
        input::read_inventory(&list, &inp.profiles_dir, &inp.profile_suffix)
    }
}
