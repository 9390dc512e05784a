//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::devices::types::HOURS_PER_DAY;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Horizon, timing, seed, and dispatch thresholds.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Production curve generator parameters.
    #[serde(default)]
    pub solar: SolarConfig,
    /// Battery storage parameters.
    #[serde(default)]
    pub battery: BatteryConfig,
    /// Price curve parameters.
    #[serde(default)]
    pub price: PriceConfig,
}

/// Horizon, timing, seed, and dispatch thresholds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of days to simulate (must be > 0).
    pub days: usize,
    /// Duration of one step in hours.
    ///
    /// Generated production and tiled prices are hourly, so a scenario
    /// only accepts `1.0`. Sub-hourly runs go through the library API
    /// with caller-supplied curves.
    pub dt_hours: f64,
    /// Random seed for the production curve.
    pub seed: u64,
    /// Charge when the price is below this value.
    pub low_price_threshold: f64,
    /// Discharge when the price is above this value.
    pub high_price_threshold: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            days: 7,
            dt_hours: 1.0,
            seed: 42,
            low_price_threshold: 10.0,
            high_price_threshold: 90.0,
        }
    }
}

/// Production curve generator parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolarConfig {
    /// Generator: `"linear"` or `"sinusoidal"`.
    pub model: String,
    /// Sunrise hour (inclusive).
    pub sunrise: usize,
    /// Peak hour (linear model only).
    pub peak: usize,
    /// Sunset hour (exclusive).
    pub sunset: usize,
    /// Nominal peak production (MW).
    pub peak_power_mw: f64,
    /// Daily peak factor spread (0.0–1.0).
    pub peak_noise: f64,
    /// Per-sample factor spread (0.0–1.0).
    pub noise: f64,
}

impl Default for SolarConfig {
    fn default() -> Self {
        Self {
            model: "linear".to_string(),
            sunrise: 6,
            peak: 13,
            sunset: 20,
            peak_power_mw: 50.0,
            peak_noise: 0.5,
            noise: 0.1,
        }
    }
}

/// Battery storage parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    /// Total energy capacity (MWh).
    pub capacity_mwh: f64,
    /// Maximum charging power (MW).
    pub max_charge_rate_mw: f64,
    /// Maximum discharging power (MW).
    pub max_discharge_rate_mw: f64,
    /// Charge efficiency (0.0–1.0].
    pub charge_efficiency: f64,
    /// Discharge efficiency (0.0–1.0].
    pub discharge_efficiency: f64,
    /// Initial energy content (MWh).
    pub initial_soc_mwh: f64,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            capacity_mwh: 100.0,
            max_charge_rate_mw: 10.0,
            max_discharge_rate_mw: 10.0,
            charge_efficiency: 0.95,
            discharge_efficiency: 0.95,
            initial_soc_mwh: 0.0,
        }
    }
}

/// Price curve parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PriceConfig {
    /// One price per hour of a day, tiled across the horizon.
    pub daily_profile: Vec<f64>,
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            daily_profile: vec![
                40.0, 38.0, 35.0, 33.0, 32.0, 35.0, 45.0, 60.0, 55.0, 40.0, 20.0, 8.0, 5.0, 6.0,
                9.0, 25.0, 50.0, 80.0, 120.0, 110.0, 95.0, 70.0, 55.0, 45.0,
            ],
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"battery.capacity_mwh"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario.
    pub fn baseline() -> Self {
        Self::default()
    }

    /// Returns the high-solar preset: large sinusoidal array and a bigger battery.
    pub fn high_solar() -> Self {
        Self {
            solar: SolarConfig {
                model: "sinusoidal".to_string(),
                sunrise: 5,
                sunset: 21,
                peak_power_mw: 120.0,
                peak_noise: 0.3,
                ..SolarConfig::default()
            },
            battery: BatteryConfig {
                capacity_mwh: 200.0,
                max_charge_rate_mw: 25.0,
                max_discharge_rate_mw: 25.0,
                ..BatteryConfig::default()
            },
            ..Self::default()
        }
    }

    /// Returns the narrow-band preset: tight thresholds and lossier storage.
    pub fn narrow_band() -> Self {
        Self {
            simulation: SimulationConfig {
                low_price_threshold: 30.0,
                high_price_threshold: 60.0,
                ..SimulationConfig::default()
            },
            battery: BatteryConfig {
                charge_efficiency: 0.90,
                discharge_efficiency: 0.90,
                initial_soc_mwh: 50.0,
                ..BatteryConfig::default()
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "high_solar", "narrow_band"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "high_solar" => Ok(Self::high_solar()),
            "narrow_band" => Ok(Self::narrow_band()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Number of hourly steps covered by the scenario.
    pub fn horizon(&self) -> usize {
        self.simulation.days * HOURS_PER_DAY
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid. Unlike the library
    /// API, an inverted threshold band is an error in a scenario file.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let s = &self.simulation;
        if s.days == 0 {
            errors.push(ConfigError::new("simulation.days", "must be > 0"));
        }
        if !(s.dt_hours.is_finite() && s.dt_hours > 0.0) {
            errors.push(ConfigError::new("simulation.dt_hours", "must be > 0"));
        } else if s.dt_hours != 1.0 {
            errors.push(ConfigError::new(
                "simulation.dt_hours",
                "must be 1.0; scenario curves are generated hourly",
            ));
        }
        if !s.low_price_threshold.is_finite() {
            errors.push(ConfigError::new(
                "simulation.low_price_threshold",
                "must be finite",
            ));
        }
        if !s.high_price_threshold.is_finite() {
            errors.push(ConfigError::new(
                "simulation.high_price_threshold",
                "must be finite",
            ));
        }
        if s.low_price_threshold > s.high_price_threshold {
            errors.push(ConfigError::new(
                "simulation.low_price_threshold",
                "must be <= simulation.high_price_threshold",
            ));
        }

        let sol = &self.solar;
        if sol.model != "linear" && sol.model != "sinusoidal" {
            errors.push(ConfigError::new(
                "solar.model",
                format!("must be \"linear\" or \"sinusoidal\", got \"{}\"", sol.model),
            ));
        }
        if sol.sunrise >= sol.sunset {
            errors.push(ConfigError::new("solar.sunrise", "must be < solar.sunset"));
        }
        if sol.sunset > HOURS_PER_DAY {
            errors.push(ConfigError::new(
                "solar.sunset",
                format!("must be <= {HOURS_PER_DAY}"),
            ));
        }
        if sol.model == "linear" && !(sol.sunrise < sol.peak && sol.peak < sol.sunset) {
            errors.push(ConfigError::new(
                "solar.peak",
                "must lie strictly between solar.sunrise and solar.sunset",
            ));
        }
        if !(sol.peak_power_mw.is_finite() && sol.peak_power_mw >= 0.0) {
            errors.push(ConfigError::new("solar.peak_power_mw", "must be >= 0"));
        }
        if !(0.0..=1.0).contains(&sol.peak_noise) {
            errors.push(ConfigError::new("solar.peak_noise", "must be in [0.0, 1.0]"));
        }
        if !(0.0..=1.0).contains(&sol.noise) {
            errors.push(ConfigError::new("solar.noise", "must be in [0.0, 1.0]"));
        }

        let bat = &self.battery;
        if !(bat.capacity_mwh.is_finite() && bat.capacity_mwh > 0.0) {
            errors.push(ConfigError::new("battery.capacity_mwh", "must be > 0"));
        }
        if !(bat.max_charge_rate_mw.is_finite() && bat.max_charge_rate_mw >= 0.0) {
            errors.push(ConfigError::new("battery.max_charge_rate_mw", "must be >= 0"));
        }
        if !(bat.max_discharge_rate_mw.is_finite() && bat.max_discharge_rate_mw >= 0.0) {
            errors.push(ConfigError::new(
                "battery.max_discharge_rate_mw",
                "must be >= 0",
            ));
        }
        if !(bat.charge_efficiency > 0.0 && bat.charge_efficiency <= 1.0) {
            errors.push(ConfigError::new(
                "battery.charge_efficiency",
                "must be in (0.0, 1.0]",
            ));
        }
        if !(bat.discharge_efficiency > 0.0 && bat.discharge_efficiency <= 1.0) {
            errors.push(ConfigError::new(
                "battery.discharge_efficiency",
                "must be in (0.0, 1.0]",
            ));
        }
        if !(0.0..=bat.capacity_mwh).contains(&bat.initial_soc_mwh) {
            errors.push(ConfigError::new(
                "battery.initial_soc_mwh",
                "must be in [0.0, battery.capacity_mwh]",
            ));
        }

        let price = &self.price;
        if price.daily_profile.is_empty() {
            errors.push(ConfigError::new("price.daily_profile", "must not be empty"));
        }
        if price.daily_profile.iter().any(|p| !p.is_finite()) {
            errors.push(ConfigError::new(
                "price.daily_profile",
                "all prices must be finite",
            ));
        }

        errors
    }
}
