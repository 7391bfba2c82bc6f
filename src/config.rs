/// Configuration for the weather station binary.
///
/// Loaded from a TOML file whose every section is optional; anything left
/// out falls back to the published defaults. A couple of settings can be
/// overridden from the environment (see `ENV_LOG_LEVEL`, `ENV_SEED`), which
/// `main` populates from `.env` via dotenv.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::alert::{ThresholdRange, HUMIDITY_THRESHOLD_RANGE, TEMPERATURE_THRESHOLD_RANGE};
use crate::logging::LogLevel;
use crate::model::Reading;

/// Path to the TOML config file. Unset means built-in defaults.
pub const ENV_CONFIG_PATH: &str = "WEATHER_STATION_CONFIG";
/// Overrides `logging.level`.
pub const ENV_LOG_LEVEL: &str = "WEATHER_LOG_LEVEL";
/// Overrides `simulation.seed`.
pub const ENV_SEED: &str = "WEATHER_SIM_SEED";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub alerts: AlertConfig,
    pub logging: LoggingConfig,
    pub simulation: SimulationConfig,
}

/// Ranges the alert thresholds are drawn from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    pub temperature_threshold: ThresholdRange,
    pub humidity_threshold: ThresholdRange,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            temperature_threshold: TEMPERATURE_THRESHOLD_RANGE,
            humidity_threshold: HUMIDITY_THRESHOLD_RANGE,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub file: Option<String>,
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            file: None,
            timestamps: false,
        }
    }
}

/// Inclusive range for randomly generated measurements.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

/// Weekly schedule for the simulation driver.
///
/// Week numbers start at 1; a week of 0 means "never".
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub weeks: u32,
    pub seed: Option<u64>,
    pub temperature_alert_week: u32,
    pub wind_speed_alert_week: u32,
    pub humidity_alert_week: u32,
    pub humidity_alert_removal_week: u32,
    /// Readings for the first weeks, in order. Later weeks are random.
    pub fixed_readings: Vec<Reading>,
    pub random_temperature: ValueRange,
    pub random_humidity: ValueRange,
    pub random_wind_speed: ValueRange,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            weeks: 20,
            seed: None,
            temperature_alert_week: 4,
            wind_speed_alert_week: 5,
            humidity_alert_week: 6,
            humidity_alert_removal_week: 8,
            fixed_readings: default_fixed_readings(),
            random_temperature: ValueRange::new(15.0, 45.0),
            random_humidity: ValueRange::new(40.0, 100.0),
            random_wind_speed: ValueRange::new(0.0, 50.0),
        }
    }
}

/// Ten weeks of a heat wave building and breaking.
pub fn default_fixed_readings() -> Vec<Reading> {
    [
        (28.0, 70.0, 12.0),
        (30.0, 72.0, 15.0),
        (32.0, 74.0, 18.0),
        (36.0, 80.0, 22.0),
        (40.0, 65.0, 25.0),
        (45.0, 90.0, 30.0),
        (43.0, 92.0, 32.0),
        (40.0, 85.0, 30.0),
        (38.0, 82.0, 28.0),
        (36.0, 80.0, 25.0),
    ]
    .into_iter()
    .map(|(t, h, w)| Reading::new(t, h, w))
    .collect()
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl Config {
    /// Read and parse a TOML file. Does not validate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Apply overrides looked up by variable name, normally `std::env::var`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level
                .parse()
                .map_err(|e| ConfigError::Invalid(format!("{}: {}", ENV_LOG_LEVEL, e)))?;
        }
        if let Some(seed) = lookup(ENV_SEED) {
            let seed = seed.trim().parse::<u64>().map_err(|e| {
                ConfigError::Invalid(format!("{}: '{}' is not a seed: {}", ENV_SEED, seed, e))
            })?;
            self.simulation.seed = Some(seed);
        }
        Ok(())
    }

    /// Reject ranges that cannot be drawn from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, range) in [
            ("alerts.temperature_threshold", &self.alerts.temperature_threshold),
            ("alerts.humidity_threshold", &self.alerts.humidity_threshold),
        ] {
            if !range.is_ordered() {
                return Err(ConfigError::Invalid(format!(
                    "{} has min {} above max {}",
                    name, range.min, range.max
                )));
            }
        }

        let sim = &self.simulation;
        for (name, range) in [
            ("simulation.random_temperature", &sim.random_temperature),
            ("simulation.random_humidity", &sim.random_humidity),
            ("simulation.random_wind_speed", &sim.random_wind_speed),
        ] {
            if !range.is_valid() {
                return Err(ConfigError::Invalid(format!(
                    "{} must be finite with min <= max, got [{}, {}]",
                    name, range.min, range.max
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
