//! Alert observers.
//!
//! Submodules:
//! - `thresholds`: fixed-threshold temperature and humidity alerts, plus the
//!   `ThresholdRange` factory their thresholds are drawn from.
//! - `trend`: wind speed alert driven by the previous reading.

pub mod thresholds;
pub mod trend;

pub use thresholds::{
    HumidityAlert, TemperatureAlert, ThresholdRange, HUMIDITY_THRESHOLD_RANGE,
    TEMPERATURE_THRESHOLD_RANGE,
};
pub use trend::WindSpeedAlert;
