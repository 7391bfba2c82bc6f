//! Fixed-threshold alerts for temperature and humidity.
//!
//! Each alert holds one integer threshold for its whole life. The policy is
//! a strict comparison: a reading equal to the threshold does not alert.
//! Drawing the threshold at random is the factory's job (`ThresholdRange`),
//! so the policy objects stay deterministic.

use rand::Rng;
use serde::Deserialize;

use crate::model::{Alert, AlertKind, Reading, StationError};
use crate::observer::Observer;
use crate::outlet::Outlet;

// ---------------------------------------------------------------------------
// Threshold ranges
// ---------------------------------------------------------------------------

/// Inclusive integer range a threshold is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ThresholdRange {
    pub min: i32,
    pub max: i32,
}

/// Published range for temperature thresholds, in °C.
pub const TEMPERATURE_THRESHOLD_RANGE: ThresholdRange = ThresholdRange { min: 30, max: 40 };

/// Published range for humidity thresholds, in %.
pub const HUMIDITY_THRESHOLD_RANGE: ThresholdRange = ThresholdRange { min: 70, max: 90 };

impl ThresholdRange {
    /// Create a range; bounds given the wrong way round are swapped.
    pub fn new(min: i32, max: i32) -> Self {
        let (min, max) = if min > max { (max, min) } else { (min, max) };
        Self { min, max }
    }

    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }

    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Draw a threshold uniformly from the range, both ends included.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        let (lo, hi) = (self.min.min(self.max), self.min.max(self.max));
        rng.gen_range(lo..=hi)
    }
}

/// Strictly above. NaN never exceeds anything.
fn exceeds(value: f64, threshold: i32) -> bool {
    value > f64::from(threshold)
}

// ---------------------------------------------------------------------------
// TemperatureAlert
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct TemperatureAlert {
    threshold: i32,
}

impl TemperatureAlert {
    pub const NAME: &'static str = "TemperatureAlert";

    pub fn new(threshold: i32) -> Self {
        Self { threshold }
    }

    /// Threshold drawn from `TEMPERATURE_THRESHOLD_RANGE`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_range(TEMPERATURE_THRESHOLD_RANGE, rng)
    }

    pub fn from_range<R: Rng + ?Sized>(range: ThresholdRange, rng: &mut R) -> Self {
        Self::new(range.draw(rng))
    }

    pub fn threshold(&self) -> i32 {
        self.threshold
    }
}

impl Observer for TemperatureAlert {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn update(&mut self, reading: &Reading, outlet: &mut dyn Outlet) -> Result<(), StationError> {
        if exceeds(reading.temperature, self.threshold) {
            outlet.raise(&Alert::new(
                Self::NAME,
                AlertKind::Temperature {
                    threshold: self.threshold,
                    observed: reading.temperature,
                },
            ))?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// HumidityAlert
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct HumidityAlert {
    threshold: i32,
}

impl HumidityAlert {
    pub const NAME: &'static str = "HumidityAlert";

    pub fn new(threshold: i32) -> Self {
        Self { threshold }
    }

    /// Threshold drawn from `HUMIDITY_THRESHOLD_RANGE`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_range(HUMIDITY_THRESHOLD_RANGE, rng)
    }

    pub fn from_range<R: Rng + ?Sized>(range: ThresholdRange, rng: &mut R) -> Self {
        Self::new(range.draw(rng))
    }

    pub fn threshold(&self) -> i32 {
        self.threshold
    }
}

impl Observer for HumidityAlert {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn update(&mut self, reading: &Reading, outlet: &mut dyn Outlet) -> Result<(), StationError> {
        if exceeds(reading.humidity, self.threshold) {
            outlet.raise(&Alert::new(
                Self::NAME,
                AlertKind::Humidity {
                    threshold: self.threshold,
                    observed: reading.humidity,
                },
            ))?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
