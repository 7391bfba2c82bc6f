/// Reading, Alert, StationError
/// core data structures and error handling
///
/// Core data types for the weather station.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no logic beyond formatting, and no I/O.

use serde::Deserialize;
use std::fmt;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// One snapshot of the three measurements, produced once per tick.
///
/// Readings are plain values: two readings with identical fields are
/// interchangeable. Observers only ever see `&Reading`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Reading {
    pub temperature: f64, // °C
    pub humidity: f64,    // %
    pub wind_speed: f64,  // km/h
}

impl Reading {
    pub fn new(temperature: f64, humidity: f64, wind_speed: f64) -> Self {
        Self {
            temperature,
            humidity,
            wind_speed,
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Temperature = {:.1}°C, Humidity = {:.1}%, Wind Speed = {:.1} km/h",
            self.temperature, self.humidity, self.wind_speed
        )
    }
}

// ---------------------------------------------------------------------------
// Alert types
// ---------------------------------------------------------------------------

/// What condition an alert observer detected.
#[derive(Debug, Clone, PartialEq)]
pub enum AlertKind {
    /// Temperature strictly above the observer's threshold.
    Temperature { threshold: i32, observed: f64 },
    /// Humidity strictly above the observer's threshold.
    Humidity { threshold: i32, observed: f64 },
    /// Wind speed strictly above the immediately preceding reading.
    /// `streak` counts consecutive rises including this one.
    WindSpeedRising { previous: f64, current: f64, streak: u32 },
}

/// An alert raised by an observer's policy.
///
/// Alerts are output, not control flow: raising one never stops delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub source: &'static str,
    pub kind: AlertKind,
}

impl Alert {
    pub fn new(source: &'static str, kind: AlertKind) -> Self {
        Self { source, kind }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            AlertKind::Temperature { threshold, observed } => write!(
                f,
                "{}: **Alert! Temperature exceeded {}°C: {:.1}°C**",
                self.source, threshold, observed
            ),
            AlertKind::Humidity { threshold, observed } => write!(
                f,
                "{}: **Alert! Humidity exceeded {}%: {:.1}%**",
                self.source, threshold, observed
            ),
            AlertKind::WindSpeedRising { previous, current, .. } => write!(
                f,
                "{}: **Alert! Wind speed is increasing: {:.1} km/h -> {:.1} km/h**",
                self.source, previous, current
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Station identity
// ---------------------------------------------------------------------------

/// Process-unique identifier of a `Station`, recorded on every linked node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StationId(pub u64);

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "station#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can escape registration or dispatch.
///
/// Duplicate registration, removing an absent observer, and notifying an
/// empty station are not errors and never produce one of these.
#[derive(Debug, Error)]
pub enum StationError {
    /// The observer is already part of another station's chain.
    #[error("observer is already linked into {0}")]
    LinkedElsewhere(StationId),
    /// The observer was borrowed elsewhere when a reading arrived.
    #[error("observer '{0}' is borrowed and cannot receive a reading")]
    ObserverBusy(&'static str),
    /// An observer's policy refused the reading.
    #[error("observer '{observer}' failed: {reason}")]
    ObserverFailed {
        observer: &'static str,
        reason: String,
    },
    /// The outlet could not write a rendering or an alert.
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
}

impl StationError {
    /// Name of the observer responsible, when the error came from one.
    pub fn observer(&self) -> Option<&'static str> {
        match self {
            StationError::ObserverBusy(name) => Some(*name),
            StationError::ObserverFailed { observer, .. } => Some(*observer),
            StationError::LinkedElsewhere(_) | StationError::Output(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
