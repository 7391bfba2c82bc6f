//! Weather station with a push-based observer chain.
//!
//! A `Station` holds the latest `Reading` and a singly linked chain of
//! observers. Every new reading is delivered synchronously, in registration
//! order, to each observer in the chain; each observer decides on its own
//! whether to raise an alert.
//!
//! ```no_run
//! use weather_station::{Linked, Station, TemperatureAlert, WeatherDisplay};
//!
//! let mut station = Station::new();
//! let display = Linked::new(WeatherDisplay::new());
//! let heat = Linked::new(TemperatureAlert::new(30));
//!
//! station.register(display.clone())?;
//! station.register(heat.clone())?;
//! station.set_measurements(31.0, 50.0, 10.0)?;
//!
//! station.remove(&heat);
//! # Ok::<(), weather_station::StationError>(())
//! ```

pub mod alert;
pub mod config;
pub mod display;
pub mod logging;
pub mod model;
pub mod observer;
pub mod outlet;
pub mod simulation;
pub mod station;

pub use alert::{HumidityAlert, TemperatureAlert, ThresholdRange, WindSpeedAlert};
pub use display::WeatherDisplay;
pub use model::{Alert, AlertKind, Reading, StationError, StationId};
pub use observer::{Link, Linked, Observer};
pub use outlet::{ConsoleOutlet, Outlet, RecordingOutlet};
pub use station::Station;
