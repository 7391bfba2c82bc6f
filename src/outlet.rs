//! Output side of the observers.
//!
//! Observers never print directly. A display hands its reading to the
//! station's `Outlet`, and an alert observer hands over an `Alert`. Drivers
//! send their own progress lines through `announce`, so those land in the
//! same stream as the renderings and alerts. The
//! console outlet writes lines to stdout; the recording outlet keeps
//! everything in memory so callers can inspect exactly what fired.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use crate::model::{Alert, Reading, StationError};

/// Destination for renderings and alerts.
pub trait Outlet {
    /// Show a reading on behalf of `source`.
    fn render(&mut self, source: &'static str, reading: &Reading) -> Result<(), StationError>;

    /// Emit an alert.
    fn raise(&mut self, alert: &Alert) -> Result<(), StationError>;

    /// Emit a plain progress line, such as a week header.
    fn announce(&mut self, line: &str) -> Result<(), StationError>;
}

// ---------------------------------------------------------------------------
// Console
// ---------------------------------------------------------------------------

/// Writes one line per rendering or alert to stdout.
#[derive(Debug, Default)]
pub struct ConsoleOutlet;

impl Outlet for ConsoleOutlet {
    fn render(&mut self, source: &'static str, reading: &Reading) -> Result<(), StationError> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}: Showing {}", source, reading)?;
        Ok(())
    }

    fn raise(&mut self, alert: &Alert) -> Result<(), StationError> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", alert)?;
        Ok(())
    }

    fn announce(&mut self, line: &str) -> Result<(), StationError> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", line)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Recording
// ---------------------------------------------------------------------------

/// Something an observer sent to an outlet.
#[derive(Debug, Clone, PartialEq)]
pub enum Emission {
    Rendered { source: &'static str, reading: Reading },
    Raised(Alert),
    Announced(String),
}

/// In-memory outlet. Clones share the same log, so a test can hand one clone
/// to a station and keep another to inspect.
#[derive(Debug, Clone, Default)]
pub struct RecordingOutlet {
    emissions: Rc<RefCell<Vec<Emission>>>,
}

impl RecordingOutlet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything emitted so far, in order.
    pub fn emissions(&self) -> Vec<Emission> {
        self.emissions.borrow().clone()
    }

    /// Alerts only, in order.
    pub fn alerts(&self) -> Vec<Alert> {
        self.emissions
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Emission::Raised(alert) => Some(alert.clone()),
                _ => None,
            })
            .collect()
    }

    /// Alerts raised by one source.
    pub fn alerts_from(&self, source: &str) -> Vec<Alert> {
        self.alerts()
            .into_iter()
            .filter(|a| a.source == source)
            .collect()
    }

    /// Readings rendered, in order.
    pub fn rendered(&self) -> Vec<Reading> {
        self.emissions
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Emission::Rendered { reading, .. } => Some(*reading),
                _ => None,
            })
            .collect()
    }

    /// Progress lines, in order.
    pub fn announcements(&self) -> Vec<String> {
        self.emissions
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Emission::Announced(line) => Some(line.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.emissions.borrow_mut().clear();
    }
}

impl Outlet for RecordingOutlet {
    fn render(&mut self, source: &'static str, reading: &Reading) -> Result<(), StationError> {
        self.emissions.borrow_mut().push(Emission::Rendered {
            source,
            reading: *reading,
        });
        Ok(())
    }

    fn raise(&mut self, alert: &Alert) -> Result<(), StationError> {
        self.emissions
            .borrow_mut()
            .push(Emission::Raised(alert.clone()));
        Ok(())
    }

    fn announce(&mut self, line: &str) -> Result<(), StationError> {
        self.emissions
            .borrow_mut()
            .push(Emission::Announced(line.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AlertKind;

    #[test]
    fn test_recording_outlet_clones_share_log() {
        let recorder = RecordingOutlet::new();
        let mut handle = recorder.clone();

        handle
            .render("WeatherDisplay", &Reading::new(20.0, 50.0, 10.0))
            .expect("recording never fails");
        handle
            .raise(&Alert::new(
                "TemperatureAlert",
                AlertKind::Temperature { threshold: 30, observed: 31.0 },
            ))
            .expect("recording never fails");

        assert_eq!(recorder.emissions().len(), 2);
        assert_eq!(recorder.rendered(), vec![Reading::new(20.0, 50.0, 10.0)]);
        assert_eq!(recorder.alerts_from("TemperatureAlert").len(), 1);
        assert!(recorder.alerts_from("HumidityAlert").is_empty());

        handle.announce("Week 1:").expect("recording never fails");
        assert_eq!(recorder.announcements(), vec!["Week 1:".to_string()]);
        assert_eq!(recorder.alerts().len(), 1, "announcements are not alerts");
        assert_eq!(recorder.rendered().len(), 1);

        recorder.clear();
        assert!(handle.emissions().is_empty());
    }
}
