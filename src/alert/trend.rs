//! Wind speed trend detection.
//!
//! Only the immediately preceding reading matters: any strict rise from one
//! update to the next raises an alert. The rising streak is tracked for
//! reporting and never gates the alert.

use crate::model::{Alert, AlertKind, Reading, StationError};
use crate::observer::Observer;
use crate::outlet::Outlet;

#[derive(Debug, Clone, Default)]
pub struct WindSpeedAlert {
    last_wind_speed: Option<f64>,
    rising_streak: u32,
}

impl WindSpeedAlert {
    pub const NAME: &'static str = "WindSpeedAlert";

    pub fn new() -> Self {
        Self::default()
    }

    /// Speed from the previous update, `None` before the first one.
    pub fn last_wind_speed(&self) -> Option<f64> {
        self.last_wind_speed
    }

    /// Consecutive strict rises ending at the latest update.
    pub fn rising_streak(&self) -> u32 {
        self.rising_streak
    }
}

impl Observer for WindSpeedAlert {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn update(&mut self, reading: &Reading, outlet: &mut dyn Outlet) -> Result<(), StationError> {
        let current = reading.wind_speed;
        let previous = self.last_wind_speed.replace(current);

        let Some(previous) = previous else {
            return Ok(());
        };

        if current > previous {
            self.rising_streak += 1;
            outlet.raise(&Alert::new(
                Self::NAME,
                AlertKind::WindSpeedRising {
                    previous,
                    current,
                    streak: self.rising_streak,
                },
            ))?;
        } else {
            self.rising_streak = 0;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outlet::RecordingOutlet;

    fn wind(speed: f64) -> Reading {
        Reading::new(25.0, 60.0, speed)
    }

    #[test]
    fn test_should_not_alert_on_first_update() {
        let mut alert = WindSpeedAlert::new();
        let mut outlet = RecordingOutlet::new();
        alert.update(&wind(10.0), &mut outlet).expect("update");

        assert!(outlet.emissions().is_empty());
        assert_eq!(alert.last_wind_speed(), Some(10.0));
    }

    #[test]
    fn test_should_alert_on_increase() {
        let mut alert = WindSpeedAlert::new();
        let mut outlet = RecordingOutlet::new();
        alert.update(&wind(10.0), &mut outlet).expect("update");
        alert.update(&wind(15.0), &mut outlet).expect("update");

        let alerts = outlet.alerts();
        assert_eq!(alerts.len(), 1);
        assert!(
            alerts[0].to_string().contains("10.0 km/h -> 15.0 km/h"),
            "got: {}",
            alerts[0]
        );
    }

    #[test]
    fn test_should_not_alert_on_decrease() {
        let mut alert = WindSpeedAlert::new();
        let mut outlet = RecordingOutlet::new();
        alert.update(&wind(10.0), &mut outlet).expect("update");
        alert.update(&wind(5.0), &mut outlet).expect("update");
        assert!(outlet.emissions().is_empty());
    }

    #[test]
    fn test_should_not_alert_on_same_speed() {
        let mut alert = WindSpeedAlert::new();
        let mut outlet = RecordingOutlet::new();
        alert.update(&wind(10.0), &mut outlet).expect("update");
        alert.update(&wind(10.0), &mut outlet).expect("update");
        assert!(outlet.emissions().is_empty());
    }

    #[test]
    fn test_only_previous_reading_matters() {
        // 10 -> 15 alerts, 15 -> 15 does not, 15 -> 5 does not, 5 -> 6 alerts
        // even though 6 is below the earlier peak.
        let mut alert = WindSpeedAlert::new();
        let mut outlet = RecordingOutlet::new();
        for speed in [10.0, 15.0, 15.0, 5.0, 6.0] {
            alert.update(&wind(speed), &mut outlet).expect("update");
        }

        let transitions: Vec<(f64, f64)> = outlet
            .alerts()
            .iter()
            .map(|a| match a.kind {
                AlertKind::WindSpeedRising { previous, current, .. } => (previous, current),
                _ => panic!("unexpected alert kind: {:?}", a.kind),
            })
            .collect();
        assert_eq!(transitions, vec![(10.0, 15.0), (5.0, 6.0)]);
    }

    #[test]
    fn test_streak_counts_consecutive_rises_and_resets() {
        let mut alert = WindSpeedAlert::new();
        let mut outlet = RecordingOutlet::new();
        for speed in [1.0, 2.0, 3.0, 4.0] {
            alert.update(&wind(speed), &mut outlet).expect("update");
        }
        assert_eq!(alert.rising_streak(), 3);
        assert_eq!(outlet.alerts().len(), 3);

        alert.update(&wind(4.0), &mut outlet).expect("update");
        assert_eq!(alert.rising_streak(), 0);
    }

    #[test]
    fn test_nan_speed_becomes_trailing_value_without_alert() {
        let mut alert = WindSpeedAlert::new();
        let mut outlet = RecordingOutlet::new();
        alert.update(&wind(10.0), &mut outlet).expect("update");
        alert.update(&wind(f64::NAN), &mut outlet).expect("update");
        alert.update(&wind(20.0), &mut outlet).expect("update");

        assert!(outlet.alerts().is_empty());
        assert_eq!(alert.last_wind_speed(), Some(20.0));
    }
}
