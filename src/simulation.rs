/// Weekly weather simulation driving a `Station`.
///
/// Replays the configured fixed readings, then draws random ones, while
/// alert observers join and leave on their scheduled weeks. Everything
/// random comes from the caller's rng so a seeded run is reproducible.

use rand::Rng;
use std::rc::Rc;

use crate::alert::{HumidityAlert, TemperatureAlert, ThresholdRange, WindSpeedAlert};
use crate::config::{AlertConfig, SimulationConfig, ValueRange};
use crate::display::WeatherDisplay;
use crate::logging::{self, Component};
use crate::model::{Reading, StationError};
use crate::observer::Linked;
use crate::station::Station;

/// What a completed run fed into the station.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub weeks: u32,
    pub readings: Vec<Reading>,
}

pub struct Simulation {
    schedule: SimulationConfig,
    temperature_range: ThresholdRange,
    humidity_range: ThresholdRange,
    display: Rc<Linked<WeatherDisplay>>,
    temperature_alert: Option<Rc<Linked<TemperatureAlert>>>,
    wind_speed_alert: Option<Rc<Linked<WindSpeedAlert>>>,
    humidity_alert: Option<Rc<Linked<HumidityAlert>>>,
    weeks_completed: u32,
}

impl Simulation {
    pub fn new(schedule: SimulationConfig, alerts: &AlertConfig) -> Self {
        Self {
            schedule,
            temperature_range: alerts.temperature_threshold,
            humidity_range: alerts.humidity_threshold,
            display: Linked::new(WeatherDisplay::new()),
            temperature_alert: None,
            wind_speed_alert: None,
            humidity_alert: None,
            weeks_completed: 0,
        }
    }

    pub fn temperature_alert(&self) -> Option<&Rc<Linked<TemperatureAlert>>> {
        self.temperature_alert.as_ref()
    }

    pub fn wind_speed_alert(&self) -> Option<&Rc<Linked<WindSpeedAlert>>> {
        self.wind_speed_alert.as_ref()
    }

    /// `None` before it joins and again once it has been removed.
    pub fn humidity_alert(&self) -> Option<&Rc<Linked<HumidityAlert>>> {
        self.humidity_alert.as_ref()
    }

    /// Weeks fully delivered by the latest `run`, including a failed one.
    pub fn weeks_completed(&self) -> u32 {
        self.weeks_completed
    }

    /// Run every scheduled week against `station`.
    ///
    /// The display is registered up front. Alerts left over from an earlier
    /// run are removed first, so every run starts from the display alone
    /// plus whatever the caller registered. An observer failure stops the
    /// run and is returned; weeks already delivered stay delivered.
    pub fn run<R: Rng + ?Sized>(
        &mut self,
        station: &mut Station,
        rng: &mut R,
    ) -> Result<SimulationReport, StationError> {
        self.weeks_completed = 0;
        self.retire_alerts(station);
        station.register(self.display.clone())?;

        let mut report = SimulationReport {
            weeks: 0,
            readings: Vec::with_capacity(self.schedule.weeks as usize),
        };

        for week in 1..=self.schedule.weeks {
            station.announce(&format!("Week {}:", week))?;
            self.join_scheduled(week, station, rng)?;

            let reading = self.reading_for(week, rng);
            station.set_measurements(reading.temperature, reading.humidity, reading.wind_speed)?;
            report.readings.push(reading);
            report.weeks = week;
            self.weeks_completed = week;

            if week == self.schedule.humidity_alert_removal_week {
                if let Some(alert) = self.humidity_alert.take() {
                    station.announce("Removing: HumidityAlert")?;
                    station.remove(&alert);
                }
            }

            station.announce("---")?;
        }

        Ok(report)
    }

    /// Unlink and forget the alerts a previous run registered.
    fn retire_alerts(&mut self, station: &mut Station) {
        if let Some(alert) = self.temperature_alert.take() {
            station.remove(&alert);
        }
        if let Some(alert) = self.wind_speed_alert.take() {
            station.remove(&alert);
        }
        if let Some(alert) = self.humidity_alert.take() {
            station.remove(&alert);
        }
    }

    fn join_scheduled<R: Rng + ?Sized>(
        &mut self,
        week: u32,
        station: &mut Station,
        rng: &mut R,
    ) -> Result<(), StationError> {
        if week == self.schedule.temperature_alert_week {
            station.announce("Adding: TemperatureAlert")?;
            let alert = Linked::new(TemperatureAlert::from_range(self.temperature_range, rng));
            logging::debug(
                Component::Simulation,
                Some(TemperatureAlert::NAME),
                &format!("threshold {}°C", alert.observer().threshold()),
            );
            self.temperature_alert = Some(alert.clone());
            station.register(alert)?;
        }
        if week == self.schedule.wind_speed_alert_week {
            station.announce("Adding: WindSpeedAlert")?;
            let alert = Linked::new(WindSpeedAlert::new());
            self.wind_speed_alert = Some(alert.clone());
            station.register(alert)?;
        }
        if week == self.schedule.humidity_alert_week {
            station.announce("Adding: HumidityAlert")?;
            let alert = Linked::new(HumidityAlert::from_range(self.humidity_range, rng));
            logging::debug(
                Component::Simulation,
                Some(HumidityAlert::NAME),
                &format!("threshold {}%", alert.observer().threshold()),
            );
            self.humidity_alert = Some(alert.clone());
            station.register(alert)?;
        }
        Ok(())
    }

    fn reading_for<R: Rng + ?Sized>(&self, week: u32, rng: &mut R) -> Reading {
        let index = (week - 1) as usize;
        if let Some(reading) = self.schedule.fixed_readings.get(index) {
            return *reading;
        }
        Reading::new(
            draw_tenths(self.schedule.random_temperature, rng),
            draw_tenths(self.schedule.random_humidity, rng),
            draw_tenths(self.schedule.random_wind_speed, rng),
        )
    }
}

/// Uniform draw from the range, rounded to one decimal.
fn draw_tenths<R: Rng + ?Sized>(range: ValueRange, rng: &mut R) -> f64 {
    let value = if range.min < range.max {
        rng.gen_range(range.min..=range.max)
    } else {
        range.min
    };
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_draw_tenths_rounds_and_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let range = ValueRange::new(15.0, 45.0);
        for _ in 0..200 {
            let v = draw_tenths(range, &mut rng);
            assert!((15.0..=45.0).contains(&v), "{} out of range", v);
            assert!(((v * 10.0).round() - v * 10.0).abs() < 1e-9, "{} not rounded", v);
        }
    }

    #[test]
    fn test_draw_tenths_degenerate_range() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(draw_tenths(ValueRange::new(12.34, 12.34), &mut rng), 12.3);
    }

    #[test]
    fn test_fixed_readings_come_first_then_random() {
        let schedule = SimulationConfig {
            fixed_readings: vec![Reading::new(1.0, 2.0, 3.0)],
            ..SimulationConfig::default()
        };
        let sim = Simulation::new(schedule, &AlertConfig::default());
        let mut rng = StdRng::seed_from_u64(5);

        assert_eq!(sim.reading_for(1, &mut rng), Reading::new(1.0, 2.0, 3.0));
        let random = sim.reading_for(2, &mut rng);
        assert!((15.0..=45.0).contains(&random.temperature));
        assert!((40.0..=100.0).contains(&random.humidity));
        assert!((0.0..=50.0).contains(&random.wind_speed));
    }
}
