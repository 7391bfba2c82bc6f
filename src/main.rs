/// Weather station simulation entry point.
///
/// Reads `.env` (if present), loads the TOML config named by
/// `WEATHER_STATION_CONFIG` or falls back to defaults, then runs the weekly
/// simulation against a console station.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use std::process::ExitCode;

use weather_station::config::{Config, ENV_CONFIG_PATH};
use weather_station::logging::{self, Component};
use weather_station::simulation::Simulation;
use weather_station::Station;

fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match env::var(ENV_CONFIG_PATH) {
        Ok(path) => Config::load(&path)?,
        Err(_) => Config::default(),
    };
    config.apply_overrides(|key| env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}

fn main() -> ExitCode {
    dotenv::dotenv().ok();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    logging::init_logger(
        config.logging.level,
        config.logging.file.as_deref(),
        config.logging.timestamps,
    );
    if let Ok(path) = env::var(ENV_CONFIG_PATH) {
        logging::debug(Component::Config, None, &format!("loaded {}", path));
    }

    let mut rng = match config.simulation.seed {
        Some(seed) => {
            logging::debug(Component::System, None, &format!("seed {}", seed));
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let weeks_planned = config.simulation.weeks;
    let mut station = Station::new();
    let mut simulation = Simulation::new(config.simulation, &config.alerts);

    match simulation.run(&mut station, &mut rng) {
        Ok(report) => {
            logging::log_run_summary(weeks_planned, report.weeks);
            ExitCode::SUCCESS
        }
        Err(e) => {
            logging::error(Component::Simulation, None, &format!("run aborted: {}", e));
            logging::log_run_summary(weeks_planned, simulation.weeks_completed());
            ExitCode::FAILURE
        }
    }
}
