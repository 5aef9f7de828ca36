use std::env;
use log::info;
use thiserror::Error;
use crate::config::{load_cities, load_config, Config, LoadConfigurationError};
use crate::logging::{setup_logger, LoggerError};
use crate::manager_mail::{Mail, MailError, Notifier};
use crate::manager_weather::{Weather, WeatherError};
use crate::models::City;

pub struct Mgr {
    pub weather: Weather,
    pub mail: Box<dyn Notifier>,
}

/// Command line arguments
pub struct Args {
    pub config_path: String,
    pub dry_run: bool,
}

/// Initializes and returns configuration, a Mgr struct holding the initialized managers,
/// the list of cities to check and whether this is a dry run
///
pub fn init() -> Result<(Config, Mgr, Vec<City>, bool), InitializationError> {
    let args = parse_args(env::args().skip(1))?;

    // Load configuration
    let config = load_config(&args.config_path)?;

    // Setup logging
    let _ = setup_logger(config.general.log_path.as_deref(), config.general.log_level, config.general.log_to_stdout)?;

    // Print version
    info!("starting sunny weekend version: {}", env!("CARGO_PKG_VERSION"));

    let cities = load_cities(&config.files.cities)?;
    info!("Loaded {} cities from {}", cities.len(), config.files.cities);

    // Instantiate structs
    let weather = Weather::new(&config.weather)?;
    let mail = Mail::new(&config.mail)?;

    let mgr = Mgr {
        weather,
        mail: Box::new(mail),
    };

    Ok((config, mgr, cities, args.dry_run))
}

/// Parses `--config=<path>` and the optional `--dry-run` flag
///
/// # Arguments
///
/// * 'args' - command line arguments, program name excluded
fn parse_args<I: Iterator<Item = String>>(args: I) -> Result<Args, InitializationError> {
    let mut config_path: Option<String> = None;
    let mut dry_run = false;

    for arg in args {
        if let Some(path) = arg.strip_prefix("--config=") {
            config_path = Some(path.to_string());
        } else if arg == "--dry-run" {
            dry_run = true;
        } else {
            return Err(InitializationError::ArgumentError(format!("unknown argument: {}", arg)));
        }
    }

    let config_path = config_path
        .filter(|p| !p.is_empty())
        .ok_or_else(|| InitializationError::ArgumentError("--config=<path> must be given".into()))?;

    Ok(Args { config_path, dry_run })
}

/// Error depicting errors that occur while initializing a run
///
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("ArgumentError: {0}")]
    ArgumentError(String),
    #[error("ConfigurationError: {0}")]
    ConfigurationError(#[from] LoadConfigurationError),
    #[error("SetupLoggerError: {0}")]
    SetupLoggerError(#[from] LoggerError),
    #[error("WeatherSetupError: {0}")]
    WeatherSetupError(#[from] WeatherError),
    #[error("MailSetupError: {0}")]
    MailSetupError(#[from] MailError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<String>>().into_iter()
    }

    #[test]
    fn config_and_dry_run_are_parsed() {
        let parsed = parse_args(args(&["--config=/etc/sunny.toml", "--dry-run"])).unwrap();

        assert_eq!(parsed.config_path, "/etc/sunny.toml");
        assert!(parsed.dry_run);
    }

    #[test]
    fn dry_run_defaults_to_off() {
        assert!(!parse_args(args(&["--config=sunny.toml"])).unwrap().dry_run);
    }

    #[test]
    fn missing_config_is_an_error() {
        assert!(matches!(parse_args(args(&["--dry-run"])), Err(InitializationError::ArgumentError(_))));
        assert!(matches!(parse_args(args(&["--config="])), Err(InitializationError::ArgumentError(_))));
    }

    #[test]
    fn unknown_argument_is_an_error() {
        assert!(matches!(parse_args(args(&["--config=a.toml", "--verbose"])), Err(InitializationError::ArgumentError(_))));
    }
}
