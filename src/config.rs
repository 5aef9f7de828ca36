use std::{env, fs};
use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;
use crate::models::City;

const DEFAULT_WEATHER_ENDPOINT: &str = "https://devapi.qweather.com/v7/weather/7d";

#[derive(Deserialize)]
pub struct WeatherParameters {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default = "default_sunny_text")]
    pub sunny_text: String,
}

#[derive(Deserialize)]
pub struct MailParameters {
    pub smtp_endpoint: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    pub smtp_user: String,
    #[serde(default)]
    pub smtp_password: String,
    pub from: String,
    pub to: String,
}

#[derive(Deserialize)]
pub struct Files {
    #[serde(default = "default_cities")]
    pub cities: String,
}

#[derive(Deserialize)]
pub struct StatusParameters {
    #[serde(default = "default_status_path")]
    pub path: String,
    #[serde(default = "default_start_marker")]
    pub start_marker: String,
    #[serde(default = "default_end_marker")]
    pub end_marker: String,
}

#[derive(Deserialize, Default)]
pub struct ReportParameters {
    /// Prints Saturday's night condition on the Sunday line, as older reports did
    #[serde(default)]
    pub sunday_night_from_saturday: bool,
}

#[derive(Deserialize)]
pub struct General {
    pub log_path: Option<String>,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
}

#[derive(Deserialize)]
pub struct Config {
    pub weather: WeatherParameters,
    pub mail: MailParameters,
    #[serde(default)]
    pub files: Files,
    #[serde(default)]
    pub status: StatusParameters,
    #[serde(default)]
    pub report: ReportParameters,
    pub general: General,
}

/// Loads the configuration file and returns a struct with all configuration items
///
/// Secrets may be left out of the file and given as `WEATHER_API_KEY` and `EMAIL_PASSWORD`
/// environment variables instead.
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, LoadConfigurationError> {
    let toml = fs::read_to_string(config_path)
        .map_err(|e| LoadConfigurationError::ReadError(format!("{}: {}", config_path, e)))?;
    let mut config = parse_config(&toml)?;

    apply_overrides(&mut config, env::var("WEATHER_API_KEY").ok(), env::var("EMAIL_PASSWORD").ok());
    validate_config(&config)?;

    Ok(config)
}

/// Loads the list of cities to check
///
/// # Arguments
///
/// * 'cities_path' - path to a json file with an array of cities
pub fn load_cities(cities_path: &str) -> Result<Vec<City>, LoadConfigurationError> {
    let json = fs::read_to_string(cities_path)
        .map_err(|e| LoadConfigurationError::ReadError(format!("{}: {}", cities_path, e)))?;

    let cities: Vec<City> = serde_json::from_str(&json)
        .map_err(|e| LoadConfigurationError::CitiesError(format!("{}: {}", cities_path, e)))?;

    Ok(cities)
}

/// Replaces secrets from the file with the given values, empty values are ignored
///
/// # Arguments
///
/// * 'config' - configuration to update
/// * 'api_key' - weather api key, if given
/// * 'smtp_password' - smtp password, if given
fn apply_overrides(config: &mut Config, api_key: Option<String>, smtp_password: Option<String>) {
    if let Some(api_key) = api_key.filter(|v| !v.trim().is_empty()) {
        config.weather.api_key = api_key;
    }
    if let Some(password) = smtp_password.filter(|v| !v.trim().is_empty()) {
        config.mail.smtp_password = password;
    }
}

fn parse_config(toml: &str) -> Result<Config, LoadConfigurationError> {
    toml::from_str(toml).map_err(|e| LoadConfigurationError::ParseError(e.to_string()))
}

/// Checks that all values needed for a run are present
///
/// # Arguments
///
/// * 'config' - configuration to check
fn validate_config(config: &Config) -> Result<(), LoadConfigurationError> {
    let required = [
        ("weather.api_key", &config.weather.api_key),
        ("weather.endpoint", &config.weather.endpoint),
        ("mail.smtp_endpoint", &config.mail.smtp_endpoint),
        ("mail.smtp_user", &config.mail.smtp_user),
        ("mail.smtp_password", &config.mail.smtp_password),
        ("mail.from", &config.mail.from),
        ("mail.to", &config.mail.to),
        ("status.start_marker", &config.status.start_marker),
        ("status.end_marker", &config.status.end_marker),
    ];

    if let Some((name, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(LoadConfigurationError::MissingValue(name.to_string()));
    }
    if config.weather.workers == 0 {
        return Err(LoadConfigurationError::MissingValue("weather.workers must be at least 1".into()));
    }
    if config.weather.timeout_secs == 0 {
        return Err(LoadConfigurationError::MissingValue("weather.timeout_secs must be at least 1".into()));
    }

    Ok(())
}

impl Default for Files {
    fn default() -> Self {
        Self { cities: default_cities() }
    }
}

impl Default for StatusParameters {
    fn default() -> Self {
        Self {
            path: default_status_path(),
            start_marker: default_start_marker(),
            end_marker: default_end_marker(),
        }
    }
}

fn default_endpoint() -> String { DEFAULT_WEATHER_ENDPOINT.to_string() }
fn default_timeout_secs() -> u64 { 30 }
fn default_workers() -> usize { 10 }
fn default_sunny_text() -> String { "晴".to_string() }
fn default_smtp_port() -> u16 { 465 }
fn default_cities() -> String { "city.json".to_string() }
fn default_status_path() -> String { "README.md".to_string() }
fn default_start_marker() -> String { "## Current Status".to_string() }
fn default_end_marker() -> String { "## Configuration".to_string() }

/// Error depicting errors that occur while loading configuration and the city list
///
#[derive(Debug, Error)]
pub enum LoadConfigurationError {
    #[error("ReadError: {0}")]
    ReadError(String),
    #[error("ParseError: {0}")]
    ParseError(String),
    #[error("CitiesError: {0}")]
    CitiesError(String),
    #[error("MissingValue: {0}")]
    MissingValue(String),
}
