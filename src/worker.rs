use chrono::NaiveDate;
use log::{error, info};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use thiserror::Error;
use crate::config::Config;
use crate::initialization::Mgr;
use crate::manager_mail::MailError;
use crate::manager_weather::Weather;
use crate::models::{City, SunnyWeekend};
use crate::report::Report;
use crate::status::{update_status, StatusError};
use crate::weekend::find_sunny_weekend;

/// Runs one check of all cities and reports the outcome
///
/// A mail is only sent when at least one city has a sunny weekend, the status document is
/// always rewritten. In a dry run both are logged instead.
///
/// # Arguments
///
/// * 'config' - configuration
/// * 'mgr' - struct with configured managers
/// * 'cities' - the cities to check, in the order they are to be reported
/// * 'run_date' - the date of the run
/// * 'dry_run' - log the report instead of mailing it and writing the status document
pub fn run(config: &Config, mgr: &Mgr, cities: &[City], run_date: NaiveDate, dry_run: bool) -> Result<Report, WorkerError> {
    let sunny = find_sunny_cities(&mgr.weather, cities, &config.weather.sunny_text, config.weather.workers)?;
    info!("Cities checked: {}, with a sunny weekend: {}", cities.len(), sunny.len());

    let report = Report::render(&sunny, run_date, config.report.sunday_night_from_saturday);
    let content = report.status_content();

    if dry_run {
        info!("Dry run, not sending mail or writing status to {}", config.status.path);
    } else {
        if let Report::Sunny { subject, body } = &report {
            mgr.mail.send_mail(subject, body)?;
            info!("Report mailed: {}", subject);
        }
        update_status(&config.status, &content)?;
    }

    info!("{}", content);

    Ok(report)
}

/// Fetches and classifies the forecast for every city on a bounded pool
///
/// Results keep the order of the given cities. A city whose forecast can't be fetched,
/// parsed or classified is logged and left out.
///
/// # Arguments
///
/// * 'weather' - the weather service client
/// * 'cities' - the cities to check
/// * 'sunny_text' - day condition text meaning sunny
/// * 'workers' - max number of concurrent requests
fn find_sunny_cities(weather: &Weather, cities: &[City], sunny_text: &str, workers: usize) -> Result<Vec<SunnyWeekend>, WorkerError> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| WorkerError::ThreadPoolError(e.to_string()))?;

    let results: Vec<Option<SunnyWeekend>> = pool.install(|| {
        cities.par_iter()
            .map(|city| check_city(weather, city, sunny_text))
            .collect()
    });

    Ok(results.into_iter().flatten().collect())
}

/// Fetches and classifies the forecast for one city
///
/// # Arguments
///
/// * 'weather' - the weather service client
/// * 'city' - the city to check
/// * 'sunny_text' - day condition text meaning sunny
fn check_city(weather: &Weather, city: &City, sunny_text: &str) -> Option<SunnyWeekend> {
    let forecast = match weather.get_forecast(city) {
        Ok(forecast) => forecast,
        Err(e) => {
            error!("Error while requesting weather for {}: {}", city.name, e);
            return None;
        }
    };

    find_sunny_weekend(city, &forecast, sunny_text)
        .unwrap_or_else(|e| {
            error!("Error while parsing weather data for {}: {}", city.name, e);
            None
        })
}

/// Error depicting errors that end a run
///
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("error while creating thread pool: {0}")]
    ThreadPoolError(String),
    #[error("error while sending report: {0}")]
    NotificationError(#[from] MailError),
    #[error("error while writing status: {0}")]
    StatusError(#[from] StatusError),
}
