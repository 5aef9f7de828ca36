pub mod models;

use std::time::Duration;
use log::info;
use reqwest::blocking::Client;
use thiserror::Error;
use crate::config::WeatherParameters;
use crate::manager_weather::models::Forecast;
use crate::models::City;

/// Struct for fetching 7 day weather forecasts
pub struct Weather {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl Weather {
    /// Returns a weather struct ready for fetching forecasts
    ///
    /// # Arguments
    ///
    /// * 'config' - weather service configuration
    pub fn new(config: &WeatherParameters) -> Result<Weather, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Weather {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Retrieves the forecast for the next 7 days for a city
    ///
    /// A response that parses but carries a non success code is returned as a
    /// `RejectedError` holding the raw payload.
    ///
    /// # Arguments
    ///
    /// * 'city' - the city to get a forecast for
    pub fn get_forecast(&self, city: &City) -> Result<Forecast, WeatherError> {
        info!("Requesting weather for {} for the next 7 days", city.name);

        let response = self.client
            .get(&self.endpoint)
            .query(&[("key", self.api_key.as_str()), ("location", city.location_id.as_str())])
            .send()?
            .error_for_status()?;

        let json = response.text()?;

        let forecast = Forecast::from_json(&json)
            .map_err(|e| WeatherError::ParseError(e.to_string()))?;

        if !forecast.is_success() {
            return Err(WeatherError::RejectedError { code: forecast.code, payload: json });
        }

        Ok(forecast)
    }
}

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("NetworkError: {0}")]
    NetworkError(reqwest::Error),
    #[error("RejectedError: code {code}, response {payload}")]
    RejectedError { code: String, payload: String },
    #[error("ParseError: {0}")]
    ParseError(String),
}

impl From<reqwest::Error> for WeatherError {
    /// The request url carries the api key, so it is dropped from the error
    fn from(e: reqwest::Error) -> Self {
        WeatherError::NetworkError(e.without_url())
    }
}
