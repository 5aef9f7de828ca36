use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

/// Status code the weather service puts in a successful response
pub const SUCCESS_CODE: &str = "200";

/// One day of a 7 day forecast
///
/// Every attribute is kept as the text the service sends. Attributes missing from the
/// response, or sent as null, are left empty.
#[allow(dead_code)]
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DailyForecast {
    #[serde(deserialize_with = "lenient_string")]
    pub fx_date: String,
    #[serde(deserialize_with = "lenient_string")]
    pub sunrise: String,
    #[serde(deserialize_with = "lenient_string")]
    pub sunset: String,
    #[serde(deserialize_with = "lenient_string")]
    pub moonrise: String,
    #[serde(deserialize_with = "lenient_string")]
    pub moonset: String,
    #[serde(deserialize_with = "lenient_string")]
    pub moon_phase: String,
    #[serde(deserialize_with = "lenient_string")]
    pub moon_phase_icon: String,
    #[serde(deserialize_with = "lenient_string")]
    pub temp_max: String,
    #[serde(deserialize_with = "lenient_string")]
    pub temp_min: String,
    #[serde(deserialize_with = "lenient_string")]
    pub icon_day: String,
    #[serde(deserialize_with = "lenient_string")]
    pub text_day: String,
    #[serde(deserialize_with = "lenient_string")]
    pub icon_night: String,
    #[serde(deserialize_with = "lenient_string")]
    pub text_night: String,
    #[serde(deserialize_with = "lenient_string")]
    pub wind360_day: String,
    #[serde(deserialize_with = "lenient_string")]
    pub wind_dir_day: String,
    #[serde(deserialize_with = "lenient_string")]
    pub wind_scale_day: String,
    #[serde(deserialize_with = "lenient_string")]
    pub wind_speed_day: String,
    #[serde(deserialize_with = "lenient_string")]
    pub wind360_night: String,
    #[serde(deserialize_with = "lenient_string")]
    pub wind_dir_night: String,
    #[serde(deserialize_with = "lenient_string")]
    pub wind_scale_night: String,
    #[serde(deserialize_with = "lenient_string")]
    pub wind_speed_night: String,
    #[serde(deserialize_with = "lenient_string")]
    pub humidity: String,
    #[serde(deserialize_with = "lenient_string")]
    pub precip: String,
    #[serde(deserialize_with = "lenient_string")]
    pub pressure: String,
    #[serde(deserialize_with = "lenient_string")]
    pub vis: String,
    #[serde(deserialize_with = "lenient_string")]
    pub cloud: String,
    #[serde(deserialize_with = "lenient_string")]
    pub uv_index: String,
}

/// A 7 day forecast response, days in chronological order
#[allow(dead_code)]
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Forecast {
    #[serde(deserialize_with = "lenient_string")]
    pub code: String,
    #[serde(deserialize_with = "lenient_string")]
    pub update_time: String,
    #[serde(deserialize_with = "lenient_string")]
    pub fx_link: String,
    #[serde(deserialize_with = "lenient_daily")]
    pub daily: Vec<DailyForecast>,
}

impl Forecast {
    /// Parses a response body, which must be a json object
    ///
    /// Days must be in strictly increasing date order. Days without a parseable date are
    /// left for the weekend check to reject.
    ///
    /// # Arguments
    ///
    /// * 'json' - the response body
    pub fn from_json(json: &str) -> Result<Forecast, serde_json::Error> {
        let value: Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(de::Error::custom("forecast response is not a json object"));
        }

        let forecast: Forecast = serde_json::from_value(value)?;

        let dates: Vec<Option<NaiveDate>> = forecast.daily.iter()
            .map(|d| NaiveDate::parse_from_str(&d.fx_date, "%Y-%m-%d").ok())
            .collect();
        for pair in dates.windows(2) {
            if let [Some(earlier), Some(later)] = pair {
                if later <= earlier {
                    return Err(de::Error::custom(format!("forecast days out of order: {} followed by {}", earlier, later)));
                }
            }
        }

        Ok(forecast)
    }

    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}

/// Reads any json scalar as a string, null becomes an empty string
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

fn lenient_daily<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<DailyForecast>, D::Error> {
    Ok(Option::<Vec<DailyForecast>>::deserialize(deserializer)?.unwrap_or_default())
}
