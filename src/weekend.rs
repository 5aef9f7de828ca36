use chrono::{Datelike, NaiveDate, Weekday};
use log::info;
use thiserror::Error;
use crate::manager_weather::models::{DailyForecast, Forecast};
use crate::models::{City, SunnyWeekend};

/// Checks whether the coming weekend in a forecast is sunny on both days
///
/// The last day of the forecast is never taken as a Saturday. The first Saturday found
/// decides the outcome, and a Sunday seen before any Saturday means the weekend is already
/// under way or past.
///
/// # Arguments
///
/// * 'city' - the city the forecast is for
/// * 'forecast' - a forecast with days in chronological order
/// * 'sunny_text' - day condition text meaning sunny
pub fn find_sunny_weekend(city: &City, forecast: &Forecast, sunny_text: &str) -> Result<Option<SunnyWeekend>, WeekendError> {
    let scan_len = forecast.daily.len().saturating_sub(1);

    for (i, day) in forecast.daily[..scan_len].iter().enumerate() {
        let date = parse_date(day)?;

        match date.weekday() {
            Weekday::Sun => break,
            Weekday::Sat => {
                let saturday = day;
                let sunday = &forecast.daily[i + 1];
                if Some(parse_date(sunday)?) != date.succ_opt() {
                    break;
                }

                if saturday.text_day == sunny_text && sunday.text_day == sunny_text {
                    info!("{} has good weather for the coming weekend", city.name);
                    return Ok(Some(SunnyWeekend {
                        city: city.clone(),
                        update_time: forecast.update_time.clone(),
                        saturday: saturday.clone(),
                        sunday: sunday.clone(),
                    }));
                }
                break;
            }
            _ => continue,
        }
    }

    info!("{} does not have good weather for the coming weekend", city.name);
    Ok(None)
}

fn parse_date(day: &DailyForecast) -> Result<NaiveDate, WeekendError> {
    NaiveDate::parse_from_str(&day.fx_date, "%Y-%m-%d")
        .map_err(|e| WeekendError::DateError(format!("{:?}: {}", day.fx_date, e)))
}

#[derive(Debug, Error)]
pub enum WeekendError {
    #[error("DateError: {0}")]
    DateError(String),
}
