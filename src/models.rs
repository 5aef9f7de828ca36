use serde::Deserialize;
use crate::manager_weather::models::DailyForecast;

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct City {
    pub name: String,
    pub location_id: String,
}

/// A city whose coming Saturday and Sunday are both forecast as sunny
#[derive(Clone, Debug)]
pub struct SunnyWeekend {
    pub city: City,
    pub update_time: String,
    pub saturday: DailyForecast,
    pub sunday: DailyForecast,
}
