use chrono::{DateTime, NaiveDate};
use crate::manager_weather::models::DailyForecast;
use crate::models::SunnyWeekend;

const BODY_HEADER: &str = "以下城市将在本周末天气晴好：";
const SUBJECT_SUFFIX: &str = "周末天气晴好提醒";
const NO_SUNNY_WEEKEND: &str = "未来7日内无晴好周末";

/// Rendered result of one run
#[derive(Debug, PartialEq)]
pub enum Report {
    Sunny { subject: String, body: String },
    NoSunnyWeekend { line: String },
}

impl Report {
    /// Renders the report for the cities found to have a sunny weekend
    ///
    /// # Arguments
    ///
    /// * 'sunny' - cities with a sunny weekend, in the order they should be listed
    /// * 'run_date' - the date of the run, used in the subject or the sentinel line
    /// * 'sunday_night_from_saturday' - print Saturday's night condition on the Sunday line
    pub fn render(sunny: &[SunnyWeekend], run_date: NaiveDate, sunday_night_from_saturday: bool) -> Report {
        let date = run_date.format("%Y-%m-%d");

        if sunny.is_empty() {
            return Report::NoSunnyWeekend { line: format!("{} - {}", date, NO_SUNNY_WEEKEND) };
        }

        let blocks = sunny.iter()
            .map(|s| city_block(s, sunday_night_from_saturday))
            .collect::<Vec<String>>()
            .join("\n\n");

        Report::Sunny {
            subject: format!("{} - {}", date, SUBJECT_SUFFIX),
            body: format!("{}\n\n{}", BODY_HEADER, blocks),
        }
    }

    /// Returns the text to put in the status document
    pub fn status_content(&self) -> String {
        match self {
            Report::Sunny { subject, body } => format!("{}\n{}", subject, body),
            Report::NoSunnyWeekend { line } => line.clone(),
        }
    }
}

fn city_block(sunny: &SunnyWeekend, sunday_night_from_saturday: bool) -> String {
    let sunday_night = if sunday_night_from_saturday {
        &sunny.saturday.text_night
    } else {
        &sunny.sunday.text_night
    };

    format!(
        "{} 更新时间 - {}:\n{}\n{}",
        sunny.city.name,
        format_update_time(&sunny.update_time),
        day_line(&sunny.saturday, &sunny.saturday.text_night),
        day_line(&sunny.sunday, sunday_night),
    )
}

fn day_line(day: &DailyForecast, night: &str) -> String {
    format!("{} 最高气温: {}°C 最低气温: {}°C 夜间：{}", day.fx_date, day.temp_max, day.temp_min, night)
}

/// Formats an update time such as `2024-06-14T16:35+08:00` as `2024-06-14 16:35`,
/// anything else is returned as given
fn format_update_time(update_time: &str) -> String {
    DateTime::parse_from_str(update_time, "%Y-%m-%dT%H:%M%z")
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| update_time.to_string())
}

#[cfg(test)]
mod tests {
    use crate::models::City;
    use super::*;

    fn day(date: &str, max: &str, min: &str, night: &str) -> DailyForecast {
        DailyForecast {
            fx_date: date.into(),
            temp_max: max.into(),
            temp_min: min.into(),
            text_day: "晴".into(),
            text_night: night.into(),
            ..Default::default()
        }
    }

    fn sunny(name: &str, update_time: &str) -> SunnyWeekend {
        SunnyWeekend {
            city: City { name: name.into(), location_id: "0".into() },
            update_time: update_time.into(),
            saturday: day("2024-06-15", "35", "22", "晴"),
            sunday: day("2024-06-16", "33", "21", "多云"),
        }
    }

    fn run_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 12).unwrap()
    }

    #[test]
    fn empty_list_renders_sentinel_only() {
        let report = Report::render(&[], run_date(), false);

        assert_eq!(report, Report::NoSunnyWeekend { line: "2024-06-12 - 未来7日内无晴好周末".into() });
        assert_eq!(report.status_content(), "2024-06-12 - 未来7日内无晴好周末");
    }

    #[test]
    fn single_city_report() {
        let report = Report::render(&[sunny("Beijing", "2024-06-12T07:35+08:00")], run_date(), false);

        let Report::Sunny { subject, body } = &report else { panic!("expected sunny report") };
        assert_eq!(subject, "2024-06-12 - 周末天气晴好提醒");
        assert_eq!(body, "以下城市将在本周末天气晴好：\n\n\
            Beijing 更新时间 - 2024-06-12 07:35:\n\
            2024-06-15 最高气温: 35°C 最低气温: 22°C 夜间：晴\n\
            2024-06-16 最高气温: 33°C 最低气温: 21°C 夜间：多云");
        assert_eq!(report.status_content(), format!("{}\n{}", subject, body));
    }

    #[test]
    fn two_cities_are_separated_by_one_blank_line() {
        let report = Report::render(
            &[sunny("Beijing", "2024-06-12T07:35+08:00"), sunny("Shanghai", "2024-06-12T08:10+08:00")],
            run_date(),
            false,
        );

        let Report::Sunny { body, .. } = report else { panic!("expected sunny report") };
        let blocks: Vec<&str> = body.split("\n\n").collect();
        assert_eq!(blocks.len(), 3);
        assert!(blocks[1].starts_with("Beijing 更新时间 - 2024-06-12 07:35:"));
        assert!(blocks[2].starts_with("Shanghai 更新时间 - 2024-06-12 08:10:"));
        assert_eq!(blocks[1].lines().count(), 3);
        assert_eq!(blocks[2].lines().count(), 3);
        assert!(!body.ends_with('\n'));
        assert!(!body.starts_with('\n'));
    }

    #[test]
    fn legacy_sunday_night_uses_saturday() {
        let report = Report::render(&[sunny("Beijing", "2024-06-12T07:35+08:00")], run_date(), true);

        let Report::Sunny { body, .. } = report else { panic!("expected sunny report") };
        assert!(body.ends_with("2024-06-16 最高气温: 33°C 最低气温: 21°C 夜间：晴"));
    }

    #[test]
    fn unparseable_update_time_is_kept() {
        assert_eq!(format_update_time(""), "");
        assert_eq!(format_update_time("yesterday"), "yesterday");
        assert_eq!(format_update_time("2024-06-12T23:05+0000"), "2024-06-12 23:05");
    }
}
