//! Turns raw provider payloads into display-ready records.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{CurrentPayload, ForecastEntry, ForecastItem, ForecastPayload, WeatherSnapshot};

/// Forecast samples per calendar day at the provider's 3-hour step.
pub const SAMPLES_PER_DAY: usize = 8;

/// Icon identifiers understood by every presentation surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconKey {
    #[default]
    ClearDay,
    ClearNight,
    PartlyCloudyDay,
    PartlyCloudyNight,
    Cloudy,
    Showers,
    RainDay,
    RainNight,
    Thunderstorm,
    Snow,
    Fog,
}

impl IconKey {
    pub const fn all() -> &'static [IconKey] {
        &[
            IconKey::ClearDay,
            IconKey::ClearNight,
            IconKey::PartlyCloudyDay,
            IconKey::PartlyCloudyNight,
            IconKey::Cloudy,
            IconKey::Showers,
            IconKey::RainDay,
            IconKey::RainNight,
            IconKey::Thunderstorm,
            IconKey::Snow,
            IconKey::Fog,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IconKey::ClearDay => "clear-day",
            IconKey::ClearNight => "clear-night",
            IconKey::PartlyCloudyDay => "partly-cloudy-day",
            IconKey::PartlyCloudyNight => "partly-cloudy-night",
            IconKey::Cloudy => "cloudy",
            IconKey::Showers => "showers",
            IconKey::RainDay => "rain-day",
            IconKey::RainNight => "rain-night",
            IconKey::Thunderstorm => "thunderstorm",
            IconKey::Snow => "snow",
            IconKey::Fog => "fog",
        }
    }

    /// Weather Icons font class.
    pub fn css_class(&self) -> &'static str {
        match self {
            IconKey::ClearDay => "wi-day-sunny",
            IconKey::ClearNight => "wi-night-clear",
            IconKey::PartlyCloudyDay => "wi-day-cloudy",
            IconKey::PartlyCloudyNight => "wi-night-alt-cloudy",
            IconKey::Cloudy => "wi-cloudy",
            IconKey::Showers => "wi-showers",
            IconKey::RainDay => "wi-day-rain",
            IconKey::RainNight => "wi-night-alt-rain",
            IconKey::Thunderstorm => "wi-thunderstorm",
            IconKey::Snow => "wi-snow",
            IconKey::Fog => "wi-fog",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            IconKey::ClearDay => "☀",
            IconKey::ClearNight => "☾",
            IconKey::PartlyCloudyDay => "⛅",
            IconKey::PartlyCloudyNight => "☁☾",
            IconKey::Cloudy => "☁",
            IconKey::Showers => "🌦",
            IconKey::RainDay | IconKey::RainNight => "🌧",
            IconKey::Thunderstorm => "⛈",
            IconKey::Snow => "❄",
            IconKey::Fog => "🌫",
        }
    }
}

impl std::fmt::Display for IconKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Total mapping from provider condition codes (`"01d"`, `"10n"`, ...) to icons.
pub fn condition_to_icon_key(code: &str) -> IconKey {
    match code {
        "01d" => IconKey::ClearDay,
        "01n" => IconKey::ClearNight,
        "02d" => IconKey::PartlyCloudyDay,
        "02n" => IconKey::PartlyCloudyNight,
        "03d" | "03n" | "04d" | "04n" => IconKey::Cloudy,
        "09d" | "09n" => IconKey::Showers,
        "10d" => IconKey::RainDay,
        "10n" => IconKey::RainNight,
        "11d" | "11n" => IconKey::Thunderstorm,
        "13d" | "13n" => IconKey::Snow,
        "50d" | "50n" => IconKey::Fog,
        _ => IconKey::ClearDay,
    }
}

/// Rounds half-up toward positive infinity, so -2.5 becomes -2.
pub fn round_temperature(celsius: f64) -> i64 {
    (celsius + 0.5).floor() as i64
}

pub fn to_snapshot(current: &CurrentPayload) -> WeatherSnapshot {
    to_snapshot_on(current, Local::now().date_naive())
}

/// Like [`to_snapshot`] with an explicit display date.
pub fn to_snapshot_on(current: &CurrentPayload, date: NaiveDate) -> WeatherSnapshot {
    let code = current.condition_code();

    WeatherSnapshot {
        city_name: current.name.clone(),
        date,
        temperature_c: round_temperature(current.main.temp),
        humidity_pct: current.main.humidity,
        wind_speed: current.wind.speed,
        condition_code: code.to_string(),
        icon: condition_to_icon_key(code),
    }
}

/// One entry per day, taken at a fixed stride of [`SAMPLES_PER_DAY`] starting
/// from the first sample.
///
/// This picks the same clock time each day rather than aggregating a day's
/// samples, and assumes the list starts at a day boundary. It is an
/// approximation and is kept that way deliberately.
pub fn to_forecast_series(forecast: &ForecastPayload) -> Vec<ForecastEntry> {
    forecast
        .list
        .iter()
        .step_by(SAMPLES_PER_DAY)
        .map(to_forecast_entry)
        .collect()
}

fn to_forecast_entry(item: &ForecastItem) -> ForecastEntry {
    let code = item.condition_code();

    ForecastEntry {
        timestamp: forecast_timestamp(item),
        temperature_c: round_temperature(item.main.temp),
        humidity_pct: item.main.humidity,
        condition_code: code.to_string(),
        icon: condition_to_icon_key(code),
    }
}

fn forecast_timestamp(item: &ForecastItem) -> DateTime<Utc> {
    item.dt_txt
        .as_deref()
        .and_then(|txt| chrono::NaiveDateTime::parse_from_str(txt, "%Y-%m-%d %H:%M:%S").ok())
        .map(|naive| naive.and_utc())
        .or_else(|| DateTime::from_timestamp(item.dt, 0))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CityBlock, ConditionBlock, MainBlock, WindBlock};

    fn item(i: usize) -> ForecastItem {
        let dt = 1_760_875_200 + (i as i64) * 3 * 3600;
        ForecastItem {
            dt,
            dt_txt: None,
            main: MainBlock { temp: i as f64, humidity: 50 },
            wind: WindBlock::default(),
            weather: vec![ConditionBlock {
                main: "Clouds".into(),
                description: "overcast clouds".into(),
                icon: "04d".into(),
            }],
        }
    }

    fn forecast(n: usize) -> ForecastPayload {
        ForecastPayload { city: CityBlock::default(), list: (0..n).map(item).collect() }
    }

    #[test]
    fn icon_table_matches_provider_codes() {
        assert_eq!(condition_to_icon_key("01d"), IconKey::ClearDay);
        assert_eq!(condition_to_icon_key("01n"), IconKey::ClearNight);
        assert_eq!(condition_to_icon_key("02n"), IconKey::PartlyCloudyNight);
        assert_eq!(condition_to_icon_key("03n"), IconKey::Cloudy);
        assert_eq!(condition_to_icon_key("04d"), IconKey::Cloudy);
        assert_eq!(condition_to_icon_key("09n"), IconKey::Showers);
        assert_eq!(condition_to_icon_key("10d"), IconKey::RainDay);
        assert_eq!(condition_to_icon_key("10n"), IconKey::RainNight);
        assert_eq!(condition_to_icon_key("11d"), IconKey::Thunderstorm);
        assert_eq!(condition_to_icon_key("13n"), IconKey::Snow);
        assert_eq!(condition_to_icon_key("50d"), IconKey::Fog);
    }

    #[test]
    fn icon_mapping_is_total() {
        for code in ["", "99x", "01D", " 01d", "💥", "10dd"] {
            let key = condition_to_icon_key(code);
            assert_eq!(key, IconKey::ClearDay, "code {code:?}");
            assert!(IconKey::all().contains(&key));
        }
    }

    #[test]
    fn css_classes_follow_weather_icons() {
        assert_eq!(IconKey::ClearDay.css_class(), "wi-day-sunny");
        assert_eq!(IconKey::RainNight.css_class(), "wi-night-alt-rain");
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(round_temperature(14.5), 15);
        assert_eq!(round_temperature(14.49), 14);
        assert_eq!(round_temperature(-2.5), -2);
        assert_eq!(round_temperature(-2.51), -3);
    }

    #[test]
    fn snapshot_extracts_display_fields() {
        let current: CurrentPayload = serde_json::from_value(serde_json::json!({
            "name": "Paris",
            "dt": 1760870000,
            "main": { "temp": 14.6, "humidity": 72 },
            "wind": { "speed": 3.61 },
            "weather": [{ "main": "Rain", "description": "light rain", "icon": "10n" }]
        }))
        .expect("payload");
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).expect("date");

        let snapshot = to_snapshot_on(&current, date);
        assert_eq!(snapshot.city_name, "Paris");
        assert_eq!(snapshot.date, date);
        assert_eq!(snapshot.temperature_c, 15);
        assert_eq!(snapshot.humidity_pct, 72);
        assert_eq!(snapshot.wind_speed, 3.61);
        assert_eq!(snapshot.icon, IconKey::RainNight);
    }

    #[test]
    fn series_samples_every_eighth_entry() {
        for n in [0usize, 1, 7, 8, 9, 39, 40, 41] {
            let series = to_forecast_series(&forecast(n));
            assert_eq!(series.len(), n.div_ceil(SAMPLES_PER_DAY), "n = {n}");

            for (day, entry) in series.iter().enumerate() {
                assert_eq!(entry.temperature_c, (day * SAMPLES_PER_DAY) as i64);
            }
        }
    }

    #[test]
    fn series_prefers_dt_txt_timestamp() {
        let mut payload = forecast(1);
        payload.list[0].dt_txt = Some("2026-10-20 12:00:00".into());

        let series = to_forecast_series(&payload);
        assert_eq!(series[0].timestamp.to_rfc3339(), "2026-10-20T12:00:00+00:00");
        assert_eq!(series[0].icon, IconKey::Cloudy);
    }
}
