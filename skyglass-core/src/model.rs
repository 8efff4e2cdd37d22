use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::presenter::IconKey;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// What a single lookup is addressed by.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherQuery {
    City(String),
    Coords(Coordinates),
}

impl WeatherQuery {
    pub fn city(name: impl Into<String>) -> Self {
        WeatherQuery::City(name.into())
    }

    pub fn coords(latitude: f64, longitude: f64) -> Self {
        WeatherQuery::Coords(Coordinates { latitude, longitude })
    }

    /// Query-string pairs addressing the location, without credentials.
    pub fn location_params(&self) -> Vec<(&'static str, String)> {
        match self {
            WeatherQuery::City(name) => vec![("q", name.clone())],
            WeatherQuery::Coords(c) => {
                vec![("lat", c.latitude.to_string()), ("lon", c.longitude.to_string())]
            }
        }
    }
}

impl std::fmt::Display for WeatherQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeatherQuery::City(name) => write!(f, "{name}"),
            WeatherQuery::Coords(c) => write!(f, "{:.4},{:.4}", c.latitude, c.longitude),
        }
    }
}

/// Display-ready current conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city_name: String,
    pub date: NaiveDate,
    /// Rounded to a whole degree Celsius.
    pub temperature_c: i64,
    pub humidity_pct: u8,
    pub wind_speed: f64,
    pub condition_code: String,
    pub icon: IconKey,
}

/// One representative forecast sample for a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub timestamp: DateTime<Utc>,
    /// Rounded to a whole degree Celsius.
    pub temperature_c: i64,
    pub humidity_pct: u8,
    pub condition_code: String,
    pub icon: IconKey,
}

// Raw provider payloads. Decoded as-is; interpretation lives in the presenter.

#[derive(Debug, Clone, Deserialize)]
pub struct MainBlock {
    pub temp: f64,
    pub humidity: u8,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WindBlock {
    #[serde(default)]
    pub speed: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConditionBlock {
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

/// Body of the current-conditions endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentPayload {
    pub name: String,
    #[serde(default)]
    pub dt: i64,
    pub main: MainBlock,
    #[serde(default)]
    pub wind: WindBlock,
    #[serde(default)]
    pub weather: Vec<ConditionBlock>,
}

impl CurrentPayload {
    /// Short condition code of the first weather element, e.g. `"10d"`.
    pub fn condition_code(&self) -> &str {
        self.weather.first().map(|w| w.icon.as_str()).unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CityBlock {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastItem {
    pub dt: i64,
    #[serde(default)]
    pub dt_txt: Option<String>,
    pub main: MainBlock,
    #[serde(default)]
    pub wind: WindBlock,
    #[serde(default)]
    pub weather: Vec<ConditionBlock>,
}

impl ForecastItem {
    pub fn condition_code(&self) -> &str {
        self.weather.first().map(|w| w.icon.as_str()).unwrap_or("")
    }
}

/// Body of the forecast endpoint: a flat chronological list of 3-hourly samples.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastPayload {
    #[serde(default)]
    pub city: CityBlock,
    #[serde(default)]
    pub list: Vec<ForecastItem>,
}
