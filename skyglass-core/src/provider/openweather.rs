use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    error::LookupError,
    model::{CurrentPayload, ForecastPayload, WeatherQuery},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    async fn send(&self, endpoint: &str, query: &WeatherQuery) -> Result<Response, LookupError> {
        let url = format!("{}/{endpoint}", self.base_url);
        let mut params = query.location_params();
        params.push(("appid", self.api_key.clone()));
        params.push(("units", "metric".to_string()));

        debug!(%url, %query, "requesting OpenWeather {endpoint}");
        Ok(self.http.get(&url).query(&params).send().await?)
    }
}

async fn decode<T: DeserializeOwned>(res: Response) -> Result<T, LookupError> {
    let body = res.text().await?;
    Ok(serde_json::from_str(&body)?)
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn fetch_current_and_forecast(
        &self,
        query: &WeatherQuery,
    ) -> Result<(CurrentPayload, ForecastPayload), LookupError> {
        let (current, forecast) =
            tokio::join!(self.send("weather", query), self.send("forecast", query));

        let (current, forecast) = (current?, forecast?);
        for res in [&current, &forecast] {
            if !res.status().is_success() {
                return Err(LookupError::NotFound { status: res.status() });
            }
        }

        let (current, forecast) = tokio::join!(
            decode::<CurrentPayload>(current),
            decode::<ForecastPayload>(forecast)
        );

        Ok((current?, forecast?))
    }
}
