use std::fmt::Debug;

use async_trait::async_trait;

use crate::{
    Config,
    error::LookupError,
    model::{CurrentPayload, ForecastPayload, WeatherQuery},
    provider::openweather::OpenWeatherClient,
};

pub mod openweather;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetches current conditions and the forecast for one location,
    /// concurrently. Completes only once both requests have completed.
    async fn fetch_current_and_forecast(
        &self,
        query: &WeatherQuery,
    ) -> Result<(CurrentPayload, ForecastPayload), LookupError>;
}

/// Construct the provider client from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
             Hint: run `skyglass configure` or set SKYGLASS_API_KEY."
        )
    })?;

    Ok(Box::new(OpenWeatherClient::new(api_key.to_owned(), config.base_url.clone())))
}
