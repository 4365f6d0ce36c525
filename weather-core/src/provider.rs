use crate::{
    Config, CurrentConditions, DailyForecastSummary, WeatherError,
    provider::openweather::{OpenWeatherConfig, OpenWeatherProvider},
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc, time::Duration};

pub mod openweather;

/// Source of current conditions and daily forecasts for a city.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_current(&self, city: &str) -> Result<CurrentConditions, WeatherError>;

    /// Up to `days` daily summaries, oldest first. `days` is clamped to `1..=5`.
    async fn fetch_forecast(
        &self,
        city: &str,
        days: u8,
    ) -> Result<Vec<DailyForecastSummary>, WeatherError>;
}

/// Build the OpenWeather provider from config.
///
/// `env_api_key` is the value of `OPENWEATHER_API_KEY`, if set; it takes
/// precedence over the key stored in the config file.
pub fn provider_from_config(
    config: &Config,
    env_api_key: Option<String>,
) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let api_key = config.resolve_api_key(env_api_key)?;

    let settings = &config.openweather;
    let client_config = OpenWeatherConfig {
        api_key,
        base_url: settings.base_url.clone(),
        timeout: Duration::from_secs(settings.timeout_secs),
    };

    let provider = OpenWeatherProvider::new(client_config)?;
    Ok(Arc::new(provider))
}
