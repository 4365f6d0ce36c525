use std::{fmt, time::Duration};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, error, instrument, warn};

use crate::{
    error::WeatherError,
    forecast::{SAMPLES_PER_DAY, aggregate_daily, clamp_days},
    model::{CurrentConditions, DailyForecastSummary, RawForecastEntry, round1, title_case},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Immutable settings the client is built from.
#[derive(Clone)]
pub struct OpenWeatherConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl OpenWeatherConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

// Keeps the key out of logs.
impl fmt::Debug for OpenWeatherConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    config: OpenWeatherConfig,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(config: OpenWeatherConfig) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| WeatherError::Unclassified(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, http })
    }

    /// GET `{base}/{resource}` with the city, key and metric units, decoding the body as `T`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        city: &str,
        extra: &[(&str, &str)],
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{}", self.config.base_url.trim_end_matches('/'), resource);

        let mut params = vec![
            ("q", city),
            ("appid", self.config.api_key.as_str()),
            ("units", "metric"),
        ];
        params.extend_from_slice(extra);

        debug!(%url, "Requesting OpenWeather {resource}");

        let res = self.http.get(&url).query(&params).send().await?;

        let status = res.status();
        if status == StatusCode::NOT_FOUND {
            return Err(WeatherError::UnknownCity { city: city.to_string() });
        }
        if !status.is_success() {
            return Err(WeatherError::Upstream { status: status.as_u16() });
        }

        let body = res.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn current(&self, city: &str) -> Result<CurrentConditions, WeatherError> {
        let parsed: OwCurrentResponse = self.get_json("weather", city, &[]).await?;
        parsed.into_conditions()
    }

    async fn forecast(
        &self,
        city: &str,
        days: u8,
    ) -> Result<Vec<DailyForecastSummary>, WeatherError> {
        let days = clamp_days(i64::from(days));
        let cnt = (u16::from(days) * u16::from(SAMPLES_PER_DAY)).to_string();

        let parsed: OwForecastResponse =
            self.get_json("forecast", city, &[("cnt", cnt.as_str())]).await?;

        if parsed.list.is_empty() {
            return Err(WeatherError::MalformedResponse(
                "forecast response contained no entries".to_string(),
            ));
        }

        let entries = parsed
            .list
            .into_iter()
            .map(OwForecastEntry::into_raw)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(aggregate_daily(&entries, &Local, usize::from(days)))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self))]
    async fn fetch_current(&self, city: &str) -> Result<CurrentConditions, WeatherError> {
        self.current(city)
            .await
            .inspect_err(|err| log_failure(city, "current weather", err))
    }

    #[instrument(skip(self))]
    async fn fetch_forecast(
        &self,
        city: &str,
        days: u8,
    ) -> Result<Vec<DailyForecastSummary>, WeatherError> {
        self.forecast(city, days)
            .await
            .inspect_err(|err| log_failure(city, "forecast", err))
    }
}

fn log_failure(city: &str, resource: &str, err: &WeatherError) {
    match err {
        WeatherError::UnknownCity { .. } => {
            warn!(city, kind = err.kind(), "City '{city}' not found ({resource})");
        }
        WeatherError::Timeout => {
            error!(city, kind = err.kind(), "Timeout while fetching {resource} for {city}");
        }
        _ => {
            error!(city, kind = err.kind(), error = %err, "Error fetching {resource} for {city}");
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    /// hPa, passed through as sent.
    pressure: serde_json::Number,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    /// Only the current-weather payload needs the category.
    #[serde(default)]
    main: Option<String>,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    #[serde(default = "zero")]
    deg: serde_json::Number,
}

fn zero() -> serde_json::Number {
    serde_json::Number::from(0)
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    sys: OwSys,
    /// Metres.
    #[serde(default)]
    visibility: f64,
    timezone: i32,
}

impl OwCurrentResponse {
    fn into_conditions(self) -> Result<CurrentConditions, WeatherError> {
        let weather = first_condition(self.weather)?;
        let condition = weather.main.ok_or_else(|| {
            WeatherError::MalformedResponse("weather condition has no category".to_string())
        })?;

        Ok(CurrentConditions {
            city: self.name,
            country: self.sys.country,
            temperature: round1(self.main.temp),
            feels_like: round1(self.main.feels_like),
            humidity: self.main.humidity,
            pressure: self.main.pressure,
            description: title_case(&weather.description),
            condition,
            icon: weather.icon,
            wind_speed: self.wind.speed,
            wind_direction: self.wind.deg,
            visibility: self.visibility / 1000.0,
            sunrise: local_clock(self.sys.sunrise, &Local)?,
            sunset: local_clock(self.sys.sunset, &Local)?,
            timezone: self.timezone,
            last_updated: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

impl OwForecastEntry {
    fn into_raw(self) -> Result<RawForecastEntry, WeatherError> {
        let weather = first_condition(self.weather)?;
        if DateTime::from_timestamp(self.dt, 0).is_none() {
            return Err(WeatherError::MalformedResponse(format!(
                "forecast timestamp {} out of range",
                self.dt
            )));
        }

        Ok(RawForecastEntry {
            dt: self.dt,
            temp: self.main.temp,
            humidity: self.main.humidity,
            wind_speed: self.wind.speed,
            description: weather.description,
            icon: weather.icon,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

fn first_condition(weather: Vec<OwWeather>) -> Result<OwWeather, WeatherError> {
    weather.into_iter().next().ok_or_else(|| {
        WeatherError::MalformedResponse("response contained no weather conditions".to_string())
    })
}

/// Format a unix timestamp as `HH:MM` in `tz`.
fn local_clock<Tz: TimeZone>(ts: i64, tz: &Tz) -> Result<String, WeatherError>
where
    Tz::Offset: std::fmt::Display,
{
    DateTime::from_timestamp(ts, 0)
        .map(|utc| utc.with_timezone(tz).format("%H:%M").to_string())
        .ok_or_else(|| WeatherError::MalformedResponse(format!("timestamp {ts} out of range")))
}
