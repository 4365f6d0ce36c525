//! Core library for the weather service.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The `WeatherProvider` abstraction and its OpenWeather implementation
//! - Daily aggregation of 3-hour forecast samples
//! - Shared domain models and the fetch error taxonomy
//!
//! It is used by `weather-server`, but can also be reused by other binaries.

pub mod config;
pub mod error;
pub mod forecast;
pub mod model;
pub mod provider;

pub use config::{Config, OpenWeatherSettings, ServerSettings};
pub use error::WeatherError;
pub use forecast::{aggregate_daily, clamp_days};
pub use model::{CurrentConditions, DailyForecastSummary, RawForecastEntry};
pub use provider::{WeatherProvider, provider_from_config};
