use serde::{Deserialize, Serialize};

/// Current conditions for a city, reshaped from the provider's payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub city: String,
    pub country: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    /// hPa, as reported by the provider.
    pub pressure: serde_json::Number,
    pub description: String,
    /// Condition category, e.g. "Clouds" or "Rain".
    #[serde(rename = "main")]
    pub condition: String,
    pub icon: String,
    pub wind_speed: f64,
    /// Degrees; 0 when the provider omits it.
    pub wind_direction: serde_json::Number,
    /// Kilometres.
    pub visibility: f64,
    /// `HH:MM` in the server's local time.
    pub sunrise: String,
    pub sunset: String,
    /// Offset from UTC in seconds, as reported by the provider.
    pub timezone: i32,
    pub last_updated: String,
}

/// One 3-hour forecast sample.
#[derive(Debug, Clone, PartialEq)]
pub struct RawForecastEntry {
    /// Unix timestamp, seconds.
    pub dt: i64,
    pub temp: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    pub description: String,
    pub icon: String,
}

/// A calendar day's worth of forecast samples reduced to one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastSummary {
    /// `YYYY-MM-DD`
    pub date: String,
    pub day_name: String,
    pub temp_max: f64,
    pub temp_min: f64,
    pub description: String,
    pub icon: String,
    pub humidity: u8,
    pub wind_speed: f64,
}

/// Round to one decimal place.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Upper-case the first letter of every word: "light rain" -> "Light Rain".
pub(crate) fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;

    for ch in text.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }

    out
}
