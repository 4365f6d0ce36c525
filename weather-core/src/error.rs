use thiserror::Error;

/// Reasons a fetch against the weather provider can fail.
///
/// Callers at the HTTP boundary collapse all of these into a single
/// "data unavailable" response, but the variants stay distinct so that
/// logs can tell a typo'd city from an outage.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The provider did not answer within the configured timeout.
    #[error("Request to weather provider timed out")]
    Timeout,

    /// The provider answered 404 for the queried city.
    #[error("City '{city}' not found")]
    UnknownCity { city: String },

    /// Any other non-success status from the provider.
    #[error("Weather provider returned HTTP {status}")]
    Upstream { status: u16 },

    /// The body could not be mapped into the expected shape.
    #[error("Unexpected weather provider response format: {0}")]
    MalformedResponse(String),

    /// Everything else: connection resets, DNS failures, client setup.
    #[error("Unexpected error: {0}")]
    Unclassified(String),
}

impl WeatherError {
    /// Short machine-friendly label, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            WeatherError::Timeout => "timeout",
            WeatherError::UnknownCity { .. } => "unknown_city",
            WeatherError::Upstream { .. } => "upstream",
            WeatherError::MalformedResponse(_) => "malformed_response",
            WeatherError::Unclassified(_) => "unclassified",
        }
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            WeatherError::Timeout
        } else if err.is_decode() {
            WeatherError::MalformedResponse(err.to_string())
        } else if let Some(status) = err.status() {
            WeatherError::Upstream { status: status.as_u16() }
        } else {
            WeatherError::Unclassified(err.to_string())
        }
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        WeatherError::MalformedResponse(err.to_string())
    }
}
