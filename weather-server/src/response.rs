//! JSON envelope shared by the API endpoints.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// `{"success": true, "data": ...}` or `{"success": false, "error": "..."}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self { success: true, data: Some(data), error: None })
    }
}

/// Error returned by handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Lookup failed for the named city.
    NotFound(String),
}

impl ApiError {
    pub fn weather_not_found(city: &str) -> Self {
        ApiError::NotFound(format!(
            "Could not find weather data for \"{city}\". Please check the city name and try again."
        ))
    }

    pub fn forecast_not_found(city: &str) -> Self {
        ApiError::NotFound(format!(
            "Could not find forecast data for \"{city}\". Please check the city name and try again."
        ))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body: Envelope<()> = Envelope { success: false, data: None, error: Some(message) };
        (status, Json(body)).into_response()
    }
}

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<Envelope<T>>, ApiError>;
