//! HTTP handlers.
//!
//! Every provider failure is reported to the client as a 404 naming the
//! city; the specific cause has already been logged by the provider.

use axum::{
    extract::{Path, Query, State},
    response::Html,
};
use serde::Deserialize;
use weather_core::{CurrentConditions, DailyForecastSummary, clamp_days, forecast::MAX_FORECAST_DAYS};

use crate::{
    response::{ApiError, Envelope, HandlerResult},
    state::AppState,
};

const INDEX_HTML: &str = include_str!("../assets/index.html");

#[derive(Debug, Default, Deserialize)]
pub struct ForecastQuery {
    /// Kept as text so that a non-numeric value falls back to the default
    /// instead of rejecting the request.
    pub days: Option<String>,
}

impl ForecastQuery {
    pub fn days(&self) -> u8 {
        let requested = self
            .days
            .as_deref()
            .and_then(|d| d.trim().parse::<i64>().ok())
            .unwrap_or(i64::from(MAX_FORECAST_DAYS));

        clamp_days(requested)
    }
}

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /api/weather/{city}
pub async fn current_weather(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> HandlerResult<CurrentConditions> {
    let data = state
        .provider
        .fetch_current(&city)
        .await
        .map_err(|_| ApiError::weather_not_found(&city))?;

    Ok(Envelope::ok(data))
}

/// GET /api/forecast/{city}?days=N
pub async fn forecast(
    State(state): State<AppState>,
    Path(city): Path<String>,
    Query(query): Query<ForecastQuery>,
) -> HandlerResult<Vec<DailyForecastSummary>> {
    let data = state
        .provider
        .fetch_forecast(&city, query.days())
        .await
        .map_err(|_| ApiError::forecast_not_found(&city))?;

    if data.is_empty() {
        return Err(ApiError::forecast_not_found(&city));
    }

    Ok(Envelope::ok(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(days: Option<&str>) -> ForecastQuery {
        ForecastQuery { days: days.map(str::to_string) }
    }

    #[test]
    fn days_default_to_five() {
        assert_eq!(query(None).days(), 5);
    }

    #[test]
    fn days_are_clamped() {
        assert_eq!(query(Some("0")).days(), 1);
        assert_eq!(query(Some("30")).days(), 5);
        assert_eq!(query(Some("-2")).days(), 1);
        assert_eq!(query(Some("3")).days(), 3);
    }

    #[test]
    fn unparsable_days_fall_back_to_default() {
        assert_eq!(query(Some("three")).days(), 5);
        assert_eq!(query(Some("")).days(), 5);
    }
}
