//! HTTP surface of the weather service.
//!
//! Exposes current conditions and daily forecasts from `weather-core` as
//! JSON, plus a static landing page.

pub mod handlers;
pub mod response;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
