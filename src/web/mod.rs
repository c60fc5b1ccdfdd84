pub mod handlers;
pub mod templates;

use crate::components::{EventSource, QuoteSource, WeatherClient};
use crate::config::Config;
use crate::error::Error;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use tracing::error;

use handlers::{events_handler, events_json_handler, health_handler, root_handler, today_handler};

/// Shared state of the web server
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    /// Where upcoming events come from
    pub events: Arc<dyn EventSource>,
    pub weather: WeatherClient,
    pub quotes: QuoteSource,
}

/// Build the router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/today", get(today_handler))
        .route("/events", get(events_handler))
        .route("/events.json", get(events_json_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Status code a failed request is answered with
pub fn status_for(error: &Error) -> StatusCode {
    match error {
        Error::GoogleCalendar(_)
        | Error::Weather(_)
        | Error::Http(_)
        | Error::MalformedEventTime(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self);
        (status_for(&self), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{google_calendar_error, quote_error, weather_error};

    #[test]
    fn test_status_for() {
        assert_eq!(status_for(&google_calendar_error("down")), StatusCode::BAD_GATEWAY);
        assert_eq!(status_for(&weather_error("down")), StatusCode::BAD_GATEWAY);
        assert_eq!(status_for(&quote_error("empty")), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_response() {
        let response = weather_error("wttr.in timed out").into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
