use super::templates::{EventsTemplate, IndexTemplate, TodayTemplate};
use super::AppState;
use crate::components::events::{present_events_lenient, EventListing};
use crate::error::DashResult;
use crate::utils::time::pretty_date_today;
use askama::Template;
use axum::extract::State;
use axum::response::{Html, Json};
use tracing::info;

fn render<T: Template>(template: &T) -> DashResult<Html<String>> {
    Ok(Html(template.render()?))
}

async fn upcoming_listing(state: &AppState) -> DashResult<EventListing> {
    let event_count = state.config.read().await.event_count;
    let raw_events = state.events.upcoming_events(event_count).await?;

    let listing = present_events_lenient(raw_events);
    if listing.is_no_events() {
        info!("No upcoming events were found.");
    }
    Ok(listing)
}

/// Handler for the landing page
pub async fn root_handler(State(state): State<AppState>) -> DashResult<Html<String>> {
    let name = state.config.read().await.display_name.clone();
    let quote = state.quotes.random_quote().await?;

    render(&IndexTemplate {
        name: &name,
        quote: &quote,
    })
}

/// Handler for today's date and weather
pub async fn today_handler(State(state): State<AppState>) -> DashResult<Html<String>> {
    let city = state.config.read().await.weather_city.clone();
    let weather = state.weather.current(&city).await?;
    let date = pretty_date_today();

    render(&TodayTemplate {
        date: &date,
        temp_f: &weather.temp_f,
        weather: &weather.description,
    })
}

/// Handler for the upcoming events page
pub async fn events_handler(State(state): State<AppState>) -> DashResult<Html<String>> {
    let listing = upcoming_listing(&state).await?;
    render(&EventsTemplate { listing: &listing })
}

/// Handler for the upcoming events as JSON
pub async fn events_json_handler(State(state): State<AppState>) -> DashResult<Json<EventListing>> {
    Ok(Json(upcoming_listing(&state).await?))
}

// Handler for health checks
pub async fn health_handler() -> &'static str {
    "OK"
}
