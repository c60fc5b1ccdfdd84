use crate::components::events::EventListing;
use askama::Template;

/// Landing page with a greeting and a quote
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub name: &'a str,
    pub quote: &'a str,
}

/// Today's date and weather
#[derive(Template)]
#[template(path = "today.html")]
pub struct TodayTemplate<'a> {
    pub date: &'a str,
    pub temp_f: &'a str,
    pub weather: &'a str,
}

/// Upcoming events
#[derive(Template)]
#[template(path = "events.html")]
pub struct EventsTemplate<'a> {
    pub listing: &'a EventListing,
}
