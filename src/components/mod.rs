pub mod events;
pub mod google_calendar;
pub mod quotes;
pub mod weather;

pub use google_calendar::{EventSource, GoogleCalendarHandle};
pub use quotes::QuoteSource;
pub use weather::{WeatherClient, WeatherSnapshot};
