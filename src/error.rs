use miette::Diagnostic;
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(dashboard::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(dashboard::config))]
    Config(String),

    #[error("Google Calendar API error: {0}")]
    #[diagnostic(code(dashboard::google_calendar))]
    GoogleCalendar(String),

    #[error("Weather service error: {0}")]
    #[diagnostic(code(dashboard::weather))]
    Weather(String),

    #[error("Quote source error: {0}")]
    #[diagnostic(code(dashboard::quote))]
    Quote(String),

    #[error("Malformed event time: {0}")]
    #[diagnostic(
        code(dashboard::malformed_event_time),
        help("events need either `start.date` or `start.dateTime` (with a matching `end.dateTime`)")
    )]
    MalformedEventTime(String),

    #[error("Template rendering error: {0}")]
    #[diagnostic(code(dashboard::render))]
    Render(String),

    #[error(transparent)]
    #[diagnostic(code(dashboard::io))]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    #[diagnostic(code(dashboard::http))]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(dashboard::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(dashboard::other))]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<askama::Error> for Error {
    fn from(err: askama::Error) -> Self {
        Error::Render(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type DashResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create Google Calendar errors
pub fn google_calendar_error(message: &str) -> Error {
    Error::GoogleCalendar(message.to_string())
}

/// Helper to create weather errors
pub fn weather_error(message: &str) -> Error {
    Error::Weather(message.to_string())
}

/// Helper to create quote errors
pub fn quote_error(message: &str) -> Error {
    Error::Quote(message.to_string())
}

/// Helper to create malformed event time errors
pub fn malformed_time(message: &str) -> Error {
    Error::MalformedEventTime(message.to_string())
}

/// Helper to create other errors
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
