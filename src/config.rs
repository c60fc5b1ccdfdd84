use crate::error::{config_error, env_error, DashResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Default location of the optional settings file
pub const SETTINGS_FILE: &str = "config/dashboard.toml";

/// Main configuration structure for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Google Calendar API client ID
    pub google_client_id: String,
    /// Google Calendar API client secret
    pub google_client_secret: String,
    /// Google Calendar ID to show
    pub google_calendar_id: String,
    /// Where the OAuth token is kept
    pub token_path: String,
    /// Maximum number of upcoming events to show
    pub event_count: u32,
    /// City passed to the weather service
    pub weather_city: String,
    /// File with one quote per line
    pub quotes_path: String,
    /// Name used in the greeting
    pub display_name: String,
    /// Port for the web server
    pub port: u16,
}

/// Optional settings read from `config/dashboard.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    pub token_path: Option<String>,
    pub event_count: Option<u32>,
    pub weather_city: Option<String>,
    pub quotes_path: Option<String>,
    pub display_name: Option<String>,
    pub port: Option<u16>,
}

impl Settings {
    /// Parse settings from TOML text
    pub fn from_toml(content: &str) -> DashResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read the settings file, or defaults if it does not exist
    pub fn read(path: impl AsRef<Path>) -> DashResult<Self> {
        match fs::read_to_string(path.as_ref()) {
            Ok(content) => Self::from_toml(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Config {
    /// Load configuration from environment and settings file
    pub fn load() -> DashResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let settings = Settings::read(SETTINGS_FILE)?;
        Self::from_lookup(settings, |key| env::var(key).ok())
    }

    /// Build the configuration from a variable lookup and file settings.
    ///
    /// Lookup values win over file settings, which win over defaults.
    pub fn from_lookup<F>(settings: Settings, lookup: F) -> DashResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).ok_or_else(|| env_error(key));

        let google_client_id = required("GOOGLE_CLIENT_ID")?;
        let google_client_secret = required("GOOGLE_CLIENT_SECRET")?;
        let google_calendar_id = required("GOOGLE_CALENDAR_ID")?;

        let token_path = lookup("TOKEN_PATH")
            .or(settings.token_path)
            .unwrap_or_else(|| String::from("token.json"));

        let event_count = match lookup("EVENT_COUNT") {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|_| config_error("Invalid EVENT_COUNT format"))?,
            None => settings.event_count.unwrap_or(25),
        };

        let weather_city = lookup("WEATHER_CITY")
            .or(settings.weather_city)
            .unwrap_or_else(|| String::from("Detroit"));

        let quotes_path = lookup("QUOTES_PATH")
            .or(settings.quotes_path)
            .unwrap_or_else(|| String::from("quotes"));

        let display_name = lookup("DISPLAY_NAME")
            .or(settings.display_name)
            .unwrap_or_else(|| String::from("friend"));

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| config_error("Invalid PORT format"))?,
            None => settings.port.unwrap_or(5000),
        };

        Ok(Config {
            google_client_id,
            google_client_secret,
            google_calendar_id,
            token_path,
            event_count,
            weather_city,
            quotes_path,
            display_name,
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("GOOGLE_CLIENT_ID", "id"),
        ("GOOGLE_CLIENT_SECRET", "secret"),
        ("GOOGLE_CALENDAR_ID", "someone@example.com"),
    ];

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(Settings::default(), lookup_from(&REQUIRED)).unwrap();
        assert_eq!(config.token_path, "token.json");
        assert_eq!(config.event_count, 25);
        assert_eq!(config.weather_city, "Detroit");
        assert_eq!(config.quotes_path, "quotes");
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn test_missing_required_variable() {
        let err = Config::from_lookup(Settings::default(), lookup_from(&REQUIRED[..2])).unwrap_err();
        assert!(matches!(err, crate::error::Error::Environment(_)));
        assert!(err.to_string().contains("GOOGLE_CALENDAR_ID"));
    }

    #[test]
    fn test_precedence() {
        let settings = Settings::from_toml(
            r#"
            weather_city = "Ann Arbor"
            event_count = 10
            port = 8000
            "#,
        )
        .unwrap();

        let mut pairs = REQUIRED.to_vec();
        pairs.push(("PORT", "9000"));

        let config = Config::from_lookup(settings, lookup_from(&pairs)).unwrap();
        assert_eq!(config.weather_city, "Ann Arbor");
        assert_eq!(config.event_count, 10);
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_invalid_number() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("EVENT_COUNT", "lots"));

        let err = Config::from_lookup(Settings::default(), lookup_from(&pairs)).unwrap_err();
        assert!(matches!(err, crate::error::Error::Config(_)));
    }
}
