use crate::error::{weather_error, DashResult};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

const WTTR_BASE: &str = "http://wttr.in";

/// Current conditions shown on the today page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherSnapshot {
    /// Temperature in degrees Fahrenheit, as reported
    pub temp_f: String,
    pub description: String,
}

impl WeatherSnapshot {
    /// Read the snapshot out of a wttr.in `format=j2` response
    pub fn from_wttr(response: &Value) -> DashResult<Self> {
        let current = response
            .get("current_condition")
            .and_then(|c| c.get(0))
            .ok_or_else(|| weather_error("Response has no current_condition"))?;

        let temp_f = current
            .get("temp_F")
            .and_then(Value::as_str)
            .ok_or_else(|| weather_error("current_condition has no temp_F"))?
            .to_string();

        let description = current
            .get("weatherDesc")
            .and_then(|d| d.get(0))
            .and_then(|d| d.get("value"))
            .and_then(Value::as_str)
            .ok_or_else(|| weather_error("current_condition has no weatherDesc"))?
            .trim()
            .to_string();

        Ok(Self {
            temp_f,
            description,
        })
    }
}

/// Client for the wttr.in weather service
#[derive(Clone, Default)]
pub struct WeatherClient {
    client: Client,
}

impl WeatherClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch current conditions for `city`
    pub async fn current(&self, city: &str) -> DashResult<WeatherSnapshot> {
        let url = Self::url_for(city)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| weather_error(&format!("Failed to fetch weather: {}", e)))?;

        if !response.status().is_success() {
            return Err(weather_error(&format!(
                "Failed to fetch weather: HTTP {}",
                response.status()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| weather_error(&format!("Failed to parse weather response: {}", e)))?;

        let snapshot = WeatherSnapshot::from_wttr(&body)?;
        debug!("Weather in {}: {}°F, {}", city, snapshot.temp_f, snapshot.description);
        Ok(snapshot)
    }

    fn url_for(city: &str) -> DashResult<Url> {
        let mut url = Url::parse(WTTR_BASE)
            .map_err(|e| weather_error(&format!("Failed to parse URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| weather_error("Weather URL cannot have a path"))?
            .push(city);
        url.query_pairs_mut().append_pair("format", "j2");
        Ok(url)
    }
}
