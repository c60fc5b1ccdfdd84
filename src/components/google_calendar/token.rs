use crate::config::Config;
use crate::error::{google_calendar_error, DashResult};
use chrono::Utc;
use reqwest::Client;
use serde_json::{json, Map, Value};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Google OAuth token endpoint
pub const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Keeps the OAuth token in a JSON file and refreshes it when it expires
#[derive(Clone)]
pub struct TokenManager {
    config: Arc<RwLock<Config>>,
    token_path: PathBuf,
    client: Client,
}

/// Whether a stored token is unusable at `now` (unix seconds)
pub fn is_expired(token: &Value, now: i64) -> bool {
    match token.get("expires_at").and_then(Value::as_i64) {
        Some(expires_at) => expires_at <= now,
        None => true,
    }
}

/// Merge a token endpoint response with the refresh token we already hold
pub fn merge_refreshed(response: &Value, refresh_token: &str, now: i64) -> DashResult<Value> {
    let access_token = response
        .get("access_token")
        .cloned()
        .ok_or_else(|| google_calendar_error("Token response missing 'access_token' field"))?;

    // Google only sends a new refresh token when it rotates it
    let refresh_token = response
        .get("refresh_token")
        .and_then(Value::as_str)
        .unwrap_or(refresh_token);

    let expires_in = response
        .get("expires_in")
        .and_then(Value::as_i64)
        .unwrap_or(3600);

    let mut token_data = Map::new();
    token_data.insert("access_token".to_string(), access_token);
    token_data.insert("refresh_token".to_string(), json!(refresh_token));
    token_data.insert("expires_at".to_string(), json!(now + expires_in));

    Ok(Value::Object(token_data))
}

impl TokenManager {
    pub fn new(config: Arc<RwLock<Config>>, token_path: impl Into<PathBuf>) -> Self {
        Self {
            config,
            token_path: token_path.into(),
            client: Client::new(),
        }
    }

    /// Get a usable OAuth token, refreshing the stored one if needed
    pub async fn get_token(&self) -> DashResult<Value> {
        let token = self.load_token().await?.ok_or_else(|| {
            google_calendar_error(&format!(
                "No token found at {}. Run get_calendar_token first.",
                self.token_path.display()
            ))
        })?;

        if !is_expired(&token, Utc::now().timestamp()) {
            return Ok(token);
        }

        debug!("Stored token expired, refreshing");
        self.refresh_token(&token).await
    }

    /// Get just the access token string
    pub async fn access_token(&self) -> DashResult<String> {
        let token = self.get_token().await?;
        token
            .get("access_token")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| google_calendar_error("No access token available"))
    }

    async fn load_token(&self) -> DashResult<Option<Value>> {
        match fs::read_to_string(&self.token_path).await {
            Ok(content) => {
                let token = serde_json::from_str(&content).map_err(|e| {
                    google_calendar_error(&format!("Failed to parse token JSON: {}", e))
                })?;
                Ok(Some(token))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Refresh an expired token
    async fn refresh_token(&self, token: &Value) -> DashResult<Value> {
        let refresh_token = token
            .get("refresh_token")
            .and_then(Value::as_str)
            .ok_or_else(|| google_calendar_error("No refresh token in token data"))?;

        let (client_id, client_secret) = {
            let config_read = self.config.read().await;
            (
                config_read.google_client_id.clone(),
                config_read.google_client_secret.clone(),
            )
        };

        let params = [
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("refresh_token", refresh_token.to_string()),
            ("grant_type", "refresh_token".to_string()),
        ];

        let response = self
            .client
            .post(TOKEN_URL)
            .form(&params)
            .send()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to refresh token: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(google_calendar_error(&format!(
                "Failed to refresh token: HTTP {} - {}",
                status, error_body
            )));
        }

        let new_token: Value = response.json().await.map_err(|e| {
            google_calendar_error(&format!("Failed to parse token response: {}", e))
        })?;

        let token = merge_refreshed(&new_token, refresh_token, Utc::now().timestamp())?;
        self.set_token(&token).await?;
        info!("Refreshed Google Calendar token");

        Ok(token)
    }

    /// Save a token to the token file
    pub async fn set_token(&self, token: &Value) -> DashResult<()> {
        let content = serde_json::to_string_pretty(token)?;
        fs::write(&self.token_path, content).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Arc<RwLock<Config>> {
        Arc::new(RwLock::new(Config {
            google_client_id: "id".to_string(),
            google_client_secret: "secret".to_string(),
            google_calendar_id: "someone@example.com".to_string(),
            token_path: "token.json".to_string(),
            event_count: 25,
            weather_city: "Detroit".to_string(),
            quotes_path: "quotes".to_string(),
            display_name: "friend".to_string(),
            port: 5000,
        }))
    }

    #[test]
    fn test_is_expired() {
        assert!(!is_expired(&json!({"expires_at": 200}), 100));
        assert!(is_expired(&json!({"expires_at": 100}), 100));
        assert!(is_expired(&json!({"access_token": "x"}), 100));
    }

    #[test]
    fn test_merge_refreshed() {
        let token = merge_refreshed(
            &json!({"access_token": "new", "expires_in": 60}),
            "refresh",
            1000,
        )
        .unwrap();
        assert_eq!(
            token,
            json!({"access_token": "new", "refresh_token": "refresh", "expires_at": 1060})
        );

        let rotated = merge_refreshed(
            &json!({"access_token": "new", "refresh_token": "rotated"}),
            "refresh",
            1000,
        )
        .unwrap();
        assert_eq!(rotated["refresh_token"], "rotated");
        assert_eq!(rotated["expires_at"], 4600);

        assert!(merge_refreshed(&json!({"error": "invalid_grant"}), "refresh", 1000).is_err());
    }

    #[tokio::test]
    async fn test_token_file_round_trip() {
        let path = std::env::temp_dir().join(format!("dashboard-token-{}.json", std::process::id()));
        let manager = TokenManager::new(test_config(), path.clone());

        let expires_at = Utc::now().timestamp() + 600;
        let token = json!({"access_token": "abc", "refresh_token": "def", "expires_at": expires_at});
        manager.set_token(&token).await.unwrap();

        assert_eq!(manager.access_token().await.unwrap(), "abc");

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_missing_token_file() {
        let path = std::env::temp_dir().join("dashboard-token-does-not-exist.json");
        let manager = TokenManager::new(test_config(), path.clone());

        let err = manager.get_token().await.unwrap_err();
        assert!(err.to_string().contains("get_calendar_token"));
    }
}
