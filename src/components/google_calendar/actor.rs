use super::token::TokenManager;
use crate::components::events::RawEvent;
use crate::config::Config;
use crate::error::{google_calendar_error, DashResult};
use chrono::{SecondsFormat, Utc};
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, RwLock};
use tracing::{debug, info};
use url::Url;

const API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// The Google Calendar actor that processes messages
pub struct GoogleCalendarActor {
    config: Arc<RwLock<Config>>,
    token_manager: TokenManager,
    client: Client,
    command_rx: mpsc::Receiver<GoogleCalendarCommand>,
}

/// Commands that can be sent to the Google Calendar actor
pub enum GoogleCalendarCommand {
    GetUpcomingEvents(u32, oneshot::Sender<DashResult<Vec<RawEvent>>>),
    Shutdown,
}

/// Handle for communicating with the Google Calendar actor
#[derive(Clone)]
pub struct GoogleCalendarActorHandle {
    command_tx: mpsc::Sender<GoogleCalendarCommand>,
}

impl GoogleCalendarActorHandle {
    /// Get up to `max_results` upcoming events from the calendar
    pub async fn get_upcoming_events(&self, max_results: u32) -> DashResult<Vec<RawEvent>> {
        let (response_tx, response_rx) = oneshot::channel();
        self.command_tx
            .send(GoogleCalendarCommand::GetUpcomingEvents(max_results, response_tx))
            .await
            .map_err(|e| google_calendar_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .await
            .map_err(|_| google_calendar_error("Response channel closed"))?
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> DashResult<()> {
        let _ = self.command_tx.send(GoogleCalendarCommand::Shutdown).await;
        Ok(())
    }
}

/// API endpoint with each segment percent-encoded
pub fn api_url(segments: &[&str]) -> DashResult<Url> {
    let mut url = Url::parse(API_BASE)
        .map_err(|e| google_calendar_error(&format!("Failed to parse URL: {}", e)))?;
    url.path_segments_mut()
        .map_err(|_| google_calendar_error("API base URL cannot have a path"))?
        .extend(segments);
    Ok(url)
}

/// Query string for the events list request
pub fn events_query(time_min: &str, max_results: u32) -> Vec<(&'static str, String)> {
    vec![
        ("timeMin", time_min.to_string()),
        ("maxResults", max_results.to_string()),
        ("singleEvents", "true".to_string()),
        ("orderBy", "startTime".to_string()),
    ]
}

/// Pull the event objects out of an events list response
pub fn parse_items(response: &Value) -> Vec<RawEvent> {
    response
        .get("items")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_object)
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

/// Whether a calendar list response contains `calendar_id`
pub fn calendar_listed(response: &Value, calendar_id: &str) -> bool {
    response
        .get("items")
        .and_then(Value::as_array)
        .is_some_and(|items| {
            items
                .iter()
                .any(|item| item.get("id").and_then(Value::as_str) == Some(calendar_id))
        })
}

impl GoogleCalendarActor {
    /// Create a new actor and return its handle
    pub fn new(config: Arc<RwLock<Config>>, token_manager: TokenManager) -> (Self, GoogleCalendarActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self {
            config,
            token_manager,
            client: Client::new(),
            command_rx,
        };

        let handle = GoogleCalendarActorHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Google Calendar actor started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                GoogleCalendarCommand::GetUpcomingEvents(max_results, response_tx) => {
                    let result = self.get_upcoming_events(max_results).await;
                    let _ = response_tx.send(result);
                }
                GoogleCalendarCommand::Shutdown => {
                    info!("Google Calendar actor shutting down");
                    break;
                }
            }
        }

        info!("Google Calendar actor shut down");
    }

    /// Get upcoming events from the configured calendar
    async fn get_upcoming_events(&self, max_results: u32) -> DashResult<Vec<RawEvent>> {
        let calendar_id = {
            let config_read = self.config.read().await;
            config_read.google_calendar_id.clone()
        };

        let access_token = self.token_manager.access_token().await?;

        // The calendar must be visible to the account we hold a token for
        let calendar_list = self
            .get_json(api_url(&["users", "me", "calendarList"])?, &[], &access_token)
            .await?;
        if !calendar_listed(&calendar_list, &calendar_id) {
            return Err(google_calendar_error(&format!(
                "Calendar '{}' is not in the account's calendar list",
                calendar_id
            )));
        }

        let time_min = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        let url = api_url(&["calendars", calendar_id.as_str(), "events"])?;
        let response = self
            .get_json(url, &events_query(&time_min, max_results), &access_token)
            .await?;

        let events = parse_items(&response);
        debug!("Fetched {} events from {}", events.len(), calendar_id);
        Ok(events)
    }

    async fn get_json(
        &self,
        mut url: Url,
        query: &[(&str, String)],
        access_token: &str,
    ) -> DashResult<Value> {
        for (key, value) in query {
            url.query_pairs_mut().append_pair(key, value);
        }

        let response = self
            .client
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| google_calendar_error(&format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(google_calendar_error(&format!(
                "HTTP {} - {}",
                status, error_body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| google_calendar_error(&format!("Failed to parse response: {}", e)))
    }
}
