use super::actor::{GoogleCalendarActor, GoogleCalendarActorHandle};
use super::token::TokenManager;
use super::EventSource;
use crate::components::events::RawEvent;
use crate::config::Config;
use crate::error::DashResult;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Handle for interacting with the Google Calendar actor
#[derive(Clone)]
pub struct GoogleCalendarHandle {
    actor_handle: GoogleCalendarActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl GoogleCalendarHandle {
    /// Create a new GoogleCalendarHandle and spawn the actor
    pub async fn new(config: Arc<RwLock<Config>>) -> Self {
        let token_path = config.read().await.token_path.clone();
        let token_manager = TokenManager::new(Arc::clone(&config), token_path);

        let (mut actor, handle) = GoogleCalendarActor::new(config, token_manager);

        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// Get upcoming events from the calendar
    pub async fn get_upcoming_events(&self, max_results: u32) -> DashResult<Vec<RawEvent>> {
        self.actor_handle.get_upcoming_events(max_results).await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> DashResult<()> {
        self.actor_handle.shutdown().await
    }
}

#[async_trait]
impl EventSource for GoogleCalendarHandle {
    async fn upcoming_events(&self, max_results: u32) -> DashResult<Vec<RawEvent>> {
        self.get_upcoming_events(max_results).await
    }

    async fn shutdown(&self) -> DashResult<()> {
        self.actor_handle.shutdown().await
    }
}
