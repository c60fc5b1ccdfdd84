mod actor;
mod handle;
pub mod token;

pub use actor::{calendar_listed, events_query, parse_items};
pub use handle::GoogleCalendarHandle;
pub use token::TokenManager;

use crate::components::events::RawEvent;
use crate::error::DashResult;
use async_trait::async_trait;

/// Something that can list upcoming calendar events.
///
/// Implementations return events starting now or later, in start order,
/// with recurring events already expanded.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Get up to `max_results` upcoming events
    async fn upcoming_events(&self, max_results: u32) -> DashResult<Vec<RawEvent>>;

    /// Stop any background work
    async fn shutdown(&self) -> DashResult<()> {
        Ok(())
    }
}
