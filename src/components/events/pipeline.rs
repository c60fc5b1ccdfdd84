use super::classify::classify_event;
use super::models::{PresentationEvent, RawEvent};
use super::normalize::normalize_event;
use super::strip::strip_attributes;
use crate::error::{DashResult, Error};
use serde::Serialize;
use tracing::{debug, warn};

/// Result of running the pipeline over a batch of events
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "events", rename_all = "snake_case")]
pub enum EventListing {
    /// The calendar returned nothing
    NoEvents,
    /// One presentation event per input event, in input order
    Events(Vec<PresentationEvent>),
}

impl EventListing {
    pub fn is_no_events(&self) -> bool {
        matches!(self, EventListing::NoEvents)
    }

    /// Presented events, empty for `NoEvents`
    pub fn events(&self) -> &[PresentationEvent] {
        match self {
            EventListing::NoEvents => &[],
            EventListing::Events(events) => events,
        }
    }
}

/// Strip, classify and normalize a single event
pub fn present_event(mut event: RawEvent) -> DashResult<PresentationEvent> {
    strip_attributes(&mut event);
    let icon = classify_event(&event);
    let date = normalize_event(&event)?;

    // Computed fields replace anything the provider sent under the same name
    event.remove("icon");
    event.remove("date");

    Ok(PresentationEvent {
        fields: event,
        icon,
        date,
    })
}

/// Present every event, failing on the first malformed one
pub fn present_events(events: Vec<RawEvent>) -> DashResult<EventListing> {
    if events.is_empty() {
        return Ok(EventListing::NoEvents);
    }

    let presented = events
        .into_iter()
        .enumerate()
        .map(|(index, event)| present_event(event).map_err(|e| at_position(index, e)))
        .collect::<DashResult<Vec<_>>>()?;

    debug!("Presented {} events", presented.len());
    Ok(EventListing::Events(presented))
}

/// Present every event, skipping malformed ones with a warning
pub fn present_events_lenient(events: Vec<RawEvent>) -> EventListing {
    if events.is_empty() {
        return EventListing::NoEvents;
    }

    let presented = events
        .into_iter()
        .enumerate()
        .filter_map(|(index, event)| match present_event(event) {
            Ok(event) => Some(event),
            Err(e) => {
                warn!("Skipping event: {}", at_position(index, e));
                None
            }
        })
        .collect();

    EventListing::Events(presented)
}

fn at_position(index: usize, err: Error) -> Error {
    match err {
        Error::MalformedEventTime(message) => {
            Error::MalformedEventTime(format!("event #{}: {}", index, message))
        }
        other => other,
    }
}
