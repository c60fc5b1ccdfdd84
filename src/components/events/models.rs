use super::classify::Icon;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Calendar event exactly as the provider returned it
pub type RawEvent = Map<String, Value>;

/// `start_time` of an all-day event
pub const ALL_DAY_START: &str = "All";
/// `end_time` of an all-day event
pub const ALL_DAY_END: &str = "Day";

/// Display-ready date of an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDate {
    pub start_day: String,
    pub start_month: String,
    pub start_year: String,
    pub start_time: String,
    pub end_time: String,
}

impl EventDate {
    pub fn is_all_day(&self) -> bool {
        self.start_time == ALL_DAY_START && self.end_time == ALL_DAY_END
    }
}

/// Event after stripping, classification and date normalization
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresentationEvent {
    /// Provider fields that survived stripping
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    pub icon: Icon,
    pub date: EventDate,
}

impl PresentationEvent {
    /// Event title, empty if the provider sent none
    pub fn summary(&self) -> &str {
        self.fields
            .get("summary")
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// Optional free-text location
    pub fn location(&self) -> &str {
        self.fields
            .get("location")
            .and_then(Value::as_str)
            .unwrap_or("")
    }
}
