//! Turns raw calendar events into display-ready events.
//!
//! Each event is stripped of provider bookkeeping, given an icon from its
//! summary and a normalized `date`, in that order.

pub mod classify;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod strip;

pub use classify::{classify, classify_event, Icon};
pub use models::{EventDate, PresentationEvent, RawEvent};
pub use normalize::{normalize, normalize_event, to_twelve_hour};
pub use pipeline::{present_event, present_events, present_events_lenient, EventListing};
pub use strip::{strip_attributes, BOOKKEEPING_FIELDS};
