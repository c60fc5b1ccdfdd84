use super::models::RawEvent;

/// Provider bookkeeping fields that never reach the page
pub const BOOKKEEPING_FIELDS: [&str; 13] = [
    "creator",
    "organizer",
    "kind",
    "etag",
    "id",
    "reminders",
    "created",
    "updated",
    "sequence",
    "iCalUID",
    "recurringEventId",
    "originalStartTime",
    "attendees",
];

/// Remove bookkeeping fields from an event in place.
///
/// Fields that are not present are skipped, so stripping twice is a no-op.
pub fn strip_attributes(event: &mut RawEvent) {
    for field in BOOKKEEPING_FIELDS {
        event.remove(field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawEvent {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_strips_every_bookkeeping_field() {
        let mut event = raw(json!({
            "summary": "Lunch",
            "creator": {"email": "a@example.com"},
            "organizer": {"email": "a@example.com"},
            "kind": "calendar#event",
            "etag": "\"3381\"",
            "id": "abc123",
            "reminders": {"useDefault": true},
            "created": "2024-01-01T00:00:00.000Z",
            "updated": "2024-01-02T00:00:00.000Z",
            "sequence": 0,
            "iCalUID": "abc123@google.com",
            "recurringEventId": "abc",
            "originalStartTime": {"date": "2024-03-15"},
            "attendees": [],
        }));

        strip_attributes(&mut event);

        for field in BOOKKEEPING_FIELDS {
            assert!(!event.contains_key(field), "{} survived", field);
        }
        assert_eq!(event.get("summary"), Some(&json!("Lunch")));
    }

    #[test]
    fn test_absent_and_unknown_fields() {
        let mut event = raw(json!({
            "summary": "Lunch",
            "location": "Cafe",
            "htmlLink": "https://calendar.google.com/event?eid=x",
        }));
        let before = event.clone();

        strip_attributes(&mut event);
        assert_eq!(event, before);

        // Idempotent
        strip_attributes(&mut event);
        assert_eq!(event, before);
    }
}
