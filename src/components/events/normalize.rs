use super::models::{EventDate, RawEvent, ALL_DAY_END, ALL_DAY_START};
use crate::error::{malformed_time, DashResult};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use serde_json::Value;

/// Start of an event as the provider describes it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventStart<'a> {
    /// `start.date`, e.g. `2024-03-15`
    AllDay(&'a str),
    /// `start.dateTime`, e.g. `2024-03-15T14:30:00-04:00`
    Timed(&'a str),
}

impl<'a> EventStart<'a> {
    /// Work out which shape `start` has. `date` takes precedence over `dateTime`.
    pub fn detect(start: Option<&'a Value>) -> DashResult<Self> {
        let start = start
            .and_then(Value::as_object)
            .ok_or_else(|| malformed_time("event has no `start` object"))?;

        if let Some(date) = start.get("date") {
            return date
                .as_str()
                .map(EventStart::AllDay)
                .ok_or_else(|| malformed_time("`start.date` is not a string"));
        }

        if let Some(date_time) = start.get("dateTime") {
            return date_time
                .as_str()
                .map(EventStart::Timed)
                .ok_or_else(|| malformed_time("`start.dateTime` is not a string"));
        }

        Err(malformed_time("`start` has neither `date` nor `dateTime`"))
    }
}

/// Compute the display date from an event's `start` and `end` fields
pub fn normalize(start: Option<&Value>, end: Option<&Value>) -> DashResult<EventDate> {
    match EventStart::detect(start)? {
        EventStart::AllDay(date) => all_day(date),
        EventStart::Timed(start_time) => {
            let end_time = end
                .and_then(|end| end.get("dateTime"))
                .and_then(Value::as_str)
                .ok_or_else(|| malformed_time("timed event has no `end.dateTime`"))?;
            timed(start_time, end_time)
        }
    }
}

/// Compute the display date of a raw event
pub fn normalize_event(event: &RawEvent) -> DashResult<EventDate> {
    normalize(event.get("start"), event.get("end"))
}

fn all_day(date: &str) -> DashResult<EventDate> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| malformed_time(&format!("invalid date '{}': {}", date, e)))?;

    Ok(date_parts(date, ALL_DAY_START.to_string(), ALL_DAY_END.to_string()))
}

fn timed(start: &str, end: &str) -> DashResult<EventDate> {
    let start = parse_date_time(start)?;
    let end = parse_date_time(end)?;

    // Wall-clock times in the event's own offset
    Ok(date_parts(
        start.date_naive(),
        twelve_hour(start.time()),
        twelve_hour(end.time()),
    ))
}

fn parse_date_time(value: &str) -> DashResult<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value)
        .map_err(|e| malformed_time(&format!("invalid dateTime '{}': {}", value, e)))
}

fn date_parts(date: NaiveDate, start_time: String, end_time: String) -> EventDate {
    EventDate {
        start_day: date.format("%d").to_string(),
        start_month: date.format("%m").to_string(),
        start_year: date.format("%Y").to_string(),
        start_time,
        end_time,
    }
}

/// Format a time as `HH:MM` plus `AM`/`PM`; seconds are dropped
pub fn twelve_hour(time: NaiveTime) -> String {
    time.format("%I:%M%p").to_string()
}

/// Convert a 24-hour `HH:MM` string to 12-hour display form
pub fn to_twelve_hour(time: &str) -> DashResult<String> {
    let parsed = NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|e| malformed_time(&format!("invalid time '{}': {}", time, e)))?;
    Ok(twelve_hour(parsed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    #[test]
    fn test_to_twelve_hour() {
        assert_eq!(to_twelve_hour("00:00").unwrap(), "12:00AM");
        assert_eq!(to_twelve_hour("12:00").unwrap(), "12:00PM");
        assert_eq!(to_twelve_hour("23:59").unwrap(), "11:59PM");
        assert_eq!(to_twelve_hour("09:05").unwrap(), "09:05AM");
        assert_eq!(to_twelve_hour("14:30").unwrap(), "02:30PM");

        assert!(to_twelve_hour("24:00").is_err());
        assert!(to_twelve_hour("noon").is_err());
    }

    #[test]
    fn test_all_day() {
        let date = normalize(
            Some(&json!({"date": "2024-03-15"})),
            Some(&json!({"date": "2024-03-16"})),
        )
        .unwrap();

        assert_eq!(date.start_day, "15");
        assert_eq!(date.start_month, "03");
        assert_eq!(date.start_year, "2024");
        assert_eq!(date.start_time, "All");
        assert_eq!(date.end_time, "Day");
        assert!(date.is_all_day());
    }

    #[test]
    fn test_timed_keeps_wall_clock() {
        let date = normalize(
            Some(&json!({"dateTime": "2024-03-15T14:30:00-04:00", "timeZone": "America/Detroit"})),
            Some(&json!({"dateTime": "2024-03-15T15:00:00-04:00"})),
        )
        .unwrap();

        assert_eq!(date.start_day, "15");
        assert_eq!(date.start_month, "03");
        assert_eq!(date.start_year, "2024");
        assert_eq!(date.start_time, "02:30PM");
        assert_eq!(date.end_time, "03:00PM");
        assert!(!date.is_all_day());
    }

    #[test]
    fn test_timed_utc_and_positive_offset() {
        let date = normalize(
            Some(&json!({"dateTime": "2024-12-31T23:45:10Z"})),
            Some(&json!({"dateTime": "2025-01-01T00:15:00+01:00"})),
        )
        .unwrap();

        assert_eq!(date.start_day, "31");
        assert_eq!(date.start_month, "12");
        assert_eq!(date.start_year, "2024");
        assert_eq!(date.start_time, "11:45PM");
        assert_eq!(date.end_time, "12:15AM");
    }

    #[test]
    fn test_malformed_start() {
        let cases = [
            None,
            Some(json!("2024-03-15")),
            Some(json!({})),
            Some(json!({"timeZone": "UTC"})),
            Some(json!({"date": 20240315})),
            Some(json!({"date": "15.03.2024"})),
            Some(json!({"dateTime": "2024-03-15 14:30"})),
        ];

        for start in cases {
            let result = normalize(start.as_ref(), Some(&json!({"date": "2024-03-16"})));
            assert!(
                matches!(result, Err(Error::MalformedEventTime(_))),
                "start: {:?}",
                start
            );
        }
    }

    #[test]
    fn test_timed_without_end_time() {
        let result = normalize(
            Some(&json!({"dateTime": "2024-03-15T14:30:00-04:00"})),
            Some(&json!({"date": "2024-03-16"})),
        );
        assert!(matches!(result, Err(Error::MalformedEventTime(_))));

        let result = normalize(Some(&json!({"dateTime": "2024-03-15T14:30:00-04:00"})), None);
        assert!(matches!(result, Err(Error::MalformedEventTime(_))));
    }

    #[test]
    fn test_date_wins_over_date_time() {
        let start = json!({"date": "2024-03-15", "dateTime": "2024-03-15T14:30:00-04:00"});
        assert_eq!(EventStart::detect(Some(&start)).unwrap(), EventStart::AllDay("2024-03-15"));
    }
}
