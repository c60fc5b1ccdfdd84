use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;

/// Date in long form, e.g. "March 15, 2024"
pub fn pretty_date<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    now.format("%B %d, %Y").to_string()
}

/// Today's local date in long form
pub fn pretty_date_today() -> String {
    pretty_date(&Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_pretty_date() {
        let date = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
        assert_eq!(pretty_date(&date), "March 05, 2024");

        let date = Local.with_ymd_and_hms(2023, 12, 31, 23, 0, 0).unwrap();
        assert_eq!(pretty_date(&date), "December 31, 2023");
    }
}
