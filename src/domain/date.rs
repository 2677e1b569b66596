//! Event date parsing.
//!
//! Event dates are stored as the text the client sent. A date is accepted
//! if it is an RFC 3339 timestamp, a bare `YYYY-MM-DD` date, or a local
//! date-time; local values are read as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses an event date. Returns `None` for anything unrecognised.
#[must_use]
pub fn parse_event_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(local) = LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(local.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn accepts_dates_and_date_times() {
        assert_eq!(
            parse_event_date("2024-03-15"),
            Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).single()
        );
        assert_eq!(
            parse_event_date("2024-03-15T19:30:00"),
            Utc.with_ymd_and_hms(2024, 3, 15, 19, 30, 0).single()
        );
        assert_eq!(
            parse_event_date("2024-03-15T19:30:00+02:00"),
            Utc.with_ymd_and_hms(2024, 3, 15, 17, 30, 0).single()
        );
        assert!(parse_event_date("2024-03-15T19:30").is_some());
        assert!(parse_event_date("2024-03-15T19:30:00.250Z").is_some());
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_event_date("next tuesday"), None);
        assert_eq!(parse_event_date("2024-13-40"), None);
        assert_eq!(parse_event_date(""), None);
    }
}
