use chrono::{DateTime, SecondsFormat, Utc};

/// Renders an instant the way it appears in cache keys and upstream queries:
/// RFC 3339, UTC, millisecond precision, `Z` suffix.
///
/// # Examples
///
/// ```
/// use calendaring_core::cache::format_instant;
/// use chrono::{TimeZone, Utc};
///
/// let instant = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// assert_eq!(format_instant(&instant), "2024-01-01T00:00:00.000Z");
/// ```
pub fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Returns the cache key for one resolved holiday query.
///
/// Language and country are kept exactly as the caller supplied them, so
/// `en`/`US` and `en`/`us` are cached separately even though they resolve to
/// the same upstream calendar.
pub fn holiday_events_key(
    language: &str,
    country: &str,
    from: &DateTime<Utc>,
    to: &DateTime<Utc>,
) -> String {
    format!(
        "{}-{}-{}-{}",
        language,
        country,
        format_instant(from),
        format_instant(to)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_holiday_events_key() {
        let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();
        let key = holiday_events_key("en", "us", &from, &to);
        assert_eq!(
            key,
            "en-us-2024-01-01T00:00:00.000Z-2024-01-31T00:00:00.000Z"
        );
    }

    #[test]
    fn test_holiday_events_key_preserves_case() {
        let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        assert_ne!(
            holiday_events_key("en", "US", &from, &to),
            holiday_events_key("en", "us", &from, &to)
        );
    }

    #[test]
    fn test_format_instant_keeps_millis() {
        let instant = Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 5).unwrap()
            + chrono::Duration::milliseconds(250);
        assert_eq!(format_instant(&instant), "2024-06-15T10:30:05.250Z");
    }
}
