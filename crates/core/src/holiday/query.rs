//! Query construction from raw request parameters.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::{HolidayQuery, QueryError};

/// Naive date-time layouts accepted in addition to RFC 3339. All are read as UTC.
const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Returns the Google public holiday calendar ID for a locale.
///
/// # Examples
///
/// ```
/// use calendaring_core::holiday::holiday_calendar_id;
///
/// assert_eq!(
///     holiday_calendar_id("EN", "Us"),
///     "en.us#holiday@group.v.calendar.google.com"
/// );
/// ```
pub fn holiday_calendar_id(language: &str, country: &str) -> String {
    format!(
        "{}.{}#holiday@group.v.calendar.google.com",
        language.to_lowercase(),
        country.to_lowercase()
    )
}

/// Parses an ISO 8601 date or date-time into a UTC instant.
///
/// Accepts RFC 3339 (any offset), naive date-times, and plain dates. Naive
/// values are taken as UTC; plain dates as UTC midnight.
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.with_timezone(&Utc));
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl HolidayQuery {
    /// Builds a query from raw request parameters.
    ///
    /// Only presence and parseability are checked. Range ordering and locale
    /// validity are left to the upstream provider.
    pub fn from_params(
        from_date: Option<&str>,
        to_date: Option<&str>,
        language: Option<&str>,
        country: Option<&str>,
    ) -> Result<Self, QueryError> {
        let from = required_instant("fromDate", from_date)?;
        let to = required_instant("toDate", to_date)?;
        let language = required("language", language)?;
        let country = required("country", country)?;

        Ok(Self::new(from, to, language, country))
    }
}

fn required<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str, QueryError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(QueryError::Missing(field)),
    }
}

fn required_instant(field: &'static str, value: Option<&str>) -> Result<DateTime<Utc>, QueryError> {
    let raw = required(field, value)?;
    parse_instant(raw).ok_or_else(|| QueryError::InvalidInstant {
        field,
        value: raw.to_string(),
    })
}
