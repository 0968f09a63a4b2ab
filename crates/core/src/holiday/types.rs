use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::holiday_events_key;

use super::query::holiday_calendar_id;

/// A single public holiday, as served to clients and stored in the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayEvent {
    /// ISO 8601 date the holiday falls on.
    pub date: String,
    #[serde(rename = "holiday_name")]
    pub name: String,
    /// Regions the holiday is observed in. Never `Some(vec![])`.
    #[serde(
        rename = "holiday_locations",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub locations: Option<Vec<String>>,
}

impl HolidayEvent {
    /// Creates a holiday without location information.
    pub fn new(date: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            name: name.into(),
            locations: None,
        }
    }

    /// Sets the locations for this holiday. An empty list clears them.
    pub fn with_locations(mut self, locations: Vec<String>) -> Self {
        self.locations = if locations.is_empty() {
            None
        } else {
            Some(locations)
        };
        self
    }

    /// Returns true if the holiday carries at least one location.
    pub fn has_locations(&self) -> bool {
        self.locations.as_ref().is_some_and(|l| !l.is_empty())
    }
}

/// One holiday lookup: a time window plus the locale selecting the calendar.
///
/// `from <= to` is not enforced; inverted windows are forwarded upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayQuery {
    /// Inclusive lower bound.
    pub from: DateTime<Utc>,
    /// Exclusive upper bound.
    pub to: DateTime<Utc>,
    pub language: String,
    pub country: String,
}

impl HolidayQuery {
    pub fn new(
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        language: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            from,
            to,
            language: language.into(),
            country: country.into(),
        }
    }

    /// Cache key identifying this query.
    pub fn cache_key(&self) -> String {
        holiday_events_key(&self.language, &self.country, &self.from, &self.to)
    }

    /// Identifier of the upstream public holiday calendar for this locale.
    pub fn calendar_id(&self) -> String {
        holiday_calendar_id(&self.language, &self.country)
    }
}

/// An event as returned by the upstream provider, reduced to the fields the
/// transform reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpstreamEvent {
    pub summary: Option<String>,
    pub description: Option<String>,
    /// `start.date` for all-day events.
    pub start_date: Option<String>,
    /// `start.dateTime` for timed events.
    pub start_date_time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_with_empty_locations_clears() {
        let event = HolidayEvent::new("2024-01-01", "New Year's Day").with_locations(vec![]);
        assert_eq!(event.locations, None);
        assert!(!event.has_locations());
    }

    #[test]
    fn test_has_locations() {
        let event = HolidayEvent::new("2024-03-17", "St Patrick's Day")
            .with_locations(vec!["Northern Ireland".into()]);
        assert!(event.has_locations());
    }

    #[test]
    fn test_deserialize_without_locations() {
        let event: HolidayEvent =
            serde_json::from_str(r#"{"date":"2024-12-25","holiday_name":"Christmas Day"}"#)
                .unwrap();
        assert_eq!(event, HolidayEvent::new("2024-12-25", "Christmas Day"));
    }

    #[test]
    fn test_query_cache_key_and_calendar_id() {
        let query = HolidayQuery::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap(),
            "EN",
            "UK",
        );
        assert_eq!(
            query.cache_key(),
            "EN-UK-2024-01-01T00:00:00.000Z-2024-01-31T00:00:00.000Z"
        );
        assert_eq!(
            query.calendar_id(),
            "en.uk#holiday@group.v.calendar.google.com"
        );
    }
}
