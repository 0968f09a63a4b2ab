//! Upstream-to-domain transform for holiday events.
//!
//! Google encodes the regions a holiday applies to in the event description,
//! e.g. `"Observed in: England, Wales"`. Only regional (bank) holidays carry
//! that annotation, which is what the location filter keys on.

use super::{HolidayEvent, UpstreamError, UpstreamEvent};

/// Extracts the location list from an upstream description.
///
/// Everything before the first `:` is dropped, the rest is split on `,` and
/// each piece trimmed. Empty pieces are discarded; if nothing is left the
/// result is `None`.
///
/// # Examples
///
/// ```
/// use calendaring_core::holiday::parse_locations;
///
/// assert_eq!(
///     parse_locations(Some("Observed in: Paris, Lyon")),
///     Some(vec!["Paris".to_string(), "Lyon".to_string()])
/// );
/// assert_eq!(parse_locations(Some("Public holiday")), None);
/// assert_eq!(parse_locations(None), None);
/// ```
pub fn parse_locations(description: Option<&str>) -> Option<Vec<String>> {
    let description = description?;
    let (_, rest) = description.split_once(':')?;

    let locations: Vec<String> = rest
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect();

    if locations.is_empty() {
        None
    } else {
        Some(locations)
    }
}

/// Converts one upstream event into a [`HolidayEvent`].
///
/// The date comes from `start.date`, or the date part of `start.dateTime`
/// for timed events. A missing summary or start is a malformed response.
pub fn event_from_upstream(event: UpstreamEvent) -> Result<HolidayEvent, UpstreamError> {
    let name = event
        .summary
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| UpstreamError::InvalidResponse("event without summary".to_string()))?;

    let date = event
        .start_date
        .or_else(|| {
            event
                .start_date_time
                .and_then(|dt| dt.get(..10).map(str::to_string))
        })
        .filter(|d| !d.is_empty())
        .ok_or_else(|| {
            UpstreamError::InvalidResponse(format!("event '{}' without start date", name))
        })?;

    let mut holiday = HolidayEvent::new(date, name);
    holiday.locations = parse_locations(event.description.as_deref());
    Ok(holiday)
}

/// Transforms a full upstream listing, keeping upstream order and retaining
/// only holidays that carry locations.
pub fn transform_events(events: Vec<UpstreamEvent>) -> Result<Vec<HolidayEvent>, UpstreamError> {
    let mut holidays = Vec::with_capacity(events.len());
    for event in events {
        let holiday = event_from_upstream(event)?;
        if holiday.has_locations() {
            holidays.push(holiday);
        }
    }
    Ok(holidays)
}
