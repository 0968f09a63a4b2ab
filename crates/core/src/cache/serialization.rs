//! Pure functions for serializing/deserializing holiday events to/from cache payloads.
//!
//! Payloads are JSON in exactly the shape served over HTTP, so a cached value
//! can be inspected with `redis-cli GET` and compared with a live response.

use crate::holiday::HolidayEvent;
use thiserror::Error;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to a payload.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize a payload to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes a slice of holiday events to a JSON payload.
pub fn serialize_events(events: &[HolidayEvent]) -> Result<String> {
    serde_json::to_string(events).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes a JSON payload to a vector of holiday events.
pub fn deserialize_events(payload: &str) -> Result<Vec<HolidayEvent>> {
    serde_json::from_str(payload).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank_holiday() -> HolidayEvent {
        HolidayEvent::new("2024-05-06", "Early May Bank Holiday")
            .with_locations(vec!["England".to_string(), "Wales".to_string()])
    }

    #[test]
    fn test_serialize_uses_wire_field_names() {
        let payload = serialize_events(&[bank_holiday()]).unwrap();
        assert_eq!(
            payload,
            r#"[{"date":"2024-05-06","holiday_name":"Early May Bank Holiday","holiday_locations":["England","Wales"]}]"#
        );
    }

    #[test]
    fn test_serialize_omits_absent_locations() {
        let payload =
            serialize_events(&[HolidayEvent::new("2024-12-25", "Christmas Day")]).unwrap();
        assert!(!payload.contains("holiday_locations"));
    }

    #[test]
    fn test_roundtrip_events() {
        let events = vec![bank_holiday(), HolidayEvent::new("2024-12-25", "Christmas Day")];
        let payload = serialize_events(&events).unwrap();
        assert_eq!(deserialize_events(&payload).unwrap(), events);
    }

    #[test]
    fn test_deserialize_empty_array() {
        assert!(deserialize_events("[]").unwrap().is_empty());
    }

    #[test]
    fn test_deserialize_invalid_payload() {
        let result = deserialize_events("not json");
        assert!(matches!(
            result,
            Err(SerializationError::DeserializeFailed(_))
        ));
    }
}
