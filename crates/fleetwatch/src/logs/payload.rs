//! Payload — the structured record a well-formed log line carries.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Structured payload of one log line.
///
/// Derived from `LogEntry::raw_payload` at format time, never stored.
/// `message`, `timestamp` and `log_level` are required; a line missing any
/// of them is rendered through the raw-text fallback instead.
#[derive(Debug, Clone, Deserialize)]
pub struct Payload {
    pub message: String,
    /// Seconds since epoch; the fractional part is ignored for display.
    pub timestamp: f64,
    /// Free text, rendered verbatim.
    pub log_level: String,
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
}

impl Payload {
    /// Parse a raw line. `None` means "not structured", which is valid
    /// input — malformed lines must never abort the stream.
    pub fn parse(raw: &str) -> Option<Payload> {
        serde_json::from_str(raw).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_required_fields() {
        let payload =
            Payload::parse(r#"{"message":"a","timestamp":1308618123.0,"log_level":"info"}"#)
                .unwrap();
        assert_eq!(payload.message, "a");
        assert_eq!(payload.log_level, "info");
        assert!(payload.data.is_none());
    }

    #[test]
    fn parses_integer_timestamp() {
        let payload =
            Payload::parse(r#"{"message":"a","timestamp":1308618123,"log_level":"info"}"#)
                .unwrap();
        assert_eq!(payload.timestamp, 1308618123.0);
    }

    #[test]
    fn parses_optional_data() {
        let payload = Payload::parse(
            r#"{"message":"b","timestamp":1.0,"log_level":"warn","data":{"foo":"bar"}}"#,
        )
        .unwrap();
        let data = payload.data.unwrap();
        assert_eq!(data.get("foo"), Some(&Value::String("bar".into())));
    }

    #[test]
    fn missing_required_field_is_not_structured() {
        assert!(Payload::parse(r#"{"message":"a","timestamp":1.0}"#).is_none());
        assert!(Payload::parse(r#"{"timestamp":1.0,"log_level":"info"}"#).is_none());
    }

    #[test]
    fn non_object_payloads_are_not_structured() {
        assert!(Payload::parse("plain text line").is_none());
        assert!(Payload::parse("[1, 2, 3]").is_none());
        assert!(Payload::parse("42").is_none());
        assert!(Payload::parse("").is_none());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let payload = Payload::parse(
            r#"{"message":"a","timestamp":1.0,"log_level":"info","extra":"x"}"#,
        )
        .unwrap();
        assert_eq!(payload.message, "a");
    }
}
