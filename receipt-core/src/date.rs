//! ISO-8601 date parsing helpers
//!
//! Receipt date fields are carried as IA5String attribute values in an
//! ISO-8601 textual form (e.g. `2025-01-01T00:00:00Z`). These helpers
//! turn that text into `chrono` timestamps.

use chrono::{DateTime, Utc};

use crate::error::{ReceiptError, ReceiptResult};

/// Parse an ISO-8601 / RFC 3339 date string into a UTC timestamp
///
/// # Error Handling
/// Returns `ReceiptError::InvalidDateFormat` if the text does not parse.
pub fn parse_iso8601(text: &str) -> ReceiptResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|_| ReceiptError::InvalidDateFormat(text.to_string()))
}

/// Lenient variant of [`parse_iso8601`]
///
/// Empty or unparsable text yields `None` instead of an error. Used for
/// optional date attributes where absence must not fail the parse.
pub fn parse_iso8601_lenient(text: &str) -> Option<DateTime<Utc>> {
    if text.is_empty() {
        return None;
    }

    parse_iso8601(text).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_iso8601() {
        let date = parse_iso8601("2025-01-01T00:00:00Z").unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_iso8601_with_offset() {
        let date = parse_iso8601("2025-01-01T02:00:00+02:00").unwrap();
        assert_eq!(date, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_iso8601_invalid() {
        let result = parse_iso8601("not a date");
        assert!(matches!(result, Err(ReceiptError::InvalidDateFormat(_))));
    }

    #[test]
    fn test_parse_iso8601_lenient_empty() {
        assert_eq!(parse_iso8601_lenient(""), None);
        assert_eq!(parse_iso8601_lenient("garbage"), None);
        assert!(parse_iso8601_lenient("2025-06-30T12:00:00Z").is_some());
    }
}
