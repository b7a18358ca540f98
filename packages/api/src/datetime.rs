//! # JST datetime helpers
//!
//! Converts between the storage API's ISO-8601 instants and the
//! `datetime-local` form field, which is defined to hold Japan Standard Time
//! regardless of where the browser runs. Display formatting uses the local
//! zone; the JST pinning applies only to the action-date form round trip.
//!
//! The API emits two instant shapes: strict RFC 3339 (`2025-01-01T00:00:00Z`)
//! and the CRM variant with a colon-less offset and fixed milliseconds
//! (`2025-01-01T00:00:00.000+0000`). [`parse_instant`] accepts both.
//!
//! All functions return `Option` and map any unparseable input to `None`;
//! callers render a blank field rather than failing the whole view.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};

/// JST is UTC+9, with no daylight saving.
const JST_OFFSET_SECS: i32 = 9 * 3600;

/// Form-field format for `<input type="datetime-local">`.
const DATETIME_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// CRM instant shape: fixed milliseconds, colon-less offset.
const CRM_INSTANT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

fn jst() -> Option<FixedOffset> {
    FixedOffset::east_opt(JST_OFFSET_SECS)
}

/// Parse an API instant, RFC 3339 or the CRM variant.
pub fn parse_instant(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, CRM_INSTANT_FORMAT))
        .ok()
}

/// API instant to a `datetime-local` field value in JST.
pub fn to_jst_datetime_local(value: &str) -> Option<String> {
    let instant = parse_instant(value)?;
    let jst = instant.with_timezone(&jst()?);
    Some(jst.format(DATETIME_LOCAL_FORMAT).to_string())
}

/// `datetime-local` field value, read as JST wall time, back to a UTC
/// RFC 3339 instant with millisecond precision.
pub fn from_jst_datetime_local(value: &str) -> Option<String> {
    let naive = NaiveDateTime::parse_from_str(value, DATETIME_LOCAL_FORMAT).ok()?;
    let instant = jst()?.from_local_datetime(&naive).single()?;
    Some(
        instant
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true),
    )
}

/// API instant formatted for display in the viewer's local zone.
pub fn format_local(value: &str) -> Option<String> {
    let instant = parse_instant(value)?;
    Some(
        instant
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utc_instant_to_jst_field() {
        assert_eq!(
            to_jst_datetime_local("2025-01-01T00:00:00Z").as_deref(),
            Some("2025-01-01T09:00")
        );
        // Crossing midnight moves the date
        assert_eq!(
            to_jst_datetime_local("2025-01-01T20:30:00Z").as_deref(),
            Some("2025-01-02T05:30")
        );
    }

    #[test]
    fn test_crm_offset_variant_parses() {
        assert_eq!(
            to_jst_datetime_local("2025-01-01T00:00:00.000+0000").as_deref(),
            Some("2025-01-01T09:00")
        );
        assert_eq!(
            to_jst_datetime_local("2025-06-15T12:00:00.000+0900").as_deref(),
            Some("2025-06-15T12:00")
        );
    }

    #[test]
    fn test_jst_field_back_to_utc_instant() {
        assert_eq!(
            from_jst_datetime_local("2025-01-01T09:00").as_deref(),
            Some("2025-01-01T00:00:00.000Z")
        );
    }

    #[test]
    fn test_field_round_trip_preserves_the_instant() {
        let field = to_jst_datetime_local("2025-03-10T15:45:00Z").unwrap();
        assert_eq!(
            from_jst_datetime_local(&field).as_deref(),
            Some("2025-03-10T15:45:00.000Z")
        );
    }

    #[test]
    fn test_unparseable_input_is_none() {
        assert!(parse_instant("not a date").is_none());
        assert!(to_jst_datetime_local("2025-13-01T00:00:00Z").is_none());
        assert!(from_jst_datetime_local("09:00").is_none());
        assert!(format_local("").is_none());
    }

    #[test]
    fn test_format_local_has_the_display_shape() {
        // The zone depends on the host; only the shape is stable
        let display = format_local("2025-01-01T00:00:00Z").unwrap();
        assert!(NaiveDateTime::parse_from_str(&display, "%Y-%m-%d %H:%M:%S").is_ok());
    }
}
