//! Local date-time rendering for experiment timestamps.

use std::fmt::Write;

use chrono::{DateTime, Local, Utc};
use tracing::warn;

/// Long localized date-time, e.g. `June 15, 2020 3:04 PM`.
pub const DEFAULT_DATE_FORMAT: &str = "%B %-d, %Y %-I:%M %p";

/// Convert seconds since the epoch into a UTC point in time.
///
/// Sub-second precision is kept to the millisecond. Returns `None` for NaN,
/// infinities and values outside chrono's representable range.
pub fn timestamp_to_datetime(epoch_seconds: f64) -> Option<DateTime<Utc>> {
    if !epoch_seconds.is_finite() {
        return None;
    }
    let millis = (epoch_seconds * 1000.0).floor();
    if millis < i64::MIN as f64 || millis > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64)
}

/// Render `target` in local time using `format` (or [`DEFAULT_DATE_FORMAT`]).
///
/// An unusable format string falls back to the default instead of panicking.
pub fn format_local(target: DateTime<Utc>, format: Option<&str>) -> String {
    let local = target.with_timezone(&Local);
    let format = format.unwrap_or(DEFAULT_DATE_FORMAT);

    let mut text = String::new();
    if write!(text, "{}", local.format(format)).is_ok() {
        return text;
    }

    warn!(
        event = "core.datetime.format_invalid",
        format = format,
        "Invalid date format - falling back to default"
    );
    local.format(DEFAULT_DATE_FORMAT).to_string()
}

/// Render seconds since the epoch as local date-time text.
pub fn format_date_time(epoch_seconds: f64, format: Option<&str>) -> Option<String> {
    timestamp_to_datetime(epoch_seconds).map(|target| format_local(target, format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_keeps_milliseconds() {
        let target = timestamp_to_datetime(1_592_222_400.25).unwrap();
        assert_eq!(target.timestamp(), 1_592_222_400);
        assert_eq!(target.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_non_finite_timestamps_are_rejected() {
        assert!(timestamp_to_datetime(f64::NAN).is_none());
        assert!(timestamp_to_datetime(f64::INFINITY).is_none());
        assert!(timestamp_to_datetime(1e300).is_none());
    }

    #[test]
    fn test_default_format_is_long_date() {
        // Mid-month, mid-year: the local date stays in June 2020 in any zone.
        let target = Utc.with_ymd_and_hms(2020, 6, 15, 12, 0, 0).unwrap();
        let text = format_local(target, None);
        assert!(text.contains("June"), "got {text}");
        assert!(text.contains("2020"), "got {text}");
        assert!(text.ends_with("AM") || text.ends_with("PM"), "got {text}");
    }

    #[test]
    fn test_custom_format() {
        let target = Utc.with_ymd_and_hms(2020, 6, 15, 12, 0, 0).unwrap();
        assert_eq!(format_local(target, Some("%Y")), "2020");
    }

    #[test]
    fn test_invalid_format_falls_back() {
        let target = Utc.with_ymd_and_hms(2020, 6, 15, 12, 0, 0).unwrap();
        let text = format_local(target, Some("%Q"));
        assert!(text.contains("2020"), "got {text}");
    }

    #[test]
    fn test_format_date_time() {
        assert!(format_date_time(f64::NAN, None).is_none());
        assert_eq!(
            format_date_time(1_592_222_400.0, Some("%Y")).as_deref(),
            Some("2020")
        );
    }
}
