use chrono::{DateTime, Utc};

use crate::datetime::format_local;

const MINUTE: u64 = 60;
const HOUR: u64 = 3600;
const DAY: u64 = 86_400;

/// Whole seconds between `target` and `now`, in either direction.
pub fn age_seconds(target: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    now.signed_duration_since(target)
        .num_milliseconds()
        .unsigned_abs()
        / 1000
}

/// Relative text for an age; `None` once the age reaches a full day and the
/// label should show an absolute date instead.
pub fn relative_text(age_seconds: u64) -> Option<String> {
    let text = match age_seconds {
        0 => "just now".to_string(),
        1 => "1 second ago".to_string(),
        2..MINUTE => format!("{age_seconds} seconds ago"),
        MINUTE..120 => "1 minute ago".to_string(),
        120..HOUR => format!("{} minutes ago", age_seconds / MINUTE),
        HOUR..7200 => "1 hour ago".to_string(),
        7200..DAY => format!("{} hours ago", age_seconds / HOUR),
        _ => return None,
    };
    Some(text)
}

/// Label text for `target` observed `age_seconds` away from now.
pub fn label_text(target: DateTime<Utc>, age_seconds: u64, date_format: Option<&str>) -> String {
    relative_text(age_seconds).unwrap_or_else(|| format_local(target, date_format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    #[test]
    fn test_relative_text_boundaries() {
        let cases = [
            (0, "just now"),
            (1, "1 second ago"),
            (2, "2 seconds ago"),
            (45, "45 seconds ago"),
            (59, "59 seconds ago"),
            (60, "1 minute ago"),
            (61, "1 minute ago"),
            (119, "1 minute ago"),
            (120, "2 minutes ago"),
            (125, "2 minutes ago"),
            (3599, "59 minutes ago"),
            (3600, "1 hour ago"),
            (3601, "1 hour ago"),
            (7199, "1 hour ago"),
            (7200, "2 hours ago"),
            (7300, "2 hours ago"),
            (86_399, "23 hours ago"),
        ];
        for (age, expected) in cases {
            assert_eq!(relative_text(age).as_deref(), Some(expected), "age {age}");
        }
        assert_eq!(relative_text(86_400), None);
        assert_eq!(relative_text(90_000), None);
    }

    #[test]
    fn test_age_is_absolute_and_floored() {
        let target = Utc.with_ymd_and_hms(2020, 6, 15, 12, 0, 0).unwrap();
        assert_eq!(age_seconds(target, target), 0);
        assert_eq!(age_seconds(target, target + TimeDelta::milliseconds(1999)), 1);
        assert_eq!(age_seconds(target, target - TimeDelta::seconds(45)), 45);
    }

    #[test]
    fn test_label_text_switches_to_date() {
        let target = Utc.with_ymd_and_hms(2020, 6, 15, 12, 0, 0).unwrap();
        assert_eq!(label_text(target, 125, None), "2 minutes ago");
        let text = label_text(target, 90_000, None);
        assert!(!text.ends_with("ago"), "got {text}");
        assert!(text.contains("2020"), "got {text}");
    }
}
