//! Compact duration text for elapsed and remaining times.
//!
//! Durations under a day render as `5s`, `1:05` or `1:01:05`. Longer ones get
//! a whole-day prefix (`2d 1:01:05`). Negative durations render their
//! magnitude followed by ` ago`.

const SECONDS_PER_HOUR: u64 = 3_600;
const SECONDS_PER_DAY: u64 = 86_400;

/// Largest supported number of fractional digits.
pub const MAX_PRECISION: u32 = 9;

/// Format `duration` (in seconds) with up to `precision` fractional digits.
///
/// The magnitude is rounded to `precision` digits first, so `59.6` with
/// precision 0 renders as `1:00`. Day counts are floored and the sub-day
/// remainder is always non-negative.
pub fn format_duration(duration: f64, precision: u32) -> String {
    let precision = precision.min(MAX_PRECISION);
    let scale = 10u64.pow(precision);

    // Float to int casts saturate, NaN becomes zero.
    let scaled = (duration.abs() * scale as f64).round() as u64;
    let whole = scaled / scale;
    let fraction = scaled % scale;

    let mut text = if whole >= SECONDS_PER_DAY {
        let days = whole / SECONDS_PER_DAY;
        let remainder = whole % SECONDS_PER_DAY;
        format!(
            "{days}d {}",
            format_sub_day(remainder, fraction, precision)
        )
    } else {
        format_sub_day(whole, fraction, precision)
    };

    if duration < 0.0 {
        text.push_str(" ago");
    }
    text
}

fn format_sub_day(seconds: u64, fraction: u64, precision: u32) -> String {
    let hours = seconds / SECONDS_PER_HOUR;
    let minutes = (seconds % SECONDS_PER_HOUR) / 60;
    let secs = seconds % 60;
    let fraction = fraction_suffix(fraction, precision);

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}{fraction}")
    } else if minutes > 0 {
        format!("{minutes}:{secs:02}{fraction}")
    } else {
        format!("{secs}{fraction}s")
    }
}

/// `.25` for fraction 250 at precision 3, empty when every digit is zero.
fn fraction_suffix(fraction: u64, precision: u32) -> String {
    if precision == 0 {
        return String::new();
    }
    let digits = format!("{:0width$}", fraction, width = precision as usize);
    let trimmed = digits.trim_end_matches('0');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(".{trimmed}")
    }
}
