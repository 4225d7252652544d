//! Shared formatting helpers for the report.
//!
//! Pure functions only: no I/O and no knowledge of section layout.

use crate::models::Uptime;

/// Width of a usage bar, in characters.
pub const BAR_WIDTH: usize = 20;

/// Marker printed for values that could not be extracted.
pub const NOT_AVAILABLE: &str = "n/a";

/// Renders a fixed-width usage bar: `floor(p / 5)` `#` followed by `-`.
///
/// The percentage is clamped to `[0, 100]`; NaN renders as an empty bar.
pub fn usage_bar(percentage: f64) -> String {
    let filled = hashes_for(percentage);
    let mut bar = String::with_capacity(BAR_WIDTH);
    bar.extend(std::iter::repeat_n('#', filled));
    bar.extend(std::iter::repeat_n('-', BAR_WIDTH - filled));
    bar
}

fn hashes_for(percentage: f64) -> usize {
    if percentage.is_nan() {
        return 0;
    }
    ((percentage.clamp(0.0, 100.0) / 5.0).floor() as usize).min(BAR_WIDTH)
}

/// Formats an uptime as `[Y years, ][D days, ][H hours, ]M minutes, S seconds`.
///
/// Years, days and hours are left out when zero.
pub fn format_uptime(uptime: &Uptime) -> String {
    let mut out = String::new();
    for (value, unit) in [
        (uptime.years, "years"),
        (uptime.days, "days"),
        (uptime.hours, "hours"),
    ] {
        if value > 0 {
            out.push_str(&format!("{} {}, ", value, unit));
        }
    }
    out.push_str(&format!(
        "{} minutes, {} seconds",
        uptime.minutes, uptime.seconds
    ));
    out
}

/// Cuts `s` to at most `max` bytes without splitting a character.
pub fn truncate_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Formats an optional number, or [`NOT_AVAILABLE`].
pub fn or_na<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
