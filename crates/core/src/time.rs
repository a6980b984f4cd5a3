//! Wall-clock helpers.
//!
//! Both conversions are total: malformed input degrades to midnight instead of
//! producing an error, so callers never have to handle a parse failure here.

/// Parses an `HH:MM` string into minutes from midnight.
///
/// Returns `0` when the colon is missing, either part is not a number, or
/// the total does not fit in a `u32`.
///
/// ```
/// use timetable_core::time::time_to_minutes;
///
/// assert_eq!(time_to_minutes("08:30"), 510);
/// assert_eq!(time_to_minutes("garbage"), 0);
/// ```
pub fn time_to_minutes(value: &str) -> u32 {
    let mut parts = value.split(':');
    let (Some(hours), Some(minutes)) = (parts.next(), parts.next()) else {
        return 0;
    };

    match (hours.trim().parse::<u32>(), minutes.trim().parse::<u32>()) {
        (Ok(hours), Ok(minutes)) => hours
            .checked_mul(60)
            .and_then(|hours| hours.checked_add(minutes))
            .unwrap_or(0),
        _ => 0,
    }
}

/// Formats minutes from midnight as a zero-padded `HH:MM` string.
pub fn minutes_to_time(total_minutes: u32) -> String {
    format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}
