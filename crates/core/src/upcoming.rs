//! Classes about to start, for reminders.
//!
//! Only today's occurrences are considered; delivering the reminder is left to
//! the caller.

use chrono::{NaiveDateTime, Timelike};

use crate::{
    models::slot::Slot,
    occurrence::{Occurrence, occurrences_on},
};

/// Default look-ahead for class reminders.
pub const DEFAULT_LEAD_MINUTES: u32 = 30;

/// Occurrences today that start after `now` and no later than `lead_minutes`
/// from it, earliest first.
pub fn upcoming_occurrences(
    slots: &[Slot],
    now: NaiveDateTime,
    lead_minutes: u32,
) -> Vec<Occurrence<'_>> {
    let now_minute = now.hour() * 60 + now.minute();
    let mut upcoming: Vec<Occurrence<'_>> = occurrences_on(slots, now.date())
        .into_iter()
        .filter(|occurrence| {
            occurrence.start_minute > now_minute
                && occurrence.start_minute - now_minute <= lead_minutes
        })
        .collect();
    upcoming.sort_by_key(|occurrence| occurrence.start_minute);
    upcoming
}
