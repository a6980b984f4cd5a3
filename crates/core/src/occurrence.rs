//! # Occurrence Resolver
//!
//! The single place that decides whether a slot happens on a date. The layout,
//! revenue and upcoming-class paths all go through [`occurrence_on`], so what
//! is rendered and what is counted can never drift apart.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::{calendar::days_of_week, models::slot::{Recurrence, Slot}};

/// One concrete instance of a slot on a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Occurrence<'a> {
    pub slot: &'a Slot,
    pub date: NaiveDate,
    pub start_minute: u32,
    pub end_minute: u32,
}

/// Whether `slot` is scheduled on `date`, ignoring its time of day.
///
/// A weekly slot must fall on its weekday, inside its effective bounds (both
/// inclusive) and outside its excluded dates. A one-time slot must match its
/// date exactly. Exclusions apply to both variants.
pub fn is_active_on(slot: &Slot, date: NaiveDate) -> bool {
    let scheduled = match &slot.recurrence {
        Recurrence::Weekly {
            day_of_week,
            effective_start_date,
            effective_end_date,
        } => {
            date.weekday() == *day_of_week
                && effective_start_date.is_none_or(|start| date >= start)
                && effective_end_date.is_none_or(|end| date <= end)
        }
        Recurrence::OneTime { specific_date } => date == *specific_date,
    };

    scheduled && !slot.excluded_dates.contains(&date)
}

/// Start and end minute of the slot's occurrence on `date`.
///
/// `None` when the slot is inactive that day, or when its times describe an
/// empty interval; such a slot produces no row and no revenue.
pub fn occurrence_bounds(slot: &Slot, date: NaiveDate) -> Option<(u32, u32)> {
    if !is_active_on(slot, date) {
        return None;
    }
    let (start, end) = (slot.start_minute(), slot.end_minute());
    (start < end).then_some((start, end))
}

pub fn occurrence_on(slot: &Slot, date: NaiveDate) -> Option<Occurrence<'_>> {
    occurrence_bounds(slot, date).map(|(start_minute, end_minute)| Occurrence {
        slot,
        date,
        start_minute,
        end_minute,
    })
}

/// Every occurrence on `date`, in slot order.
pub fn occurrences_on(slots: &[Slot], date: NaiveDate) -> Vec<Occurrence<'_>> {
    slots
        .iter()
        .filter_map(|slot| occurrence_on(slot, date))
        .collect()
}

/// Every occurrence in the Monday-based week containing `week_reference`,
/// ordered by day and then by slot order.
pub fn occurrences_in_week(slots: &[Slot], week_reference: NaiveDate) -> Vec<Occurrence<'_>> {
    days_of_week(week_reference)
        .into_iter()
        .flat_map(|day| occurrences_on(slots, day))
        .collect()
}

/// Slots with at least one occurrence in the week containing `week_reference`.
pub fn resolve_active_slots_for_week(slots: &[Slot], week_reference: NaiveDate) -> Vec<&Slot> {
    let days = days_of_week(week_reference);
    slots
        .iter()
        .filter(|slot| days.iter().any(|day| occurrence_on(slot, *day).is_some()))
        .collect()
}
