//! Update recipes applied to slot records by the editor.
//!
//! Nothing here touches storage. Each function takes the current record and
//! returns the record to write back (or a deletion), leaving persistence to
//! the repository.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{
    calendar::{days_between, week_start_of, weekday_from_number},
    color::color_for_class,
    errors::{TimetableError, TimetableResult},
    models::slot::{ApplyMode, CreateSlotRequest, Recurrence, Slot, UpdateSlotRequest},
};

/// How much of a recurring series a removal affects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RemovalMode {
    /// Cancel only the occurrence in the referenced week.
    CurrentInstance,
    /// End the series before the referenced week.
    FromNowOn,
    /// Cancel every occurrence between two dates, inclusive.
    DateRange { start: NaiveDate, end: NaiveDate },
    /// Remove the record entirely.
    All,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RemovalPlan {
    Delete,
    Update(Slot),
    /// The removal matched no occurrence.
    Unchanged,
}

fn ensure_ordered(start: NaiveDate, end: NaiveDate) -> TimetableResult<()> {
    if start > end {
        return Err(TimetableError::Validation(format!(
            "Range start {start} is after range end {end}"
        )));
    }
    Ok(())
}

fn parse_day_of_week(number: u8) -> TimetableResult<chrono::Weekday> {
    weekday_from_number(number).ok_or_else(|| {
        TimetableError::Validation(format!("Day of week must be 1..=7, got {number}"))
    })
}

/// Works out what a removal does to `slot`, given the week being viewed.
///
/// One-time slots are always deleted outright.
pub fn plan_removal(
    slot: &Slot,
    mode: &RemovalMode,
    week_reference: NaiveDate,
) -> TimetableResult<RemovalPlan> {
    if let RemovalMode::DateRange { start, end } = mode {
        ensure_ordered(*start, *end)?;
    }

    let Recurrence::Weekly { day_of_week, .. } = &slot.recurrence else {
        return Ok(RemovalPlan::Delete);
    };
    let monday = week_start_of(week_reference);

    let plan = match mode {
        RemovalMode::All => RemovalPlan::Delete,
        RemovalMode::CurrentInstance => {
            let instance = monday + Duration::days(i64::from(day_of_week.num_days_from_monday()));
            let mut updated = slot.clone();
            updated.excluded_dates.insert(instance);
            RemovalPlan::Update(updated)
        }
        RemovalMode::FromNowOn => {
            let end = monday - Duration::days(1);
            match slot.recurrence {
                // Nothing left before the cut-off.
                Recurrence::Weekly {
                    effective_start_date: Some(start),
                    ..
                } if start > end => RemovalPlan::Delete,
                Recurrence::Weekly {
                    day_of_week,
                    effective_start_date,
                    ..
                } => RemovalPlan::Update(Slot {
                    recurrence: Recurrence::Weekly {
                        day_of_week,
                        effective_start_date,
                        effective_end_date: Some(end),
                    },
                    ..slot.clone()
                }),
                Recurrence::OneTime { .. } => RemovalPlan::Delete,
            }
        }
        RemovalMode::DateRange { start, end } => {
            let matching: Vec<NaiveDate> = days_between(*start, *end)
                .filter(|day| day.weekday() == *day_of_week)
                .collect();
            if matching.is_empty() {
                RemovalPlan::Unchanged
            } else {
                let mut updated = slot.clone();
                updated.excluded_dates.extend(matching);
                RemovalPlan::Update(updated)
            }
        }
    };
    Ok(plan)
}

/// Turns an editor draft into a new slot, resolving its apply mode against
/// the viewed week.
pub fn build_slot(request: CreateSlotRequest, week_reference: NaiveDate) -> TimetableResult<Slot> {
    let monday = week_start_of(week_reference);

    let recurrence = match request.apply_mode {
        ApplyMode::CurrentWeek { day_of_week } => Recurrence::Weekly {
            day_of_week: parse_day_of_week(day_of_week)?,
            effective_start_date: Some(monday),
            effective_end_date: None,
        },
        ApplyMode::AllWeeks { day_of_week } => Recurrence::Weekly {
            day_of_week: parse_day_of_week(day_of_week)?,
            effective_start_date: None,
            effective_end_date: None,
        },
        ApplyMode::DateRange {
            day_of_week,
            start,
            end,
        } => {
            ensure_ordered(start, end)?;
            Recurrence::Weekly {
                day_of_week: parse_day_of_week(day_of_week)?,
                effective_start_date: Some(start),
                effective_end_date: Some(end),
            }
        }
        ApplyMode::OneTime { day_of_week, date } => {
            let specific_date = match (date, day_of_week) {
                (Some(date), _) => date,
                (None, Some(number)) => {
                    let weekday = parse_day_of_week(number)?;
                    monday + Duration::days(i64::from(weekday.num_days_from_monday()))
                }
                (None, None) => {
                    return Err(TimetableError::Validation(
                        "One-time slot needs a date or a day of week".to_string(),
                    ));
                }
            };
            Recurrence::OneTime { specific_date }
        }
    };

    let slot = Slot {
        id: None,
        color: Some(color_for_class(&request.class_name)),
        class_name: request.class_name,
        start_time: request.start_time,
        end_time: request.end_time,
        location: request.location,
        note: request.note,
        salary: request.salary,
        excluded_dates: Default::default(),
        recurrence,
        created_at: None,
    };
    slot.validate()?;
    Ok(slot)
}

/// Replaces the descriptive fields of `slot`. Dates, weekday and exclusions
/// are kept as they are.
pub fn apply_update(slot: Slot, request: UpdateSlotRequest) -> TimetableResult<Slot> {
    let updated = Slot {
        color: Some(color_for_class(&request.class_name)),
        class_name: request.class_name,
        start_time: request.start_time,
        end_time: request.end_time,
        location: request.location,
        note: request.note,
        salary: request.salary,
        ..slot
    };
    updated.validate()?;
    Ok(updated)
}
