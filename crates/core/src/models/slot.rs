//! The Slot entity and its persisted/exchanged record shape.
//!
//! A slot is either a weekly series or a one-time class. On the wire the two
//! variants share one flat record discriminated by `isRecurringNature`; in
//! memory the variant-specific fields live in [`Recurrence`] so that the
//! resolver can never read a field of the inactive variant.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    calendar::weekday_from_number,
    color::color_for_class,
    errors::{TimetableError, TimetableResult},
    time::time_to_minutes,
};

/// A class slot as stored by the schedule repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SlotRecord", into = "SlotRecord")]
pub struct Slot {
    /// Assigned by storage; `None` until the slot has been created.
    pub id: Option<Uuid>,
    pub class_name: String,
    /// Wall-clock `HH:MM`.
    pub start_time: String,
    /// Wall-clock `HH:MM`.
    pub end_time: String,
    pub location: Option<String>,
    pub note: Option<String>,
    /// Revenue attributed to every occurrence.
    pub salary: f64,
    pub color: Option<String>,
    /// Cancelled single instances.
    pub excluded_dates: BTreeSet<NaiveDate>,
    pub recurrence: Recurrence,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Recurrence {
    /// Repeats every week on `day_of_week`, optionally bounded on either side.
    Weekly {
        day_of_week: Weekday,
        effective_start_date: Option<NaiveDate>,
        effective_end_date: Option<NaiveDate>,
    },
    /// Occurs exactly once.
    OneTime { specific_date: NaiveDate },
}

impl Slot {
    pub fn is_recurring(&self) -> bool {
        matches!(self.recurrence, Recurrence::Weekly { .. })
    }

    pub fn start_minute(&self) -> u32 {
        time_to_minutes(&self.start_time)
    }

    pub fn end_minute(&self) -> u32 {
        time_to_minutes(&self.end_time)
    }

    /// The stored color, or the one derived from the class name.
    pub fn display_color(&self) -> String {
        self.color
            .clone()
            .unwrap_or_else(|| color_for_class(&self.class_name))
    }

    /// Checks the invariants an editor must enforce before a slot is saved.
    ///
    /// An effective window whose end precedes its start is accepted: such a
    /// series simply never occurs.
    pub fn validate(&self) -> TimetableResult<()> {
        if self.class_name.trim().is_empty() {
            return Err(TimetableError::Validation(
                "Class name must not be empty".to_string(),
            ));
        }
        if self.start_minute() >= self.end_minute() {
            return Err(TimetableError::Validation(format!(
                "End time {} must be after start time {}",
                self.end_time, self.start_time
            )));
        }
        if !self.salary.is_finite() || self.salary < 0.0 {
            return Err(TimetableError::Validation(
                "Salary must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }
}

/// Flat record used for storage exchange and backups.
///
/// Fields of the inactive variant are simply absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub class_name: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub salary: f64,
    pub is_recurring_nature: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_end_date: Option<NaiveDate>,
    #[serde(default)]
    pub excluded_dates: Vec<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl TryFrom<SlotRecord> for Slot {
    type Error = TimetableError;

    fn try_from(record: SlotRecord) -> Result<Self, Self::Error> {
        let recurrence = if record.is_recurring_nature {
            let number = record.day_of_week.ok_or_else(|| {
                TimetableError::Validation("Recurring slot is missing dayOfWeek".to_string())
            })?;
            let day_of_week = weekday_from_number(number).ok_or_else(|| {
                TimetableError::Validation(format!("dayOfWeek must be 1..=7, got {number}"))
            })?;
            Recurrence::Weekly {
                day_of_week,
                effective_start_date: record.effective_start_date,
                effective_end_date: record.effective_end_date,
            }
        } else {
            let specific_date = record.specific_date.ok_or_else(|| {
                TimetableError::Validation("One-time slot is missing specificDate".to_string())
            })?;
            Recurrence::OneTime { specific_date }
        };

        Ok(Slot {
            id: record.id,
            class_name: record.class_name,
            start_time: record.start_time,
            end_time: record.end_time,
            location: record.location,
            note: record.note,
            salary: record.salary,
            color: record.color,
            excluded_dates: record.excluded_dates.into_iter().collect(),
            recurrence,
            created_at: record.created_at,
        })
    }
}

impl From<Slot> for SlotRecord {
    fn from(slot: Slot) -> Self {
        let (is_recurring_nature, day_of_week, effective_start_date, effective_end_date, specific_date) =
            match slot.recurrence {
                Recurrence::Weekly {
                    day_of_week,
                    effective_start_date,
                    effective_end_date,
                } => (
                    true,
                    Some(day_of_week.number_from_monday() as u8),
                    effective_start_date,
                    effective_end_date,
                    None,
                ),
                Recurrence::OneTime { specific_date } => (false, None, None, None, Some(specific_date)),
            };

        SlotRecord {
            id: slot.id,
            class_name: slot.class_name,
            start_time: slot.start_time,
            end_time: slot.end_time,
            location: slot.location,
            note: slot.note,
            salary: slot.salary,
            is_recurring_nature,
            color: slot.color,
            day_of_week,
            effective_start_date,
            effective_end_date,
            excluded_dates: slot.excluded_dates.into_iter().collect(),
            specific_date,
            created_at: slot.created_at,
        }
    }
}

/// How a newly drafted slot is placed on the calendar.
///
/// Only consulted at creation time; the resulting bounds are what gets stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ApplyMode {
    /// Weekly from the viewed week onwards.
    CurrentWeek { day_of_week: u8 },
    /// Weekly with no bounds.
    AllWeeks { day_of_week: u8 },
    /// Weekly within an inclusive date range.
    DateRange {
        day_of_week: u8,
        start: NaiveDate,
        end: NaiveDate,
    },
    /// A single class. Without a date, the viewed week's `day_of_week` is used.
    OneTime {
        #[serde(default)]
        day_of_week: Option<u8>,
        #[serde(default)]
        date: Option<NaiveDate>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSlotRequest {
    pub class_name: String,
    pub start_time: String,
    pub end_time: String,
    pub location: Option<String>,
    pub note: Option<String>,
    #[serde(default)]
    pub salary: f64,
    pub apply_mode: ApplyMode,
}

/// Replaces the descriptive fields of an existing slot. Recurrence is left alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSlotRequest {
    pub class_name: String,
    pub start_time: String,
    pub end_time: String,
    pub location: Option<String>,
    pub note: Option<String>,
    #[serde(default)]
    pub salary: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotListResponse {
    pub slots: Vec<Slot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveSlotResponse {
    pub id: Uuid,
    /// `deleted`, `updated` or `unchanged`.
    pub outcome: String,
    pub slot: Option<Slot>,
}
