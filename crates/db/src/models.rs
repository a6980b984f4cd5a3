use chrono::{DateTime, NaiveDate, Utc};
use eyre::{Result, eyre};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use timetable_core::models::{
    schedule::Schedule,
    slot::{Recurrence, Slot, SlotRecord},
};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSchedule {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<DbSchedule> for Schedule {
    fn from(row: DbSchedule) -> Self {
        Schedule {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSlot {
    pub id: Uuid,
    pub schedule_id: Uuid,
    pub class_name: String,
    pub start_time: String,
    pub end_time: String,
    pub location: Option<String>,
    pub note: Option<String>,
    pub salary: f64,
    pub is_recurring_nature: bool,
    pub color: Option<String>,
    pub day_of_week: Option<i16>,
    pub effective_start_date: Option<NaiveDate>,
    pub effective_end_date: Option<NaiveDate>,
    pub specific_date: Option<NaiveDate>,
    pub excluded_dates: Vec<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl DbSlot {
    /// Rebuilds the domain slot. Fails only on rows that violate the
    /// variant invariants, which the schema cannot express on its own.
    pub fn into_slot(self) -> Result<Slot> {
        let id = self.id;
        let record = SlotRecord {
            id: Some(self.id),
            class_name: self.class_name,
            start_time: self.start_time,
            end_time: self.end_time,
            location: self.location,
            note: self.note,
            salary: self.salary,
            is_recurring_nature: self.is_recurring_nature,
            color: self.color,
            day_of_week: self.day_of_week.and_then(|day| u8::try_from(day).ok()),
            effective_start_date: self.effective_start_date,
            effective_end_date: self.effective_end_date,
            excluded_dates: self.excluded_dates,
            specific_date: self.specific_date,
            created_at: Some(self.created_at),
        };
        Slot::try_from(record).map_err(|e| eyre!("Corrupt slot row {}: {}", id, e))
    }
}

/// Column values for the variant-specific part of a slot row.
#[derive(Debug, Clone, PartialEq)]
pub struct RecurrenceColumns {
    pub is_recurring_nature: bool,
    pub day_of_week: Option<i16>,
    pub effective_start_date: Option<NaiveDate>,
    pub effective_end_date: Option<NaiveDate>,
    pub specific_date: Option<NaiveDate>,
}

impl From<&Recurrence> for RecurrenceColumns {
    fn from(recurrence: &Recurrence) -> Self {
        match recurrence {
            Recurrence::Weekly {
                day_of_week,
                effective_start_date,
                effective_end_date,
            } => RecurrenceColumns {
                is_recurring_nature: true,
                day_of_week: Some(day_of_week.number_from_monday() as i16),
                effective_start_date: *effective_start_date,
                effective_end_date: *effective_end_date,
                specific_date: None,
            },
            Recurrence::OneTime { specific_date } => RecurrenceColumns {
                is_recurring_nature: false,
                day_of_week: None,
                effective_start_date: None,
                effective_end_date: None,
                specific_date: Some(*specific_date),
            },
        }
    }
}
