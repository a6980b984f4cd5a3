//! Response shapes for the weekly views.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    layout::{PlacedOccurrence, TimetableCell, TimetableLayout},
    occurrence::Occurrence,
    time::minutes_to_time,
};

use super::slot::Slot;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekSlotsResponse {
    pub week_start: NaiveDate,
    pub slots: Vec<Slot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayHeader {
    pub date: NaiveDate,
    /// e.g. `"Monday (01/01)"`
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellEntry {
    pub slot_id: Option<Uuid>,
    pub class_name: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub location: Option<String>,
    pub note: Option<String>,
    pub color: String,
    pub salary: f64,
    pub is_recurring: bool,
    pub first_interval: usize,
    pub row_span: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellResponse {
    pub visible: bool,
    pub row_span: usize,
    pub entries: Vec<CellEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableRowResponse {
    pub start: String,
    pub end: String,
    pub label: String,
    pub cells: Vec<CellResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableResponse {
    pub week_start: NaiveDate,
    pub days: Vec<DayHeader>,
    /// Empty when nothing is scheduled this week.
    pub rows: Vec<TimetableRowResponse>,
}

impl From<&PlacedOccurrence<'_>> for CellEntry {
    fn from(placed: &PlacedOccurrence<'_>) -> Self {
        let occurrence = &placed.occurrence;
        let slot = occurrence.slot;
        CellEntry {
            slot_id: slot.id,
            class_name: slot.class_name.clone(),
            date: occurrence.date,
            start_time: minutes_to_time(occurrence.start_minute),
            end_time: minutes_to_time(occurrence.end_minute),
            location: slot.location.clone(),
            note: slot.note.clone(),
            color: slot.display_color(),
            salary: slot.salary,
            is_recurring: slot.is_recurring(),
            first_interval: placed.first_interval,
            row_span: placed.row_span,
        }
    }
}

impl From<&TimetableCell<'_>> for CellResponse {
    fn from(cell: &TimetableCell<'_>) -> Self {
        CellResponse {
            visible: cell.visible,
            row_span: cell.row_span,
            entries: cell.occurrences.iter().map(CellEntry::from).collect(),
        }
    }
}

impl From<&TimetableLayout<'_>> for TimetableResponse {
    fn from(layout: &TimetableLayout<'_>) -> Self {
        let days = layout
            .days
            .iter()
            .map(|date| DayHeader {
                date: *date,
                label: date.format("%A (%d/%m)").to_string(),
            })
            .collect();

        let rows = layout
            .intervals
            .iter()
            .zip(&layout.rows)
            .map(|(interval, cells)| TimetableRowResponse {
                start: interval.start_label(),
                end: interval.end_label(),
                label: interval.label(),
                cells: cells.iter().map(CellResponse::from).collect(),
            })
            .collect();

        TimetableResponse {
            week_start: layout.week_start,
            days,
            rows,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpcomingEntry {
    pub slot_id: Option<Uuid>,
    pub class_name: String,
    pub start_time: String,
    pub location: Option<String>,
    pub message: String,
}

impl From<&Occurrence<'_>> for UpcomingEntry {
    fn from(occurrence: &Occurrence<'_>) -> Self {
        let slot = occurrence.slot;
        let start_time = minutes_to_time(occurrence.start_minute);
        let message = match &slot.location {
            Some(location) if !location.is_empty() => {
                format!("Class {} starts at {} at {}.", slot.class_name, start_time, location)
            }
            _ => format!("Class {} starts at {}.", slot.class_name, start_time),
        };
        UpcomingEntry {
            slot_id: slot.id,
            class_name: slot.class_name.clone(),
            start_time,
            location: slot.location.clone(),
            message,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpcomingResponse {
    pub at: NaiveDateTime,
    pub lead_minutes: u32,
    pub entries: Vec<UpcomingEntry>,
}
