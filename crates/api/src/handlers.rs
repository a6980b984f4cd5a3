pub mod backup;
pub mod schedule;
pub mod slot;
pub mod views;

use chrono::{Local, NaiveDate};
use serde::Deserialize;
use timetable_core::{
    calendar::week_start_of,
    errors::TimetableError,
    models::{schedule::Schedule, slot::Slot},
};
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

/// `?week=` selector shared by the week-scoped endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct WeekQuery {
    pub week: Option<NaiveDate>,
}

/// Monday of the week containing `week`, or of the current local week.
pub(crate) fn resolve_week(week: Option<NaiveDate>) -> NaiveDate {
    week_start_of(week.unwrap_or_else(|| Local::now().date_naive()))
}

pub(crate) async fn require_schedule(state: &ApiState, id: Uuid) -> Result<Schedule, AppError> {
    state
        .schedules
        .get_schedule_by_id(id)
        .await?
        .ok_or_else(|| AppError(TimetableError::NotFound(format!("Schedule with ID {} not found", id))))
}

/// Fresh snapshot of a schedule's slots; 404 when the schedule is unknown.
pub(crate) async fn load_slots(state: &ApiState, schedule_id: Uuid) -> Result<Vec<Slot>, AppError> {
    require_schedule(state, schedule_id).await?;
    Ok(state.slots.get_slots_by_schedule_id(schedule_id).await?)
}
