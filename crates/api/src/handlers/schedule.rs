use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use std::sync::Arc;
use timetable_core::{
    errors::TimetableError,
    models::schedule::{CreateScheduleRequest, CreateScheduleResponse, GetScheduleResponse},
};
use uuid::Uuid;

use super::require_schedule;
use crate::{ApiState, middleware::error_handling::AppError};

#[axum::debug_handler]
pub async fn create_schedule(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CreateScheduleRequest>, JsonRejection>,
) -> Result<Json<CreateScheduleResponse>, AppError> {
    let Json(payload) = payload?;
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError(TimetableError::Validation(
            "Schedule name must not be empty".to_string(),
        )));
    }

    let schedule = state.schedules.create_schedule(name.to_string()).await?;
    tracing::debug!("Created schedule {}", schedule.id);

    Ok(Json(CreateScheduleResponse {
        id: schedule.id,
        name: schedule.name,
        created_at: schedule.created_at,
    }))
}

#[axum::debug_handler]
pub async fn get_schedule(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<GetScheduleResponse>, AppError> {
    let schedule = require_schedule(&state, id).await?;
    let slots = state.slots.get_slots_by_schedule_id(id).await?;

    Ok(Json(GetScheduleResponse {
        id: schedule.id,
        name: schedule.name,
        created_at: schedule.created_at,
        slots,
    }))
}
