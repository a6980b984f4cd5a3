use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use timetable_core::{
    edit::{RemovalMode, RemovalPlan, apply_update, build_slot, plan_removal},
    errors::TimetableError,
    models::slot::{
        CreateSlotRequest, RemoveSlotResponse, Slot, SlotListResponse, UpdateSlotRequest,
    },
};
use uuid::Uuid;

use super::{WeekQuery, load_slots, require_schedule, resolve_week};
use crate::{ApiState, middleware::error_handling::AppError};

/// Query string of a removal: `?mode=date_range&from=2024-01-01&to=2024-01-31&week=2024-01-08`.
#[derive(Debug, Deserialize)]
pub struct RemoveSlotQuery {
    pub mode: String,
    pub week: Option<NaiveDate>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl RemoveSlotQuery {
    fn removal_mode(&self) -> Result<RemovalMode, TimetableError> {
        match self.mode.as_str() {
            "current_instance" => Ok(RemovalMode::CurrentInstance),
            "from_now_on" => Ok(RemovalMode::FromNowOn),
            "all" => Ok(RemovalMode::All),
            "date_range" => match (self.from, self.to) {
                (Some(start), Some(end)) => Ok(RemovalMode::DateRange { start, end }),
                _ => Err(TimetableError::Validation(
                    "date_range removal requires both from and to".to_string(),
                )),
            },
            other => Err(TimetableError::Validation(format!(
                "Unknown removal mode: {other}"
            ))),
        }
    }
}

async fn require_slot(state: &ApiState, schedule_id: Uuid, slot_id: Uuid) -> Result<Slot, AppError> {
    require_schedule(state, schedule_id).await?;
    state
        .slots
        .get_slot_by_id(schedule_id, slot_id)
        .await?
        .ok_or_else(|| AppError(TimetableError::NotFound(format!("Slot with ID {} not found", slot_id))))
}

#[axum::debug_handler]
pub async fn list_slots(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SlotListResponse>, AppError> {
    let slots = load_slots(&state, id).await?;
    Ok(Json(SlotListResponse { slots }))
}

#[axum::debug_handler]
pub async fn create_slot(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    query: Result<Query<WeekQuery>, QueryRejection>,
    payload: Result<Json<CreateSlotRequest>, JsonRejection>,
) -> Result<Json<Slot>, AppError> {
    let Query(query) = query?;
    let Json(payload) = payload?;
    require_schedule(&state, id).await?;

    let slot = build_slot(payload, resolve_week(query.week))?;
    let slot = state.slots.create_slot(id, slot).await?;
    tracing::debug!("Created slot {:?} in schedule {}", slot.id, id);

    Ok(Json(slot))
}

#[axum::debug_handler]
pub async fn update_slot(
    State(state): State<Arc<ApiState>>,
    Path((id, slot_id)): Path<(Uuid, Uuid)>,
    payload: Result<Json<UpdateSlotRequest>, JsonRejection>,
) -> Result<Json<Slot>, AppError> {
    let Json(payload) = payload?;
    let existing = require_slot(&state, id, slot_id).await?;

    let updated = apply_update(existing, payload)?;
    let updated = state.slots.update_slot(id, updated).await?;

    Ok(Json(updated))
}

#[axum::debug_handler]
pub async fn remove_slot(
    State(state): State<Arc<ApiState>>,
    Path((id, slot_id)): Path<(Uuid, Uuid)>,
    query: Result<Query<RemoveSlotQuery>, QueryRejection>,
) -> Result<Json<RemoveSlotResponse>, AppError> {
    let Query(query) = query?;
    let mode = query.removal_mode()?;
    let existing = require_slot(&state, id, slot_id).await?;

    let response = match plan_removal(&existing, &mode, resolve_week(query.week))? {
        RemovalPlan::Delete => {
            state.slots.delete_slot(id, slot_id).await?;
            RemoveSlotResponse {
                id: slot_id,
                outcome: "deleted".to_string(),
                slot: None,
            }
        }
        RemovalPlan::Update(slot) => {
            let slot = state.slots.update_slot(id, slot).await?;
            RemoveSlotResponse {
                id: slot_id,
                outcome: "updated".to_string(),
                slot: Some(slot),
            }
        }
        RemovalPlan::Unchanged => RemoveSlotResponse {
            id: slot_id,
            outcome: "unchanged".to_string(),
            slot: Some(existing),
        },
    };
    tracing::debug!("Removal of slot {} ({:?}): {}", slot_id, mode, response.outcome);

    Ok(Json(response))
}
