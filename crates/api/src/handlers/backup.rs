use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Local;
use std::sync::Arc;
use timetable_core::{
    backup::{backup_file_name, export_records, parse_backup},
    models::schedule::{ExportResponse, ImportResponse},
};
use uuid::Uuid;

use super::{load_slots, require_schedule};
use crate::{ApiState, middleware::error_handling::AppError};

#[axum::debug_handler]
pub async fn export_backup(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ExportResponse>, AppError> {
    let slots = load_slots(&state, id).await?;

    Ok(Json(ExportResponse {
        schedule_id: id,
        file_name: backup_file_name(Local::now().naive_local()),
        records: export_records(&slots),
    }))
}

/// Replaces the schedule's whole slot collection with the records in the body.
#[axum::debug_handler]
pub async fn import_backup(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    body: String,
) -> Result<Json<ImportResponse>, AppError> {
    require_schedule(&state, id).await?;
    let slots = parse_backup(&body)?;

    let imported = state.slots.replace_all_slots(id, slots).await?;
    tracing::debug!("Imported {} slots into schedule {}", imported.len(), id);

    Ok(Json(ImportResponse {
        schedule_id: id,
        imported: imported.len(),
    }))
}
