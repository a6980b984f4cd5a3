//! Read-only views computed from a fresh snapshot of a schedule's slots.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::sync::Arc;
use timetable_core::{
    layout::compute_timetable_layout,
    models::timetable::{TimetableResponse, UpcomingEntry, UpcomingResponse, WeekSlotsResponse},
    occurrence::resolve_active_slots_for_week,
    revenue::{PeriodKind, RevenueReport, compute_revenue},
    upcoming::upcoming_occurrences,
};
use uuid::Uuid;

use super::{WeekQuery, load_slots, resolve_week};
use crate::{ApiState, middleware::error_handling::AppError};

#[derive(Debug, Deserialize)]
pub struct RevenueQuery {
    pub period: Option<String>,
    pub week: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct UpcomingQuery {
    pub at: Option<NaiveDateTime>,
}

#[axum::debug_handler]
pub async fn week_slots(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    query: Result<Query<WeekQuery>, QueryRejection>,
) -> Result<Json<WeekSlotsResponse>, AppError> {
    let Query(query) = query?;
    let week_start = resolve_week(query.week);
    let slots = load_slots(&state, id).await?;

    let active = resolve_active_slots_for_week(&slots, week_start)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(WeekSlotsResponse {
        week_start,
        slots: active,
    }))
}

#[axum::debug_handler]
pub async fn timetable(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    query: Result<Query<WeekQuery>, QueryRejection>,
) -> Result<Json<TimetableResponse>, AppError> {
    let Query(query) = query?;
    let slots = load_slots(&state, id).await?;

    let layout = compute_timetable_layout(&slots, resolve_week(query.week));
    Ok(Json(TimetableResponse::from(&layout)))
}

/// Revenue for the period containing the viewed week's Monday.
#[axum::debug_handler]
pub async fn revenue(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    query: Result<Query<RevenueQuery>, QueryRejection>,
) -> Result<Json<RevenueReport>, AppError> {
    let Query(query) = query?;
    let period = match query.period.as_deref() {
        Some(value) => value.parse::<PeriodKind>()?,
        None => PeriodKind::Week,
    };
    let slots = load_slots(&state, id).await?;

    Ok(Json(compute_revenue(&slots, period, resolve_week(query.week))))
}

#[axum::debug_handler]
pub async fn upcoming(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    query: Result<Query<UpcomingQuery>, QueryRejection>,
) -> Result<Json<UpcomingResponse>, AppError> {
    let Query(query) = query?;
    let at = query.at.unwrap_or_else(|| Local::now().naive_local());
    let slots = load_slots(&state, id).await?;

    let entries = upcoming_occurrences(&slots, at, state.reminder_lead_minutes)
        .iter()
        .map(UpcomingEntry::from)
        .collect();

    Ok(Json(UpcomingResponse {
        at,
        lead_minutes: state.reminder_lead_minutes,
        entries,
    }))
}
