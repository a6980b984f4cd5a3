use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/schedules/:id/week", get(handlers::views::week_slots))
        .route("/api/schedules/:id/timetable", get(handlers::views::timetable))
        .route("/api/schedules/:id/revenue", get(handlers::views::revenue))
        .route("/api/schedules/:id/upcoming", get(handlers::views::upcoming))
}
