use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/schedules/:id/export", get(handlers::backup::export_backup))
        .route("/api/schedules/:id/import", post(handlers::backup::import_backup))
}
