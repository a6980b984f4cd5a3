use axum::{
    Router,
    routing::{get, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/schedules/:id/slots",
            get(handlers::slot::list_slots).post(handlers::slot::create_slot),
        )
        .route(
            "/api/schedules/:id/slots/:slot_id",
            put(handlers::slot::update_slot).delete(handlers::slot::remove_slot),
        )
}
