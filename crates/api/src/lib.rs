//! # Timetable API
//!
//! The API crate exposes the timetable engine over HTTP. Every request loads
//! a fresh snapshot of the schedule's slots from storage and recomputes the
//! requested view in full.
//!
//! ## Architecture
//!
//! - **Routes**: API endpoints and URL structure
//! - **Handlers**: request processing over the core engine
//! - **Middleware**: error to HTTP response mapping
//! - **Config**: environment configuration
//!
//! Storage is reached only through the repository traits in `timetable-db`,
//! so the router can be driven by mocks in tests.

/// Configuration module for API settings
pub mod config;
/// Request handlers that call into the core engine
pub mod handlers;
/// Error handling shared by all handlers
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use eyre::{Result, WrapErr};
use sqlx::PgPool;
use timetable_db::repositories::{
    PgScheduleRepository, PgSlotRepository, ScheduleRepository, SlotRepository,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    pub schedules: Arc<dyn ScheduleRepository>,
    pub slots: Arc<dyn SlotRepository>,
    /// Look-ahead window for `/upcoming`, in minutes.
    pub reminder_lead_minutes: u32,
}

impl ApiState {
    /// State backed by the PostgreSQL repositories.
    pub fn postgres(pool: PgPool, reminder_lead_minutes: u32) -> Self {
        Self {
            schedules: Arc::new(PgScheduleRepository::new(pool.clone())),
            slots: Arc::new(PgSlotRepository::new(pool)),
            reminder_lead_minutes,
        }
    }
}

/// Builds the application router with all routes attached to `state`.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .merge(routes::schedule::routes())
        .merge(routes::slot::routes())
        .merge(routes::views::routes())
        .merge(routes::backup::routes())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .wrap_err_with(|| format!("Invalid CORS origin: {origin}"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(origins))
}

/// Starts the API server with the provided configuration and database connection
///
/// Installs the tracing subscriber, wires the PostgreSQL repositories into
/// the router and serves until the listener fails.
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::postgres(db_pool, config.reminder_lead_minutes));
    let app = build_router(state).layer(TraceLayer::new_for_http());

    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)?),
        None => app,
    };

    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(axum::error_handling::HandleErrorLayer::new(
                |_: tower::BoxError| async { axum::http::StatusCode::REQUEST_TIMEOUT },
            ))
            .timeout(Duration::from_secs(config.request_timeout))
            .into_inner(),
    );

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
