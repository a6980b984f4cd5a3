use axum::http::StatusCode;
use chrono::Weekday;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use timetable_core::models::schedule::{CreateScheduleResponse, GetScheduleResponse};
use uuid::Uuid;

use crate::test_utils::{TestContext, schedule, weekly};

#[test_log::test(tokio::test)]
async fn test_create_schedule_trims_name() {
    let created = schedule();
    let returned = created.clone();

    let mut ctx = TestContext::new();
    ctx.schedule_repo
        .expect_create_schedule()
        .withf(|name| name == "Ms. Lan")
        .times(1)
        .returning(move |_| Ok(returned.clone()));

    let response = ctx
        .server()
        .post("/api/schedules")
        .json(&json!({ "name": "  Ms. Lan " }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: CreateScheduleResponse = response.json();
    assert_eq!(body.id, created.id);
    assert_eq!(body.name, "Ms. Lan");
}

#[test_log::test(tokio::test)]
async fn test_create_schedule_rejects_blank_name() {
    let mut ctx = TestContext::new();
    ctx.schedule_repo.expect_create_schedule().never();

    let response = ctx
        .server()
        .post("/api/schedules")
        .json(&json!({ "name": "   " }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_get_schedule_includes_slots() {
    let schedule = schedule();
    let slots = vec![
        weekly("Math", Weekday::Mon, "08:00", "09:30", 100.0),
        weekly("Physics", Weekday::Wed, "13:00", "14:00", 80.0),
    ];

    let server = TestContext::new()
        .with_schedule(&schedule)
        .with_slots(schedule.id, slots.clone())
        .server();

    let response = server.get(&format!("/api/schedules/{}", schedule.id)).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: GetScheduleResponse = response.json();
    assert_eq!(body.name, schedule.name);
    assert_eq!(body.slots, slots);
}

#[test_log::test(tokio::test)]
async fn test_get_unknown_schedule_is_not_found() {
    let id = Uuid::new_v4();
    let server = TestContext::new().without_schedule(id).server();

    let response = server.get(&format!("/api/schedules/{id}")).await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        format!("Resource not found: Schedule with ID {id} not found")
    );
}
