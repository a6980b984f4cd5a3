use axum::http::StatusCode;
use chrono::Weekday;
use pretty_assertions::assert_eq;
use serde_json::Value;
use timetable_core::revenue::{PeriodKind, RevenueReport};

use crate::test_utils::{LEAD_MINUTES, TestContext, date, one_time, schedule, weekly};

#[test_log::test(tokio::test)]
async fn test_week_lists_only_active_slots() {
    let schedule = schedule();
    let monday = weekly("Math", Weekday::Mon, "08:00", "09:30", 100.0);
    let next_week = one_time("Exam prep", date(2024, 1, 17), "18:00", "20:00", 300.0);

    let server = TestContext::new()
        .with_schedule(&schedule)
        .with_slots(schedule.id, vec![monday.clone(), next_week])
        .server();

    let response = server
        .get(&format!("/api/schedules/{}/week", schedule.id))
        .add_query_param("week", "2024-01-10")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["week_start"], "2024-01-08");
    assert_eq!(body["slots"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["slots"][0]["className"], "Math");
}

#[test_log::test(tokio::test)]
async fn test_timetable_compacts_rows_and_spans_cells() {
    let schedule = schedule();
    let slots = vec![
        weekly("Math", Weekday::Mon, "08:00", "09:30", 100.0),
        weekly("Physics", Weekday::Tue, "09:00", "10:00", 80.0),
    ];

    let server = TestContext::new()
        .with_schedule(&schedule)
        .with_slots(schedule.id, slots)
        .server();

    let response = server
        .get(&format!("/api/schedules/{}/timetable", schedule.id))
        .add_query_param("week", "2024-01-08")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();

    let days = body["days"].as_array().expect("days");
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["label"], "Monday (08/01)");

    let labels: Vec<&str> = body["rows"]
        .as_array()
        .expect("rows")
        .iter()
        .filter_map(|row| row["label"].as_str())
        .collect();
    assert_eq!(labels, vec!["08:00 - 09:00", "09:00 - 09:30", "09:30 - 10:00"]);

    let math = &body["rows"][0]["cells"][0];
    assert_eq!(math["visible"], true);
    assert_eq!(math["row_span"], 2);
    assert_eq!(math["entries"][0]["class_name"], "Math");
    assert_eq!(body["rows"][1]["cells"][0]["visible"], false);

    let physics = &body["rows"][1]["cells"][1];
    assert_eq!(physics["row_span"], 2);
    assert_eq!(body["rows"][0]["cells"][1]["entries"].as_array().map(Vec::len), Some(0));
}

#[test_log::test(tokio::test)]
async fn test_timetable_for_empty_week_has_no_rows() {
    let schedule = schedule();
    let server = TestContext::new()
        .with_schedule(&schedule)
        .with_slots(schedule.id, Vec::new())
        .server();

    let response = server
        .get(&format!("/api/schedules/{}/timetable", schedule.id))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["rows"].as_array().map(Vec::len), Some(0));
}

#[test_log::test(tokio::test)]
async fn test_revenue_for_month_of_viewed_week() {
    let schedule = schedule();
    let slots = vec![
        weekly("Math", Weekday::Mon, "08:00", "09:30", 100.0),
        one_time("Exam prep", date(2024, 1, 20), "18:00", "20:00", 300.0),
        one_time("February", date(2024, 2, 5), "18:00", "20:00", 999.0),
    ];

    let server = TestContext::new()
        .with_schedule(&schedule)
        .with_slots(schedule.id, slots)
        .server();

    let response = server
        .get(&format!("/api/schedules/{}/revenue", schedule.id))
        .add_query_param("period", "month")
        .add_query_param("week", "2024-01-10")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let report: RevenueReport = response.json();
    assert_eq!(report.period, PeriodKind::Month);
    assert_eq!(report.label, "Month 01/2024");
    assert_eq!(report.start, date(2024, 1, 1));
    assert_eq!(report.end, date(2024, 1, 31));
    // Five Mondays in January 2024 plus the one-off class.
    assert_eq!(report.total, 800.0);
    let bucket_sum: f64 = report.buckets.iter().map(|bucket| bucket.amount).sum();
    assert_eq!(bucket_sum, report.total);
}

#[test_log::test(tokio::test)]
async fn test_revenue_rejects_unknown_period() {
    let schedule = schedule();
    let server = TestContext::new().with_schedule(&schedule).server();

    let response = server
        .get(&format!("/api/schedules/{}/revenue", schedule.id))
        .add_query_param("period", "decade")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_upcoming_within_lead_window() {
    let schedule = schedule();
    let slots = vec![
        weekly("Math", Weekday::Mon, "08:00", "09:30", 100.0),
        weekly("Late", Weekday::Mon, "09:00", "10:00", 100.0),
        weekly("Tuesday", Weekday::Tue, "08:00", "09:00", 100.0),
    ];

    let server = TestContext::new()
        .with_schedule(&schedule)
        .with_slots(schedule.id, slots)
        .server();

    let response = server
        .get(&format!("/api/schedules/{}/upcoming", schedule.id))
        .add_query_param("at", "2024-01-08T07:45:00")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["lead_minutes"], LEAD_MINUTES);
    let entries = body["entries"].as_array().expect("entries");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["class_name"], "Math");
    assert_eq!(entries[0]["message"], "Class Math starts at 08:00 at Room 101.");
}

#[test_log::test(tokio::test)]
async fn test_views_of_unknown_schedule_are_not_found() {
    let id = uuid::Uuid::new_v4();
    let server = TestContext::new().without_schedule(id).server();

    for view in ["week", "timetable", "revenue", "upcoming"] {
        let response = server.get(&format!("/api/schedules/{id}/{view}")).await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND, "{view}");
    }
}
