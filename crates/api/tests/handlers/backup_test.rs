use axum::http::StatusCode;
use chrono::Weekday;
use pretty_assertions::assert_eq;
use serde_json::json;
use timetable_core::models::schedule::{ExportResponse, ImportResponse};
use timetable_core::models::slot::Recurrence;

use crate::test_utils::{TestContext, date, one_time, schedule, weekly};

#[test_log::test(tokio::test)]
async fn test_export_strips_identity_and_fills_defaults() {
    let schedule = schedule();
    let slots = vec![
        weekly("Math", Weekday::Mon, "08:00", "09:30", 100.0),
        one_time("Exam prep", date(2024, 1, 12), "18:00", "20:00", 300.0),
    ];

    let server = TestContext::new()
        .with_schedule(&schedule)
        .with_slots(schedule.id, slots)
        .server();

    let response = server
        .get(&format!("/api/schedules/{}/export", schedule.id))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: ExportResponse = response.json();
    assert!(body.file_name.starts_with("Backup_Config_"));
    assert!(body.file_name.ends_with(".json"));
    assert_eq!(body.records.len(), 2);
    for record in &body.records {
        assert!(record.id.is_none());
        assert!(record.created_at.is_none());
        assert!(record.color.is_some());
        assert_eq!(record.note.as_deref(), Some(""));
    }
    assert!(body.records[0].is_recurring_nature);
    assert_eq!(body.records[1].specific_date, Some(date(2024, 1, 12)));
}

#[test_log::test(tokio::test)]
async fn test_import_replaces_collection() {
    let schedule = schedule();
    let mut ctx = TestContext::new().with_schedule(&schedule);
    ctx.slot_repo
        .expect_replace_all_slots()
        .withf(|_, slots| {
            slots.len() == 2
                && slots[0].recurrence
                    == Recurrence::Weekly {
                        day_of_week: Weekday::Tue,
                        effective_start_date: None,
                        effective_end_date: None,
                    }
                && slots[1].excluded_dates.is_empty()
        })
        .times(1)
        .returning(|_, slots| Ok(slots));

    let records = json!([
        {
            "className": "Math",
            "startTime": "08:00",
            "endTime": "09:30",
            "salary": 100.0,
            "isRecurringNature": true,
            "dayOfWeek": 2
        },
        {
            "className": "Exam prep",
            "startTime": "18:00",
            "endTime": "20:00",
            "isRecurringNature": false,
            "specificDate": "2024-01-12"
        }
    ]);

    let response = ctx
        .server()
        .post(&format!("/api/schedules/{}/import", schedule.id))
        .text(records.to_string())
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: ImportResponse = response.json();
    assert_eq!(body.schedule_id, schedule.id);
    assert_eq!(body.imported, 2);
}

#[test_log::test(tokio::test)]
async fn test_import_rejects_non_array_document() {
    let schedule = schedule();
    let mut ctx = TestContext::new().with_schedule(&schedule);
    ctx.slot_repo.expect_replace_all_slots().never();

    let response = ctx
        .server()
        .post(&format!("/api/schedules/{}/import", schedule.id))
        .text(json!({ "className": "Math" }).to_string())
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_import_rejects_invalid_record() {
    let schedule = schedule();
    let mut ctx = TestContext::new().with_schedule(&schedule);
    ctx.slot_repo.expect_replace_all_slots().never();

    let response = ctx
        .server()
        .post(&format!("/api/schedules/{}/import", schedule.id))
        .text(
            json!([{
                "className": "Math",
                "startTime": "10:00",
                "endTime": "09:00",
                "isRecurringNature": true,
                "dayOfWeek": 1
            }])
            .to_string(),
        )
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}
