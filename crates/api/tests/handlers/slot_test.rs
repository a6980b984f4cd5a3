use axum::http::StatusCode;
use chrono::Weekday;
use pretty_assertions::assert_eq;
use serde_json::json;
use timetable_core::models::slot::{Recurrence, RemoveSlotResponse, Slot};
use uuid::Uuid;

use crate::test_utils::{TestContext, date, one_time, schedule, weekly};

fn assign_id(mut slot: Slot) -> Slot {
    slot.id = Some(Uuid::new_v4());
    slot
}

#[test_log::test(tokio::test)]
async fn test_create_slot_current_week_starts_on_viewed_monday() {
    let schedule = schedule();
    let mut ctx = TestContext::new().with_schedule(&schedule);
    ctx.slot_repo
        .expect_create_slot()
        .withf(|_, slot| {
            slot.recurrence
                == Recurrence::Weekly {
                    day_of_week: Weekday::Wed,
                    effective_start_date: Some(date(2024, 1, 8)),
                    effective_end_date: None,
                }
                && slot.color.is_some()
                && slot.excluded_dates.is_empty()
        })
        .times(1)
        .returning(|_, slot| Ok(assign_id(slot)));

    let response = ctx
        .server()
        .post(&format!("/api/schedules/{}/slots", schedule.id))
        .add_query_param("week", "2024-01-10")
        .json(&json!({
            "class_name": "Math",
            "start_time": "08:00",
            "end_time": "09:30",
            "location": "Room 101",
            "salary": 150.0,
            "apply_mode": { "kind": "current_week", "day_of_week": 3 }
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let slot: Slot = response.json();
    assert!(slot.id.is_some());
    assert_eq!(slot.class_name, "Math");
}

#[test_log::test(tokio::test)]
async fn test_create_slot_rejects_inverted_times() {
    let schedule = schedule();
    let mut ctx = TestContext::new().with_schedule(&schedule);
    ctx.slot_repo.expect_create_slot().never();

    let response = ctx
        .server()
        .post(&format!("/api/schedules/{}/slots", schedule.id))
        .json(&json!({
            "class_name": "Math",
            "start_time": "10:00",
            "end_time": "09:00",
            "apply_mode": { "kind": "all_weeks", "day_of_week": 1 }
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_update_slot_keeps_recurrence() {
    let schedule = schedule();
    let existing = weekly("Math", Weekday::Mon, "08:00", "09:30", 100.0);
    let slot_id = existing.id.unwrap();
    let recurrence = existing.recurrence.clone();

    let mut ctx = TestContext::new().with_schedule(&schedule);
    let found = existing.clone();
    ctx.slot_repo
        .expect_get_slot_by_id()
        .returning(move |_, _| Ok(Some(found.clone())));
    ctx.slot_repo
        .expect_update_slot()
        .withf(move |_, slot| slot.class_name == "Chemistry" && slot.recurrence == recurrence)
        .times(1)
        .returning(|_, slot| Ok(slot));

    let response = ctx
        .server()
        .put(&format!("/api/schedules/{}/slots/{}", schedule.id, slot_id))
        .json(&json!({
            "class_name": "Chemistry",
            "start_time": "08:00",
            "end_time": "10:00",
            "salary": 120.0
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let slot: Slot = response.json();
    assert_eq!(slot.id, Some(slot_id));
    assert_eq!(slot.end_time, "10:00");
}

#[test_log::test(tokio::test)]
async fn test_update_missing_slot_is_not_found() {
    let schedule = schedule();
    let mut ctx = TestContext::new().with_schedule(&schedule);
    ctx.slot_repo
        .expect_get_slot_by_id()
        .returning(|_, _| Ok(None));
    ctx.slot_repo.expect_update_slot().never();

    let response = ctx
        .server()
        .put(&format!("/api/schedules/{}/slots/{}", schedule.id, Uuid::new_v4()))
        .json(&json!({
            "class_name": "Chemistry",
            "start_time": "08:00",
            "end_time": "10:00"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn test_remove_current_instance_excludes_viewed_date() {
    let schedule = schedule();
    let existing = weekly("Math", Weekday::Wed, "08:00", "09:30", 100.0);
    let slot_id = existing.id.unwrap();

    let mut ctx = TestContext::new().with_schedule(&schedule);
    let found = existing.clone();
    ctx.slot_repo
        .expect_get_slot_by_id()
        .returning(move |_, _| Ok(Some(found.clone())));
    ctx.slot_repo
        .expect_update_slot()
        .withf(|_, slot| slot.excluded_dates.contains(&date(2024, 1, 10)))
        .times(1)
        .returning(|_, slot| Ok(slot));
    ctx.slot_repo.expect_delete_slot().never();

    let response = ctx
        .server()
        .delete(&format!("/api/schedules/{}/slots/{}", schedule.id, slot_id))
        .add_query_param("mode", "current_instance")
        .add_query_param("week", "2024-01-08")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: RemoveSlotResponse = response.json();
    assert_eq!(body.outcome, "updated");
    assert_eq!(
        body.slot.map(|slot| slot.excluded_dates.into_iter().collect::<Vec<_>>()),
        Some(vec![date(2024, 1, 10)])
    );
}

#[test_log::test(tokio::test)]
async fn test_remove_one_time_slot_always_deletes() {
    let schedule = schedule();
    let existing = one_time("Exam prep", date(2024, 1, 12), "18:00", "20:00", 300.0);
    let slot_id = existing.id.unwrap();

    let mut ctx = TestContext::new().with_schedule(&schedule);
    let found = existing.clone();
    ctx.slot_repo
        .expect_get_slot_by_id()
        .returning(move |_, _| Ok(Some(found.clone())));
    ctx.slot_repo
        .expect_delete_slot()
        .withf(move |_, id| *id == slot_id)
        .times(1)
        .returning(|_, _| Ok(true));
    ctx.slot_repo.expect_update_slot().never();

    let response = ctx
        .server()
        .delete(&format!("/api/schedules/{}/slots/{}", schedule.id, slot_id))
        .add_query_param("mode", "from_now_on")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: RemoveSlotResponse = response.json();
    assert_eq!(body.outcome, "deleted");
    assert!(body.slot.is_none());
}

#[test_log::test(tokio::test)]
async fn test_remove_date_range_without_matching_weekday_is_unchanged() {
    let schedule = schedule();
    let existing = weekly("Math", Weekday::Sat, "08:00", "09:30", 100.0);
    let slot_id = existing.id.unwrap();

    let mut ctx = TestContext::new().with_schedule(&schedule);
    let found = existing.clone();
    ctx.slot_repo
        .expect_get_slot_by_id()
        .returning(move |_, _| Ok(Some(found.clone())));
    ctx.slot_repo.expect_update_slot().never();
    ctx.slot_repo.expect_delete_slot().never();

    let response = ctx
        .server()
        .delete(&format!("/api/schedules/{}/slots/{}", schedule.id, slot_id))
        .add_query_param("mode", "date_range")
        .add_query_param("from", "2024-01-08")
        .add_query_param("to", "2024-01-12")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: RemoveSlotResponse = response.json();
    assert_eq!(body.outcome, "unchanged");
    assert_eq!(body.slot, Some(existing));
}

#[test_log::test(tokio::test)]
async fn test_remove_date_range_requires_both_bounds() {
    let schedule = schedule();
    let server = TestContext::new().with_schedule(&schedule).server();

    let response = server
        .delete(&format!("/api/schedules/{}/slots/{}", schedule.id, Uuid::new_v4()))
        .add_query_param("mode", "date_range")
        .add_query_param("from", "2024-01-08")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_remove_with_unknown_mode_is_rejected() {
    let schedule = schedule();
    let server = TestContext::new().with_schedule(&schedule).server();

    let response = server
        .delete(&format!("/api/schedules/{}/slots/{}", schedule.id, Uuid::new_v4()))
        .add_query_param("mode", "everything")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}
