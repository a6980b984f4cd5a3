use axum::http::StatusCode;
use rstest::rstest;
use timetable_api::middleware::error_handling::{AppError, map_error};
use timetable_core::errors::TimetableError;

#[rstest]
#[case(TimetableError::NotFound("Resource not found".to_string()), StatusCode::NOT_FOUND)]
#[case(TimetableError::Validation("Invalid input".to_string()), StatusCode::BAD_REQUEST)]
#[case(TimetableError::Database(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(
    TimetableError::Internal("boom".into()),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status_mapping(#[case] error: TimetableError, #[case] expected: StatusCode) {
    let response = map_error(error);
    assert_eq!(response.status(), expected);
}

#[test]
fn test_eyre_report_maps_to_database_error() {
    let error = AppError::from(eyre::eyre!("connection refused"));
    assert!(matches!(error.0, TimetableError::Database(_)));
}
