use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::test_utils::TestContext;

#[test_log::test(tokio::test)]
async fn test_health_and_version() {
    let server = TestContext::new().server();

    let health = server.get("/health").await;
    assert_eq!(health.status_code(), StatusCode::OK);
    assert_eq!(health.json::<Value>()["status"], "ok");

    let version = server.get("/version").await;
    let body: Value = version.json();
    assert_eq!(body["name"], "timetable-api");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
