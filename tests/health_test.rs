mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_liveness() {
    let app = common::test_app().await;

    let (status, body) = common::get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);

    let v = common::parse(&body);
    assert_eq!(v["status"], "ok");
    assert!(v.get("database").is_none());
}

#[tokio::test]
async fn test_readiness_pings_database() {
    let app = common::test_app().await;

    let (status, body) = common::get(&app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);

    let v = common::parse(&body);
    assert_eq!(v["status"], "ok");
    assert_eq!(v["database"], "connected");
    assert_eq!(v["version"], env!("CARGO_PKG_VERSION"));
}
