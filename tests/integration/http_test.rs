//! Integration tests for health, static client and middleware behaviour.

mod helpers;

use http::StatusCode;

#[tokio::test]
async fn test_health() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_static_asset_is_served() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/app.js", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text.contains("mensuret"));
}

#[tokio::test]
async fn test_root_serves_index() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text.contains("<title>Mensuret</title>"));
}

#[tokio::test]
async fn test_login_link_target_falls_back_to_index() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/?t=abc123", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text.contains("<title>Mensuret</title>"));

    let deep = app.request("GET", "/some/client/route", None).await;
    assert_eq!(deep.status, StatusCode::OK);
    assert!(deep.text.contains("<title>Mensuret</title>"));
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let app = helpers::TestApp::new().await;

    let huge = "a".repeat(128 * 1024);
    let response = app
        .post("/login/", serde_json::json!({ "mail": huge }))
        .await;
    assert!(response.status.is_client_error());
    assert!(app.mailer.sent().is_empty());
}
