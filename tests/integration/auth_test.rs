//! Integration tests for the passwordless login flow.

mod helpers;

use chrono::Duration;
use http::StatusCode;
use serde_json::json;

use mensuret_core::config::AppConfig;

#[tokio::test]
async fn test_request_login_mails_link() {
    let app = helpers::TestApp::new().await;

    let response = app.post("/login/", json!({ "mail": "a@example.com" })).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({}));

    let sent = app.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "a@example.com");
    assert!(sent[0].link.starts_with("http://localhost:8080?t="));
    assert_eq!(sent[0].expires_in_minutes, 30);
}

#[tokio::test]
async fn test_public_url_overrides_host() {
    let mut config = AppConfig::default();
    config.server.public_url = Some("https://mensuret.example/".to_string());
    let app = helpers::TestApp::with_config(config).await;

    app.request_login_token("a@example.com").await;

    let sent = app.mailer.sent();
    assert!(sent[0].link.starts_with("https://mensuret.example?t="));
}

#[tokio::test]
async fn test_full_login_scenario() {
    let app = helpers::TestApp::new().await;

    let l1 = app.request_login_token("a@example.com").await;
    assert_eq!(l1.len(), 72);

    let redeemed = app.post("/login/", json!({ "token": l1 })).await;
    assert_eq!(redeemed.status, StatusCode::OK);
    let s1 = redeemed.body["token"].as_str().unwrap().to_string();

    let resolved = app.post("/login/", json!({ "session": s1 })).await;
    assert_eq!(resolved.status, StatusCode::OK);
    assert_eq!(resolved.body, json!({ "user": "a@example.com" }));

    let again = app.post("/login/", json!({ "token": l1 })).await;
    assert_eq!(again.status, StatusCode::UNAUTHORIZED);
    assert_eq!(again.body["error"], "UNAUTHORIZED");

    app.clock.advance(Duration::days(7) - Duration::seconds(1));
    let still_valid = app.post("/login/", json!({ "session": s1 })).await;
    assert_eq!(still_valid.body, json!({ "user": "a@example.com" }));

    app.clock.advance(Duration::seconds(1));
    let expired = app.post("/login/", json!({ "session": s1 })).await;
    assert_eq!(expired.status, StatusCode::UNAUTHORIZED);
    assert!(!app.sessions.session_tokens().contains(&s1).await);
}

#[tokio::test]
async fn test_repeated_request_yields_same_login_token() {
    let app = helpers::TestApp::new().await;

    let first = app.request_login_token("a@example.com").await;
    app.clock.advance(Duration::minutes(10));
    let second = app.request_login_token("a@example.com").await;

    assert_eq!(first, second);
    assert_eq!(app.mailer.sent().len(), 2);
}

#[tokio::test]
async fn test_login_token_expires_after_window() {
    let app = helpers::TestApp::new().await;

    let token = app.request_login_token("a@example.com").await;
    app.clock.advance(Duration::minutes(30));

    let response = app.post("/login/", json!({ "token": token })).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delivery_failure_returns_bad_gateway_and_keeps_token() {
    let app = helpers::TestApp::new().await;
    app.mailer.set_failing(true);

    let response = app.post("/login/", json!({ "mail": "a@example.com" })).await;
    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.body["error"], "DELIVERY_FAILED");

    let undelivered = app.mailer.last_token();
    app.mailer.set_failing(false);
    let retried = app.request_login_token("a@example.com").await;
    assert_eq!(retried, undelivered);

    let redeemed = app.post("/login/", json!({ "token": retried })).await;
    assert_eq!(redeemed.status, StatusCode::OK);
}

#[tokio::test]
async fn test_distinct_owners_get_distinct_sessions() {
    let app = helpers::TestApp::new().await;

    let a = app.login("a@example.com").await;
    let b = app.login("b@example.com").await;
    assert_ne!(a, b);

    let who = app.post("/login/", json!({ "session": b })).await;
    assert_eq!(who.body["user"], "b@example.com");
}

#[tokio::test]
async fn test_mail_takes_precedence_over_token() {
    let app = helpers::TestApp::new().await;

    let response = app
        .post(
            "/login/",
            json!({ "mail": "a@example.com", "token": "ignored" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({}));
    assert_eq!(app.mailer.sent().len(), 1);
}

#[tokio::test]
async fn test_login_without_fields_is_bad_request() {
    let app = helpers::TestApp::new().await;

    let response = app.post("/login/", json!({})).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_empty_or_oversized_address_is_bad_request() {
    let app = helpers::TestApp::new().await;

    let empty = app.post("/login/", json!({ "mail": "" })).await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);

    let blank = app.post("/login/", json!({ "mail": "   " })).await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);

    let oversized = app
        .post("/login/", json!({ "mail": "a".repeat(400) }))
        .await;
    assert_eq!(oversized.status, StatusCode::BAD_REQUEST);

    assert!(app.mailer.sent().is_empty());
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = helpers::TestApp::new().await;

    let req = http::Request::builder()
        .method("POST")
        .uri("/login/")
        .header("Host", helpers::TEST_HOST)
        .header("Content-Type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let response = app.send(req).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unknown_session_is_unauthorized() {
    let app = helpers::TestApp::new().await;

    let response = app.post("/login/", json!({ "session": "deadbeef" })).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_route_without_trailing_slash() {
    let app = helpers::TestApp::new().await;

    let response = app.post("/login", json!({ "mail": "a@example.com" })).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_logout_invalidates_session() {
    let app = helpers::TestApp::new().await;
    let session = app.login("a@example.com").await;

    let response = app.post("/logout/", json!({ "session": session })).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({}));

    let resolved = app.post("/login/", json!({ "session": session })).await;
    assert_eq!(resolved.status, StatusCode::UNAUTHORIZED);

    // Logging out twice is harmless.
    let again = app.post("/logout", json!({ "session": session })).await;
    assert_eq!(again.status, StatusCode::OK);
}

#[tokio::test]
async fn test_logout_requires_session_field() {
    let app = helpers::TestApp::new().await;

    let response = app.post("/logout/", json!({})).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_concurrent_logins_issue_unique_sessions() {
    let app = std::sync::Arc::new(helpers::TestApp::new().await);

    let mut tokens = Vec::new();
    for i in 0..8 {
        let address = format!("user{i}@example.com");
        let login = app.request_login_token(&address).await;
        tokens.push((address, login));
    }

    let mut handles = Vec::new();
    for (address, login) in tokens {
        let app = std::sync::Arc::clone(&app);
        handles.push(tokio::spawn(async move {
            let response = app.post("/login/", json!({ "token": login })).await;
            assert_eq!(response.status, StatusCode::OK);
            (address, response.body["token"].as_str().unwrap().to_string())
        }));
    }

    let mut seen = std::collections::HashSet::new();
    for handle in handles {
        let (address, session) = handle.await.unwrap();
        assert!(seen.insert(session.clone()));
        let who = app.post("/login/", json!({ "session": session })).await;
        assert_eq!(who.body["user"], address);
    }
}
