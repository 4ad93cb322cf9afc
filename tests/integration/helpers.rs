//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use mensuret_auth::{ManualClock, SessionManager};
use mensuret_core::config::AppConfig;
use mensuret_core::error::AppError;
use mensuret_core::result::AppResult;
use mensuret_core::traits::mailer::{LoginMailer, LoginMessage};
use mensuret_database::connection::DatabasePool;
use mensuret_database::migration::run_migrations;
use mensuret_database::RecordRepository;

/// Host header sent with every test request.
pub const TEST_HOST: &str = "localhost:8080";

static STATIC_DIR_SEQ: AtomicUsize = AtomicUsize::new(0);

/// Mailer that records every message instead of sending it.
#[derive(Debug, Default)]
pub struct CapturingMailer {
    sent: Mutex<Vec<LoginMessage>>,
    fail: AtomicBool,
}

impl CapturingMailer {
    /// Make subsequent deliveries fail (or succeed again).
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// All messages handed to the mailer, delivered or not.
    pub fn sent(&self) -> Vec<LoginMessage> {
        self.sent.lock().unwrap().clone()
    }

    /// Login token carried by the most recent link.
    pub fn last_token(&self) -> String {
        let sent = self.sent.lock().unwrap();
        let link = &sent.last().expect("No login mail captured").link;
        link.split("?t=")
            .nth(1)
            .expect("Link has no token")
            .to_string()
    }
}

#[async_trait]
impl LoginMailer for CapturingMailer {
    fn provider_name(&self) -> &str {
        "capturing"
    }

    async fn send_login_link(&self, message: &LoginMessage) -> AppResult<()> {
        self.sent.lock().unwrap().push(message.clone());
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::external_service("Relay unavailable"));
        }
        Ok(())
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Clock shared by both token tiers
    pub clock: Arc<ManualClock>,
    /// Captured login mails
    pub mailer: Arc<CapturingMailer>,
    /// Session manager behind the router
    pub sessions: Arc<SessionManager>,
    /// Directory served as the static client
    pub static_dir: PathBuf,
}

impl TestApp {
    /// Create a new test application with default configuration
    pub async fn new() -> Self {
        Self::with_config(AppConfig::default()).await
    }

    /// Create a new test application on top of `config`.
    ///
    /// The database is always in-memory and the static client is a fresh
    /// temporary directory holding an `index.html`.
    pub async fn with_config(mut config: AppConfig) -> Self {
        let static_dir = std::env::temp_dir().join(format!(
            "mensuret-static-{}-{}",
            std::process::id(),
            STATIC_DIR_SEQ.fetch_add(1, Ordering::SeqCst)
        ));
        std::fs::create_dir_all(&static_dir).expect("Failed to create static dir");
        std::fs::write(static_dir.join("index.html"), "<!doctype html><title>Mensuret</title>")
            .expect("Failed to write index.html");
        std::fs::write(static_dir.join("app.js"), "console.log('mensuret');")
            .expect("Failed to write app.js");

        config.server.static_dir = static_dir.to_string_lossy().into_owned();
        config.database.url = "sqlite::memory:".to_string();

        let db = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");
        let records = Arc::new(RecordRepository::new(db.into_pool()));

        let clock = Arc::new(ManualClock::default());
        let mailer = Arc::new(CapturingMailer::default());
        let sessions = Arc::new(SessionManager::from_config(
            &config.auth,
            clock.clone(),
            mailer.clone(),
        ));

        let state = mensuret_api::AppState::new(config, Arc::clone(&sessions), records);
        let router = mensuret_api::build_app(state);

        Self {
            router,
            clock,
            mailer,
            sessions,
            static_dir,
        }
    }

    /// Request a login link for `address` and return the mailed token.
    pub async fn request_login_token(&self, address: &str) -> String {
        let response = self
            .post("/login/", serde_json::json!({ "mail": address }))
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login request failed: {:?}",
            response.body
        );
        self.mailer.last_token()
    }

    /// Run the whole login flow and return a session token.
    pub async fn login(&self, address: &str) -> String {
        let login_token = self.request_login_token(address).await;

        let response = self
            .post("/login/", serde_json::json!({ "token": login_token }))
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Redeem failed: {:?}",
            response.body
        );

        response
            .body
            .get("token")
            .and_then(|v| v.as_str())
            .expect("No token in redeem response")
            .to_string()
    }

    /// POST a JSON body
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Host", TEST_HOST)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a prepared request
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let text = String::from_utf8_lossy(&body_bytes).into_owned();
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body, text }
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.static_dir);
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body (`Null` when not JSON)
    pub body: Value,
    /// Raw body text
    pub text: String,
}
