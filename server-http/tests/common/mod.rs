#![allow(dead_code)]

use async_trait::async_trait;
use atrium::mail::{EmailMessage, Mailer};
use atrium::persistence::create_pool;
use atrium::uploads::LocalUploadStore;
use axum::{
    Router,
    body::{Body, Bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use cache_engine::ResponseCache;
use http_body_util::BodyExt;
use serde_json::Value;
use server_http::{AppState, build_router};
use shared::config::Config;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tower::ServiceExt;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin1234";

/// Captures outgoing mail instead of delivering it.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<EmailMessage>>,
    pub fail: bool,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: EmailMessage) -> shared::Result<()> {
        if self.fail {
            return Err(shared::Error::Mail("relay unavailable".into()));
        }
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub mailer: Arc<RecordingMailer>,
    _upload_dir: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn cache_state(&self) -> &str {
        self.headers
            .get("x-cache")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }
}

pub async fn create_test_app() -> TestApp {
    create_test_app_with_mailer(RecordingMailer::default()).await
}

pub async fn create_test_app_with_mailer(mailer: RecordingMailer) -> TestApp {
    let upload_dir = tempfile::tempdir().unwrap();
    let upload_path = upload_dir.path().to_string_lossy().to_string();

    let vars: HashMap<&str, String> = HashMap::from([
        ("ATRIUM_JWT_SECRET", "integration-secret".to_string()),
        ("ATRIUM_ADMIN_USERNAME", ADMIN_USERNAME.to_string()),
        ("ATRIUM_ADMIN_PASSWORD", ADMIN_PASSWORD.to_string()),
        ("ATRIUM_UPLOAD_DIR", upload_path.clone()),
        ("ATRIUM_PUBLIC_BASE_URL", "http://atrium.test".to_string()),
        ("ATRIUM_MAX_UPLOAD_BYTES", "1024".to_string()),
        ("ATRIUM_CONTACT_RECIPIENT", "office@atrium.test".to_string()),
    ]);
    let config = Arc::new(Config::from_lookup(|key| vars.get(key).cloned()));

    let pool = create_pool("sqlite::memory:").await.unwrap();
    let uploads = LocalUploadStore::open(&upload_path, &config.public_base_url, config.max_upload_bytes)
        .await
        .unwrap();
    let mailer = Arc::new(mailer);

    let state = AppState::new(
        pool,
        config.clone(),
        Arc::new(ResponseCache::new()),
        mailer.clone(),
        Arc::new(uploads),
    );
    state
        .auth
        .ensure_admin(&config.admin_username, &config.admin_password)
        .await
        .unwrap();

    TestApp {
        router: build_router(state.clone()),
        state,
        mailer,
        _upload_dir: upload_dir,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    pub async fn login(&self) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({
                    "username": ADMIN_USERNAME,
                    "password": ADMIN_PASSWORD,
                })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        response.json()["token"].as_str().unwrap().to_string()
    }
}
