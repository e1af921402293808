//! Shared helpers for router tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceExt;
use uuid::Uuid;

use propdesk_server::auth::{AccountService, TokenSettings};
use propdesk_server::mail::{Email, MailError, Mailer};
use propdesk_server::routes;
use propdesk_server::state::AppState;
use propdesk_server::store::MemoryStore;
use propdesk_server::upload::UploadDir;

pub const TEST_SECRET: &str = "router-test-secret";
pub const MULTIPART_BOUNDARY: &str = "propdesk-test-boundary";

/// Mailer that keeps every message instead of sending it
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<Email>>,
    pub fail: bool,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: Email) -> Result<(), MailError> {
        if self.fail {
            return Err(MailError::Rejected {
                status: 502,
                body: "bad gateway".to_string(),
            });
        }
        self.sent.lock().await.push(email);
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
    pub mailer: Arc<RecordingMailer>,
    pub upload_root: PathBuf,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_mailer(RecordingMailer::default()).await
    }

    pub async fn with_mailer(mailer: RecordingMailer) -> Self {
        let store = MemoryStore::new();
        let mailer = Arc::new(mailer);
        let upload_root = std::env::temp_dir().join(format!("propdesk-test-{}", Uuid::new_v4()));
        let uploads = UploadDir::create(&upload_root).await.unwrap();

        let accounts = Arc::new(AccountService::new(
            Arc::new(store.clone()),
            mailer.clone(),
            TokenSettings {
                secret: TEST_SECRET.to_string(),
                access_ttl_seconds: 600,
                reset_ttl_seconds: 3600,
            },
            "http://frontend.test/reset-password".to_string(),
        ));

        let state = AppState::new(
            accounts,
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            uploads,
        );

        Self {
            router: routes::app(state, 1024 * 1024),
            store,
            mailer,
            upload_root,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Sign up and sign in, returning the access token
    pub async fn signed_in(&self, email: &str) -> String {
        let (status, _) = self.post_json("/signup", signup_body(email, "pw", "pw")).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = self
            .post_json("/signin", serde_json::json!({ "email": email, "password": "pw" }))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["token"].as_str().unwrap().to_string()
    }

    pub async fn uploaded_files(&self) -> Vec<String> {
        let mut names = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.upload_root).await.unwrap();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.upload_root);
    }
}

pub fn signup_body(email: &str, password: &str, confirm: &str) -> serde_json::Value {
    serde_json::json!({
        "fullName": "A",
        "email": email,
        "password": password,
        "confirmPassword": confirm,
        "receiveEmails": true
    })
}

/// One part of a multipart body
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, filename, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: image/png\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn property_request(token: Option<&str>, parts: &[Part<'_>]) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/property-setup")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        );
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(multipart_body(parts))).unwrap()
}
