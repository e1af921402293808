//! Sign-up, sign-in and password-reset flows through the router

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{signup_body, RecordingMailer, TestApp, TEST_SECRET};
use propdesk_server::auth::{verify_token, TokenPurpose};

#[tokio::test]
async fn test_signup_created() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post_json("/signup", signup_body("a@x.com", "p", "p"))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "message": "User created successfully" }));
    assert_eq!(app.store.user_count().await, 1);
}

#[tokio::test]
async fn test_signup_twice_conflicts_and_keeps_one_user() {
    let app = TestApp::new().await;

    let (first, _) = app
        .post_json("/signup", signup_body("a@x.com", "p", "p"))
        .await;
    let (second, body) = app
        .post_json("/signup", signup_body("a@x.com", "p", "p"))
        .await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(body, json!({ "error": "User Already Exists, go Signin Chief!" }));
    assert_eq!(app.store.user_count().await, 1);
}

#[tokio::test]
async fn test_signup_password_mismatch() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post_json("/signup", signup_body("a@x.com", "p", "q"))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Passwords do not match" }));
    assert_eq!(app.store.user_count().await, 0);
}

#[tokio::test]
async fn test_signup_missing_email_is_bad_request() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post_json("/signup", json!({ "password": "p", "confirmPassword": "p" }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("email"));
    assert_eq!(app.store.user_count().await, 0);
}

#[tokio::test]
async fn test_signup_existing_email_conflicts_even_with_empty_password() {
    let app = TestApp::new().await;
    app.post_json("/signup", signup_body("a@x.com", "p", "p")).await;

    let (status, body) = app
        .post_json("/signup", signup_body("a@x.com", "", ""))
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({ "error": "User Already Exists, go Signin Chief!" }));
    assert_eq!(app.store.user_count().await, 1);
}

#[tokio::test]
async fn test_signup_malformed_json_is_bad_request() {
    let app = TestApp::new().await;

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/signup")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_signin_returns_token_for_user() {
    let app = TestApp::new().await;
    app.post_json("/signup", signup_body("a@x.com", "p", "p"))
        .await;

    let (status, body) = app
        .post_json("/signin", json!({ "email": "a@x.com", "password": "p" }))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["email"], "a@x.com");
    assert_eq!(body["user"]["fullName"], "A");
    assert!(body["user"].get("password").is_none());

    let token = body["token"].as_str().unwrap();
    let claims = verify_token(token, TEST_SECRET, TokenPurpose::Access).unwrap();
    assert_eq!(claims.user_id, body["user"]["id"].as_str().unwrap());
}

#[tokio::test]
async fn test_signin_wrong_password() {
    let app = TestApp::new().await;
    app.post_json("/signup", signup_body("a@x.com", "p", "p"))
        .await;

    let (status, body) = app
        .post_json("/signin", json!({ "email": "a@x.com", "password": "nope" }))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Invalid email or password" }));
}

#[tokio::test]
async fn test_signin_unknown_user() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post_json("/signin", json!({ "email": "ghost@x.com", "password": "p" }))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Invalid email or password" }));
}

#[tokio::test]
async fn test_forgot_password_unknown_email_sends_nothing() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post_json("/forgot-password", json!({ "email": "ghost@x.com" }))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "User not found" }));
    assert!(app.mailer.sent.lock().await.is_empty());
}

#[tokio::test]
async fn test_forgot_password_sends_reset_link() {
    let app = TestApp::new().await;
    app.post_json("/signup", signup_body("a@x.com", "p", "p"))
        .await;
    let user_id = app
        .post_json("/signin", json!({ "email": "a@x.com", "password": "p" }))
        .await
        .1["user"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let (status, body) = app
        .post_json("/forgot-password", json!({ "email": "a@x.com" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "message": "Password reset link sent to your email" })
    );

    let sent = app.mailer.sent.lock().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "a@x.com");
    assert_eq!(sent[0].subject, "Password Reset");

    let link = sent[0]
        .text
        .strip_prefix("Click the following link to reset your password: ")
        .unwrap();
    let token = link
        .strip_prefix("http://frontend.test/reset-password?token=")
        .unwrap();
    let claims = verify_token(token, TEST_SECRET, TokenPurpose::PasswordReset).unwrap();
    assert_eq!(claims.user_id, user_id);
}

#[tokio::test]
async fn test_forgot_password_mail_failure_is_internal_error() {
    let app = TestApp::with_mailer(RecordingMailer {
        fail: true,
        ..Default::default()
    })
    .await;
    app.post_json("/signup", signup_body("a@x.com", "p", "p"))
        .await;

    let (status, body) = app
        .post_json("/forgot-password", json!({ "email": "a@x.com" }))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Internal server error" }));
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let request = axum::http::Request::builder()
        .uri("/health")
        .body(axum::body::Body::empty())
        .unwrap();
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
}
