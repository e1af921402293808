//! User account models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Stored user account
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    /// bcrypt hash, never serialized
    pub password: String,
    pub receive_emails: bool,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a user; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub receive_emails: bool,
}

/// User response (sanitized for API)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub receive_emails: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            receive_emails: user.receive_emails,
            created_at: user.created_at,
        }
    }
}

// ============================================================================
// Request/Response DTOs
// ============================================================================

/// POST /signup body
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    pub full_name: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub email: String,
    #[validate(length(min = 1))]
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    #[serde(default)]
    pub receive_emails: bool,
}

/// POST /signin body
#[derive(Debug, Deserialize, Validate)]
pub struct SigninRequest {
    #[validate(length(min = 1))]
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /forgot-password body
#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(length(min = 1))]
    #[serde(default)]
    pub email: String,
}

/// Successful sign-in
#[derive(Debug, Serialize, Deserialize)]
pub struct SigninResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Plain `{ "message": ... }` body
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
