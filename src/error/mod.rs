//! Centralized API error handling for PropDesk
//!
//! Every handler returns [`ApiResult`]. Client errors carry the one-line
//! message shown to the caller; server errors are logged with their cause
//! and rendered with a generic message.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::auth::AccountError;
use crate::store::StoreError;
use crate::upload::UploadError;

/// Message rendered for every 5xx response
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// API error type with HTTP status code mapping
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),
}

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    /// Get the error code string (used in logs)
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::ValidationError(_) => "VALIDATION_ERROR",
            ApiError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
            ApiError::DatabaseError(_) => "DATABASE_ERROR",
            ApiError::ExternalServiceError(_) => "EXTERNAL_SERVICE_ERROR",
        }
    }

    /// Get the HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) | ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::InternalError(_)
            | ApiError::DatabaseError(_)
            | ApiError::ExternalServiceError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the caller
    pub fn public_message(&self) -> String {
        if self.status_code().is_server_error() {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        if status.is_server_error() {
            tracing::error!(error = %self, code = %error_code, "Server error occurred");
        } else {
            tracing::debug!(error = %self, code = %error_code, "Client error occurred");
        }

        let body = ErrorResponse {
            error: self.public_message(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::UserExists => ApiError::Conflict(err.to_string()),
            AccountError::PasswordMismatch => ApiError::BadRequest(err.to_string()),
            AccountError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            AccountError::UserNotFound => ApiError::NotFound(err.to_string()),
            AccountError::Invalid(e) => e.into(),
            AccountError::Store(e) => ApiError::DatabaseError(e.to_string()),
            AccountError::Password(e) => ApiError::InternalError(e.to_string()),
            AccountError::Token(e) => ApiError::InternalError(e.to_string()),
            AccountError::Mail(e) => ApiError::ExternalServiceError(e.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => ApiError::Conflict(err.to_string()),
            StoreError::Database(e) => ApiError::DatabaseError(e),
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Multipart(e) => e.into(),
            UploadError::Io(e) => ApiError::InternalError(format!("upload write failed: {e}")),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        let fields: Vec<&str> = err.field_errors().keys().copied().collect();
        ApiError::ValidationError(format!("Missing or empty fields: {}", fields.join(", ")))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::BadRequest(format!("Invalid form data: {}", rejection.body_text()))
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::PayloadTooLarge("Upload exceeds the maximum allowed size".to_string());
        }
        ApiError::BadRequest(format!("Invalid form data: {}", err.body_text()))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::BadRequest(format!("Invalid JSON: {}", err))
    }
}

/// Result type alias using ApiError
pub type ApiResult<T> = Result<T, ApiError>;
