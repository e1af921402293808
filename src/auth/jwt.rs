//! JWT token generation and validation
//!
//! Handles creation and verification of access and password-reset tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// JWT-related errors
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Token decoding failed: {0}")]
    DecodingFailed(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

/// What a token may be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    Access,
    PasswordReset,
}

impl TokenPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenPurpose::Access => "access",
            TokenPurpose::PasswordReset => "password_reset",
        }
    }
}

/// Signed token payload
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Id of the user the token was issued to
    #[serde(rename = "userId")]
    pub user_id: String,
    pub purpose: TokenPurpose,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    pub fn user_uuid(&self) -> Result<Uuid, JwtError> {
        Uuid::parse_str(&self.user_id).map_err(|e| JwtError::InvalidToken(e.to_string()))
    }
}

/// Sign a token for `user_id`
///
/// # Arguments
/// * `user_id` - The user the token is issued to
/// * `purpose` - Where the token is accepted
/// * `secret` - JWT signing secret
/// * `ttl_seconds` - Token time-to-live in seconds
pub fn issue_token(
    user_id: Uuid,
    purpose: TokenPurpose,
    secret: &str,
    ttl_seconds: i64,
) -> Result<String, JwtError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(ttl_seconds);

    let claims = Claims {
        user_id: user_id.to_string(),
        purpose,
        iat: now.timestamp(),
        exp: exp.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| JwtError::EncodingFailed(e.to_string()))
}

/// Verify and decode a token, checking it was issued for `purpose`
pub fn verify_token(token: &str, secret: &str, purpose: TokenPurpose) -> Result<Claims, JwtError> {
    let mut validation = Validation::default();
    validation.validate_exp = true;
    validation.leeway = 0;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => JwtError::TokenExpired,
        _ => JwtError::DecodingFailed(e.to_string()),
    })?;

    if token_data.claims.purpose != purpose {
        return Err(JwtError::InvalidToken(format!(
            "expected {} token",
            purpose.as_str()
        )));
    }

    Ok(token_data.claims)
}
