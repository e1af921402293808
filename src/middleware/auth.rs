//! Authentication middleware
//!
//! [`require_auth`] is layered over every protected route. It verifies the
//! bearer access token once and leaves an [`AuthenticatedUser`] in the
//! request extensions for handlers to extract.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::{AccountError, AccountService, JwtError};
use crate::error::ApiError;

/// Authenticated user attached by [`require_auth`]
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
}

/// Reject requests without a valid `Authorization: Bearer` access token
pub async fn require_auth(
    State(accounts): State<Arc<AccountService>>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or_else(|| {
        ApiError::Unauthorized("Authorization header with Bearer token required".to_string())
    })?;

    let (_, user) = accounts
        .authenticate(bearer.token())
        .await
        .map_err(|e| match e {
            AccountError::Token(JwtError::TokenExpired) => {
                ApiError::Unauthorized("Token has expired".to_string())
            }
            AccountError::Token(_) | AccountError::UserNotFound => {
                ApiError::Unauthorized("Invalid token".to_string())
            }
            other => ApiError::from(other),
        })?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        email: user.email,
    });

    Ok(next.run(request).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))
    }
}
