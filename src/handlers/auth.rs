//! Account HTTP handlers
//!
//! Sign-up, sign-in and password-reset endpoints.

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::models::{
    ForgotPasswordRequest, MessageResponse, SigninRequest, SigninResponse, SignupRequest,
};
use crate::state::AppState;

/// POST /signup - Register a new user
pub async fn signup(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<SignupRequest>, ApiError>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    state.account_service.signup(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created successfully")),
    ))
}

/// POST /signin - Check credentials and issue an access token
///
/// Responds 201 on success, which existing clients rely on.
pub async fn signin(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<SigninRequest>, ApiError>,
) -> ApiResult<(StatusCode, Json<SigninResponse>)> {
    req.validate()
        .map_err(|_| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    let (token, user) = state
        .account_service
        .signin(&req.email, &req.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SigninResponse {
            token,
            user: user.into(),
        }),
    ))
}

/// POST /forgot-password - Email a password reset link
pub async fn forgot_password(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<ForgotPasswordRequest>, ApiError>,
) -> ApiResult<Json<MessageResponse>> {
    req.validate()?;

    state
        .account_service
        .request_password_reset(&req.email)
        .await?;

    Ok(Json(MessageResponse::new(
        "Password reset link sent to your email",
    )))
}
