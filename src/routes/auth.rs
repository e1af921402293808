//! Account routes

use axum::{routing::post, Router};

use crate::handlers::auth;
use crate::state::AppState;

/// Public account routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/signin", post(auth::signin))
        .route("/forgot-password", post(auth::forgot_password))
}
