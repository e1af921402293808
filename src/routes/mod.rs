//! Route definitions for PropDesk API

mod auth;
mod property;

use axum::{routing::get, Router};

use crate::handlers::health_check;
use crate::middleware::request_tracing;
use crate::state::AppState;

pub use auth::auth_routes;
pub use property::property_routes;

/// Full application router (without CORS, which depends on deployment)
pub fn app(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(auth_routes())
        .merge(property_routes(&state, max_upload_bytes))
        .with_state(state)
        .layer(axum::middleware::from_fn(request_tracing))
}
