//! Property routes (bearer token required)

use axum::{extract::DefaultBodyLimit, middleware, routing::post, Router};

use crate::handlers::property;
use crate::middleware::require_auth;
use crate::state::AppState;

pub fn property_routes(state: &AppState, max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/property-setup", post(property::property_setup))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .route_layer(middleware::from_fn_with_state(
            state.account_service.clone(),
            require_auth,
        ))
}
