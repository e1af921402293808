//! Application state shared across handlers

use std::sync::Arc;

use crate::auth::AccountService;
use crate::store::{HealthCheck, PropertyStore};
use crate::upload::UploadDir;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<AccountService>,
    pub property_store: Arc<dyn PropertyStore>,
    pub health: Arc<dyn HealthCheck>,
    pub uploads: UploadDir,
}

impl AppState {
    pub fn new(
        account_service: Arc<AccountService>,
        property_store: Arc<dyn PropertyStore>,
        health: Arc<dyn HealthCheck>,
        uploads: UploadDir,
    ) -> Self {
        Self {
            account_service,
            property_store,
            health,
            uploads,
        }
    }
}
