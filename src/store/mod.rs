//! Record stores
//!
//! Handlers and services only see the [`UserStore`] and [`PropertyStore`]
//! traits. [`PgStore`] backs them with PostgreSQL; [`MemoryStore`] keeps
//! everything in process and is what the router tests run against.

mod memory;
mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{NewPropertyInformation, NewUser, PropertyInformation, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("A user with this email already exists")]
    DuplicateEmail,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Insert a user. Fails with [`StoreError::DuplicateEmail`] when the email
    /// is already taken, regardless of any earlier lookup.
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;
}

#[async_trait]
pub trait PropertyStore: Send + Sync {
    async fn insert(
        &self,
        property: NewPropertyInformation,
    ) -> Result<PropertyInformation, StoreError>;
}

/// Connectivity probe used by the health endpoint
#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn ping(&self) -> Result<(), StoreError>;
}
