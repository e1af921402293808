use async_trait::async_trait;
use chrono::Utc;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use super::{HealthCheck, PropertyStore, StoreError, UserStore};
use crate::db;
use crate::models::{NewPropertyInformation, NewUser, PropertyInformation, User};

/// SQLSTATE for unique_violation
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgStore {
    db_pool: PgPool,
}

impl PgStore {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.db_pool
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
    )
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, full_name, email, password, receive_emails, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, full_name, email, password, receive_emails, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(user)
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, full_name, email, password, receive_emails, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, full_name, email, password, receive_emails, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.receive_emails)
        .bind(Utc::now())
        .fetch_one(&self.db_pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::DuplicateEmail
            } else {
                e.into()
            }
        })
    }
}

#[async_trait]
impl PropertyStore for PgStore {
    async fn insert(
        &self,
        property: NewPropertyInformation,
    ) -> Result<PropertyInformation, StoreError> {
        let record = sqlx::query_as::<_, PropertyInformation>(
            r#"
            INSERT INTO property_informations (
                id, property_type, property_name, phone_number, email_address,
                address, state, city, pin_code, logo, inventory, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id, property_type, property_name, phone_number, email_address,
                      address, state, city, pin_code, logo, inventory, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&property.property_type)
        .bind(&property.property_name)
        .bind(&property.phone_number)
        .bind(&property.email_address)
        .bind(&property.address)
        .bind(&property.state)
        .bind(&property.city)
        .bind(&property.pin_code)
        .bind(&property.logo)
        .bind(Json(&property.inventory))
        .bind(Utc::now())
        .fetch_one(&self.db_pool)
        .await?;

        Ok(record)
    }
}

#[async_trait]
impl HealthCheck for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        db::check_health(&self.db_pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))
    }
}
