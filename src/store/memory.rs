use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{HealthCheck, PropertyStore, StoreError, UserStore};
use crate::models::{NewPropertyInformation, NewUser, PropertyInformation, User};

/// In-process store with the same uniqueness rules as the database
#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<RwLock<Vec<User>>>,
    properties: Arc<RwLock<Vec<PropertyInformation>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn properties(&self) -> Vec<PropertyInformation> {
        self.properties.read().await.clone()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        // check and insert under one write lock, like a unique index would
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateEmail);
        }

        let record = User {
            id: Uuid::new_v4(),
            full_name: user.full_name,
            email: user.email,
            password: user.password_hash,
            receive_emails: user.receive_emails,
            created_at: Utc::now(),
        };
        users.push(record.clone());

        Ok(record)
    }
}

#[async_trait]
impl PropertyStore for MemoryStore {
    async fn insert(
        &self,
        property: NewPropertyInformation,
    ) -> Result<PropertyInformation, StoreError> {
        let record = PropertyInformation {
            id: Uuid::new_v4(),
            property_type: property.property_type,
            property_name: property.property_name,
            phone_number: property.phone_number,
            email_address: property.email_address,
            address: property.address,
            state: property.state,
            city: property.city,
            pin_code: property.pin_code,
            logo: property.logo,
            inventory: Json(property.inventory),
            created_at: Utc::now(),
        };
        self.properties.write().await.push(record.clone());

        Ok(record)
    }
}

#[async_trait]
impl HealthCheck for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
