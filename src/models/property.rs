//! Property and inventory models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

/// Inventory entry embedded in a property; it has no table of its own
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    #[serde(default)]
    pub property_space_name: Option<String>,
    #[serde(default)]
    pub property_inventory_type: Option<String>,
    #[serde(default)]
    pub other_property_type: Option<String>,
    #[serde(default)]
    pub capacity: Option<String>,
    #[serde(default)]
    pub amenities: Option<String>,
    #[serde(default)]
    pub availability_status: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Parse the `inventory` form field (a JSON array of entries).
///
/// A missing or blank field is an empty inventory.
pub fn parse_inventory(raw: Option<&str>) -> Result<Vec<Inventory>, serde_json::Error> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Vec::new()),
        Some(text) => serde_json::from_str(text),
    }
}

/// Stored property record
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PropertyInformation {
    pub id: Uuid,
    pub property_type: Option<String>,
    pub property_name: Option<String>,
    pub phone_number: Option<String>,
    pub email_address: Option<String>,
    pub address: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub pin_code: Option<String>,
    pub logo: String,
    pub inventory: Json<Vec<Inventory>>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a property
#[derive(Debug, Clone, Default)]
pub struct NewPropertyInformation {
    pub property_type: Option<String>,
    pub property_name: Option<String>,
    pub phone_number: Option<String>,
    pub email_address: Option<String>,
    pub address: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub pin_code: Option<String>,
    pub logo: String,
    pub inventory: Vec<Inventory>,
}
