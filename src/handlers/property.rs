//! Property setup handler

use axum::{
    extract::{Multipart, State},
    Json,
};
use axum_extra::extract::WithRejection;

use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthenticatedUser;
use crate::models::{parse_inventory, MessageResponse, NewPropertyInformation};
use crate::state::AppState;
use crate::upload::UploadDir;

/// Form field carrying the logo file
const LOGO_FIELD: &str = "logo";

/// POST /property-setup - Save property details, inventory and logo
pub async fn property_setup(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    WithRejection(multipart, _): WithRejection<Multipart, ApiError>,
) -> ApiResult<Json<MessageResponse>> {
    let mut property = read_property_form(&state.uploads, multipart).await?;

    let owner = user.user_id.to_string();
    for item in property.inventory.iter_mut() {
        if item.user_id.is_none() {
            item.user_id = Some(owner.clone());
        }
    }

    let logo = property.logo.clone();
    match state.property_store.insert(property).await {
        Ok(saved) => {
            tracing::info!(
                property_id = %saved.id,
                user_id = %user.user_id,
                inventory = saved.inventory.len(),
                "Property information saved"
            );
            Ok(Json(MessageResponse::new(
                "Property information saved successfully",
            )))
        }
        Err(e) => {
            discard_upload(&logo).await;
            Err(e.into())
        }
    }
}

/// Read every form field, saving the logo as it streams past. If anything
/// after the logo fails, the saved file is removed again.
async fn read_property_form(
    uploads: &UploadDir,
    mut multipart: Multipart,
) -> ApiResult<NewPropertyInformation> {
    let mut property = NewPropertyInformation::default();
    let mut logo: Option<String> = None;
    let mut inventory_raw: Option<String> = None;

    let result = async {
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            if field.file_name().is_some() {
                if name != LOGO_FIELD {
                    return Err(ApiError::BadRequest(format!(
                        "Unexpected file field: {name}"
                    )));
                }
                if logo.is_some() {
                    return Err(ApiError::BadRequest(
                        "Only one logo file is allowed".to_string(),
                    ));
                }
                logo = Some(uploads.save_field(field).await?);
                continue;
            }

            let value = field.text().await?;
            match name.as_str() {
                "propertyType" => property.property_type = Some(value),
                "propertyName" => property.property_name = Some(value),
                "phoneNumber" => property.phone_number = Some(value),
                "email" => property.email_address = Some(value),
                "address" => property.address = Some(value),
                "state" => property.state = Some(value),
                "city" => property.city = Some(value),
                "pinCode" => property.pin_code = Some(value),
                "inventory" => inventory_raw = Some(value),
                _ => tracing::debug!(field = %name, "Ignoring unknown form field"),
            }
        }

        property.inventory = parse_inventory(inventory_raw.as_deref())
            .map_err(|e| ApiError::BadRequest(format!("Invalid inventory: {e}")))?;

        Ok::<(), ApiError>(())
    }
    .await;

    if let Err(e) = result {
        if let Some(path) = &logo {
            discard_upload(path).await;
        }
        return Err(e);
    }

    property.logo = logo.ok_or_else(|| ApiError::BadRequest("Logo file is required".to_string()))?;

    Ok(property)
}

async fn discard_upload(path: &str) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        tracing::warn!(path = %path, error = %e, "Failed to remove discarded upload");
    }
}
