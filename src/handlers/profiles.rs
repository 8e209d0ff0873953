use axum::{
    extract::{Path, State},
    Json,
};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::Deserialize;
use uuid::Uuid;

use crate::entities::profile;
use crate::error::{AppError, AppResult};
use crate::handlers::require_text;
use crate::AppState;

const DEFAULT_ROLE: &str = "user";

#[derive(Debug, Deserialize)]
pub struct CreateProfileRequest {
    /// Identifier issued by the identity provider
    pub id: Uuid,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: Option<String>,
}

/// Create the marketplace profile for an authenticated user
pub async fn create_profile(
    State(state): State<AppState>,
    Json(payload): Json<CreateProfileRequest>,
) -> AppResult<Json<profile::Model>> {
    require_text(&payload.full_name, "Full name")?;

    let existing = profile::Entity::find_by_id(payload.id)
        .one(&state.db)
        .await?;

    if existing.is_some() {
        return Err(AppError::Conflict("Profile already exists".to_string()));
    }

    let role = payload
        .role
        .map(|r| r.trim().to_lowercase())
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| DEFAULT_ROLE.to_string());

    let new_profile = profile::ActiveModel {
        id: Set(payload.id),
        full_name: Set(payload.full_name.trim().to_string()),
        phone: Set(payload
            .phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())),
        role: Set(role),
        ..Default::default()
    };

    let profile = new_profile.insert(&state.db).await?;
    tracing::info!(profile_id = %profile.id, "Profile created");

    Ok(Json(profile))
}

/// Get a profile
pub async fn get_profile(
    State(state): State<AppState>,
    Path(profile_id): Path<Uuid>,
) -> AppResult<Json<profile::Model>> {
    let profile = profile::Entity::find_by_id(profile_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    Ok(Json(profile))
}
