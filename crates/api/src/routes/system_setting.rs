//! Key-value application setting routes.

use axum::{extract::State, Json};
use tracing::info;
use validator::Validate;

use domain::models::{SystemSetting, UpsertSettingRequest, PUBLIC_KEYS};
use persistence::repositories::SystemSettingRepository;

use crate::app::AppState;
use crate::error::{self, ApiError};
use crate::extractors::AuthUser;

/// Public settings (logo, background) — no authentication, consumed by
/// the login page.
///
/// GET /api/settings/public
pub async fn public_settings(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = SystemSettingRepository::new(state.pool.clone());
    let data: Vec<SystemSetting> = repo
        .get_many(&PUBLIC_KEYS)
        .await?
        .into_iter()
        .map(SystemSetting::from)
        .collect();

    Ok(error::success(data))
}

/// List every setting.
///
/// GET /api/settings
pub async fn list_settings(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = SystemSettingRepository::new(state.pool.clone());
    let data: Vec<SystemSetting> = repo
        .list()
        .await?
        .into_iter()
        .map(SystemSetting::from)
        .collect();

    Ok(error::success(data))
}

/// Insert or overwrite one setting.
///
/// PUT /api/settings
pub async fn upsert_setting(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<UpsertSettingRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    request.validate()?;

    let repo = SystemSettingRepository::new(state.pool.clone());
    let entity = repo.upsert(&request.key, &request.value).await?;

    info!(key = %entity.key, updated_by = %auth.username, "Setting disimpan");

    Ok(error::success(SystemSetting::from(entity)))
}
