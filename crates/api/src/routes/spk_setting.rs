//! Per-period letter-setting (SPK setting) routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use validator::Validate;

use domain::models::{CreateSpkSettingRequest, SpkSetting, UpdateSpkSettingRequest};
use persistence::repositories::{SpkSettingRepository, TemplateSpkRepository};

use crate::app::AppState;
use crate::error::{self, ApiError};
use crate::extractors::AuthUser;

/// List all letter settings.
///
/// GET /api/spk-setting
pub async fn list_setting(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = SpkSettingRepository::new(state.pool.clone());
    let data: Vec<SpkSetting> = repo.list().await?.into_iter().map(SpkSetting::from).collect();
    Ok(error::success(data))
}

/// Create the letter setting for a period. One setting per `YYYY-MM`
/// period string; a malformed period is a 400, a duplicate a 409.
///
/// POST /api/spk-setting
pub async fn create_setting(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(request): Json<CreateSpkSettingRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    shared::validation::validate_periode(&request.periode)
        .map_err(|_| ApiError::BadRequest("Periode harus berformat YYYY-MM".to_string()))?;
    request.validate()?;

    let repo = SpkSettingRepository::new(state.pool.clone());
    if repo.find_by_periode(&request.periode).await?.is_some() {
        return Err(ApiError::Conflict(format!(
            "Setting untuk periode {} sudah ada",
            request.periode
        )));
    }

    if let Some(template_id) = request.template_id {
        let template_repo = TemplateSpkRepository::new(state.pool.clone());
        template_repo
            .find_by_id(template_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Template tidak ditemukan".to_string()))?;
    }

    let entity = repo
        .create(
            &request.periode,
            &request.nama_ppk,
            &request.nip_ppk,
            &request.jabatan_ppk,
            request.tanggal_surat,
            request.nomor_surat_format.as_deref(),
            request.komponen_honor.as_deref(),
            request.template_id,
        )
        .await?;

    info!(periode = %entity.periode, "SPK setting dibuat");

    Ok((StatusCode::CREATED, error::success(SpkSetting::from(entity))))
}

/// Get the setting for one period.
///
/// GET /api/spk-setting/periode/:periode
pub async fn get_setting_by_periode(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(periode): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    shared::validation::validate_periode(&periode)
        .map_err(|_| ApiError::BadRequest("Periode harus berformat YYYY-MM".to_string()))?;

    let repo = SpkSettingRepository::new(state.pool.clone());
    let entity = repo
        .find_by_periode(&periode)
        .await?
        .ok_or_else(|| ApiError::NotFound("Setting tidak ditemukan".to_string()))?;

    Ok(error::success(SpkSetting::from(entity)))
}

/// Get one setting.
///
/// GET /api/spk-setting/:id
pub async fn get_setting(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = SpkSettingRepository::new(state.pool.clone());
    let entity = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Setting tidak ditemukan".to_string()))?;

    Ok(error::success(SpkSetting::from(entity)))
}

/// Update a setting. The period itself is immutable; absent fields are
/// left untouched.
///
/// PUT /api/spk-setting/:id
pub async fn update_setting(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdateSpkSettingRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    request.validate()?;

    if let Some(template_id) = request.template_id {
        let template_repo = TemplateSpkRepository::new(state.pool.clone());
        template_repo
            .find_by_id(template_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Template tidak ditemukan".to_string()))?;
    }

    let repo = SpkSettingRepository::new(state.pool.clone());
    let entity = repo
        .update(
            id,
            request.nama_ppk.as_deref(),
            request.nip_ppk.as_deref(),
            request.jabatan_ppk.as_deref(),
            request.tanggal_surat,
            request.nomor_surat_format.as_deref(),
            request.komponen_honor.as_deref(),
            request.template_id,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Setting tidak ditemukan".to_string()))?;

    info!(setting_id = id, "SPK setting diperbarui");

    Ok(error::success(SpkSetting::from(entity)))
}

/// Delete a setting.
///
/// DELETE /api/spk-setting/:id
pub async fn delete_setting(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = SpkSettingRepository::new(state.pool.clone());
    let removed = repo.delete(id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Setting tidak ditemukan".to_string()));
    }

    info!(setting_id = id, "SPK setting dihapus");

    Ok(error::message_only("Setting berhasil dihapus"))
}
