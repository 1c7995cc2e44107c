//! Assignment-letter template routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use validator::Validate;

use domain::models::{
    BagianTeks, CreateTemplateRequest, MasterTemplateSpk, Pasal, TemplateLengkap,
    UpdateTemplateRequest,
};
use persistence::repositories::TemplateSpkRepository;

use crate::app::AppState;
use crate::error::{self, ApiError};
use crate::extractors::AuthUser;

async fn lengkap(
    repo: &TemplateSpkRepository,
    template: persistence::entities::MasterTemplateSpkEntity,
) -> Result<TemplateLengkap, ApiError> {
    let bagian = repo.bagian_for(template.id).await?;
    let pasal = repo.pasal_for(template.id).await?;
    Ok(TemplateLengkap {
        template: MasterTemplateSpk::from(template),
        bagian: bagian.into_iter().map(BagianTeks::from).collect(),
        pasal: pasal.into_iter().map(Pasal::from).collect(),
    })
}

/// List template headers.
///
/// GET /api/template-spk
pub async fn list_template(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = TemplateSpkRepository::new(state.pool.clone());
    let data: Vec<MasterTemplateSpk> = repo
        .list()
        .await?
        .into_iter()
        .map(MasterTemplateSpk::from)
        .collect();
    Ok(error::success(data))
}

/// Create a template with its five body sections and ordered articles.
///
/// POST /api/template-spk
pub async fn create_template(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(request): Json<CreateTemplateRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    request.validate()?;

    let repo = TemplateSpkRepository::new(state.pool.clone());
    let bagian = request.bagian.unwrap_or_default();
    let pasal = request.pasal.unwrap_or_default();

    let entity = repo
        .create_with_parts(&request.nama_template, &bagian, &pasal)
        .await?;

    info!(template_id = entity.id, nama = %entity.nama_template, "Template SPK dibuat");

    let data = lengkap(&repo, entity).await?;
    Ok((StatusCode::CREATED, error::success(data)))
}

/// Get one template with sections and articles.
///
/// GET /api/template-spk/:id
pub async fn get_template(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = TemplateSpkRepository::new(state.pool.clone());
    let entity = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Template tidak ditemukan".to_string()))?;

    let data = lengkap(&repo, entity).await?;
    Ok(error::success(data))
}

/// The active template, used by the letter renderer.
///
/// GET /api/template-spk/aktif
pub async fn get_template_aktif(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = TemplateSpkRepository::new(state.pool.clone());
    let entity = repo
        .find_active()
        .await?
        .ok_or_else(|| ApiError::NotFound("Belum ada template aktif".to_string()))?;

    let data = lengkap(&repo, entity).await?;
    Ok(error::success(data))
}

/// Update a template. Sections upsert by kind; a supplied article list
/// replaces the previous articles wholesale (order = array order). No
/// optimistic locking: concurrent edits are last-write-wins.
///
/// PUT /api/template-spk/:id
pub async fn update_template(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdateTemplateRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    request.validate()?;

    let repo = TemplateSpkRepository::new(state.pool.clone());
    let entity = repo
        .update_with_parts(
            id,
            request.nama_template.as_deref(),
            request.bagian.as_deref(),
            request.pasal.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Template tidak ditemukan".to_string()))?;

    info!(template_id = id, "Template SPK diperbarui");

    let data = lengkap(&repo, entity).await?;
    Ok(error::success(data))
}

/// Activate a template. All others are deactivated in the same
/// transaction, so at most one template is ever active.
///
/// POST /api/template-spk/:id/aktifkan
pub async fn aktifkan_template(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = TemplateSpkRepository::new(state.pool.clone());
    let entity = repo
        .set_active(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Template tidak ditemukan".to_string()))?;

    info!(template_id = id, activated_by = %auth.username, "Template SPK diaktifkan");

    Ok(error::success(MasterTemplateSpk::from(entity)))
}

/// Delete a template. Sections and articles cascade; letter settings
/// referencing it fall back to no template.
///
/// DELETE /api/template-spk/:id
pub async fn delete_template(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = TemplateSpkRepository::new(state.pool.clone());
    let removed = repo.delete(id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Template tidak ditemukan".to_string()));
    }

    info!(template_id = id, "Template SPK dihapus");

    Ok(error::message_only("Template berhasil dihapus"))
}
