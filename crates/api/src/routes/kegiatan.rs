//! Activity (kegiatan) CRUD routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use validator::Validate;

use domain::models::{CreateKegiatanRequest, Kegiatan, UpdateKegiatanRequest};
use persistence::repositories::KegiatanRepository;

use crate::app::AppState;
use crate::error::{self, ApiError};
use crate::extractors::AuthUser;

/// List all activities.
///
/// GET /api/kegiatan
pub async fn list_kegiatan(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = KegiatanRepository::new(state.pool.clone());
    let data: Vec<Kegiatan> = repo.list().await?.into_iter().map(Kegiatan::from).collect();
    Ok(error::success(data))
}

/// Create an activity.
///
/// POST /api/kegiatan
pub async fn create_kegiatan(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(request): Json<CreateKegiatanRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    request.validate()?;

    let repo = KegiatanRepository::new(state.pool.clone());
    let entity = repo
        .create(&request.nama_kegiatan, request.deskripsi.as_deref())
        .await?;

    info!(kegiatan_id = entity.id, nama = %entity.nama_kegiatan, "Kegiatan dibuat");

    Ok((StatusCode::CREATED, error::success(Kegiatan::from(entity))))
}

/// Get one activity.
///
/// GET /api/kegiatan/:id
pub async fn get_kegiatan(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = KegiatanRepository::new(state.pool.clone());
    let entity = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Kegiatan tidak ditemukan".to_string()))?;

    Ok(error::success(Kegiatan::from(entity)))
}

/// Update an activity. Absent fields are left untouched.
///
/// PUT /api/kegiatan/:id
pub async fn update_kegiatan(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdateKegiatanRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    request.validate()?;

    let repo = KegiatanRepository::new(state.pool.clone());
    let entity = repo
        .update(id, request.nama_kegiatan.as_deref(), request.deskripsi.as_deref())
        .await?
        .ok_or_else(|| ApiError::NotFound("Kegiatan tidak ditemukan".to_string()))?;

    info!(kegiatan_id = id, "Kegiatan diperbarui");

    Ok(error::success(Kegiatan::from(entity)))
}

/// Delete an activity. Its sub-activities (and their rosters and rates)
/// cascade.
///
/// DELETE /api/kegiatan/:id
pub async fn delete_kegiatan(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = KegiatanRepository::new(state.pool.clone());
    let removed = repo.delete(id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Kegiatan tidak ditemukan".to_string()));
    }

    info!(kegiatan_id = id, "Kegiatan dihapus");

    Ok(error::message_only("Kegiatan berhasil dihapus"))
}
