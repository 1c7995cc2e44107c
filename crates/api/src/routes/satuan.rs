//! Unit-of-measure (satuan kegiatan) CRUD routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use validator::Validate;

use domain::models::{CreateSatuanRequest, SatuanKegiatan, UpdateSatuanRequest};
use persistence::repositories::SatuanRepository;

use crate::app::AppState;
use crate::error::{self, ApiError};
use crate::extractors::AuthUser;

/// List all units.
///
/// GET /api/satuan
pub async fn list_satuan(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = SatuanRepository::new(state.pool.clone());
    let data: Vec<SatuanKegiatan> = repo
        .list()
        .await?
        .into_iter()
        .map(SatuanKegiatan::from)
        .collect();
    Ok(error::success(data))
}

/// Create a unit.
///
/// POST /api/satuan
pub async fn create_satuan(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(request): Json<CreateSatuanRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    request.validate()?;

    let repo = SatuanRepository::new(state.pool.clone());
    let entity = repo
        .create(&request.nama_satuan, request.alias.as_deref())
        .await
        .map_err(|e| match ApiError::from(e) {
            ApiError::Conflict(_) => {
                ApiError::Conflict(format!("Satuan {} sudah terdaftar", request.nama_satuan))
            }
            other => other,
        })?;

    info!(satuan_id = entity.id, "Satuan dibuat");

    Ok((StatusCode::CREATED, error::success(SatuanKegiatan::from(entity))))
}

/// Get one unit.
///
/// GET /api/satuan/:id
pub async fn get_satuan(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = SatuanRepository::new(state.pool.clone());
    let entity = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Satuan tidak ditemukan".to_string()))?;

    Ok(error::success(SatuanKegiatan::from(entity)))
}

/// Update a unit. Absent fields are left untouched.
///
/// PUT /api/satuan/:id
pub async fn update_satuan(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdateSatuanRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    request.validate()?;

    let repo = SatuanRepository::new(state.pool.clone());
    let entity = repo
        .update(id, request.nama_satuan.as_deref(), request.alias.as_deref())
        .await?
        .ok_or_else(|| ApiError::NotFound("Satuan tidak ditemukan".to_string()))?;

    info!(satuan_id = id, "Satuan diperbarui");

    Ok(error::success(SatuanKegiatan::from(entity)))
}

/// Delete a unit. A 409 is returned while honor rows still reference it.
///
/// DELETE /api/satuan/:id
pub async fn delete_satuan(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let repo = SatuanRepository::new(state.pool.clone());
    let removed = repo.delete(id).await.map_err(|e| match ApiError::from(e) {
        ApiError::Conflict(_) => {
            ApiError::Conflict("Satuan masih dipakai honorarium".to_string())
        }
        other => other,
    })?;

    if removed == 0 {
        return Err(ApiError::NotFound("Satuan tidak ditemukan".to_string()));
    }

    info!(satuan_id = id, "Satuan dihapus");

    Ok(error::message_only("Satuan berhasil dihapus"))
}
